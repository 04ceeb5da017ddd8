//! Snapshot repository contract and flat-file CSV implementation.
//!
//! # Responsibility
//! - Provide load/persist/list access to per-day roster snapshots.
//! - Own the snapshot wire format: `Boarder_Number,Eaten` rows, one file
//!   per day key, file name `dining_report_<daykey>.csv`.
//!
//! # Invariants
//! - An absent snapshot is `Ok(None)`, never an error.
//! - `persist` writes the full roster; last write wins.
//! - Reads accept both `True`/`False` and `true`/`false` flag literals
//!   (earlier producers wrote the capitalized form); writes use lowercase.

use crate::model::day::DayKey;
use crate::model::roster::Roster;
use log::{debug, info};
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const SNAPSHOT_PREFIX: &str = "dining_report_";
const SNAPSHOT_SUFFIX: &str = ".csv";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for snapshot persistence and enumeration.
#[derive(Debug)]
pub enum RepoError {
    Io(std::io::Error),
    Csv(csv::Error),
    MalformedUpload(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Csv(err) => write!(f, "{err}"),
            Self::MalformedUpload(detail) => write!(f, "malformed upload: {detail}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Csv(err) => Some(err),
            Self::MalformedUpload(_) => None,
        }
    }
}

impl From<std::io::Error> for RepoError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for RepoError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

/// Day-keyed snapshot store contract.
///
/// The service layer talks only to this trait; the active roster in memory
/// is the caller's, and every persist call receives the full roster.
pub trait SnapshotRepository {
    fn load(&self, day: &DayKey) -> RepoResult<Option<Roster>>;
    fn persist(&self, day: &DayKey, roster: &Roster) -> RepoResult<()>;
    fn list_days(&self) -> RepoResult<Vec<DayKey>>;
}

/// One snapshot row on the wire.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotRow {
    #[serde(rename = "Boarder_Number")]
    boarder_number: String,
    #[serde(rename = "Eaten", deserialize_with = "deserialize_eaten")]
    eaten: bool,
}

/// Parses an eaten-flag literal, case-insensitively.
pub(crate) fn parse_eaten_literal(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn deserialize_eaten<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_eaten_literal(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid eaten flag `{raw}`")))
}

/// Flat-file CSV snapshot repository rooted at one directory.
pub struct CsvSnapshotRepository {
    dir: PathBuf,
}

impl CsvSnapshotRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Deterministic snapshot path for a day key.
    pub fn snapshot_path(&self, day: &DayKey) -> PathBuf {
        self.dir
            .join(format!("{SNAPSHOT_PREFIX}{day}{SNAPSHOT_SUFFIX}"))
    }
}

impl SnapshotRepository for CsvSnapshotRepository {
    fn load(&self, day: &DayKey) -> RepoResult<Option<Roster>> {
        let path = self.snapshot_path(day);
        if !path.exists() {
            debug!("event=snapshot_load module=repo status=absent day={day}");
            return Ok(None);
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&path)?;

        let mut rows = Vec::new();
        for row in reader.deserialize::<SnapshotRow>() {
            let row = row?;
            rows.push((row.boarder_number, row.eaten));
        }

        let roster = Roster::from_rows(rows);
        info!(
            "event=snapshot_load module=repo status=ok day={day} records={}",
            roster.len()
        );
        Ok(Some(roster))
    }

    fn persist(&self, day: &DayKey, roster: &Roster) -> RepoResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.snapshot_path(day);
        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_path(&path)?;

        // The writer emits the header with the first row; an empty roster
        // still needs the header line on disk.
        if roster.is_empty() {
            writer.write_record(["Boarder_Number", "Eaten"])?;
        }
        for record in roster.records() {
            writer.serialize(SnapshotRow {
                boarder_number: record.id.to_string(),
                eaten: record.eaten,
            })?;
        }
        writer.flush().map_err(RepoError::Io)?;

        debug!(
            "event=snapshot_persist module=repo status=ok day={day} records={}",
            roster.len()
        );
        Ok(())
    }

    fn list_days(&self) -> RepoResult<Vec<DayKey>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut days = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            let Some(day) = name
                .strip_prefix(SNAPSHOT_PREFIX)
                .and_then(|rest| rest.strip_suffix(SNAPSHOT_SUFFIX))
            else {
                continue;
            };
            // Files that share the name shape but carry an unparseable date
            // are not ours to report.
            if let Ok(day) = DayKey::parse(day) {
                days.push(day);
            }
        }

        days.sort_unstable();
        Ok(days)
    }
}
