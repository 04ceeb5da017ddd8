//! Attendance session use-case service.
//!
//! # Responsibility
//! - Own the active day's roster exclusively for one operator session.
//! - Drive the mark/reset/upload flows and persist after each mutation.
//!
//! # Invariants
//! - The persistence callback runs synchronously exactly once per applied
//!   mutation, never on `InvalidInput`, `NotFound` or `AlreadyMarked`.
//! - A failed upload parse leaves the previously active roster untouched.
//! - Mutations are applied in memory before the snapshot write; a write
//!   failure therefore leaves memory ahead of durable state until the next
//!   successful persist or reload.

use crate::model::day::DayKey;
use crate::model::roster::{MarkOutcome, Roster, Summary};
use crate::repo::snapshot_repo::{RepoError, SnapshotRepository};
use crate::repo::upload::parse_upload;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Read;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for attendance session operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Snapshot store or upload parse failure with no roster mutation.
    Repo(RepoError),
    /// Snapshot write failed after the in-memory mutation was applied.
    /// Memory and durable state diverge until the next successful persist.
    Persistence(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Persistence(err) => {
                write!(f, "snapshot write failed after in-memory update: {err}")
            }
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// One operator session over one day's roster.
///
/// Single-threaded, request/response: each operation runs to completion
/// before the next is accepted. The roster is owned here and mutated only
/// through this service.
pub struct AttendanceService<R: SnapshotRepository> {
    repo: R,
    day: DayKey,
    roster: Roster,
}

impl<R: SnapshotRepository> AttendanceService<R> {
    /// Opens a session for `day`, loading its prior snapshot when present.
    ///
    /// An absent snapshot starts the session with an empty roster; a roster
    /// only appears on disk once something is persisted.
    pub fn open(repo: R, day: DayKey) -> ServiceResult<Self> {
        let roster = repo.load(&day)?.unwrap_or_else(Roster::empty);
        info!(
            "event=open_day module=service status=ok day={day} records={}",
            roster.len()
        );
        Ok(Self { repo, day, roster })
    }

    pub fn day(&self) -> &DayKey {
        &self.day
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Replaces the active roster wholesale from an uploaded table.
    ///
    /// Parses first and swaps only on success, then persists the fresh
    /// roster once. On parse failure the old roster stays active.
    pub fn replace_from_upload<T: Read>(&mut self, reader: T) -> ServiceResult<&Roster> {
        let fresh = match parse_upload(reader) {
            Ok(roster) => roster,
            Err(err) => {
                warn!(
                    "event=upload_replace module=service status=rejected day={} error={err}",
                    self.day
                );
                return Err(err.into());
            }
        };

        self.roster = fresh;
        info!(
            "event=upload_replace module=service status=ok day={} records={}",
            self.day,
            self.roster.len()
        );
        self.persist_active()?;
        Ok(&self.roster)
    }

    /// Marks attendance for one raw operator token.
    ///
    /// A `Marked` outcome persists the full roster synchronously before
    /// returning. The other outcomes never touch the snapshot store.
    pub fn mark(&mut self, raw: &str) -> ServiceResult<MarkOutcome> {
        let outcome = self.roster.mark_token(raw);
        match &outcome {
            MarkOutcome::Marked { position, id } => {
                info!(
                    "event=mark module=service status=marked day={} id={id} position={position}",
                    self.day
                );
                self.persist_active()?;
            }
            MarkOutcome::AlreadyMarked => {
                info!(
                    "event=mark module=service status=already_marked day={}",
                    self.day
                );
            }
            MarkOutcome::NotFound => {
                info!("event=mark module=service status=not_found day={}", self.day);
            }
            MarkOutcome::InvalidInput => {
                warn!(
                    "event=mark module=service status=invalid_input day={}",
                    self.day
                );
            }
        }
        Ok(outcome)
    }

    /// Clears every flag and persists the cleared roster once.
    pub fn reset(&mut self) -> ServiceResult<()> {
        self.roster.reset();
        info!("event=reset module=service status=ok day={}", self.day);
        self.persist_active()
    }

    /// Recomputed attendance counts for the active roster.
    pub fn summary(&self) -> Summary {
        self.roster.summary()
    }

    /// Lists persisted day keys, ascending. Read-only.
    pub fn list_days(&self) -> ServiceResult<Vec<DayKey>> {
        Ok(self.repo.list_days()?)
    }

    /// Loads a historical roster without switching the active session.
    pub fn load_day(&self, day: &DayKey) -> ServiceResult<Option<Roster>> {
        Ok(self.repo.load(day)?)
    }

    fn persist_active(&self) -> ServiceResult<()> {
        match self.repo.persist(&self.day, &self.roster) {
            Ok(()) => Ok(()),
            Err(err) => {
                error!(
                    "event=persist module=service status=error day={} error={err}",
                    self.day
                );
                Err(ServiceError::Persistence(err))
            }
        }
    }
}
