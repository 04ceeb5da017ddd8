//! Calendar day key for roster snapshots.
//!
//! # Responsibility
//! - Identify which day's roster a session or snapshot belongs to.
//! - Round-trip exactly through the `YYYY-MM-DD` wire form.
//!
//! # Invariants
//! - One roster per day key; the key is the only snapshot discriminator.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Calendar date identifying one roster snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

/// Parse error for day key strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayKeyError {
    raw: String,
}

impl Display for DayKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid day key `{}`; expected YYYY-MM-DD", self.raw)
    }
}

impl Error for DayKeyError {}

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the key for the machine's current local date.
    pub fn today() -> Self {
        Self(chrono::Local::now().date_naive())
    }

    /// Parses a `YYYY-MM-DD` string.
    pub fn parse(raw: &str) -> Result<Self, DayKeyError> {
        NaiveDate::parse_from_str(raw.trim(), DAY_KEY_FORMAT)
            .map(Self)
            .map_err(|_| DayKeyError {
                raw: raw.to_string(),
            })
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl Display for DayKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::DayKey;

    #[test]
    fn parse_and_display_round_trip() {
        let key = DayKey::parse("2026-08-06").unwrap();
        assert_eq!(key.to_string(), "2026-08-06");
    }

    #[test]
    fn parse_rejects_malformed_keys() {
        assert!(DayKey::parse("06-08-2026").is_err());
        assert!(DayKey::parse("2026-13-01").is_err());
        assert!(DayKey::parse("yesterday").is_err());
        assert!(DayKey::parse("").is_err());
    }

    #[test]
    fn keys_order_chronologically() {
        let earlier = DayKey::parse("2026-08-05").unwrap();
        let later = DayKey::parse("2026-08-06").unwrap();
        assert!(earlier < later);
    }
}
