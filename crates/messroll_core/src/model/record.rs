//! Attendance record and identifier model.
//!
//! # Responsibility
//! - Define the per-diner record stored in a day's roster.
//! - Define the identifier type and the roster-wide comparison mode.
//!
//! # Invariants
//! - `BoarderId` equality never crosses variants: a `Number` is never equal
//!   to a `Token`, even when the token spells the same digits.
//! - A record's identifier is immutable after load; only `eaten` changes.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifier comparison mode for a whole roster.
///
/// Decided once when the roster is built: if every source token coerces to
/// an integer the roster is `Numeric`, otherwise every identifier is kept
/// as its literal token and the roster is `Opaque`. The mode is never mixed
/// within one roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdMode {
    Numeric,
    Opaque,
}

/// One registered diner's identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoarderId {
    /// Integer identifier, used when the whole roster is `IdMode::Numeric`.
    Number(i64),
    /// Literal source token, used when the roster fell back to `IdMode::Opaque`.
    Token(String),
}

impl Display for BoarderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Token(value) => write!(f, "{value}"),
        }
    }
}

/// One meal slot for one identifier.
///
/// Duplicate identifiers in a roster are legal and meaningful: each record
/// is an independent slot, consumed in original load order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: BoarderId,
    pub eaten: bool,
}

impl AttendanceRecord {
    pub fn new(id: BoarderId, eaten: bool) -> Self {
        Self { id, eaten }
    }
}

/// Validates a raw operator token as a boarder-number entry.
///
/// Returns the trimmed digit string, or `None` when the token is empty or
/// contains any non-digit character. Validation happens before identifier
/// coercion so an invalid entry never reaches roster lookup.
pub fn validate_input_token(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(trimmed)
}
