//! Attendance roster and the mark decision procedure.
//!
//! # Responsibility
//! - Hold one day's ordered attendance records in memory.
//! - Select which record a mark entry flips, deterministically.
//! - Recompute summary counts on demand.
//!
//! # Invariants
//! - Record order is stable across mutations; records are never reordered
//!   or removed, only replaced wholesale by a new roster.
//! - Exactly one flag transitions false -> true per `Marked` outcome.
//! - Lookup uses the roster-wide `IdMode` established at build time.

use crate::model::record::{validate_input_token, AttendanceRecord, BoarderId, IdMode};
use serde::{Deserialize, Serialize};

/// Terminal outcome of a single mark invocation.
///
/// Every outcome is a value returned to the caller; none is fatal. There is
/// no cross-invocation state beyond the roster itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkOutcome {
    /// The raw token was empty or contained non-digit characters. The
    /// roster was not consulted.
    InvalidInput,
    /// No record matches the identifier.
    NotFound,
    /// Every record matching the identifier is already flagged.
    AlreadyMarked,
    /// One record was flipped: the first unmarked match in load order.
    Marked { position: usize, id: BoarderId },
}

/// Attendance counts for one roster state.
///
/// Recomputed from the flags on every query rather than tracked
/// incrementally, so `eaten + not_eaten == total` holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub eaten: usize,
    pub not_eaten: usize,
}

/// Ordered collection of attendance records for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    records: Vec<AttendanceRecord>,
    mode: IdMode,
}

impl Roster {
    /// Creates an empty roster.
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            mode: IdMode::Numeric,
        }
    }

    /// Builds a roster from `(identifier token, eaten)` rows in source order.
    ///
    /// Attempts integer coercion across the whole identifier column first;
    /// one non-numeric token switches the entire roster to opaque token
    /// comparison. Empty input yields an empty roster, not an error.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (String, bool)>,
    {
        let rows: Vec<(String, bool)> = rows
            .into_iter()
            .map(|(token, eaten)| (token.trim().to_string(), eaten))
            .collect();

        let numeric: Option<Vec<i64>> = rows
            .iter()
            .map(|(token, _)| token.parse::<i64>().ok())
            .collect();

        match numeric {
            Some(numbers) => Self {
                records: numbers
                    .into_iter()
                    .zip(rows)
                    .map(|(number, (_, eaten))| {
                        AttendanceRecord::new(BoarderId::Number(number), eaten)
                    })
                    .collect(),
                mode: IdMode::Numeric,
            },
            None => Self {
                records: rows
                    .into_iter()
                    .map(|(token, eaten)| AttendanceRecord::new(BoarderId::Token(token), eaten))
                    .collect(),
                mode: IdMode::Opaque,
            },
        }
    }

    pub fn mode(&self) -> IdMode {
        self.mode
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns all positions whose identifier equals `id`, in roster order.
    ///
    /// An empty result is a legitimate outcome, not a failure.
    pub fn lookup(&self, id: &BoarderId) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.id == *id)
            .map(|(position, _)| position)
            .collect()
    }

    /// Coerces a validated digit token to this roster's comparison mode.
    ///
    /// Returns `None` only when the roster is numeric and the digit string
    /// does not fit an `i64`; such a token cannot match any record.
    fn coerce_token(&self, digits: &str) -> Option<BoarderId> {
        match self.mode {
            IdMode::Numeric => digits.parse::<i64>().ok().map(BoarderId::Number),
            IdMode::Opaque => Some(BoarderId::Token(digits.to_string())),
        }
    }

    /// Marks the first unmarked record matching `id`.
    ///
    /// Decision procedure:
    /// 1. No matching position -> `NotFound`.
    /// 2. All matches flagged -> `AlreadyMarked`.
    /// 3. Otherwise flip the lowest-position unmarked match -> `Marked`.
    pub fn mark(&mut self, id: &BoarderId) -> MarkOutcome {
        let matches = self.lookup(id);
        if matches.is_empty() {
            return MarkOutcome::NotFound;
        }

        let first_unmarked = matches
            .into_iter()
            .find(|&position| !self.records[position].eaten);

        match first_unmarked {
            Some(position) => {
                self.records[position].eaten = true;
                MarkOutcome::Marked {
                    position,
                    id: id.clone(),
                }
            }
            None => MarkOutcome::AlreadyMarked,
        }
    }

    /// Validates a raw operator token, then marks.
    ///
    /// Invalid tokens short-circuit to `InvalidInput` without consulting the
    /// roster. This is the pre-mark boundary of the core contract; callers
    /// decide whether a successful mark gets persisted.
    pub fn mark_token(&mut self, raw: &str) -> MarkOutcome {
        let Some(digits) = validate_input_token(raw) else {
            return MarkOutcome::InvalidInput;
        };
        match self.coerce_token(digits) {
            Some(id) => self.mark(&id),
            // A digit string too large for i64 cannot match a numeric roster.
            None => MarkOutcome::NotFound,
        }
    }

    /// Clears every `eaten` flag, unconditionally.
    pub fn reset(&mut self) {
        for record in &mut self.records {
            record.eaten = false;
        }
    }

    /// Recomputes attendance counts from the current flags.
    pub fn summary(&self) -> Summary {
        let total = self.records.len();
        let eaten = self.records.iter().filter(|record| record.eaten).count();
        Summary {
            total,
            eaten,
            not_eaten: total - eaten,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MarkOutcome, Roster};
    use crate::model::record::{BoarderId, IdMode};

    fn rows(tokens: &[&str]) -> Vec<(String, bool)> {
        tokens.iter().map(|t| (t.to_string(), false)).collect()
    }

    #[test]
    fn numeric_column_builds_numeric_roster() {
        let roster = Roster::from_rows(rows(&["101", " 102 ", "101"]));
        assert_eq!(roster.mode(), IdMode::Numeric);
        assert_eq!(roster.records()[1].id, BoarderId::Number(102));
    }

    #[test]
    fn one_opaque_token_switches_whole_roster_to_opaque() {
        let roster = Roster::from_rows(rows(&["101", "A-17", "102"]));
        assert_eq!(roster.mode(), IdMode::Opaque);
        // Numeric-looking ids are kept as literal tokens, so lookup still
        // finds them under string comparison.
        assert_eq!(roster.lookup(&BoarderId::Token("101".to_string())), vec![0]);
        assert_eq!(roster.lookup(&BoarderId::Number(101)), Vec::<usize>::new());
    }

    #[test]
    fn mark_token_in_opaque_mode_matches_literal_tokens() {
        let mut roster = Roster::from_rows(rows(&["101", "A-17"]));
        assert!(matches!(
            roster.mark_token("101"),
            MarkOutcome::Marked { position: 0, .. }
        ));
    }

    #[test]
    fn oversized_digit_token_is_not_found_on_numeric_roster() {
        let mut roster = Roster::from_rows(rows(&["101"]));
        assert_eq!(
            roster.mark_token("99999999999999999999999999"),
            MarkOutcome::NotFound
        );
    }

    #[test]
    fn lookup_preserves_roster_order_for_duplicates() {
        let roster = Roster::from_rows(rows(&["7", "8", "7", "7"]));
        assert_eq!(roster.lookup(&BoarderId::Number(7)), vec![0, 2, 3]);
    }
}
