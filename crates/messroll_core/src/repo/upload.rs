//! Upload payload parsing for wholesale roster replacement.
//!
//! # Responsibility
//! - Parse an externally supplied tabular payload into a fresh roster.
//! - Report malformed payloads without touching any existing roster; the
//!   caller swaps rosters only after a successful parse.
//!
//! # Invariants
//! - Column meaning is positional: first column identifier, optional second
//!   column eaten flag (defaults to false when absent).
//! - Empty payloads yield an empty roster, not an error.

use crate::model::roster::Roster;
use crate::repo::snapshot_repo::{parse_eaten_literal, RepoError, RepoResult};
use std::io::Read;

/// Parses an uploaded roster table.
///
/// The first row is treated as a header and skipped. Upload headers vary by
/// producer, so rows are read positionally rather than by header name.
pub fn parse_upload<R: Read>(reader: R) -> RepoResult<Roster> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        // Line numbers are 1-based and the header occupies line 1.
        let line = index + 2;

        let Some(token) = record.get(0) else {
            return Err(RepoError::MalformedUpload(format!(
                "row {line} has no identifier column"
            )));
        };
        if token.is_empty() {
            return Err(RepoError::MalformedUpload(format!(
                "row {line} has an empty identifier"
            )));
        }

        let eaten = match record.get(1) {
            None | Some("") => false,
            Some(flag) => parse_eaten_literal(flag).ok_or_else(|| {
                RepoError::MalformedUpload(format!("row {line} has invalid eaten flag `{flag}`"))
            })?,
        };

        rows.push((token.to_string(), eaten));
    }

    Ok(Roster::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::parse_upload;
    use crate::model::record::BoarderId;
    use crate::model::roster::Roster;

    #[test]
    fn parses_identifier_only_table_with_flags_defaulting_false() {
        let payload = "Boarder_Number\n101\n102\n101\n";
        let roster = parse_upload(payload.as_bytes()).unwrap();
        assert_eq!(roster.len(), 3);
        assert!(roster.records().iter().all(|record| !record.eaten));
        assert_eq!(roster.records()[0].id, BoarderId::Number(101));
    }

    #[test]
    fn parses_two_column_table_with_capitalized_flags() {
        let payload = "Boarder_Number,Eaten\n101,True\n102,False\n";
        let roster = parse_upload(payload.as_bytes()).unwrap();
        assert!(roster.records()[0].eaten);
        assert!(!roster.records()[1].eaten);
    }

    #[test]
    fn empty_payload_yields_empty_roster() {
        let roster = parse_upload("Boarder_Number\n".as_bytes()).unwrap();
        assert_eq!(roster, Roster::empty());
    }

    #[test]
    fn invalid_flag_is_a_malformed_upload() {
        let payload = "Boarder_Number,Eaten\n101,maybe\n";
        let err = parse_upload(payload.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("invalid eaten flag"));
    }

    #[test]
    fn empty_identifier_is_a_malformed_upload() {
        let payload = "Boarder_Number,Eaten\n,true\n";
        let err = parse_upload(payload.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("empty identifier"));
    }
}
