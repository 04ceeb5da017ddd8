//! Core domain logic for Messroll, a single-session dining-hall attendance
//! tracker. This crate is the single source of truth for business invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, init_stderr_logging};
pub use model::day::{DayKey, DayKeyError};
pub use model::record::{validate_input_token, AttendanceRecord, BoarderId, IdMode};
pub use model::roster::{MarkOutcome, Roster, Summary};
pub use repo::snapshot_repo::{
    CsvSnapshotRepository, RepoError, RepoResult, SnapshotRepository,
};
pub use repo::upload::parse_upload;
pub use service::attendance_service::{AttendanceService, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
