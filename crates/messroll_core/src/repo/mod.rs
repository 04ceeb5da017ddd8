//! Snapshot persistence layer.
//!
//! # Responsibility
//! - Define the day-keyed snapshot access contract.
//! - Isolate CSV file details from service orchestration.
//!
//! # Invariants
//! - Every persisted snapshot is a complete rewrite of the roster; there is
//!   no append-only or incremental form.
//! - Repository reads report malformed files instead of masking them.

pub mod snapshot_repo;
pub mod upload;
