//! Domain model for one day of dining-hall attendance.
//!
//! # Responsibility
//! - Define the canonical attendance record and roster shapes.
//! - Keep the mark/reset/summary decision logic free of I/O.
//!
//! # Invariants
//! - A roster compares identifiers in exactly one mode, decided at load.
//! - Only the `eaten` flag of a record is ever mutated after load.

pub mod day;
pub mod record;
pub mod roster;
