//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate roster mutations with snapshot persistence.
//! - Keep presentation layers decoupled from storage details.

pub mod attendance_service;
