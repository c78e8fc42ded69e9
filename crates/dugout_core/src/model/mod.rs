//! Batting domain model.
//!
//! # Responsibility
//! - Define the at-bat event taxonomy and the in-progress session value.
//! - Define the durable per-player career record and its counter fields.
//!
//! # Invariants
//! - Every career record is identified by a stable `UserId`.
//! - Counter fields are unsigned and only ever grow.
//! - Sessions are immutable values; every edit produces a new session.

pub mod career;
pub mod outcome;
pub mod session;
pub mod validation;
