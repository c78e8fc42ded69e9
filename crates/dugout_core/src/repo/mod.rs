//! Record store abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the career record store contract used by services.
//! - Isolate SQLite query details from use-case orchestration.
//!
//! # Invariants
//! - Repository writes validate records before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `AlreadyExists`) in
//!   addition to DB transport errors.

pub mod career_repo;
