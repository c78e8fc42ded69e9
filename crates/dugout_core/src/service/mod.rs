//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate identity, record store and stats engine calls into
//!   use-case level APIs.
//! - Keep CLI/host layers decoupled from storage details.

pub mod stats_service;
