//! Core domain logic for Dugout batting statistics.
//! This crate is the single source of truth for accumulation and rate-stat rules.

pub mod config;
pub mod db;
pub mod identity;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod stats;

pub use config::{load_config, ConfigError, DugoutConfig};
pub use identity::{FixedIdentity, IdentityProvider};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig};
pub use model::career::{CareerRecord, CounterField, UserId};
pub use model::outcome::{AtBatEvent, AtBatOutcome};
pub use model::session::SessionTotals;
pub use model::validation::ModelValidationError;
pub use repo::career_repo::{CareerRecordStore, RepoError, RepoResult, SqliteCareerRepository};
pub use service::stats_service::{PlayerProfile, ServiceError, ServiceResult, StatsService};
pub use stats::accumulate::merge;
pub use stats::metrics::{format_rate, DerivedMetrics, RATE_SENTINEL};
pub use stats::ranking::{rank, RankedEntry, SortKey};
pub use stats::{StatsError, StatsResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
