//! Runtime configuration.
//!
//! # Responsibility
//! - Resolve database, logging and leaderboard settings for host binaries.
//! - Layer sources as: built-in defaults, optional TOML file, then
//!   `DUGOUT_`-prefixed environment variables.
//!
//! # Invariants
//! - A returned config has passed `DugoutConfig::validate`.

use crate::logging::default_log_level;
use crate::service::stats_service::{LEADERBOARD_DEFAULT_LIMIT, LEADERBOARD_LIMIT_MAX};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Environment variable prefix, e.g. `DUGOUT_DB_PATH`.
pub const ENV_PREFIX: &str = "DUGOUT_";
/// Default database file, relative to the working directory.
pub const DEFAULT_DB_FILE_NAME: &str = "dugout.sqlite3";

/// Host-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DugoutConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files; file logging is off when unset.
    pub log_dir: Option<PathBuf>,
    /// Default leaderboard size.
    pub ranking_limit: u32,
}

impl Default for DugoutConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            ranking_limit: LEADERBOARD_DEFAULT_LIMIT,
        }
    }
}

impl DugoutConfig {
    /// Checks value-level constraints that deserialization cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("db_path cannot be empty".to_string()));
        }
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "log_dir must be an absolute path, got `{}`",
                    dir.display()
                )));
            }
        }
        if self.ranking_limit == 0 || self.ranking_limit > LEADERBOARD_LIMIT_MAX {
            return Err(ConfigError::Invalid(format!(
                "ranking_limit must be within 1..={LEADERBOARD_LIMIT_MAX}, got {}",
                self.ranking_limit
            )));
        }
        Ok(())
    }
}

/// Configuration resolution errors.
#[derive(Debug)]
pub enum ConfigError {
    /// A source could not be read or did not match the expected shape.
    Source(Box<figment::Error>),
    /// Values parsed but violate a constraint.
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source(err) => write!(f, "failed to load configuration: {err}"),
            Self::Invalid(message) => write!(f, "invalid configuration: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Source(err) => Some(err.as_ref()),
            Self::Invalid(_) => None,
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(value: figment::Error) -> Self {
        Self::Source(Box::new(value))
    }
}

/// Builds the layered figment without extracting it.
///
/// A missing TOML file is skipped silently.
pub fn config_figment(file: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(DugoutConfig::default()));
    if let Some(path) = file {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(Env::prefixed(ENV_PREFIX))
}

/// Extracts and validates a config from any figment.
pub fn extract_config(figment: &Figment) -> Result<DugoutConfig, ConfigError> {
    let config: DugoutConfig = figment.extract()?;
    config.validate()?;
    Ok(config)
}

/// Loads configuration from defaults, `file`, and the environment.
pub fn load_config(file: Option<&Path>) -> Result<DugoutConfig, ConfigError> {
    extract_config(&config_figment(file))
}
