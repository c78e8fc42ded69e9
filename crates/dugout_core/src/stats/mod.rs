//! Statistics derivation engine.
//!
//! # Responsibility
//! - Fold a submitted session into a career record (`accumulate`).
//! - Derive rate statistics from a record snapshot (`metrics`).
//! - Order records for the leaderboard (`ranking`).
//!
//! # Invariants
//! - Every function here is pure: no I/O, no shared state, inputs are never
//!   mutated.
//! - Zero denominators produce `RATE_SENTINEL`, never an error, NaN or
//!   infinity.

use crate::model::career::CounterField;
use crate::model::validation::ModelValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod accumulate;
pub mod metrics;
pub mod ranking;

pub type StatsResult<T> = Result<T, StatsError>;

/// Errors raised while folding a session into a career record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// Session input is not submittable.
    Invalid(ModelValidationError),
    /// Adding the session would overflow a counter.
    CounterOverflow(CounterField),
}

impl Display for StatsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::CounterOverflow(field) => {
                write!(f, "counter `{}` would overflow", field.as_str())
            }
        }
    }
}

impl Error for StatsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::CounterOverflow(_) => None,
        }
    }
}

impl From<ModelValidationError> for StatsError {
    fn from(value: ModelValidationError) -> Self {
        Self::Invalid(value)
    }
}
