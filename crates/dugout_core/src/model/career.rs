//! Career record domain model.
//!
//! # Responsibility
//! - Define the durable per-player statistics tally.
//! - Expose counters by `CounterField` so accumulation and ranking can address
//!   them uniformly.
//!
//! # Invariants
//! - `id` is issued by the identity provider and never reused.
//! - `username` is whitespace-normalized and non-empty.
//! - Counters never decrease across the lifetime of a record.

use crate::model::validation::{ModelValidationError, USERNAME_MAX_CHARS};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Opaque identity reference issued by the identity provider.
pub type UserId = Uuid;

/// Addressable integer counters of a `CareerRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CounterField {
    Games,
    Atbat,
    FourBall,
    DeadBall,
    Sacrifice,
    SacrificeFly,
    StolenBase,
    CaughtStealing,
    Single,
    Double,
    Triple,
    Homurun,
    K,
    Rbi,
}

impl CounterField {
    /// All counters in storage column order.
    pub const ALL: [Self; 14] = [
        Self::Games,
        Self::Atbat,
        Self::FourBall,
        Self::DeadBall,
        Self::Sacrifice,
        Self::SacrificeFly,
        Self::StolenBase,
        Self::CaughtStealing,
        Self::Single,
        Self::Double,
        Self::Triple,
        Self::Homurun,
        Self::K,
        Self::Rbi,
    ];

    /// Stable snake_case name, also the SQLite column name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Games => "games",
            Self::Atbat => "atbat",
            Self::FourBall => "four_ball",
            Self::DeadBall => "dead_ball",
            Self::Sacrifice => "sacrifice",
            Self::SacrificeFly => "sacrifice_fly",
            Self::StolenBase => "stolen_base",
            Self::CaughtStealing => "caught_stealing",
            Self::Single => "single",
            Self::Double => "double",
            Self::Triple => "triple",
            Self::Homurun => "homurun",
            Self::K => "k",
            Self::Rbi => "rbi",
        }
    }

    /// Field name used by the external document schema.
    pub fn external_name(self) -> &'static str {
        match self {
            Self::FourBall => "fourBall",
            Self::DeadBall => "deadBall",
            Self::SacrificeFly => "sacrificeFly",
            Self::StolenBase => "stolenBase",
            Self::CaughtStealing => "caughtStealing",
            other => other.as_str(),
        }
    }

    /// Resolves either the snake_case or the external name, ignoring ASCII case.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL.into_iter().find(|field| {
            field.as_str().eq_ignore_ascii_case(trimmed)
                || field.external_name().eq_ignore_ascii_case(trimmed)
        })
    }
}

/// Durable per-player statistics record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerRecord {
    pub id: UserId,
    pub username: String,
    pub games: u32,
    pub atbat: u32,
    pub four_ball: u32,
    pub dead_ball: u32,
    pub sacrifice: u32,
    pub sacrifice_fly: u32,
    pub stolen_base: u32,
    pub caught_stealing: u32,
    pub single: u32,
    pub double: u32,
    pub triple: u32,
    pub homurun: u32,
    pub k: u32,
    pub rbi: u32,
}

impl CareerRecord {
    /// Creates an all-zero record for a newly registered player.
    ///
    /// # Errors
    /// - Returns a validation error when `username` is empty or too long.
    pub fn new(id: UserId, username: &str) -> Result<Self, ModelValidationError> {
        Ok(Self {
            id,
            username: normalize_username(username)?,
            games: 0,
            atbat: 0,
            four_ball: 0,
            dead_ball: 0,
            sacrifice: 0,
            sacrifice_fly: 0,
            stolen_base: 0,
            caught_stealing: 0,
            single: 0,
            double: 0,
            triple: 0,
            homurun: 0,
            k: 0,
            rbi: 0,
        })
    }

    /// Validates record-level invariants not enforced by the type system.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        normalize_username(&self.username).map(|_| ())
    }

    /// Reads one counter.
    pub fn counter(&self, field: CounterField) -> u32 {
        match field {
            CounterField::Games => self.games,
            CounterField::Atbat => self.atbat,
            CounterField::FourBall => self.four_ball,
            CounterField::DeadBall => self.dead_ball,
            CounterField::Sacrifice => self.sacrifice,
            CounterField::SacrificeFly => self.sacrifice_fly,
            CounterField::StolenBase => self.stolen_base,
            CounterField::CaughtStealing => self.caught_stealing,
            CounterField::Single => self.single,
            CounterField::Double => self.double,
            CounterField::Triple => self.triple,
            CounterField::Homurun => self.homurun,
            CounterField::K => self.k,
            CounterField::Rbi => self.rbi,
        }
    }

    /// Mutable access to one counter.
    pub(crate) fn counter_mut(&mut self, field: CounterField) -> &mut u32 {
        match field {
            CounterField::Games => &mut self.games,
            CounterField::Atbat => &mut self.atbat,
            CounterField::FourBall => &mut self.four_ball,
            CounterField::DeadBall => &mut self.dead_ball,
            CounterField::Sacrifice => &mut self.sacrifice,
            CounterField::SacrificeFly => &mut self.sacrifice_fly,
            CounterField::StolenBase => &mut self.stolen_base,
            CounterField::CaughtStealing => &mut self.caught_stealing,
            CounterField::Single => &mut self.single,
            CounterField::Double => &mut self.double,
            CounterField::Triple => &mut self.triple,
            CounterField::Homurun => &mut self.homurun,
            CounterField::K => &mut self.k,
            CounterField::Rbi => &mut self.rbi,
        }
    }

    /// Returns `true` when every counter is at least its value in `earlier`.
    pub fn dominates(&self, earlier: &CareerRecord) -> bool {
        CounterField::ALL
            .into_iter()
            .all(|field| self.counter(field) >= earlier.counter(field))
    }
}

/// Trims and collapses internal whitespace of a username.
///
/// # Errors
/// - `EmptyUsername` when nothing remains after trimming.
/// - `UsernameTooLong` above `USERNAME_MAX_CHARS` characters.
pub fn normalize_username(value: &str) -> Result<String, ModelValidationError> {
    let collapsed = WHITESPACE_RE.replace_all(value.trim(), " ").to_string();
    if collapsed.is_empty() {
        return Err(ModelValidationError::EmptyUsername);
    }

    let chars = collapsed.chars().count();
    if chars > USERNAME_MAX_CHARS {
        return Err(ModelValidationError::UsernameTooLong(chars));
    }

    Ok(collapsed)
}
