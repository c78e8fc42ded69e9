//! At-bat outcome taxonomy.
//!
//! # Responsibility
//! - Define the closed set of plate appearance outcomes.
//! - Map outcomes to/from their stable numeric form codes and names.
//!
//! # Invariants
//! - Numeric codes `0..=10` are stable; `0` is the `None` placeholder.
//! - `None` never contributes to any counter.

use crate::model::career::CounterField;
use crate::model::validation::ModelValidationError;
use serde::{Deserialize, Serialize};

/// Result of one plate appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtBatOutcome {
    /// Placeholder for a not-yet-chosen result in the entry form.
    #[default]
    None,
    /// Batted ball out (groundout, flyout, ...).
    Out,
    Single,
    Double,
    Triple,
    HomeRun,
    /// Base on balls.
    Walk,
    HitByPitch,
    SacrificeBunt,
    SacrificeFly,
    Strikeout,
}

impl AtBatOutcome {
    /// All outcomes ordered by numeric code.
    pub const ALL: [Self; 11] = [
        Self::None,
        Self::Out,
        Self::Single,
        Self::Double,
        Self::Triple,
        Self::HomeRun,
        Self::Walk,
        Self::HitByPitch,
        Self::SacrificeBunt,
        Self::SacrificeFly,
        Self::Strikeout,
    ];

    /// Stable numeric code used by entry forms.
    pub fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Out => 1,
            Self::Single => 2,
            Self::Double => 3,
            Self::Triple => 4,
            Self::HomeRun => 5,
            Self::Walk => 6,
            Self::HitByPitch => 7,
            Self::SacrificeBunt => 8,
            Self::SacrificeFly => 9,
            Self::Strikeout => 10,
        }
    }

    /// Resolves a numeric form code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Stable snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Out => "out",
            Self::Single => "single",
            Self::Double => "double",
            Self::Triple => "triple",
            Self::HomeRun => "home_run",
            Self::Walk => "walk",
            Self::HitByPitch => "hit_by_pitch",
            Self::SacrificeBunt => "sacrifice_bunt",
            Self::SacrificeFly => "sacrifice_fly",
            Self::Strikeout => "strikeout",
        }
    }

    /// Short scorebook label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "-",
            Self::Out => "OUT",
            Self::Single => "1B",
            Self::Double => "2B",
            Self::Triple => "3B",
            Self::HomeRun => "HR",
            Self::Walk => "BB",
            Self::HitByPitch => "HBP",
            Self::SacrificeBunt => "SH",
            Self::SacrificeFly => "SF",
            Self::Strikeout => "K",
        }
    }

    /// Parses either a numeric code (`"5"`) or a name (`"home_run"`).
    pub fn parse(value: &str) -> Result<Self, ModelValidationError> {
        let trimmed = value.trim();
        if let Ok(code) = trimmed.parse::<u8>() {
            return Self::from_code(code)
                .ok_or_else(|| ModelValidationError::UnknownOutcome(trimmed.to_string()));
        }

        let normalized = trimmed.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|outcome| outcome.as_str() == normalized)
            .ok_or_else(|| ModelValidationError::UnknownOutcome(trimmed.to_string()))
    }

    /// Whether this outcome is a real, submittable result.
    pub fn is_recorded(self) -> bool {
        self != Self::None
    }

    /// Career counters incremented by one occurrence of this outcome.
    pub fn counters(self) -> &'static [CounterField] {
        match self {
            Self::None => &[],
            Self::Out => &[CounterField::Atbat],
            Self::Single => &[CounterField::Single, CounterField::Atbat],
            Self::Double => &[CounterField::Double, CounterField::Atbat],
            Self::Triple => &[CounterField::Triple, CounterField::Atbat],
            Self::HomeRun => &[CounterField::Homurun, CounterField::Atbat],
            Self::Walk => &[CounterField::FourBall],
            Self::HitByPitch => &[CounterField::DeadBall],
            Self::SacrificeBunt => &[CounterField::Sacrifice],
            Self::SacrificeFly => &[CounterField::SacrificeFly],
            Self::Strikeout => &[CounterField::K, CounterField::Atbat],
        }
    }

    /// Whether this outcome increments the `atbat` counter.
    pub fn counts_as_at_bat(self) -> bool {
        self.counters().contains(&CounterField::Atbat)
    }
}

/// One plate appearance recorded during a session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AtBatEvent {
    pub outcome: AtBatOutcome,
    /// Free text; not used by any calculation.
    pub note: Option<String>,
}

impl AtBatEvent {
    pub fn new(outcome: AtBatOutcome) -> Self {
        Self {
            outcome,
            note: None,
        }
    }

    pub fn with_note(outcome: AtBatOutcome, note: impl Into<String>) -> Self {
        Self {
            outcome,
            note: Some(note.into()),
        }
    }
}
