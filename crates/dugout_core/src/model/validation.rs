//! Validation errors shared by model constructors.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum username length in characters after normalization.
pub const USERNAME_MAX_CHARS: usize = 32;

/// Model-level validation failures.
///
/// These are input errors: callers must fix the input, values are never
/// clamped into range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// Username is empty after whitespace normalization.
    EmptyUsername,
    /// Username exceeds `USERNAME_MAX_CHARS`.
    UsernameTooLong(usize),
    /// Session date is not a `YYYY-MM-DD` calendar date.
    InvalidDate(String),
    /// A manual counter was entered as a negative number.
    NegativeCount { field: &'static str, value: i64 },
    /// A manual counter does not fit the counter width.
    CountTooLarge { field: &'static str, value: i64 },
    /// Event at `index` still carries the `none` placeholder outcome.
    UnrecordedOutcome { index: usize },
    /// Event index does not exist in the session.
    EventIndexOutOfRange { index: usize, len: usize },
    /// Unknown outcome code or name.
    UnknownOutcome(String),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username cannot be empty"),
            Self::UsernameTooLong(chars) => write!(
                f,
                "username has {chars} characters; at most {USERNAME_MAX_CHARS} allowed"
            ),
            Self::InvalidDate(value) => {
                write!(f, "session date `{value}` is not a YYYY-MM-DD date")
            }
            Self::NegativeCount { field, value } => {
                write!(f, "{field} cannot be negative, got {value}")
            }
            Self::CountTooLarge { field, value } => {
                write!(f, "{field} value {value} is out of range")
            }
            Self::UnrecordedOutcome { index } => {
                write!(f, "at-bat #{} has no recorded outcome", index + 1)
            }
            Self::EventIndexOutOfRange { index, len } => {
                write!(f, "at-bat index {index} out of range for {len} event(s)")
            }
            Self::UnknownOutcome(value) => write!(f, "unknown at-bat outcome `{value}`"),
        }
    }
}

impl Error for ModelValidationError {}

/// Converts one manually entered count into a counter value.
///
/// # Errors
/// - `NegativeCount` when `value < 0`.
/// - `CountTooLarge` when `value > u32::MAX`.
pub fn manual_count(field: &'static str, value: i64) -> Result<u32, ModelValidationError> {
    if value < 0 {
        return Err(ModelValidationError::NegativeCount { field, value });
    }
    u32::try_from(value).map_err(|_| ModelValidationError::CountTooLarge { field, value })
}

#[cfg(test)]
mod tests {
    use super::{manual_count, ModelValidationError};

    #[test]
    fn manual_count_rejects_negative_values() {
        let err = manual_count("rbi", -1).unwrap_err();
        assert_eq!(
            err,
            ModelValidationError::NegativeCount {
                field: "rbi",
                value: -1
            }
        );
    }

    #[test]
    fn manual_count_rejects_overflowing_values() {
        let err = manual_count("stolen_base", i64::from(u32::MAX) + 1).unwrap_err();
        assert!(matches!(err, ModelValidationError::CountTooLarge { .. }));
    }

    #[test]
    fn manual_count_accepts_zero_and_positive() {
        assert_eq!(manual_count("rbi", 0).unwrap(), 0);
        assert_eq!(manual_count("rbi", 7).unwrap(), 7);
    }
}
