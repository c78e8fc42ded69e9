//! In-progress logging session.
//!
//! # Responsibility
//! - Hold one game's at-bat events and manual counters before submission.
//! - Provide value-returning edit operations for the entry flow.
//!
//! # Invariants
//! - `date` is always a `YYYY-MM-DD` string.
//! - Manual counters are non-negative by construction.
//! - A session is submittable only when no event carries `AtBatOutcome::None`.

use crate::model::outcome::{AtBatEvent, AtBatOutcome};
use crate::model::validation::{manual_count, ModelValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static SESSION_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("valid date regex")
});

/// Aggregate of one logging session, not yet merged into career totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTotals {
    date: String,
    at_bat_events: Vec<AtBatEvent>,
    rbi: u32,
    stolen_base: u32,
    caught_stealing: u32,
}

impl SessionTotals {
    /// Starts an empty session for `date` (`YYYY-MM-DD`).
    pub fn new(date: impl Into<String>) -> Result<Self, ModelValidationError> {
        let date = date.into();
        let trimmed = date.trim();
        if !SESSION_DATE_RE.is_match(trimmed) {
            return Err(ModelValidationError::InvalidDate(date));
        }

        Ok(Self {
            date: trimmed.to_string(),
            at_bat_events: Vec::new(),
            rbi: 0,
            stolen_base: 0,
            caught_stealing: 0,
        })
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn at_bat_events(&self) -> &[AtBatEvent] {
        &self.at_bat_events
    }

    pub fn rbi(&self) -> u32 {
        self.rbi
    }

    pub fn stolen_base(&self) -> u32 {
        self.stolen_base
    }

    pub fn caught_stealing(&self) -> u32 {
        self.caught_stealing
    }

    /// Appends one event. `None` placeholders are allowed while editing.
    #[must_use]
    pub fn with_event(mut self, event: AtBatEvent) -> Self {
        self.at_bat_events.push(event);
        self
    }

    /// Appends one event with the given outcome and no note.
    #[must_use]
    pub fn with_outcome(self, outcome: AtBatOutcome) -> Self {
        self.with_event(AtBatEvent::new(outcome))
    }

    /// Replaces the event at `index`.
    pub fn with_event_replaced(
        mut self,
        index: usize,
        event: AtBatEvent,
    ) -> Result<Self, ModelValidationError> {
        let len = self.at_bat_events.len();
        let slot = self
            .at_bat_events
            .get_mut(index)
            .ok_or(ModelValidationError::EventIndexOutOfRange { index, len })?;
        *slot = event;
        Ok(self)
    }

    /// Removes the event at `index`, keeping the order of the rest.
    pub fn without_event(mut self, index: usize) -> Result<Self, ModelValidationError> {
        let len = self.at_bat_events.len();
        if index >= len {
            return Err(ModelValidationError::EventIndexOutOfRange { index, len });
        }
        self.at_bat_events.remove(index);
        Ok(self)
    }

    /// Sets the manually entered runs batted in.
    pub fn with_rbi(mut self, value: i64) -> Result<Self, ModelValidationError> {
        self.rbi = manual_count("rbi", value)?;
        Ok(self)
    }

    /// Sets the manually entered stolen bases.
    pub fn with_stolen_base(mut self, value: i64) -> Result<Self, ModelValidationError> {
        self.stolen_base = manual_count("stolen_base", value)?;
        Ok(self)
    }

    /// Sets the manually entered caught-stealing count.
    pub fn with_caught_stealing(mut self, value: i64) -> Result<Self, ModelValidationError> {
        self.caught_stealing = manual_count("caught_stealing", value)?;
        Ok(self)
    }

    /// Checks that every event carries a real outcome.
    ///
    /// # Errors
    /// - `UnrecordedOutcome` for the first event still set to `None`.
    pub fn validate_for_submission(&self) -> Result<(), ModelValidationError> {
        match self
            .at_bat_events
            .iter()
            .position(|event| !event.outcome.is_recorded())
        {
            Some(index) => Err(ModelValidationError::UnrecordedOutcome { index }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SessionTotals;
    use crate::model::outcome::{AtBatEvent, AtBatOutcome};
    use crate::model::validation::ModelValidationError;

    #[test]
    fn new_rejects_malformed_dates() {
        assert!(SessionTotals::new("2024-04-01").is_ok());
        assert!(matches!(
            SessionTotals::new("2024/04/01"),
            Err(ModelValidationError::InvalidDate(_))
        ));
        assert!(SessionTotals::new("2024-13-01").is_err());
        assert!(SessionTotals::new("").is_err());
    }

    #[test]
    fn edits_return_new_values_and_keep_order() {
        let base = SessionTotals::new("2024-04-01").unwrap();
        let edited = base
            .clone()
            .with_outcome(AtBatOutcome::Single)
            .with_outcome(AtBatOutcome::None)
            .with_outcome(AtBatOutcome::Walk);
        assert!(base.at_bat_events().is_empty());

        let replaced = edited
            .with_event_replaced(1, AtBatEvent::with_note(AtBatOutcome::Double, "gap"))
            .unwrap();
        let outcomes = replaced
            .at_bat_events()
            .iter()
            .map(|event| event.outcome)
            .collect::<Vec<_>>();
        assert_eq!(
            outcomes,
            vec![
                AtBatOutcome::Single,
                AtBatOutcome::Double,
                AtBatOutcome::Walk
            ]
        );

        let removed = replaced.without_event(0).unwrap();
        assert_eq!(removed.at_bat_events().len(), 2);
        assert_eq!(removed.at_bat_events()[0].outcome, AtBatOutcome::Double);
    }

    #[test]
    fn out_of_range_edits_are_rejected() {
        let session = SessionTotals::new("2024-04-01")
            .unwrap()
            .with_outcome(AtBatOutcome::Out);
        assert_eq!(
            session.clone().without_event(3).unwrap_err(),
            ModelValidationError::EventIndexOutOfRange { index: 3, len: 1 }
        );
        assert!(session
            .with_event_replaced(1, AtBatEvent::new(AtBatOutcome::Out))
            .is_err());
    }

    #[test]
    fn manual_counters_reject_negative_input() {
        let session = SessionTotals::new("2024-04-01").unwrap();
        assert!(session.clone().with_rbi(-2).is_err());
        assert!(session.clone().with_stolen_base(-1).is_err());
        assert!(session.clone().with_caught_stealing(-1).is_err());

        let session = session
            .with_rbi(3)
            .unwrap()
            .with_stolen_base(1)
            .unwrap()
            .with_caught_stealing(0)
            .unwrap();
        assert_eq!(session.rbi(), 3);
        assert_eq!(session.stolen_base(), 1);
        assert_eq!(session.caught_stealing(), 0);
    }

    #[test]
    fn submission_rejects_placeholder_outcomes() {
        let session = SessionTotals::new("2024-04-01")
            .unwrap()
            .with_outcome(AtBatOutcome::Single)
            .with_outcome(AtBatOutcome::None);
        assert_eq!(
            session.validate_for_submission().unwrap_err(),
            ModelValidationError::UnrecordedOutcome { index: 1 }
        );

        let empty = SessionTotals::new("2024-04-01").unwrap();
        assert!(empty.validate_for_submission().is_ok());
    }
}
