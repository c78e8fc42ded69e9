//! Accumulation rule: session totals -> career counters.
//!
//! # Invariants
//! - One session is one game, even with zero events.
//! - Each recorded event increments exactly the counters listed in
//!   `AtBatOutcome::counters`; the result depends only on the outcome multiset.
//! - Steals and RBI come from the manual counters, never from events.
//! - The prior record is never mutated; overflow rejects the whole merge.

use crate::model::career::{CareerRecord, CounterField};
use crate::model::session::SessionTotals;
use crate::stats::{StatsError, StatsResult};
use std::collections::BTreeMap;

/// Per-counter increments produced by one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionDelta {
    increments: BTreeMap<CounterField, u64>,
}

impl SessionDelta {
    /// Increment for `field` (zero when untouched).
    pub fn get(&self, field: CounterField) -> u64 {
        self.increments.get(&field).copied().unwrap_or(0)
    }

    fn add(&mut self, field: CounterField, amount: u64) {
        if amount > 0 {
            *self.increments.entry(field).or_insert(0) += amount;
        }
    }

    /// Non-zero increments in counter order.
    pub fn iter(&self) -> impl Iterator<Item = (CounterField, u64)> + '_ {
        self.increments
            .iter()
            .map(|(field, amount)| (*field, *amount))
    }
}

/// Tallies a session into per-counter increments.
///
/// # Errors
/// - `StatsError::Invalid` when any event still carries `AtBatOutcome::None`.
pub fn tally_session(session: &SessionTotals) -> StatsResult<SessionDelta> {
    session.validate_for_submission()?;

    let mut delta = SessionDelta::default();
    delta.add(CounterField::Games, 1);
    for event in session.at_bat_events() {
        for field in event.outcome.counters() {
            delta.add(*field, 1);
        }
    }
    delta.add(CounterField::Rbi, u64::from(session.rbi()));
    delta.add(CounterField::StolenBase, u64::from(session.stolen_base()));
    delta.add(
        CounterField::CaughtStealing,
        u64::from(session.caught_stealing()),
    );

    Ok(delta)
}

/// Applies a delta to a copy of `prior`.
///
/// # Errors
/// - `StatsError::CounterOverflow` naming the first counter that would exceed
///   `u32::MAX`.
pub fn apply_delta(prior: &CareerRecord, delta: &SessionDelta) -> StatsResult<CareerRecord> {
    let mut merged = prior.clone();
    for (field, amount) in delta.iter() {
        let slot = merged.counter_mut(field);
        let next = u64::from(*slot) + amount;
        *slot = u32::try_from(next).map_err(|_| StatsError::CounterOverflow(field))?;
    }
    Ok(merged)
}

/// Folds one submitted session into a new career record.
///
/// Identity fields (`id`, `username`) are carried over from `prior`.
pub fn merge(prior: &CareerRecord, session: &SessionTotals) -> StatsResult<CareerRecord> {
    let delta = tally_session(session)?;
    apply_delta(prior, &delta)
}
