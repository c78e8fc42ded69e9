//! Derived rate statistics.
//!
//! # Invariants
//! - The at-bat denominator for AVG and SLG is
//!   `atbat - sacrifice - sacrifice_fly`, floored at zero.
//! - A zero denominator yields `RATE_SENTINEL`.
//! - Values keep full `f64` precision; only `format_rate` rounds.

use crate::model::career::CareerRecord;
use serde::Serialize;

/// Value returned by a rate formula whose denominator is zero.
pub const RATE_SENTINEL: f64 = 0.0;

/// Read-only projection of a `CareerRecord` snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub hits: u64,
    pub at_bats_for_average: u64,
    pub plate_appearances: u64,
    pub total_bases: u64,
    pub batting_average: f64,
    pub on_base_percentage: f64,
    pub slugging_percentage: f64,
    pub ops: f64,
}

impl DerivedMetrics {
    /// Computes every metric from one snapshot.
    pub fn from_record(record: &CareerRecord) -> Self {
        let on_base_percentage = on_base_percentage(record);
        let slugging_percentage = slugging_percentage(record);
        Self {
            hits: hits(record),
            at_bats_for_average: at_bats_for_average(record),
            plate_appearances: plate_appearances(record),
            total_bases: total_bases(record),
            batting_average: batting_average(record),
            on_base_percentage,
            slugging_percentage,
            ops: on_base_percentage + slugging_percentage,
        }
    }
}

pub fn hits(record: &CareerRecord) -> u64 {
    u64::from(record.single)
        + u64::from(record.double)
        + u64::from(record.triple)
        + u64::from(record.homurun)
}

pub fn at_bats_for_average(record: &CareerRecord) -> u64 {
    u64::from(record.atbat)
        .saturating_sub(u64::from(record.sacrifice))
        .saturating_sub(u64::from(record.sacrifice_fly))
}

pub fn plate_appearances(record: &CareerRecord) -> u64 {
    u64::from(record.atbat)
        + u64::from(record.four_ball)
        + u64::from(record.dead_ball)
        + u64::from(record.sacrifice_fly)
}

pub fn total_bases(record: &CareerRecord) -> u64 {
    u64::from(record.single)
        + 2 * u64::from(record.double)
        + 3 * u64::from(record.triple)
        + 4 * u64::from(record.homurun)
}

pub fn batting_average(record: &CareerRecord) -> f64 {
    rate(hits(record), at_bats_for_average(record))
}

pub fn on_base_percentage(record: &CareerRecord) -> f64 {
    let times_on_base = hits(record) + u64::from(record.four_ball) + u64::from(record.dead_ball);
    rate(times_on_base, plate_appearances(record))
}

pub fn slugging_percentage(record: &CareerRecord) -> f64 {
    rate(total_bases(record), at_bats_for_average(record))
}

/// On-base plus slugging. Both terms are already zero-guarded.
pub fn ops(record: &CareerRecord) -> f64 {
    on_base_percentage(record) + slugging_percentage(record)
}

/// Formats a rate with three decimals, e.g. `0.583`.
pub fn format_rate(value: f64) -> String {
    format!("{value:.3}")
}

fn rate(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return RATE_SENTINEL;
    }
    numerator as f64 / denominator as f64
}
