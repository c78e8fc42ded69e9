//! Leaderboard ordering.
//!
//! # Invariants
//! - Entries are sorted by the selected key, descending.
//! - Ties are broken by `username` ascending, then `id` ascending, so the
//!   order is total and reproducible for identical inputs.
//! - Derived keys are compared at full precision.

use crate::model::career::{CareerRecord, CounterField, UserId};
use crate::stats::metrics::DerivedMetrics;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// Selectable leaderboard sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// A raw integer counter of the record.
    Counter(CounterField),
    Hits,
    BattingAverage,
    OnBasePercentage,
    SluggingPercentage,
    Ops,
}

impl SortKey {
    /// Stable snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Counter(field) => field.as_str(),
            Self::Hits => "hits",
            Self::BattingAverage => "batting_average",
            Self::OnBasePercentage => "on_base_percentage",
            Self::SluggingPercentage => "slugging_percentage",
            Self::Ops => "ops",
        }
    }

    /// Parses a counter name or a derived metric name.
    ///
    /// Accepts snake_case, the external camelCase counter names, and the
    /// common abbreviations `avg`, `obp`, `slg`.
    pub fn parse(value: &str) -> Option<Self> {
        if let Some(field) = CounterField::parse(value) {
            return Some(Self::Counter(field));
        }

        match value.trim().to_ascii_lowercase().as_str() {
            "hits" => Some(Self::Hits),
            "batting_average" | "battingaverage" | "avg" => Some(Self::BattingAverage),
            "on_base_percentage" | "onbasepercentage" | "obp" => Some(Self::OnBasePercentage),
            "slugging_percentage" | "sluggingpercentage" | "slg" => Some(Self::SluggingPercentage),
            "ops" => Some(Self::Ops),
            _ => None,
        }
    }

    fn value(self, record: &CareerRecord, metrics: &DerivedMetrics) -> KeyValue {
        match self {
            Self::Counter(field) => KeyValue::Count(u64::from(record.counter(field))),
            Self::Hits => KeyValue::Count(metrics.hits),
            Self::BattingAverage => KeyValue::Rate(metrics.batting_average),
            Self::OnBasePercentage => KeyValue::Rate(metrics.on_base_percentage),
            Self::SluggingPercentage => KeyValue::Rate(metrics.slugging_percentage),
            Self::Ops => KeyValue::Rate(metrics.ops),
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        Self::Counter(CounterField::Rbi)
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
enum KeyValue {
    Count(u64),
    Rate(f64),
}

impl KeyValue {
    fn cmp_desc(self, other: Self) -> Ordering {
        match (self, other) {
            (Self::Count(left), Self::Count(right)) => right.cmp(&left),
            (Self::Rate(left), Self::Rate(right)) => right.total_cmp(&left),
            // One key never mixes both kinds.
            _ => Ordering::Equal,
        }
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    /// 1-based position in the ordered leaderboard.
    pub position: usize,
    pub record: CareerRecord,
    pub metrics: DerivedMetrics,
}

impl RankedEntry {
    pub fn user_id(&self) -> UserId {
        self.record.id
    }
}

/// Orders records by `key`, descending, and annotates them with metrics.
///
/// `limit` truncates after sorting; `None` keeps every record.
pub fn rank(records: Vec<CareerRecord>, key: SortKey, limit: Option<usize>) -> Vec<RankedEntry> {
    let mut decorated = records
        .into_iter()
        .map(|record| {
            let metrics = DerivedMetrics::from_record(&record);
            let value = key.value(&record, &metrics);
            (value, record, metrics)
        })
        .collect::<Vec<_>>();

    decorated.sort_by(|(left_value, left, _), (right_value, right, _)| {
        left_value
            .cmp_desc(*right_value)
            .then_with(|| left.username.cmp(&right.username))
            .then_with(|| left.id.cmp(&right.id))
    });

    if let Some(limit) = limit {
        decorated.truncate(limit);
    }

    decorated
        .into_iter()
        .enumerate()
        .map(|(index, (_, record, metrics))| RankedEntry {
            position: index + 1,
            record,
            metrics,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{rank, SortKey};
    use crate::model::career::{CareerRecord, CounterField};
    use uuid::Uuid;

    fn player(name: &str) -> CareerRecord {
        CareerRecord::new(Uuid::new_v4(), name).unwrap()
    }

    #[test]
    fn parse_accepts_counters_metrics_and_aliases() {
        assert_eq!(
            SortKey::parse("rbi"),
            Some(SortKey::Counter(CounterField::Rbi))
        );
        assert_eq!(
            SortKey::parse("stolenBase"),
            Some(SortKey::Counter(CounterField::StolenBase))
        );
        assert_eq!(SortKey::parse("battingAverage"), Some(SortKey::BattingAverage));
        assert_eq!(SortKey::parse("OPS"), Some(SortKey::Ops));
        assert_eq!(SortKey::parse("obp"), Some(SortKey::OnBasePercentage));
        assert_eq!(SortKey::parse("era"), None);
    }

    #[test]
    fn parse_ignores_case_for_counters_and_metrics() {
        assert_eq!(
            SortKey::parse("RBI"),
            Some(SortKey::Counter(CounterField::Rbi))
        );
        assert_eq!(
            SortKey::parse("HomuRun"),
            Some(SortKey::Counter(CounterField::Homurun))
        );
        assert_eq!(SortKey::parse("Ops"), Some(SortKey::Ops));
        assert_eq!(SortKey::parse("HITS"), Some(SortKey::Hits));
    }

    #[test]
    fn default_key_is_rbi() {
        assert_eq!(SortKey::default().as_str(), "rbi");
    }

    #[test]
    fn positions_are_one_based_and_limit_truncates() {
        let mut records = Vec::new();
        for (name, homers) in [("a", 1), ("b", 3), ("c", 2)] {
            let mut record = player(name);
            record.homurun = homers;
            record.atbat = homers;
            records.push(record);
        }

        let ranked = rank(records, SortKey::Counter(CounterField::Homurun), Some(2));
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].position, 1);
        assert_eq!(ranked[0].record.username, "b");
        assert_eq!(ranked[1].position, 2);
        assert_eq!(ranked[1].record.username, "c");
    }

    #[test]
    fn metric_keys_sort_descending_with_name_tie_break() {
        let mut slugger = player("slugger");
        slugger.atbat = 4;
        slugger.homurun = 2;
        let mut contact = player("contact");
        contact.atbat = 4;
        contact.single = 2;
        let rookie = player("rookie");
        let other_rookie = player("another rookie");

        let ranked = rank(
            vec![rookie, contact, slugger, other_rookie],
            SortKey::Ops,
            None,
        );
        let names = ranked
            .iter()
            .map(|entry| entry.record.username.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["slugger", "contact", "another rookie", "rookie"]);
    }

    #[test]
    fn identical_usernames_fall_back_to_id_order() {
        let first = player("twin");
        let second = player("twin");
        let expected_first = first.id.min(second.id);

        let ranked = rank(vec![first, second], SortKey::default(), None);
        assert_eq!(ranked[0].user_id(), expected_first);
    }
}
