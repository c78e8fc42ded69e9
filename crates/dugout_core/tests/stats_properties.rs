use dugout_core::stats::metrics::{
    at_bats_for_average, batting_average, hits, on_base_percentage, plate_appearances,
    slugging_percentage, total_bases,
};
use dugout_core::{
    format_rate, merge, rank, AtBatOutcome, CareerRecord, CounterField, DerivedMetrics,
    SessionTotals, SortKey, RATE_SENTINEL,
};
use proptest::prelude::*;
use uuid::Uuid;

fn zero_record() -> CareerRecord {
    CareerRecord::new(Uuid::nil(), "prop").unwrap()
}

fn build_session(outcomes: &[AtBatOutcome], rbi: u32, sb: u32, cs: u32) -> SessionTotals {
    outcomes
        .iter()
        .fold(SessionTotals::new("2024-07-04").unwrap(), |session, outcome| {
            session.with_outcome(*outcome)
        })
        .with_rbi(i64::from(rbi))
        .unwrap()
        .with_stolen_base(i64::from(sb))
        .unwrap()
        .with_caught_stealing(i64::from(cs))
        .unwrap()
}

fn recorded_outcome() -> impl Strategy<Value = AtBatOutcome> {
    (1u8..=10).prop_map(|code| AtBatOutcome::from_code(code).unwrap())
}

fn small_record() -> impl Strategy<Value = CareerRecord> {
    prop::collection::vec(0u32..500, CounterField::ALL.len()).prop_map(|values| {
        let mut record = zero_record();
        for (field, value) in CounterField::ALL.into_iter().zip(values) {
            set_counter(&mut record, field, value);
        }
        record
    })
}

fn set_counter(record: &mut CareerRecord, field: CounterField, value: u32) {
    let slot = match field {
        CounterField::Games => &mut record.games,
        CounterField::Atbat => &mut record.atbat,
        CounterField::FourBall => &mut record.four_ball,
        CounterField::DeadBall => &mut record.dead_ball,
        CounterField::Sacrifice => &mut record.sacrifice,
        CounterField::SacrificeFly => &mut record.sacrifice_fly,
        CounterField::StolenBase => &mut record.stolen_base,
        CounterField::CaughtStealing => &mut record.caught_stealing,
        CounterField::Single => &mut record.single,
        CounterField::Double => &mut record.double,
        CounterField::Triple => &mut record.triple,
        CounterField::Homurun => &mut record.homurun,
        CounterField::K => &mut record.k,
        CounterField::Rbi => &mut record.rbi,
    };
    *slot = value;
}

proptest! {
    #[test]
    fn merge_never_decreases_any_counter(
        prior in small_record(),
        outcomes in prop::collection::vec(recorded_outcome(), 0..12),
        rbi in 0u32..10,
        sb in 0u32..5,
        cs in 0u32..5,
    ) {
        let merged = merge(&prior, &build_session(&outcomes, rbi, sb, cs)).unwrap();
        prop_assert!(merged.dominates(&prior));
        prop_assert_eq!(merged.games, prior.games + 1);
    }

    #[test]
    fn merge_is_independent_of_event_order(
        outcomes in prop::collection::vec(recorded_outcome(), 0..12),
        rbi in 0u32..10,
    ) {
        let mut reversed = outcomes.clone();
        reversed.reverse();
        let mut sorted = outcomes.clone();
        sorted.sort_by_key(|outcome| outcome.code());

        let prior = zero_record();
        let forward = merge(&prior, &build_session(&outcomes, rbi, 0, 0)).unwrap();
        prop_assert_eq!(&forward, &merge(&prior, &build_session(&reversed, rbi, 0, 0)).unwrap());
        prop_assert_eq!(&forward, &merge(&prior, &build_session(&sorted, rbi, 0, 0)).unwrap());
    }

    #[test]
    fn two_merges_equal_one_merge_of_the_union(
        first in prop::collection::vec(recorded_outcome(), 0..8),
        second in prop::collection::vec(recorded_outcome(), 0..8),
        rbi in (0u32..10, 0u32..10),
        sb in (0u32..5, 0u32..5),
    ) {
        let prior = zero_record();
        let stepwise = merge(
            &merge(&prior, &build_session(&first, rbi.0, sb.0, 0)).unwrap(),
            &build_session(&second, rbi.1, sb.1, 0),
        )
        .unwrap();

        let combined = [first.as_slice(), second.as_slice()].concat();
        let mut direct = merge(&prior, &build_session(&combined, rbi.0 + rbi.1, sb.0 + sb.1, 0)).unwrap();
        // Two sessions are two games; the single combined session is one.
        direct.games += 1;
        prop_assert_eq!(stepwise, direct);
    }

    #[test]
    fn hits_is_the_sum_of_hit_counters(record in small_record()) {
        let expected = u64::from(record.single)
            + u64::from(record.double)
            + u64::from(record.triple)
            + u64::from(record.homurun);
        prop_assert_eq!(hits(&record), expected);
    }

    #[test]
    fn rates_are_always_finite(record in small_record()) {
        let metrics = DerivedMetrics::from_record(&record);
        for value in [
            metrics.batting_average,
            metrics.on_base_percentage,
            metrics.slugging_percentage,
            metrics.ops,
        ] {
            prop_assert!(value.is_finite());
            prop_assert!(value >= 0.0);
        }
        if metrics.at_bats_for_average == 0 {
            prop_assert_eq!(metrics.batting_average, RATE_SENTINEL);
            prop_assert_eq!(metrics.slugging_percentage, RATE_SENTINEL);
        }
        if metrics.plate_appearances == 0 {
            prop_assert_eq!(metrics.on_base_percentage, RATE_SENTINEL);
        }
    }
}

#[test]
fn reference_line_produces_expected_rates() {
    let mut record = zero_record();
    record.atbat = 10;
    record.single = 3;
    record.double = 1;
    record.triple = 0;
    record.homurun = 1;
    record.four_ball = 2;

    assert_eq!(hits(&record), 5);
    assert_eq!(at_bats_for_average(&record), 10);
    assert_eq!(plate_appearances(&record), 12);
    assert_eq!(total_bases(&record), 9);
    assert_eq!(format_rate(batting_average(&record)), "0.500");
    assert_eq!(format_rate(on_base_percentage(&record)), "0.583");
    assert_eq!(format_rate(slugging_percentage(&record)), "0.900");

    let metrics = DerivedMetrics::from_record(&record);
    assert_eq!(format_rate(metrics.ops), "1.483");
    assert!((metrics.ops - (7.0 / 12.0 + 0.9)).abs() < 1e-12);
}

#[test]
fn zero_record_yields_sentinels() {
    let metrics = DerivedMetrics::from_record(&zero_record());
    assert_eq!(metrics.hits, 0);
    assert_eq!(metrics.batting_average, RATE_SENTINEL);
    assert_eq!(metrics.on_base_percentage, RATE_SENTINEL);
    assert_eq!(metrics.slugging_percentage, RATE_SENTINEL);
    assert_eq!(metrics.ops, RATE_SENTINEL);
}

#[test]
fn rbi_ties_are_broken_by_username() {
    let records = [("mika", 5), ("ren", 12), ("aoi", 12), ("sota", 3)]
        .into_iter()
        .map(|(name, rbi)| {
            let mut record = CareerRecord::new(Uuid::new_v4(), name).unwrap();
            record.rbi = rbi;
            record
        })
        .collect::<Vec<_>>();

    let ranked = rank(records, SortKey::Counter(CounterField::Rbi), None);
    let names = ranked
        .iter()
        .map(|entry| entry.record.username.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["aoi", "ren", "mika", "sota"]);
}

#[test]
fn batting_average_ranking_uses_full_precision() {
    // .3333 and .3330 both display as 0.333 but must not tie.
    let mut third = CareerRecord::new(Uuid::new_v4(), "zed").unwrap();
    third.atbat = 3;
    third.single = 1;
    let mut just_under = CareerRecord::new(Uuid::new_v4(), "amy").unwrap();
    just_under.atbat = 1000;
    just_under.single = 333;

    let ranked = rank(vec![just_under, third], SortKey::BattingAverage, None);
    assert_eq!(ranked[0].record.username, "zed");
    assert_eq!(
        format_rate(ranked[0].metrics.batting_average),
        format_rate(ranked[1].metrics.batting_average)
    );
}
