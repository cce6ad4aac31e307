use std::collections::BTreeSet;

use proptest::prelude::*;
use trace::{Key, OpKind, Operation, RangeQuery, Trace, TraceLimits};
use workload::{generate, synthesize_value, Mode, TraceRng, WorkloadConfig, VALUE_LEN};

fn generate_trace(records: u64, mode: Mode, seed: u64) -> Trace {
    let config = WorkloadConfig {
        record_count: records,
        mode,
        seed: Some(seed),
        ..WorkloadConfig::default()
    };
    let mut rng = TraceRng::from_optional_seed(config.seed);
    generate(&config, &TraceLimits::default(), &mut rng).unwrap()
}

fn keys_of(trace: &Trace, kind: OpKind) -> Vec<Key> {
    trace
        .body()
        .iter()
        .filter(|op| op.kind() == kind)
        .filter_map(Operation::key)
        .collect()
}

fn mode_strategy() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Interleaved), Just(Mode::Sequential)]
}

proptest! {
    #[test]
    fn prop_phase_counts(records in 0u64..300, mode in mode_strategy(), seed in any::<u64>()) {
        let trace = generate_trace(records, mode, seed);
        let counts = trace.counts();
        prop_assert_eq!(counts.insert, records);
        prop_assert_eq!(counts.read, records);
        prop_assert_eq!(counts.delete, records);
        prop_assert_eq!(counts.range, 1);
        prop_assert_eq!(trace.line_count() as u64, 3 * records + 1);
    }

    #[test]
    fn prop_trailing_range_is_full_scan(
        records in 0u64..300,
        mode in mode_strategy(),
        seed in any::<u64>(),
    ) {
        let trace = generate_trace(records, mode, seed);
        prop_assert_eq!(trace.range(), RangeQuery::full_scan(records));
        let last = trace.iter().last().unwrap().to_string();
        prop_assert_eq!(last, format!("RANGE 0 {records} {records}"));
    }

    #[test]
    fn prop_insert_keys_cover_domain_once(
        records in 0u64..300,
        mode in mode_strategy(),
        seed in any::<u64>(),
    ) {
        let trace = generate_trace(records, mode, seed);
        let mut keys = keys_of(&trace, OpKind::Insert);
        keys.sort_unstable();
        prop_assert_eq!(keys, (0..records).collect::<Vec<_>>());
    }

    #[test]
    fn prop_interleaved_deletes_are_a_permutation(records in 0u64..300, seed in any::<u64>()) {
        let trace = generate_trace(records, Mode::Interleaved, seed);
        let mut keys = keys_of(&trace, OpKind::Delete);
        keys.sort_unstable();
        prop_assert_eq!(keys, (0..records).collect::<Vec<_>>());
    }

    #[test]
    fn prop_sequential_deletes_stay_in_domain(records in 1u64..300, seed in any::<u64>()) {
        let trace = generate_trace(records, Mode::Sequential, seed);
        let keys = keys_of(&trace, OpKind::Delete);
        prop_assert_eq!(keys.len() as u64, records);
        prop_assert!(keys.iter().all(|key| *key < records));
    }

    #[test]
    fn prop_values_have_equal_length(
        records in 0u64..300,
        mode in mode_strategy(),
        seed in any::<u64>(),
    ) {
        let trace = generate_trace(records, mode, seed);
        for op in trace.body() {
            if let Some(value) = op.value() {
                prop_assert_eq!(value.len(), VALUE_LEN);
            }
        }
    }

    #[test]
    fn prop_fixed_seed_is_reproducible(
        records in 0u64..200,
        mode in mode_strategy(),
        seed in any::<u64>(),
    ) {
        prop_assert_eq!(
            generate_trace(records, mode, seed),
            generate_trace(records, mode, seed)
        );
    }
}

#[test]
fn interleaved_example_three_records() {
    let trace = generate_trace(3, Mode::Interleaved, 2024);

    let mut expected: BTreeSet<String> = BTreeSet::new();
    for key in 0..3 {
        expected.insert(format!("INSERT {key} {}", synthesize_value(key)));
        expected.insert(format!("READ {key}"));
        expected.insert(format!("DELETE {key}"));
    }
    let body: BTreeSet<String> = trace.body().iter().map(ToString::to_string).collect();

    assert_eq!(trace.body().len(), 9);
    assert_eq!(body, expected);
    assert_eq!(trace.iter().last().unwrap().to_string(), "RANGE 0 3 3");
}

#[test]
fn interleaved_inserts_carry_their_own_value() {
    let trace = generate_trace(100, Mode::Interleaved, 5);
    for op in trace.body() {
        if let Operation::Insert { key, value } = op {
            assert_eq!(value, &synthesize_value(*key));
        }
    }
}

#[test]
fn sequential_example_two_records() {
    let trace = generate_trace(2, Mode::Sequential, 77);
    let lines: Vec<String> = trace.iter().map(ToString::to_string).collect();

    assert_eq!(lines.len(), 7);
    let inserted: BTreeSet<Key> = keys_of(&trace, OpKind::Insert).into_iter().collect();
    assert_eq!(inserted, BTreeSet::from([0, 1]));
    assert!(lines[0].starts_with("INSERT ") && lines[1].starts_with("INSERT "));
    assert_eq!(&lines[2..4], &["READ 0".to_string(), "READ 1".to_string()]);
    for line in &lines[4..6] {
        assert!(line == "DELETE 0" || line == "DELETE 1", "{line}");
    }
    assert_eq!(lines[6], "RANGE 0 2 2");
}

#[test]
fn sequential_insert_values_follow_position() {
    let trace = generate_trace(50, Mode::Sequential, 8);
    for (index, op) in trace.body()[..50].iter().enumerate() {
        assert_eq!(op.value(), Some(synthesize_value(index as u64).as_str()));
    }
}

#[test]
fn empty_domain_produces_range_only() {
    for mode in [Mode::Interleaved, Mode::Sequential] {
        let trace = generate_trace(0, mode, 1);
        assert!(trace.body().is_empty());
        assert_eq!(
            trace.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["RANGE 0 0 0".to_string()]
        );
    }
}

#[test]
fn sequential_deletes_are_roughly_uniform() {
    const RECORDS: u64 = 10;
    const RUNS: u64 = 2000;

    let mut hits = [0u64; RECORDS as usize];
    for seed in 0..RUNS {
        let trace = generate_trace(RECORDS, Mode::Sequential, seed);
        for key in keys_of(&trace, OpKind::Delete) {
            hits[key as usize] += 1;
        }
    }

    // Each key expects RUNS hits; allow a wide band so the check stays stable.
    let expected = RUNS as f64;
    for (key, count) in hits.iter().enumerate() {
        let deviation = (*count as f64 - expected).abs() / expected;
        assert!(deviation < 0.15, "key {key} hit {count} times");
    }

    let chi_square: f64 = hits
        .iter()
        .map(|count| {
            let diff = *count as f64 - expected;
            diff * diff / expected
        })
        .sum();
    // 9 degrees of freedom; 33.72 is the 0.0001 critical value.
    assert!(chi_square < 33.72, "chi-square {chi_square}");
}

#[test]
fn sequential_deletes_differ_from_interleaved() {
    // Over a large domain, drawing with replacement leaves keys untouched.
    let trace = generate_trace(1000, Mode::Sequential, 3);
    let distinct: BTreeSet<Key> = keys_of(&trace, OpKind::Delete).into_iter().collect();
    assert!(distinct.len() < 1000);
}
