use proptest::prelude::*;
use trace::{read_trace, Operation, RangeQuery, Trace, TraceWriter};

fn op_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (any::<u64>(), "[A-Za-z0-9_]{1,100}")
            .prop_map(|(key, value)| Operation::Insert { key, value }),
        any::<u64>().prop_map(|key| Operation::Read { key }),
        any::<u64>().prop_map(|key| Operation::Delete { key }),
    ]
}

fn range_strategy() -> impl Strategy<Value = RangeQuery> {
    (any::<u64>(), any::<u64>(), any::<u64>()).prop_map(|(start, count, expected_count)| {
        RangeQuery {
            start,
            count,
            expected_count,
        }
    })
}

proptest! {
    #[test]
    fn prop_written_trace_reads_back(
        body in prop::collection::vec(op_strategy(), 0..64),
        range in range_strategy(),
    ) {
        let trace = Trace::new(body, range).unwrap();

        let mut writer = TraceWriter::new(Vec::new());
        writer.write_trace(&trace).unwrap();
        let stats = writer.stats();
        let bytes = writer.finish().unwrap();

        prop_assert_eq!(stats.lines as usize, trace.line_count());
        prop_assert_eq!(stats.bytes as usize, bytes.len());
        prop_assert_eq!(bytes.iter().filter(|b| **b == b'\n').count(), trace.line_count());

        let decoded = read_trace(bytes.as_slice()).unwrap();
        prop_assert_eq!(decoded, trace);
    }

    #[test]
    fn prop_last_line_is_range(
        body in prop::collection::vec(op_strategy(), 0..32),
        range in range_strategy(),
    ) {
        let trace = Trace::new(body, range).unwrap();
        let mut writer = TraceWriter::new(Vec::new());
        writer.write_trace(&trace).unwrap();
        let text = String::from_utf8(writer.finish().unwrap()).unwrap();

        let last = text.lines().last().unwrap();
        let expected = format!("RANGE {} {} {}", range.start, range.count, range.expected_count);
        prop_assert_eq!(last, expected.as_str());
        prop_assert_eq!(text.lines().filter(|line| line.starts_with("RANGE ")).count(), 1);
    }
}
