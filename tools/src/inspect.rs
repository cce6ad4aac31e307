//! Streaming statistics over a trace file.

use std::collections::HashSet;
use std::io::BufRead;

use serde::Serialize;
use trace::{Key, Operation, RangeQuery, ReadError, TraceReader};

/// Key coverage for one operation kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyStats {
    pub total: u64,
    pub distinct: u64,
    pub min: Option<Key>,
    pub max: Option<Key>,
}

impl KeyStats {
    #[must_use]
    pub const fn duplicates(&self) -> u64 {
        self.total - self.distinct
    }
}

#[derive(Debug, Default)]
struct KeyTracker {
    seen: HashSet<Key>,
    stats: KeyStats,
}

impl KeyTracker {
    fn record(&mut self, key: Key) {
        self.stats.total += 1;
        if self.seen.insert(key) {
            self.stats.distinct += 1;
        }
        self.stats.min = Some(self.stats.min.map_or(key, |min| min.min(key)));
        self.stats.max = Some(self.stats.max.map_or(key, |max| max.max(key)));
    }
}

/// Range of `INSERT` value lengths in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LengthRange {
    pub min: usize,
    pub max: usize,
}

/// A `RANGE` line and where it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeReport {
    pub line: usize,
    pub start: Key,
    pub count: u64,
    pub expected_count: u64,
}

impl RangeReport {
    #[must_use]
    pub const fn query(&self) -> RangeQuery {
        RangeQuery {
            start: self.start,
            count: self.count,
            expected_count: self.expected_count,
        }
    }
}

/// Everything `inspect` learns from one pass over a trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    /// Physical lines read, blank and comment lines included.
    pub lines: usize,
    pub operations: u64,
    pub inserts: KeyStats,
    pub reads: KeyStats,
    pub deletes: KeyStats,
    pub ranges: u64,
    pub value_len: Option<LengthRange>,
    /// The last `RANGE` line seen.
    pub range: Option<RangeReport>,
    /// Whether any operation follows the first `RANGE`.
    pub operations_after_range: bool,
    /// Whether deletes precede the `RANGE`, making its expected count advisory.
    pub deletes_before_range: bool,
}

/// Reads a whole trace and collects its statistics.
///
/// Unlike [`trace::read_trace`], this accepts traces with a misplaced or
/// missing `RANGE` so their shape can be reported. Unparseable lines and I/O
/// failures still abort.
pub fn inspect_trace<R: BufRead>(reader: R) -> Result<InspectReport, ReadError> {
    let mut reader = TraceReader::new(reader);
    let mut report = InspectReport::default();
    let mut inserts = KeyTracker::default();
    let mut reads = KeyTracker::default();
    let mut deletes = KeyTracker::default();

    while let Some(line) = reader.next_line()? {
        report.operations += 1;
        if report.ranges > 0 {
            report.operations_after_range = true;
        }
        match &line.operation {
            Operation::Insert { key, value } => {
                inserts.record(*key);
                let len = value.len();
                report.value_len = Some(match report.value_len {
                    Some(range) => LengthRange {
                        min: range.min.min(len),
                        max: range.max.max(len),
                    },
                    None => LengthRange { min: len, max: len },
                });
            }
            Operation::Read { key } => reads.record(*key),
            Operation::Delete { key } => {
                deletes.record(*key);
                if report.ranges == 0 {
                    report.deletes_before_range = true;
                }
            }
            Operation::Range(query) => {
                report.ranges += 1;
                report.range = Some(RangeReport {
                    line: line.number,
                    start: query.start,
                    count: query.count,
                    expected_count: query.expected_count,
                });
            }
        }
    }

    report.lines = reader.lines_read();
    report.inserts = inserts.stats;
    report.reads = reads.stats;
    report.deletes = deletes.stats;
    Ok(report)
}

/// Renders a report for terminal output.
#[must_use]
pub fn format_report_pretty(report: &InspectReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "lines: {} operations: {}\n",
        report.lines, report.operations
    ));
    out.push_str("operations:\n");
    for (label, stats) in [
        ("INSERT", &report.inserts),
        ("READ", &report.reads),
        ("DELETE", &report.deletes),
    ] {
        let bounds = match (stats.min, stats.max) {
            (Some(min), Some(max)) => format!("keys {min}..={max}"),
            _ => "no keys".to_string(),
        };
        out.push_str(&format!(
            "  {label}: {} ({} distinct, {} duplicate, {bounds})\n",
            stats.total,
            stats.distinct,
            stats.duplicates()
        ));
    }
    out.push_str(&format!("  RANGE: {}\n", report.ranges));
    match report.value_len {
        Some(range) if range.min == range.max => {
            out.push_str(&format!("value length: {} bytes\n", range.min));
        }
        Some(range) => {
            out.push_str(&format!(
                "value length: {}..={} bytes\n",
                range.min, range.max
            ));
        }
        None => out.push_str("value length: n/a\n"),
    }
    match report.range {
        Some(range) => {
            out.push_str(&format!(
                "range: RANGE {} {} {} (line {})\n",
                range.start, range.count, range.expected_count, range.line
            ));
            if report.deletes_before_range && range.expected_count > 0 {
                out.push_str("  expected count is advisory: deletes precede the scan\n");
            }
        }
        None => out.push_str("range: missing\n"),
    }
    out
}
