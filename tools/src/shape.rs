//! Shape checks for generated traces.

use std::fmt;

use serde::Serialize;
use trace::{OpKind, RangeQuery};

use crate::inspect::InspectReport;

/// A way in which a trace departs from the generator's output contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeViolation {
    /// A phase has the wrong number of operations.
    CountMismatch {
        op: &'static str,
        expected: u64,
        actual: u64,
    },
    /// Insert keys are not a permutation of `[0, N)`.
    InsertKeysNotPermutation {
        distinct: u64,
        duplicates: u64,
        max: Option<u64>,
    },
    /// A point operation targets a key outside `[0, N)`.
    KeyOutOfDomain { op: &'static str, max: u64 },
    /// Not every value has the same length.
    UnequalValueLengths { min: usize, max: usize },
    /// No `RANGE` line.
    MissingRange,
    /// More than one `RANGE` line.
    MultipleRanges { count: u64 },
    /// Operations follow the `RANGE` line.
    RangeNotLast,
    /// The trailing range is not a full scan of `[0, N)`.
    RangeMismatch { expected: String, found: String },
}

impl fmt::Display for ShapeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CountMismatch {
                op,
                expected,
                actual,
            } => write!(f, "expected {expected} {op} operations, found {actual}"),
            Self::InsertKeysNotPermutation {
                distinct,
                duplicates,
                max,
            } => {
                let max = max.map_or_else(|| "none".to_string(), |max| max.to_string());
                write!(
                    f,
                    "INSERT keys are not a permutation of the key domain \
                     ({distinct} distinct, {duplicates} duplicate, max key {max})"
                )
            }
            Self::KeyOutOfDomain { op, max } => {
                write!(f, "{op} targets key {max} outside the key domain")
            }
            Self::UnequalValueLengths { min, max } => {
                write!(f, "INSERT values vary in length ({min}..={max} bytes)")
            }
            Self::MissingRange => write!(f, "trace has no RANGE line"),
            Self::MultipleRanges { count } => write!(f, "trace has {count} RANGE lines"),
            Self::RangeNotLast => write!(f, "operations follow the RANGE line"),
            Self::RangeMismatch { expected, found } => {
                write!(f, "expected '{expected}', found '{found}'")
            }
        }
    }
}

/// Checks a report against the generator's output contract for `records`.
///
/// When `records` is `None` it is taken from the trailing range count, falling
/// back to the number of inserts.
#[must_use]
pub fn check_shape(report: &InspectReport, records: Option<u64>) -> Vec<ShapeViolation> {
    let records = records
        .or_else(|| report.range.map(|range| range.count))
        .unwrap_or(report.inserts.total);
    let mut violations = Vec::new();

    for (kind, stats) in [
        (OpKind::Insert, &report.inserts),
        (OpKind::Read, &report.reads),
        (OpKind::Delete, &report.deletes),
    ] {
        if stats.total != records {
            violations.push(ShapeViolation::CountMismatch {
                op: kind.token(),
                expected: records,
                actual: stats.total,
            });
        }
        if let Some(max) = stats.max {
            if max >= records {
                violations.push(ShapeViolation::KeyOutOfDomain {
                    op: kind.token(),
                    max,
                });
            }
        }
    }

    let inserts = &report.inserts;
    let is_permutation = inserts.duplicates() == 0
        && inserts.distinct == records
        && inserts.max == records.checked_sub(1);
    if !is_permutation {
        violations.push(ShapeViolation::InsertKeysNotPermutation {
            distinct: inserts.distinct,
            duplicates: inserts.duplicates(),
            max: inserts.max,
        });
    }

    if let Some(range) = report.value_len {
        if range.min != range.max {
            violations.push(ShapeViolation::UnequalValueLengths {
                min: range.min,
                max: range.max,
            });
        }
    }

    match report.ranges {
        0 => violations.push(ShapeViolation::MissingRange),
        1 => {}
        count => violations.push(ShapeViolation::MultipleRanges { count }),
    }
    if report.operations_after_range {
        violations.push(ShapeViolation::RangeNotLast);
    }
    if let Some(range) = report.range {
        let expected = RangeQuery::full_scan(records);
        if range.query() != expected {
            violations.push(ShapeViolation::RangeMismatch {
                expected: format_range(expected),
                found: format_range(range.query()),
            });
        }
    }

    violations
}

fn format_range(range: RangeQuery) -> String {
    trace::Operation::Range(range).to_string()
}
