//! The ordered trace container.

use crate::error::{TraceError, TraceResult, ValueReason};
use crate::op::{OpKind, Operation, RangeQuery};

/// Per-kind operation counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpCounts {
    pub insert: u64,
    pub read: u64,
    pub delete: u64,
    pub range: u64,
}

impl OpCounts {
    pub fn record(&mut self, kind: OpKind) {
        match kind {
            OpKind::Insert => self.insert += 1,
            OpKind::Read => self.read += 1,
            OpKind::Delete => self.delete += 1,
            OpKind::Range => self.range += 1,
        }
    }

    #[must_use]
    pub const fn get(&self, kind: OpKind) -> u64 {
        match kind {
            OpKind::Insert => self.insert,
            OpKind::Read => self.read,
            OpKind::Delete => self.delete,
            OpKind::Range => self.range,
        }
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.insert + self.read + self.delete + self.range
    }
}

/// An ordered sequence of point operations closed by exactly one range scan.
///
/// The body never contains a `RANGE`; the trailing range is held separately so
/// it is always the final line written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    body: Vec<Operation>,
    range: RangeQuery,
    tail: Operation,
}

impl Trace {
    /// Builds a trace from its body and the trailing range.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::RangeInBody`] if the body contains a `RANGE`, or
    /// [`TraceError::InvalidValue`] if an `INSERT` value is empty or contains
    /// whitespace (it would not survive the line format).
    pub fn new(body: Vec<Operation>, range: RangeQuery) -> TraceResult<Self> {
        for (index, op) in body.iter().enumerate() {
            match op {
                Operation::Range(_) => return Err(TraceError::RangeInBody { index }),
                Operation::Insert { value, .. } => {
                    if value.is_empty() {
                        return Err(TraceError::InvalidValue {
                            index,
                            reason: ValueReason::Empty,
                        });
                    }
                    if value.contains(char::is_whitespace) {
                        return Err(TraceError::InvalidValue {
                            index,
                            reason: ValueReason::ContainsWhitespace,
                        });
                    }
                }
                Operation::Read { .. } | Operation::Delete { .. } => {}
            }
        }
        Ok(Self {
            body,
            range,
            tail: Operation::Range(range),
        })
    }

    /// Operations preceding the trailing range.
    #[must_use]
    pub fn body(&self) -> &[Operation] {
        &self.body
    }

    /// The trailing range scan.
    #[must_use]
    pub const fn range(&self) -> RangeQuery {
        self.range
    }

    /// Number of lines the trace serializes to.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.body.len() + 1
    }

    /// Iterates every operation in write order, trailing range included.
    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.body.iter().chain(std::iter::once(&self.tail))
    }

    #[must_use]
    pub fn counts(&self) -> OpCounts {
        let mut counts = OpCounts::default();
        for op in self.iter() {
            counts.record(op.kind());
        }
        counts
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<Operation>, RangeQuery) {
        (self.body, self.range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(key: u64, value: &str) -> Operation {
        Operation::Insert {
            key,
            value: value.to_string(),
        }
    }

    #[test]
    fn empty_trace_has_only_range() {
        let trace = Trace::new(Vec::new(), RangeQuery::full_scan(0)).unwrap();
        assert!(trace.body().is_empty());
        assert_eq!(trace.line_count(), 1);
        let ops: Vec<_> = trace.iter().collect();
        assert_eq!(ops, vec![&Operation::Range(RangeQuery::full_scan(0))]);
    }

    #[test]
    fn range_is_always_last() {
        let body = vec![insert(0, "a"), Operation::Read { key: 0 }];
        let trace = Trace::new(body, RangeQuery::full_scan(1)).unwrap();
        let last = trace.iter().last().unwrap();
        assert_eq!(last, &Operation::Range(RangeQuery::full_scan(1)));
        assert_eq!(trace.range(), RangeQuery::full_scan(1));
    }

    #[test]
    fn rejects_range_in_body() {
        let body = vec![
            Operation::Read { key: 0 },
            Operation::Range(RangeQuery::full_scan(1)),
        ];
        assert_eq!(
            Trace::new(body, RangeQuery::full_scan(1)),
            Err(TraceError::RangeInBody { index: 1 })
        );
    }

    #[test]
    fn rejects_unwritable_values() {
        assert_eq!(
            Trace::new(vec![insert(0, "")], RangeQuery::full_scan(1)),
            Err(TraceError::InvalidValue {
                index: 0,
                reason: ValueReason::Empty
            })
        );
        assert_eq!(
            Trace::new(vec![insert(0, "a b")], RangeQuery::full_scan(1)),
            Err(TraceError::InvalidValue {
                index: 0,
                reason: ValueReason::ContainsWhitespace
            })
        );
    }

    #[test]
    fn counts_every_kind() {
        let body = vec![
            insert(0, "a"),
            insert(1, "b"),
            Operation::Read { key: 0 },
            Operation::Delete { key: 1 },
        ];
        let counts = Trace::new(body, RangeQuery::full_scan(2))
            .unwrap()
            .counts();
        assert_eq!(
            counts,
            OpCounts {
                insert: 2,
                read: 1,
                delete: 1,
                range: 1,
            }
        );
        assert_eq!(counts.total(), 5);
        assert_eq!(counts.get(OpKind::Insert), 2);
    }

    #[test]
    fn into_parts_returns_body_and_range() {
        let body = vec![Operation::Delete { key: 3 }];
        let trace = Trace::new(body.clone(), RangeQuery::full_scan(4)).unwrap();
        assert_eq!(trace.into_parts(), (body, RangeQuery::full_scan(4)));
    }
}
