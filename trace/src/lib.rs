//! Operation model and line-oriented trace format for kvtrace.
//!
//! A trace is a text file with one operation per line, fields separated by
//! single spaces, closed by exactly one range scan:
//!
//! ```text
//! INSERT <key> <value>
//! READ <key>
//! DELETE <key>
//! RANGE <start> <count> <expected_count>
//! ```
//!
//! This crate knows how to represent, write, and read that format. It does not
//! know how traces are generated.
//!
//! # Design Principles
//!
//! - **Structural invariants** - A [`Trace`] cannot hold a `RANGE` anywhere but last.
//! - **Consumer-compatible parsing** - The reader accepts exactly what the benchmark driver accepts.
//! - **Explicit errors** - I/O failures are surfaced, never swallowed.
//!
//! # Example
//!
//! ```
//! use trace::{read_trace, Operation, RangeQuery, Trace, TraceWriter};
//!
//! let trace = Trace::new(vec![Operation::Read { key: 0 }], RangeQuery::full_scan(1)).unwrap();
//!
//! let mut writer = TraceWriter::new(Vec::new());
//! writer.write_trace(&trace).unwrap();
//! let bytes = writer.finish().unwrap();
//! assert_eq!(bytes, b"READ 0\nRANGE 0 1 1\n");
//!
//! let decoded = read_trace(bytes.as_slice()).unwrap();
//! assert_eq!(decoded, trace);
//! ```

mod error;
mod limits;
mod op;
mod reader;
mod sequence;
mod writer;

pub use error::{LimitKind, ParseError, ParseErrorKind, TraceError, TraceResult, ValueReason};
pub use limits::TraceLimits;
pub use op::{parse_line, Key, OpKind, Operation, RangeQuery};
pub use reader::{read_trace, ReadError, TraceLine, TraceReader};
pub use sequence::{OpCounts, Trace};
pub use writer::{TraceWriter, WriteStats};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        // Verify all expected items are exported
        let _ = TraceLimits::default();
        let _ = RangeQuery::full_scan(0);
        let _ = OpKind::ALL;
        let _ = OpCounts::default();
        let _ = WriteStats::default();

        // Error types
        let _: TraceResult<()> = Ok(());
    }

    #[test]
    fn doctest_example() {
        let trace =
            Trace::new(vec![Operation::Read { key: 0 }], RangeQuery::full_scan(1)).unwrap();

        let mut writer = TraceWriter::new(Vec::new());
        writer.write_trace(&trace).unwrap();
        let bytes = writer.finish().unwrap();

        let decoded = read_trace(bytes.as_slice()).unwrap();
        assert_eq!(decoded, trace);
    }
}
