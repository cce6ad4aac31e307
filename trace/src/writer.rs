//! Line-oriented trace writer.

use std::fmt::Write as _;
use std::io::{self, BufWriter, Write};

use crate::op::Operation;
use crate::sequence::{OpCounts, Trace};

/// Serializes operations to a sink, one newline-terminated line each.
///
/// Output is buffered; call [`finish`](Self::finish) to flush and surface any
/// deferred I/O error. Dropping the writer without finishing may lose lines.
#[derive(Debug)]
pub struct TraceWriter<W: Write> {
    inner: BufWriter<W>,
    line: String,
    lines: u64,
    bytes: u64,
    counts: OpCounts,
}

/// Totals for a finished write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub lines: u64,
    pub bytes: u64,
    pub counts: OpCounts,
}

impl<W: Write> TraceWriter<W> {
    /// Creates a writer with the default buffer capacity.
    pub fn new(inner: W) -> Self {
        Self::with_capacity(64 * 1024, inner)
    }

    pub fn with_capacity(capacity: usize, inner: W) -> Self {
        Self {
            inner: BufWriter::with_capacity(capacity, inner),
            line: String::with_capacity(128),
            lines: 0,
            bytes: 0,
            counts: OpCounts::default(),
        }
    }

    /// Writes a single operation as one line.
    pub fn write_operation(&mut self, op: &Operation) -> io::Result<()> {
        self.line.clear();
        // Formatting into a String cannot fail.
        let _ = writeln!(self.line, "{op}");
        self.inner.write_all(self.line.as_bytes())?;
        self.lines += 1;
        self.bytes += self.line.len() as u64;
        self.counts.record(op.kind());
        Ok(())
    }

    /// Writes every operation of `trace` in order, trailing range last.
    pub fn write_trace(&mut self, trace: &Trace) -> io::Result<()> {
        for op in trace.iter() {
            self.write_operation(op)?;
        }
        Ok(())
    }

    #[must_use]
    pub const fn stats(&self) -> WriteStats {
        WriteStats {
            lines: self.lines,
            bytes: self.bytes,
            counts: self.counts,
        }
    }

    /// Flushes buffered lines and returns the underlying sink.
    pub fn finish(self) -> io::Result<W> {
        self.inner.into_inner().map_err(io::IntoInnerError::into_error)
    }
}
