//! Line-oriented trace reader.

use std::fmt;
use std::io::{self, BufRead};

use crate::error::{ParseError, TraceError};
use crate::op::{parse_line, Operation};
use crate::sequence::Trace;

/// Errors raised while reading a trace from a byte stream.
#[derive(Debug)]
pub enum ReadError {
    /// The underlying stream failed.
    Io(io::Error),
    /// A line could not be parsed.
    Parse(ParseError),
    /// The lines parsed, but do not form a valid trace.
    Shape(TraceError),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "read failed: {err}"),
            Self::Parse(err) => write!(f, "parse failed: {err}"),
            Self::Shape(err) => write!(f, "invalid trace: {err}"),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Shape(err) => Some(err),
        }
    }
}

impl From<io::Error> for ReadError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// A parsed operation together with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceLine {
    pub number: usize,
    pub operation: Operation,
}

/// Streams operations out of a trace, skipping blank and `#` comment lines.
#[derive(Debug)]
pub struct TraceReader<R> {
    inner: R,
    buf: String,
    line: usize,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: String::new(),
            line: 0,
        }
    }

    /// Returns the next operation, or `None` at end of stream.
    pub fn next_line(&mut self) -> Result<Option<TraceLine>, ReadError> {
        loop {
            self.buf.clear();
            if self.inner.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            let parsed = parse_line(&self.buf).map_err(|kind| {
                ReadError::Parse(ParseError {
                    line: self.line,
                    kind,
                })
            })?;
            if let Some(operation) = parsed {
                return Ok(Some(TraceLine {
                    number: self.line,
                    operation,
                }));
            }
        }
    }

    /// Number of physical lines consumed so far.
    #[must_use]
    pub const fn lines_read(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceLine, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

/// Reads a whole trace, requiring exactly one `RANGE` as the final operation.
pub fn read_trace<R: BufRead>(reader: R) -> Result<Trace, ReadError> {
    let mut body = Vec::new();
    let mut range = None;
    for line in TraceReader::new(reader) {
        let line = line?;
        if range.is_some() {
            return Err(ReadError::Shape(TraceError::RangeNotLast {
                line: line.number,
            }));
        }
        match line.operation {
            Operation::Range(query) => range = Some(query),
            op => body.push(op),
        }
    }
    let range = range.ok_or(ReadError::Shape(TraceError::MissingRange))?;
    Trace::new(body, range).map_err(ReadError::Shape)
}
