//! Error types for trace construction and parsing.

use std::fmt;

use crate::op::OpKind;

/// Result type for trace operations.
pub type TraceResult<T> = Result<T, TraceError>;

/// Errors that can occur when assembling or validating a trace.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TraceError {
    /// A `RANGE` operation appeared in the trace body.
    RangeInBody {
        /// Position of the offending operation in the body.
        index: usize,
    },

    /// A `RANGE` operation was followed by further operations.
    RangeNotLast {
        /// 1-based line number of the operation after the range.
        line: usize,
    },

    /// The trace has no trailing `RANGE` operation.
    MissingRange,

    /// An `INSERT` value cannot be written as a single token.
    InvalidValue { index: usize, reason: ValueReason },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: u64,
        actual: u64,
    },
}

/// Specific trace limit that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    Records,
    ValueBytes,
}

/// Why an `INSERT` value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueReason {
    Empty,
    ContainsWhitespace,
}

/// Errors produced while parsing a single trace line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The line has no operation token.
    Empty,

    /// The first token is not a known operation.
    UnknownOperation { token: String },

    /// A required field is missing.
    MissingField { op: OpKind, field: &'static str },

    /// A numeric field could not be parsed.
    InvalidInteger {
        op: OpKind,
        field: &'static str,
        token: String,
    },

    /// Extra tokens follow a complete operation.
    TrailingTokens { op: OpKind },
}

/// A parse failure tied to its position in the trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line number.
    pub line: usize,
    /// What went wrong.
    pub kind: ParseErrorKind,
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RangeInBody { index } => {
                write!(f, "RANGE operation at body index {index}; RANGE must be last")
            }
            Self::RangeNotLast { line } => {
                write!(f, "operation on line {line} follows the trailing RANGE")
            }
            Self::MissingRange => write!(f, "trace has no trailing RANGE operation"),
            Self::InvalidValue { index, reason } => {
                write!(f, "INSERT value at body index {index} is invalid: {reason}")
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Records => write!(f, "record count"),
            Self::ValueBytes => write!(f, "value bytes"),
        }
    }
}

impl fmt::Display for ValueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "value is empty"),
            Self::ContainsWhitespace => write!(f, "value contains whitespace"),
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "line has no operation"),
            Self::UnknownOperation { token } => write!(f, "unknown operation '{token}'"),
            Self::MissingField { op, field } => write!(f, "{op} is missing field '{field}'"),
            Self::InvalidInteger { op, field, token } => {
                write!(f, "{op} field '{field}' is not an integer: '{token}'")
            }
            Self::TrailingTokens { op } => write!(f, "{op} has unexpected trailing tokens"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl std::error::Error for TraceError {}
impl std::error::Error for ParseErrorKind {}
impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_range_in_body() {
        let err = TraceError::RangeInBody { index: 7 };
        let msg = err.to_string();
        assert!(msg.contains('7'), "should mention the index");
        assert!(msg.contains("RANGE"));
    }

    #[test]
    fn error_display_limits_exceeded() {
        let err = TraceError::LimitsExceeded {
            kind: LimitKind::ValueBytes,
            limit: 100,
            actual: 120,
        };
        let msg = err.to_string();
        assert!(msg.contains("value bytes"));
        assert!(msg.contains("100"));
        assert!(msg.contains("120"));
    }

    #[test]
    fn error_display_invalid_value() {
        let err = TraceError::InvalidValue {
            index: 3,
            reason: ValueReason::ContainsWhitespace,
        };
        assert!(err.to_string().contains("whitespace"));
    }

    #[test]
    fn parse_error_display_includes_line() {
        let err = ParseError {
            line: 42,
            kind: ParseErrorKind::InvalidInteger {
                op: OpKind::Read,
                field: "key",
                token: "abc".to_string(),
            },
        };
        let msg = err.to_string();
        assert!(msg.starts_with("line 42"));
        assert!(msg.contains("READ"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn error_equality() {
        let err1 = TraceError::RangeNotLast { line: 4 };
        let err2 = TraceError::RangeNotLast { line: 4 };
        let err3 = TraceError::RangeNotLast { line: 5 };
        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<TraceError>();
        assert_error::<ParseError>();
        assert_error::<ParseErrorKind>();
    }
}
