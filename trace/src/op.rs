//! Operation model and the single-line text codec.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseErrorKind;

/// A key in the trace key universe `[0, N)`.
pub type Key = u64;

/// Operation discriminant, shared by counters and error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OpKind {
    Insert,
    Read,
    Delete,
    Range,
}

impl OpKind {
    /// All kinds in their canonical phase order.
    pub const ALL: [Self; 4] = [Self::Insert, Self::Read, Self::Delete, Self::Range];

    /// Returns the leading token written for this kind.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Read => "READ",
            Self::Delete => "DELETE",
            Self::Range => "RANGE",
        }
    }

    /// Matches an operation token case-insensitively.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.token().eq_ignore_ascii_case(token))
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A range scan: `count` keys starting at `start`, expected to yield
/// `expected_count` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeQuery {
    pub start: Key,
    pub count: u64,
    pub expected_count: u64,
}

impl RangeQuery {
    /// A scan over the whole key universe `[0, records)` expecting every record.
    #[must_use]
    pub const fn full_scan(records: u64) -> Self {
        Self {
            start: 0,
            count: records,
            expected_count: records,
        }
    }
}

/// One line of a trace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    Insert { key: Key, value: String },
    Read { key: Key },
    Delete { key: Key },
    Range(RangeQuery),
}

impl Operation {
    #[must_use]
    pub const fn kind(&self) -> OpKind {
        match self {
            Self::Insert { .. } => OpKind::Insert,
            Self::Read { .. } => OpKind::Read,
            Self::Delete { .. } => OpKind::Delete,
            Self::Range(_) => OpKind::Range,
        }
    }

    /// Returns the targeted key for point operations.
    #[must_use]
    pub const fn key(&self) -> Option<Key> {
        match self {
            Self::Insert { key, .. } | Self::Read { key } | Self::Delete { key } => Some(*key),
            Self::Range(_) => None,
        }
    }

    /// Returns the payload of an `INSERT`.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Insert { value, .. } => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert { key, value } => write!(f, "INSERT {key} {value}"),
            Self::Read { key } => write!(f, "READ {key}"),
            Self::Delete { key } => write!(f, "DELETE {key}"),
            Self::Range(range) => write!(
                f,
                "RANGE {} {} {}",
                range.start, range.count, range.expected_count
            ),
        }
    }
}

/// Parses one trace line.
///
/// Surrounding whitespace is ignored. Blank lines and lines starting with `#`
/// carry no operation and yield `Ok(None)`. The operation token is matched
/// case-insensitively and an `INSERT` value is the remainder of the line.
pub fn parse_line(line: &str) -> Result<Option<Operation>, ParseErrorKind> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    line.parse().map(Some)
}

impl FromStr for Operation {
    type Err = ParseErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (token, rest) = split_token(s);
        if token.is_empty() {
            return Err(ParseErrorKind::Empty);
        }
        let kind = OpKind::from_token(token).ok_or_else(|| ParseErrorKind::UnknownOperation {
            token: token.to_string(),
        })?;

        match kind {
            OpKind::Insert => {
                let (key, rest) = split_token(rest);
                let key = parse_int(kind, "key", key)?;
                let value = rest.trim();
                if value.is_empty() {
                    return Err(ParseErrorKind::MissingField {
                        op: kind,
                        field: "value",
                    });
                }
                Ok(Self::Insert {
                    key,
                    value: value.to_string(),
                })
            }
            OpKind::Read | OpKind::Delete => {
                let (key, rest) = split_token(rest);
                let key = parse_int(kind, "key", key)?;
                expect_end(kind, rest)?;
                Ok(if kind == OpKind::Read {
                    Self::Read { key }
                } else {
                    Self::Delete { key }
                })
            }
            OpKind::Range => {
                let (start, rest) = split_token(rest);
                let (count, rest) = split_token(rest);
                let (expected, rest) = split_token(rest);
                let range = RangeQuery {
                    start: parse_int(kind, "start", start)?,
                    count: parse_int(kind, "count", count)?,
                    expected_count: parse_int(kind, "expected_count", expected)?,
                };
                expect_end(kind, rest)?;
                Ok(Self::Range(range))
            }
        }
    }
}

fn split_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(idx) => (&s[..idx], &s[idx..]),
        None => (s, ""),
    }
}

fn parse_int(op: OpKind, field: &'static str, token: &str) -> Result<u64, ParseErrorKind> {
    if token.is_empty() {
        return Err(ParseErrorKind::MissingField { op, field });
    }
    token.parse().map_err(|_| ParseErrorKind::InvalidInteger {
        op,
        field,
        token: token.to_string(),
    })
}

fn expect_end(op: OpKind, rest: &str) -> Result<(), ParseErrorKind> {
    if rest.trim().is_empty() {
        Ok(())
    } else {
        Err(ParseErrorKind::TrailingTokens { op })
    }
}
