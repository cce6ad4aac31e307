//! Limits imposed by trace consumers.

use crate::error::{LimitKind, TraceError, TraceResult};

/// Bounds a generated trace must respect to be replayable.
///
/// The benchmark driver stores keys in a signed 32-bit integer and copies each
/// `INSERT` value into a fixed 100-byte payload slot, so traces outside these
/// bounds would be silently truncated on replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceLimits {
    /// Maximum number of records (size of the key universe).
    pub max_records: u64,

    /// Maximum length of a single `INSERT` value in bytes.
    pub max_value_bytes: usize,
}

impl Default for TraceLimits {
    fn default() -> Self {
        Self {
            // Largest key must still fit in an i32.
            max_records: i32::MAX as u64 + 1,
            max_value_bytes: 100,
        }
    }
}

impl TraceLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_records: 4096,
            max_value_bytes: 100,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_records: u64::MAX,
            max_value_bytes: usize::MAX,
        }
    }

    pub fn check_records(&self, records: u64) -> TraceResult<()> {
        if records > self.max_records {
            return Err(TraceError::LimitsExceeded {
                kind: LimitKind::Records,
                limit: self.max_records,
                actual: records,
            });
        }
        Ok(())
    }

    pub fn check_value_bytes(&self, len: usize) -> TraceResult<()> {
        if len > self.max_value_bytes {
            return Err(TraceError::LimitsExceeded {
                kind: LimitKind::ValueBytes,
                limit: self.max_value_bytes as u64,
                actual: len as u64,
            });
        }
        Ok(())
    }
}
