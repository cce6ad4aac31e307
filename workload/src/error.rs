//! Error types for workload configuration and generation.

use std::fmt;

use trace::TraceError;

/// Result type for configuration checks.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for trace generation.
pub type WorkloadResult<T> = Result<T, WorkloadError>;

/// Errors raised while validating a [`WorkloadConfig`](crate::WorkloadConfig).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration exceeds what trace consumers can replay.
    Limits(TraceError),

    /// No destination path was given.
    EmptyOutputPath,

    /// Unrecognized mode name.
    UnknownMode { value: String },
}

/// Errors raised by [`generate`](crate::generate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkloadError {
    /// Configuration was rejected before any generation work.
    Config(ConfigError),

    /// The generated operations did not form a valid trace.
    Trace(TraceError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limits(err) => write!(f, "configuration out of bounds: {err}"),
            Self::EmptyOutputPath => write!(f, "output path must not be empty"),
            Self::UnknownMode { value } => write!(
                f,
                "unknown mode '{value}', expected 'interleaved' or 'sequential'"
            ),
        }
    }
}

impl fmt::Display for WorkloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Trace(err) => write!(f, "trace construction failed: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Limits(err) => Some(err),
            _ => None,
        }
    }
}

impl std::error::Error for WorkloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Trace(err) => Some(err),
        }
    }
}

impl From<ConfigError> for WorkloadError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<TraceError> for WorkloadError {
    fn from(err: TraceError) -> Self {
        Self::Trace(err)
    }
}
