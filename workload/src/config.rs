//! Generation settings and their validation.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use trace::TraceLimits;

use crate::domain::{KeyDomain, VALUE_LEN};
use crate::error::{ConfigError, ConfigResult};

/// How the three operation phases are built and ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One operation per key per phase, all `3N` operations shuffled together.
    #[default]
    #[serde(alias = "random")]
    Interleaved,

    /// Randomized bulk load, ascending reads, then `N` deletes drawn with
    /// replacement; phases kept in order.
    #[serde(alias = "seq")]
    Sequential,
}

impl Mode {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Interleaved => "interleaved",
            Self::Sequential => "sequential",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "interleaved" | "random" => Ok(Self::Interleaved),
            "sequential" | "seq" => Ok(Self::Sequential),
            _ => Err(ConfigError::UnknownMode {
                value: s.to_string(),
            }),
        }
    }
}

/// Settings for one trace generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkloadConfig {
    /// Size of the key universe and of each operation phase.
    pub record_count: u64,

    pub mode: Mode,

    /// Destination of the trace file.
    pub output_path: PathBuf,

    /// Fixed seed for reproducible traces; a fresh seed is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            record_count: 100_000,
            mode: Mode::Interleaved,
            output_path: PathBuf::from("trace.txt"),
            seed: None,
        }
    }
}

impl WorkloadConfig {
    /// Checks the configuration before any generation work starts.
    pub fn validate(&self, limits: &TraceLimits) -> ConfigResult<()> {
        limits
            .check_records(self.record_count)
            .map_err(ConfigError::Limits)?;
        limits
            .check_value_bytes(VALUE_LEN)
            .map_err(ConfigError::Limits)?;
        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyOutputPath);
        }
        Ok(())
    }

    #[must_use]
    pub const fn domain(&self) -> KeyDomain {
        KeyDomain::new(self.record_count)
    }
}
