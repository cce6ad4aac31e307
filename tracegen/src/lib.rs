//! Workload trace generation for key-value storage benchmarks.
//!
//! This crate wires the [`workload`] pipeline to the file system:
//!
//! - Load a [`WorkloadConfig`] and apply command-line overrides
//! - Generate the trace from an explicitly seeded RNG
//! - Write the trace file and an optional JSON run summary
//!
//! # Design Principles
//!
//! - **Reproducible** - The seed used is always logged and reported.
//! - **All or nothing** - Any I/O failure aborts the run; a partial file is never reported as done.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use trace::{Operation, Trace, TraceLimits, TraceWriter, WriteStats};
use workload::{generate, range_is_advisory, Mode, TraceRng, WorkloadConfig, VALUE_LEN};

/// Outcome of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub record_count: u64,
    pub mode: Mode,
    pub seed: u64,
    pub output_path: String,
    pub lines: u64,
    pub bytes: u64,
    pub inserts: u64,
    pub reads: u64,
    pub deletes: u64,
    pub ranges: u64,
    pub value_len: usize,
    pub distinct_delete_keys: u64,
    pub range_expectation_advisory: bool,
    #[serde(skip)]
    pub elapsed_ms: u64,
}

impl Summary {
    fn new(config: &WorkloadConfig, seed: u64, trace: &Trace, stats: WriteStats) -> Self {
        let distinct_delete_keys = trace
            .body()
            .iter()
            .filter_map(|op| match op {
                Operation::Delete { key } => Some(*key),
                _ => None,
            })
            .collect::<BTreeSet<_>>()
            .len() as u64;

        Self {
            record_count: config.record_count,
            mode: config.mode,
            seed,
            output_path: config.output_path.display().to_string(),
            lines: stats.lines,
            bytes: stats.bytes,
            inserts: stats.counts.insert,
            reads: stats.counts.read,
            deletes: stats.counts.delete,
            ranges: stats.counts.range,
            value_len: VALUE_LEN,
            distinct_delete_keys,
            range_expectation_advisory: range_is_advisory(trace),
            elapsed_ms: 0,
        }
    }
}

/// Loads a JSON configuration file.
pub fn load_config(path: &Path) -> Result<WorkloadConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let config: WorkloadConfig = serde_json::from_str(&contents)
        .with_context(|| format!("parse config json {}", path.display()))?;
    Ok(config)
}

/// Command-line values that take precedence over a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub records: Option<u64>,
    pub mode: Option<Mode>,
    pub out: Option<PathBuf>,
    pub seed: Option<u64>,
}

/// Applies `overrides` on top of `base`. Absent overrides keep the base value.
#[must_use]
pub fn merge_overrides(mut base: WorkloadConfig, overrides: ConfigOverrides) -> WorkloadConfig {
    if let Some(records) = overrides.records {
        base.record_count = records;
    }
    if let Some(mode) = overrides.mode {
        base.mode = mode;
    }
    if let Some(out) = overrides.out {
        base.output_path = out;
    }
    if overrides.seed.is_some() {
        base.seed = overrides.seed;
    }
    base
}

/// Loads `config_path` (or the defaults when absent) and applies `overrides`.
pub fn resolve_config(
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<WorkloadConfig> {
    let base = match config_path {
        Some(path) => load_config(path)?,
        None => WorkloadConfig::default(),
    };
    Ok(merge_overrides(base, overrides))
}

/// Generates the trace described by `config` and writes it to its output path.
pub fn run(config: &WorkloadConfig, limits: &TraceLimits) -> Result<Summary> {
    let start = Instant::now();
    let mut rng = TraceRng::from_optional_seed(config.seed);
    let trace = generate(config, limits, &mut rng).context("generate trace")?;
    if config.seed.is_none() {
        tracing::info!(
            seed = rng.seed(),
            "no seed configured; pass --seed {} to reproduce this trace",
            rng.seed()
        );
    }
    let stats = write_trace_file(&config.output_path, &trace)?;

    let mut summary = Summary::new(config, rng.seed(), &trace, stats);
    summary.elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    tracing::info!(
        path = %config.output_path.display(),
        lines = summary.lines,
        bytes = summary.bytes,
        elapsed_ms = summary.elapsed_ms,
        "trace written"
    );
    Ok(summary)
}

/// Writes `trace` to `path`, creating or truncating it, and syncs it to disk.
pub fn write_trace_file(path: &Path, trace: &Trace) -> Result<WriteStats> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = TraceWriter::new(file);
    writer
        .write_trace(trace)
        .with_context(|| format!("write {}", path.display()))?;
    let stats = writer.stats();
    let file = writer
        .finish()
        .with_context(|| format!("flush {}", path.display()))?;
    file.sync_all()
        .with_context(|| format!("sync {}", path.display()))?;
    Ok(stats)
}

pub fn write_summary_json(path: &Path, summary: &Summary) -> Result<()> {
    let contents = serde_json::to_string_pretty(summary).context("serialize summary")?;
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
