//! Key domain, operation mix, and interleaving for kvtrace workloads.
//!
//! Generation is a straight pipeline:
//!
//! 1. [`KeyDomain`] - the key universe `[0, N)` and deterministic values
//! 2. [`build_mix`] - insert, read, and delete phases for a [`Mode`]
//! 3. [`interleave`] - final ordering plus the trailing range scan
//!
//! [`generate`] runs all three from a validated [`WorkloadConfig`].
//!
//! # Design Principles
//!
//! - **Reproducible** - All randomness flows through one seeded [`TraceRng`].
//! - **Validated up front** - Configuration is checked before any work starts.
//! - **No I/O** - Writing the trace is the caller's job.
//!
//! # Example
//!
//! ```
//! use trace::TraceLimits;
//! use workload::{generate, Mode, TraceRng, WorkloadConfig};
//!
//! let config = WorkloadConfig {
//!     record_count: 3,
//!     mode: Mode::Interleaved,
//!     ..WorkloadConfig::default()
//! };
//! let mut rng = TraceRng::seeded(7);
//! let trace = generate(&config, &TraceLimits::default(), &mut rng).unwrap();
//!
//! assert_eq!(trace.body().len(), 9);
//! assert_eq!(trace.iter().last().unwrap().to_string(), "RANGE 0 3 3");
//! ```

mod config;
mod domain;
mod error;
mod interleave;
mod mix;
mod rng;

pub use config::{Mode, WorkloadConfig};
pub use domain::{
    synthesize_value, KeyDomain, VALUE_FILL, VALUE_LEN, VALUE_PAD_WIDTH, VALUE_PREFIX,
};
pub use error::{ConfigError, ConfigResult, WorkloadError, WorkloadResult};
pub use interleave::interleave;
pub use mix::{build_mix, OperationMix};
pub use rng::TraceRng;

use trace::{Operation, Trace, TraceLimits};

/// Validates `config` and builds its trace, drawing randomness from `rng`.
///
/// The seed in `config` is not consulted here; callers build `rng` from it
/// (see [`TraceRng::from_optional_seed`]) so the seed actually used can be
/// logged or reported.
pub fn generate(
    config: &WorkloadConfig,
    limits: &TraceLimits,
    rng: &mut TraceRng,
) -> WorkloadResult<Trace> {
    config.validate(limits)?;

    let domain = config.domain();
    tracing::info!(
        records = domain.len(),
        mode = %config.mode,
        seed = rng.seed(),
        "generating trace"
    );

    let mix = build_mix(&domain, config.mode, rng);
    let trace = interleave(&domain, mix, config.mode, rng)?;

    if range_is_advisory(&trace) {
        tracing::warn!(
            expected = trace.range().expected_count,
            deletes = trace.counts().delete,
            "trailing RANGE expects every record although deletes precede it; \
             treat its expected count as advisory"
        );
    }
    Ok(trace)
}

/// Whether the trailing range's expected count conflicts with earlier deletes.
///
/// Traces keep `RANGE 0 N N` as their final line, but any delete before it
/// means a consumer replaying in order cannot see all `N` records.
#[must_use]
pub fn range_is_advisory(trace: &Trace) -> bool {
    trace.range().expected_count > 0
        && trace
            .body()
            .iter()
            .any(|op| matches!(op, Operation::Delete { .. }))
}
