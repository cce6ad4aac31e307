use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::Parser;
use trace::TraceLimits;
use tracegen::{resolve_config, run, write_summary_json, ConfigOverrides};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workload::{Mode, WorkloadConfig};

#[derive(Parser)]
#[command(
    name = "tracegen",
    version,
    about = "Key-value workload trace generator"
)]
struct Cli {
    /// JSON config file; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of records (key universe size and operations per phase).
    #[arg(long, allow_negative_numbers = true)]
    records: Option<u64>,
    /// Phase construction and ordering strategy: `interleaved` (alias `random`)
    /// or `sequential` (alias `seq`).
    #[arg(long, value_parser = Mode::from_str)]
    mode: Option<Mode>,
    /// Destination trace file (created or overwritten).
    #[arg(long)]
    out: Option<PathBuf>,
    /// RNG seed for reproducible traces.
    #[arg(long)]
    seed: Option<u64>,
    /// Optional path for a JSON run summary.
    #[arg(long)]
    summary: Option<PathBuf>,
    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn workload_config(&self) -> Result<WorkloadConfig> {
        let overrides = ConfigOverrides {
            records: self.records,
            mode: self.mode,
            out: self.out.clone(),
            seed: self.seed,
        };
        resolve_config(self.config.as_deref(), overrides)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.workload_config()?;
    let summary = run(&config, &TraceLimits::default())?;
    if let Some(path) = &cli.summary {
        write_summary_json(path, &summary)?;
        tracing::info!(path = %path.display(), "summary written");
    }
    Ok(())
}
