use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tools::{check_shape, format_report_pretty, inspect_trace, InspectReport, ShapeViolation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "kvtrace-tools",
    version,
    about = "kvtrace inspection tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize a trace file and check its shape.
    Inspect {
        /// Path to the trace file.
        trace_path: PathBuf,
        /// Expected record count; defaults to the trailing RANGE count.
        #[arg(long)]
        records: Option<u64>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = InspectFormat::Pretty)]
        format: InspectFormat,
        /// Exit with an error when shape violations are found.
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InspectFormat {
    Json,
    Pretty,
}

#[derive(Serialize)]
struct InspectOutput<'a> {
    report: &'a InspectReport,
    violations: &'a [ShapeViolation],
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

    match cli.command {
        Command::Inspect {
            trace_path,
            records,
            format,
            strict,
        } => {
            let file = File::open(&trace_path)
                .with_context(|| format!("open trace {}", trace_path.display()))?;
            let report = inspect_trace(BufReader::new(file))
                .with_context(|| format!("inspect trace {}", trace_path.display()))?;
            let violations = check_shape(&report, records);

            match format {
                InspectFormat::Json => {
                    let output = InspectOutput {
                        report: &report,
                        violations: &violations,
                    };
                    let json = serde_json::to_string_pretty(&output).context("serialize json")?;
                    println!("{json}");
                }
                InspectFormat::Pretty => {
                    print!("{}", format_report_pretty(&report));
                    if violations.is_empty() {
                        println!("shape: ok");
                    } else {
                        println!("shape violations:");
                        for violation in &violations {
                            println!("  {violation}");
                        }
                    }
                }
            }

            if !violations.is_empty() {
                if strict {
                    anyhow::bail!(
                        "{} shape violation(s) in {}",
                        violations.len(),
                        trace_path.display()
                    );
                }
                tracing::warn!(count = violations.len(), "trace has shape violations");
            }
        }
    }
    Ok(())
}
