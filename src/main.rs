use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use zip_range_reduce::driver::{self, DriverConfig, Emit};

/// Reduces ZIP code restriction ranges to the fewest disjoint ranges.
#[derive(Debug, Parser)]
#[command(name = "zip-range-reduce", version)]
struct Args {
    /// File with one `lower,upper` range per line.
    input: Option<PathBuf>,

    /// File receiving the reduced ranges, one `lower,upper` per line.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Lowest value of the domain.
    #[arg(long)]
    min: Option<u32>,
    /// Highest value of the domain.
    #[arg(long)]
    max: Option<u32>,

    /// Emit the values covered by no input range instead.
    #[arg(long)]
    unflagged: bool,

    /// Abort on the first malformed line instead of skipping it.
    #[arg(long)]
    strict: bool,

    /// Do not echo the reduced ranges on stdout.
    #[arg(short, long)]
    quiet: bool,

    /// TOML configuration file. `ZIP_RANGE_REDUCE_*` variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Logging level to use: one of "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    log_level: tracing::Level,
}

impl Args {
    fn apply(&self, config: &mut DriverConfig) {
        if let Some(input) = &self.input {
            config.input = Some(input.clone());
        }
        if let Some(output) = &self.output {
            config.output = Some(output.clone());
        }
        if let Some(min) = self.min {
            config.min = min;
        }
        if let Some(max) = self.max {
            config.max = max;
        }
        if self.unflagged {
            config.emit = Emit::Unflagged;
        }
        config.strict |= self.strict;
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries results only
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = DriverConfig::load(args.config.as_deref())
        .context("Unable to load configuration")?;
    args.apply(&mut config);

    let outcome = driver::run(&config).context("Unable to reduce ranges")?;
    if outcome.report.rejected > 0 {
        tracing::warn!("{} malformed line(s) skipped", outcome.report.rejected);
    }
    if !args.quiet {
        driver::write_console(io::stdout().lock(), &outcome.ranges)
            .context("Unable to write to stdout")?;
    }
    Ok(())
}
