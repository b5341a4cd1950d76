//! File-driven front end: loads `lower,upper` records, marks them into a
//! [`MembershipTracker`] and writes the reduced ranges back out.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then `ZIP_RANGE_REDUCE_*` environment variables. Command-line flags are
//! applied on top by the binary.

use crate::{BoundedRange, Domain, DomainError, MembershipTracker, ParseRangeError};
use crate::{DEFAULT_FLAGGED_VALUE, DEFAULT_MAX_BOUND, DEFAULT_MIN_BOUND};

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Prefix of environment variables that override configuration keys.
pub const ENV_PREFIX: &str = "ZIP_RANGE_REDUCE_";

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("configuration file {} does not exist", .0.display())]
    MissingConfig(PathBuf),
    #[error("invalid configuration: {0}")]
    Config(#[from] figment::Error),
    #[error("no input file configured")]
    MissingInput,
    #[error(transparent)]
    Domain(#[from] DomainError<u32>),
    #[error("malformed range on line {line}")]
    BadLine {
        line: usize,
        source: ParseRangeError<u32>,
    },
    #[error("unable to open input file {}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("unable to create output file {}", .path.display())]
    Create { path: PathBuf, source: io::Error },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Which membership state the driver reduces and emits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emit {
    /// Values covered by at least one input range.
    #[default]
    Flagged,
    /// Values covered by no input range.
    Unflagged,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverConfig {
    /// File with one `lower,upper` record per line.
    pub input: Option<PathBuf>,
    /// File receiving one `lower,upper` record per reduced range.
    pub output: Option<PathBuf>,
    pub min: u32,
    pub max: u32,
    pub flagged_value: bool,
    pub emit: Emit,
    /// Abort on the first malformed line instead of skipping it.
    pub strict: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            input: None,
            output: None,
            min: DEFAULT_MIN_BOUND,
            max: DEFAULT_MAX_BOUND,
            flagged_value: DEFAULT_FLAGGED_VALUE,
            emit: Emit::default(),
            strict: false,
        }
    }
}

impl DriverConfig {
    /// Loads the layered configuration, reading `config_file` if given.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::MissingConfig`] if `config_file` does not
    /// exist, and [`DriverError::Config`] if any layer holds a value of the
    /// wrong type.
    pub fn load(config_file: Option<&Path>) -> Result<Self, DriverError> {
        let mut figment = Figment::from(Serialized::defaults(DriverConfig::default()));
        if let Some(path) = config_file {
            if !path.is_file() {
                return Err(DriverError::MissingConfig(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }
        let config: DriverConfig = figment.merge(Env::prefixed(ENV_PREFIX)).extract()?;
        info!(?config, "loaded configuration");
        Ok(config)
    }

    /// Builds the domain described by `min`, `max` and `flagged_value`.
    pub fn domain(&self) -> Result<Domain<u32>, DomainError<u32>> {
        Domain::new(self.min, self.max)
            .map(|domain| domain.with_flagged_value(self.flagged_value))
    }
}

/// Counts of input lines that were marked or skipped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub accepted: usize,
    pub rejected: usize,
}

/// Result of a complete driver run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    pub report: LoadReport,
    pub ranges: Vec<BoundedRange<u32>>,
}

/// Parses each line of `reader` as a range and marks it into `tracker`.
///
/// Trailing whitespace is trimmed and blank lines are ignored. Malformed
/// lines are logged and counted, unless `strict` is set.
///
/// # Errors
///
/// Returns [`DriverError::BadLine`] for the first malformed line when
/// `strict` is set, and [`DriverError::Io`] if reading fails.
pub fn load_ranges<R: BufRead>(reader: R, tracker: &mut MembershipTracker<u32>, strict: bool)
        -> Result<LoadReport, DriverError> {
    let mut report = LoadReport::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim_end();
        if text.is_empty() {
            continue;
        }
        match tracker.parse_range(text) {
            Ok(range) => {
                tracker.mark(&range);
                report.accepted += 1;
            }
            Err(source) if strict => {
                return Err(DriverError::BadLine { line: index + 1, source });
            }
            Err(err) => {
                warn!(line = index + 1, %err, "skipping malformed range");
                report.rejected += 1;
            }
        }
    }
    Ok(report)
}

/// Writes each range as a `lower,upper` line.
pub fn write_records<W: Write>(mut writer: W, ranges: &[BoundedRange<u32>]) -> io::Result<()> {
    for range in ranges {
        write!(writer, "{}", range.record())?;
    }
    writer.flush()
}

/// Writes each range as a `[lower,upper]` line, for console echo.
pub fn write_console<W: Write>(mut writer: W, ranges: &[BoundedRange<u32>]) -> io::Result<()> {
    for range in ranges {
        writeln!(writer, "{}", range)?;
    }
    writer.flush()
}

/// Loads the configured input, reduces it and writes the configured output.
///
/// # Errors
///
/// Returns [`DriverError`] if the configuration is incomplete or invalid,
/// if a file cannot be opened or written, or on a malformed line in
/// strict mode.
pub fn run(config: &DriverConfig) -> Result<RunOutcome, DriverError> {
    let domain = config.domain()?;
    let input = config.input.as_ref().ok_or(DriverError::MissingInput)?;
    let file = File::open(input).map_err(|source| DriverError::Open {
        path: input.clone(),
        source,
    })?;

    let mut tracker = MembershipTracker::new(domain);
    let report = load_ranges(BufReader::new(file), &mut tracker, config.strict)?;
    let ranges = match config.emit {
        Emit::Flagged => tracker.reduce_flagged(),
        Emit::Unflagged => tracker.reduce_unflagged(),
    };

    if let Some(path) = &config.output {
        let file = File::create(path).map_err(|source| DriverError::Create {
            path: path.clone(),
            source,
        })?;
        write_records(BufWriter::new(file), &ranges)?;
    }
    info!(accepted = report.accepted, rejected = report.rejected,
        ranges = ranges.len(), "reduction complete");
    Ok(RunOutcome { report, ranges })
}
