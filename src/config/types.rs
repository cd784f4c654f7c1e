//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_RETRY_ATTEMPTS, DEFAULT_TIMEOUT_SECS, GEOIP_API_BASE};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Shape of the emitted result records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// `ip:port [host]` blocks
    Text,
    /// One JSON object per record
    Json,
}

/// Timeout and retry budget handed to the host identification engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Applies to each TLS attempt separately
    pub timeout: Duration,
    /// TLS attempts before falling back to reverse DNS; values below 1 count as 1
    pub max_attempts: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_attempts: DEFAULT_RETRY_ATTEMPTS,
        }
    }
}

/// Command-line options.
///
/// This struct is automatically generated by `clap` from the field attributes.
/// Targets are read one per line (`ip` or `ip:port`) from stdin unless
/// `--input` names a file.
///
/// # Examples
///
/// ```bash
/// # Plain text to stdout
/// echo 93.184.216.34 | certhost
///
/// # JSON lines with enrichment, appended to a file as they are produced
/// certhost --json --debug -o results.jsonl < targets.txt
///
/// # One JSON array written at the end
/// certhost --json --batch -o results.json < targets.txt
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "certhost",
    about = "Resolves hostnames for IP:port targets from TLS certificates, falling back to reverse DNS."
)]
pub struct Opt {
    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Read targets from this file instead of stdin ("-" means stdin)
    #[arg(long, default_value = "-")]
    pub input: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enrich results with TLS fingerprints and geolocation
    #[arg(long)]
    pub debug: bool,

    /// Write all results once at the end instead of appending per target
    #[arg(long, requires = "output")]
    pub batch: bool,

    /// TLS connection timeout in seconds (at least 1)
    #[arg(
        long,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Number of TLS attempts to perform before falling back to reverse DNS
    #[arg(long, default_value_t = DEFAULT_RETRY_ATTEMPTS)]
    pub retry: usize,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Geolocation API base URL
    #[arg(long, default_value = GEOIP_API_BASE)]
    pub geoip_url: String,
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without going through `clap`.
///
/// # Examples
///
/// ```no_run
/// use certhost::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     output: Some(PathBuf::from("hosts.jsonl")),
///     enrich: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Target list; `-` reads stdin
    pub input: PathBuf,

    /// Destination file; `None` writes to stdout
    pub output: Option<PathBuf>,

    /// Record format
    pub format: OutputFormat,

    /// Collect fingerprints and geolocation for every target
    pub enrich: bool,

    /// Buffer records and write them once at the end (requires `output`)
    pub batch: bool,

    /// Per-attempt TLS timeout in seconds; 0 makes every attempt fail at once
    pub timeout_seconds: u64,

    /// TLS attempt budget
    pub retry: usize,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Geolocation API base URL
    pub geoip_url: String,
}

impl Config {
    /// Builds the engine options from the configured timeout and retry budget.
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            timeout: Duration::from_secs(self.timeout_seconds),
            max_attempts: self.retry,
        }
    }

    /// Returns true when targets come from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("-"),
            output: None,
            format: OutputFormat::Text,
            enrich: false,
            batch: false,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            retry: DEFAULT_RETRY_ATTEMPTS,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            geoip_url: GEOIP_API_BASE.to_string(),
        }
    }
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            input: opt.input,
            output: opt.output,
            format: if opt.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            enrich: opt.debug,
            batch: opt.batch,
            timeout_seconds: opt.timeout,
            retry: opt.retry,
            log_level: opt.log_level,
            log_format: opt.log_format,
            geoip_url: opt.geoip_url,
        }
    }
}
