//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (check, filter, init, validate), and their associated
//! argument structs. Flags that tune a check have environment variable
//! equivalents for cron jobs and containers.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::model::CheckKind;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("HEALTHCHECK_GIT_SHORT"),
    " ",
    env!("HEALTHCHECK_TARGET"),
    ")"
);

#[derive(Parser)]
#[command(
    name = "healthcheck",
    version,
    long_version = LONG_VERSION,
    about = "Concurrent TCP/HTTP endpoint health checks",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        healthcheck init                          Create a starter config\n  \
        healthcheck check                         Probe ./healthcheck.yaml endpoints\n  \
        healthcheck check | healthcheck filter    Endpoints to use, with fallback"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe every configured endpoint and print the up/down report
    Check(CheckArgs),

    /// Reduce a report to the endpoints callers should use
    Filter(FilterArgs),

    /// Generate a starter config file
    Init(InitArgs),

    /// Validate a config file without probing
    Validate(ValidateArgs),
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        healthcheck check                              Auto-detect config\n  \
        healthcheck check -c prod.yaml --strict        Exit 1 if anything is down\n  \
        healthcheck check --timeout 2s --retries 0     Fast, single attempt")]
pub struct CheckArgs {
    /// Config file path (.yaml, .json, .toml)
    #[arg(short, long, env = "HEALTHCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Per-attempt timeout, overrides the config (e.g. "500ms", "1m30s")
    #[arg(long, env = "HEALTHCHECK_TIMEOUT", help_heading = "Tuning")]
    pub timeout: Option<String>,

    /// Extra attempts after the first failure, overrides the config
    #[arg(long, env = "HEALTHCHECK_RETRIES", help_heading = "Tuning")]
    pub retries: Option<u32>,

    /// Exit with an error when any endpoint is down
    #[arg(long)]
    pub strict: bool,

    // -- Logging --
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        healthcheck filter report.json            Read a saved report\n  \
        healthcheck check | healthcheck filter    Read the report from stdin")]
pub struct FilterArgs {
    /// Report file produced by `check`, or "-" for stdin
    #[arg(default_value = "-")]
    pub report: PathBuf,

    /// Return an empty list instead of falling back to every endpoint
    #[arg(long)]
    pub allow_empty: bool,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        healthcheck init                              TCP check, YAML\n  \
        healthcheck init -k http                      HTTP check\n  \
        healthcheck init -f toml -o checks.toml       TOML at a custom path")]
pub struct InitArgs {
    /// Output format
    #[arg(short, long, default_value = "yaml")]
    pub format: ConfigFormat,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Kind of check the template describes
    #[arg(short, long, default_value = "tcp")]
    pub kind: KindArg,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Config file to validate
    #[arg(default_value = "healthcheck.yaml")]
    pub config: PathBuf,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: ValidateFormat,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum KindArg {
    Tcp,
    Http,
}

impl From<KindArg> for CheckKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Tcp => Self::Tcp,
            KindArg::Http => Self::Http,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ValidateFormat {
    Text,
    Json,
}
