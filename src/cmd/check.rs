//! `healthcheck check`: probe every configured endpoint once.
//!
//! Loads the config from an explicit file or auto-detects one in the
//! current directory, applies command-line overrides, runs the check and
//! prints the up/down report as JSON on stdout.

use std::path::{Path, PathBuf};

use crate::cli::CheckArgs;
use crate::config::model::CheckConfig;
use crate::config::sources::{create_file_source, DEFAULT_CANDIDATES};
use crate::config::ConfigSource;
use crate::endpoint::ProbeReport;
use crate::error::HealthCheckError;
use crate::logging;
use crate::probe;

pub async fn execute(args: CheckArgs) -> Result<(), HealthCheckError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    let source = resolve_file_source(args.config.as_deref()).await?;
    let mut config = source.load().await?;
    tracing::info!(source = source.name(), "config loaded");

    apply_overrides(&mut config, &args);

    let report = probe::run_check(&config).await?;
    print_report(&report)?;

    if args.strict && !report.down.is_empty() {
        return Err(HealthCheckError::EndpointsDown {
            down: report.down.len(),
            total: report.total(),
        });
    }
    Ok(())
}

fn apply_overrides(config: &mut CheckConfig, args: &CheckArgs) {
    if let Some(ref timeout) = args.timeout {
        config.timeout.clone_from(timeout);
    }
    if let Some(retries) = args.retries {
        config.retries = retries;
    }
}

fn print_report(report: &ProbeReport) -> Result<(), HealthCheckError> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| HealthCheckError::Io(std::io::Error::other(e)))?;
    println!("{json}");
    Ok(())
}

async fn resolve_file_source(
    explicit: Option<&Path>,
) -> Result<Box<dyn ConfigSource>, HealthCheckError> {
    if let Some(path) = explicit {
        return create_file_source(path);
    }

    for name in DEFAULT_CANDIDATES {
        let path = PathBuf::from(name);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::info!(path = %path.display(), "auto-detected config file");
            return create_file_source(&path);
        }
    }

    Err(HealthCheckError::NoConfigSource {
        hint: "Provide --config <file> or create ./healthcheck.yaml.\n  \
               Run 'healthcheck init' to create a config file."
            .into(),
    })
}
