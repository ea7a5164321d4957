//! `healthcheck filter`: turn a report into the list of endpoints to use.
//!
//! Reads a report written by `check` (from a file or stdin) and prints
//! the effective endpoints as a JSON array. Unless `--allow-empty` is
//! given, an all-down report falls back to every known endpoint.

use std::io::Read;
use std::path::Path;

use crate::cli::FilterArgs;
use crate::endpoint::ProbeReport;
use crate::error::HealthCheckError;
use crate::filter::DEFAULT_NOT_EMPTY;

pub fn execute(args: &FilterArgs) -> Result<(), HealthCheckError> {
    let (content, origin) = read_report(&args.report)?;
    let report = parse_report(&content, &origin)?;

    let effective = report.effective(DEFAULT_NOT_EMPTY && !args.allow_empty);
    let json = serde_json::to_string_pretty(&effective)
        .map_err(|e| HealthCheckError::Io(std::io::Error::other(e)))?;
    println!("{json}");
    Ok(())
}

fn read_report(path: &Path) -> Result<(String, String), HealthCheckError> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        return Ok((content, "<stdin>".into()));
    }

    if !path.exists() {
        return Err(HealthCheckError::ConfigFileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok((std::fs::read_to_string(path)?, path.display().to_string()))
}

fn parse_report(content: &str, origin: &str) -> Result<ProbeReport, HealthCheckError> {
    serde_json::from_str(content).map_err(|e| HealthCheckError::ReportParse {
        path: origin.to_string(),
        source: e,
    })
}
