//! Unified error types for healthcheck.
//!
//! Defines [`HealthCheckError`] (the main crate error enum) and
//! [`ValidationError`] for config validation failures. Both use
//! `thiserror` for `Display` and `Error` derives. Error messages
//! include contextual hints to guide the user toward a fix.
//!
//! Only global problems live here. A single endpoint failing its probe
//! is not an error: it is recorded in the `down` list of the report.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub location: String,
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  {}: {}: {}", self.location, self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

fn format_errors(errors: &[ValidationError]) -> String {
    use std::fmt::Write;
    let mut buf = String::new();
    for (i, e) in errors.iter().enumerate() {
        if i > 0 {
            buf.push('\n');
        }
        // write! to String is infallible (only fails on OOM which is unrecoverable)
        let _ = write!(buf, "{e}");
    }
    buf
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum HealthCheckError {
    #[error("Invalid timeout '{input}': {reason}")]
    InvalidDuration { input: String, reason: String },

    #[error("Error parsing server CA certificate: {0}")]
    CertificateFormat(String),

    #[error("Error parsing client TLS credentials: {0}")]
    CredentialParse(String),

    #[error("Invalid server name override '{0}'")]
    InvalidServerName(String),

    #[error("No config file found.\n\n  {hint}")]
    NoConfigSource { hint: String },

    #[error("Config file not found: {}", path.display())]
    ConfigFileNotFound { path: PathBuf },

    #[error("Config parse error in {path}:\n  {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Config validation failed:\n{}", format_errors(.errors))]
    ConfigValidation { errors: Vec<ValidationError> },

    #[error("Unsupported config format: '{0}'")]
    UnsupportedFormat(String),

    #[error("Report parse error in {path}:\n  {source}")]
    ReportParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("File already exists: {}", path.display())]
    FileExists { path: PathBuf },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{down} of {total} endpoints are down")]
    EndpointsDown { down: usize, total: usize },
}
