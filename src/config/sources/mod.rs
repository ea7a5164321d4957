//! Concrete [`ConfigSource`](super::ConfigSource) implementations.
//!
//! Provides file-based sources (YAML, JSON, TOML) gated by feature flags
//! and the [`parse_config_str`] helper for format-specific deserialization.

pub mod file_source;

#[cfg(feature = "yaml")]
pub mod yaml;

#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "toml")]
pub mod toml_source;

use std::path::Path;

use crate::config::model::CheckConfig;
use crate::config::ConfigSource;
use crate::error::HealthCheckError;

/// File names probed, in order, when no config path is given.
pub const DEFAULT_CANDIDATES: &[&str] = &[
    "healthcheck.yaml",
    "healthcheck.yml",
    "healthcheck.json",
    "healthcheck.toml",
];

/// Parse a config string based on file extension.
pub fn parse_config_str(
    ext: &str,
    content: &str,
    path_display: &str,
) -> Result<CheckConfig, HealthCheckError> {
    match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => serde_yml::from_str(content).map_err(|e| HealthCheckError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "json")]
        "json" => serde_json::from_str(content).map_err(|e| HealthCheckError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "toml")]
        "toml" => toml::from_str(content).map_err(|e| HealthCheckError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        other => Err(HealthCheckError::UnsupportedFormat(other.to_string())),
    }
}

/// Pick a [`ConfigSource`] for `path` from its extension.
pub fn create_file_source(path: &Path) -> Result<Box<dyn ConfigSource>, HealthCheckError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => Ok(Box::new(yaml::new(path.to_path_buf()))),

        #[cfg(feature = "json")]
        "json" => Ok(Box::new(json::new(path.to_path_buf()))),

        #[cfg(feature = "toml")]
        "toml" => Ok(Box::new(toml_source::new(path.to_path_buf()))),

        other => Err(HealthCheckError::UnsupportedFormat(other.to_string())),
    }
}
