//! Generic async file-based config source.
//!
//! [`FileSource`] implements [`ConfigSource`] for any file format by
//! accepting a deserialization function at construction time. It reads
//! the file asynchronously via Tokio and validates the result before
//! handing it out.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::config::model::CheckConfig;
use crate::config::validation::validate;
use crate::config::ConfigSource;
use crate::error::HealthCheckError;

type DeserializeFn = fn(&str) -> Result<CheckConfig, Box<dyn std::error::Error + Send + Sync>>;

pub struct FileSource {
    path: PathBuf,
    name: &'static str,
    deserialize: DeserializeFn,
}

impl FileSource {
    #[must_use]
    pub fn new(path: PathBuf, name: &'static str, deserialize: DeserializeFn) -> Self {
        Self {
            path,
            name,
            deserialize,
        }
    }

    async fn read_content(&self) -> Result<String, HealthCheckError> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HealthCheckError::ConfigFileNotFound {
                    path: self.path.clone(),
                }
            } else {
                HealthCheckError::Io(e)
            }
        })
    }
}

#[async_trait]
impl ConfigSource for FileSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn load(&self) -> Result<CheckConfig, HealthCheckError> {
        let content = self.read_content().await?;

        let config = (self.deserialize)(&content).map_err(|e| HealthCheckError::ConfigParse {
            path: self.path.display().to_string(),
            source: e,
        })?;

        if let Err(errors) = validate(&config) {
            return Err(HealthCheckError::ConfigValidation { errors });
        }

        tracing::debug!(
            path = %self.path.display(),
            format = self.name,
            endpoints = config.endpoints.len(),
            "config loaded"
        );
        Ok(config)
    }
}
