//! Configuration loading and validation.
//!
//! Defines the [`ConfigSource`] trait for pluggable config backends.
//! Submodules provide the data model, the duration grammar, validation
//! logic, and concrete file source implementations.

pub mod duration;
pub mod model;
pub mod sources;
pub mod validation;

use async_trait::async_trait;

use crate::error::HealthCheckError;
use model::CheckConfig;

// async_trait is required here because ConfigSource is used as Box<dyn ConfigSource>
// and native async fn in traits (Rust 1.75+) does not support dyn dispatch.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn load(&self) -> Result<CheckConfig, HealthCheckError>;
}
