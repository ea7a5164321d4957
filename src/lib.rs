//! Healthcheck probes network endpoints concurrently and reports which
//! ones are up.
//!
//! A check takes a list of endpoints, drops the ones under maintenance,
//! probes the rest in parallel over TCP (optionally completing a TLS
//! handshake) or HTTP(S), retries each failure within a fixed budget and
//! returns a sorted up/down partition. A separate fallback filter turns
//! that partition into the list callers should actually use.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (check, filter, init, validate).
//! - [`config`] -- Configuration model, duration parsing, validation and
//!   file loading via the [`ConfigSource`](config::ConfigSource) trait.
//! - [`endpoint`] -- Endpoint, maintenance entry and report types.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`filter`] -- The fallback filter over a report.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`ordering`] -- The endpoint comparator shared by every sorted list.
//! - [`probe`] -- TCP and HTTP strategies, the retry executor and the
//!   concurrent fan-out engine.
//! - [`tls`] -- rustls client configuration built from PEM materials.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `yaml` | YAML config file support _(enabled by default)_ |
//! | `json` | JSON config file support |
//! | `toml` | TOML config file support |
//! | `file-backends` | All file format backends |
//! | `full` | All features |

#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod filter;
pub mod logging;
pub mod ordering;
pub mod probe;
pub mod tls;

pub use config::model::CheckConfig;
pub use endpoint::{Endpoint, MaintenanceEntry, ProbeOutcome, ProbeReport};
pub use error::HealthCheckError;
pub use filter::compute_effective;
pub use probe::run_check;
