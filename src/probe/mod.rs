//! Endpoint probing: strategies, retries and the fan-out engine.
//!
//! [`run_check`] is the entry point for one probing call. It resolves
//! the timeout, builds the shared [`TlsContext`], picks a [`Prober`]
//! for the configured [`CheckKind`] and hands everything to
//! [`fanout::run_probes`]. Submodules hold the TCP ([`tcp`]) and HTTP
//! ([`http`]) strategies and the shared [`retry`] executor.

pub mod fanout;
pub mod http;
pub mod retry;
pub mod tcp;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::duration::parse_duration;
use crate::config::model::{CheckConfig, CheckKind};
use crate::endpoint::{Endpoint, ProbeOutcome, ProbeReport};
use crate::error::HealthCheckError;
use crate::tls::TlsContext;

/// Per-call knobs shared by both strategies.
#[derive(Debug, Clone, Copy)]
pub struct ProbeSettings {
    pub timeout: Duration,
    pub retries: u32,
    pub use_tls: bool,
}

impl ProbeSettings {
    pub fn from_config(config: &CheckConfig) -> Result<Self, HealthCheckError> {
        let timeout = parse_duration(&config.timeout)?;
        if timeout.is_zero() {
            return Err(HealthCheckError::InvalidDuration {
                input: config.timeout.clone(),
                reason: "timeout must be greater than zero; 0 does not disable the deadline".into(),
            });
        }
        Ok(Self {
            timeout,
            retries: config.retries,
            use_tls: config.tls,
        })
    }
}

// async_trait keeps Prober object-safe so strategies can be shared as Arc<dyn Prober>.
#[async_trait]
pub trait Prober: Send + Sync {
    fn kind(&self) -> CheckKind;

    /// Check one endpoint, spending the whole retry budget if needed.
    /// Never fails: problems end up in the outcome's `error`.
    async fn probe(&self, endpoint: &Endpoint) -> ProbeOutcome;
}

/// Run one complete check described by `config`.
///
/// Fails only on global problems (timeout string, TLS materials) and
/// does so before any endpoint is dialed.
pub async fn run_check(config: &CheckConfig) -> Result<ProbeReport, HealthCheckError> {
    let settings = ProbeSettings::from_config(config)?;
    let tls = Arc::new(TlsContext::build(
        config.server_auth.as_ref(),
        config.client_auth.cert_auth.as_ref(),
    )?);

    tracing::info!(
        kind = %config.kind,
        timeout = %config.timeout,
        max_retries = settings.retries,
        use_tls = settings.use_tls,
        server_name_override = ?tls.server_name_override(),
        endpoints = config.endpoints.len(),
        "starting health check"
    );

    let prober: Arc<dyn Prober> = match config.kind {
        CheckKind::Tcp => Arc::new(tcp::TcpProber::new(settings, tls)),
        CheckKind::Http => {
            let http = config.http.clone().unwrap_or_default();
            Arc::new(http::HttpProber::new(
                settings,
                &tls,
                http,
                config.client_auth.password_auth.as_ref(),
            ))
        }
    };

    let report = fanout::run_probes(&config.endpoints, &config.maintenance, prober).await;

    tracing::info!(
        up = report.up.len(),
        down = report.down.len(),
        "health check finished"
    );
    Ok(report)
}
