//! TCP reachability probe, optionally completing a TLS handshake.
//!
//! One attempt is a connect (plus handshake when TLS is on) bounded as a
//! whole by the probe timeout. The connection is dropped as soon as the
//! attempt is decided, whatever the result.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;

use super::retry::{with_retries, Attempt};
use super::{ProbeSettings, Prober};
use crate::config::model::CheckKind;
use crate::endpoint::{Endpoint, ProbeOutcome};
use crate::tls::TlsContext;

pub struct TcpProber {
    settings: ProbeSettings,
    tls: Arc<TlsContext>,
    connector: TlsConnector,
}

impl TcpProber {
    #[must_use]
    pub fn new(settings: ProbeSettings, tls: Arc<TlsContext>) -> Self {
        let connector = TlsConnector::from(tls.client_config());
        Self {
            settings,
            tls,
            connector,
        }
    }

    async fn attempt(&self, endpoint: &Endpoint, attempt: u32) -> Result<(), Attempt> {
        let authority = endpoint.authority();

        let connect = async {
            let stream = TcpStream::connect((endpoint.host(), endpoint.port))
                .await
                .map_err(|e| Attempt::Retry(format!("dial tcp {authority}: {e}")))?;

            if !self.settings.use_tls {
                return Ok(());
            }

            let server_name = self
                .tls
                .server_name_for(endpoint.host())
                .map_err(Attempt::Abort)?;
            self.connector
                .connect(server_name, stream)
                .await
                .map(drop)
                .map_err(|e| Attempt::Retry(format!("tls handshake with {authority}: {e}")))
        };

        let result = match tokio::time::timeout(self.settings.timeout, connect).await {
            Ok(result) => result,
            Err(_) => Err(Attempt::Retry(format!(
                "dial tcp {authority}: i/o timeout after {:?}",
                self.settings.timeout
            ))),
        };

        tracing::info!(
            address = %endpoint.address,
            port = endpoint.port,
            attempt,
            success = result.is_ok(),
            "called endpoint"
        );
        result
    }
}

#[async_trait]
impl Prober for TcpProber {
    fn kind(&self) -> CheckKind {
        CheckKind::Tcp
    }

    async fn probe(&self, endpoint: &Endpoint) -> ProbeOutcome {
        tracing::info!(
            address = %endpoint.address,
            port = endpoint.port,
            tls = self.settings.use_tls,
            "checking endpoint"
        );

        let result =
            with_retries(self.settings.retries, move |attempt| self.attempt(endpoint, attempt)).await;
        match result {
            Ok(()) => ProbeOutcome::up(endpoint.clone()),
            Err(error) => ProbeOutcome::down(endpoint.clone(), error),
        }
    }
}
