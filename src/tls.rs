//! Transport security context shared by every probe of one call.
//!
//! [`TlsContext::build`] turns the raw PEM fields of the config into a
//! rustls [`ClientConfig`]. It runs once, before any probe is spawned,
//! and the result is only ever read afterwards.
//!
//! Trust is strict by default: without a CA bundle the root store is
//! empty and every server certificate is rejected. Public web roots are
//! only trusted when `trust_webpki_roots` is set.

use std::sync::Arc;

use rustls::pki_types::pem::PemObject;
use rustls::pki_types::{CertificateDer, PrivateKeyDer, ServerName};
use rustls::{ClientConfig, RootCertStore};

use crate::config::model::{ClientCertAuth, ServerAuth};
use crate::error::HealthCheckError;

#[derive(Debug, Clone)]
pub struct TlsContext {
    client_config: Arc<ClientConfig>,
    server_name_override: Option<ServerName<'static>>,
    trust_anchors: usize,
}

impl TlsContext {
    pub fn build(
        server_auth: Option<&ServerAuth>,
        client_cert_auth: Option<&ClientCertAuth>,
    ) -> Result<Self, HealthCheckError> {
        let mut roots = RootCertStore::empty();

        if let Some(ca_cert) = server_auth.and_then(|s| s.ca_cert.as_deref()) {
            let certs: Vec<CertificateDer<'static>> = CertificateDer::pem_slice_iter(ca_cert.as_bytes())
                .filter_map(Result::ok)
                .collect();
            let (added, ignored) = roots.add_parsable_certificates(certs);
            if added == 0 {
                return Err(HealthCheckError::CertificateFormat(
                    "certificate format was not valid".into(),
                ));
            }
            tracing::debug!(added, ignored, "loaded server CA bundle");
        }

        if server_auth.is_some_and(|s| s.trust_webpki_roots) {
            roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        }

        let server_name_override = server_auth
            .and_then(|s| s.override_server_name.as_deref())
            .map(|name| {
                ServerName::try_from(name.to_string())
                    .map_err(|_| HealthCheckError::InvalidServerName(name.to_string()))
            })
            .transpose()?;

        let trust_anchors = roots.len();
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let builder = ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()
            .map_err(|e| HealthCheckError::CredentialParse(e.to_string()))?
            .with_root_certificates(roots);

        let client_config = match client_cert_auth.filter(|c| !c.cert.is_empty() && !c.key.is_empty()) {
            Some(auth) => {
                let (chain, key) = parse_key_pair(&auth.cert, &auth.key)?;
                builder
                    .with_client_auth_cert(chain, key)
                    .map_err(|e| HealthCheckError::CredentialParse(e.to_string()))?
            }
            None => builder.with_no_client_auth(),
        };

        Ok(Self {
            client_config: Arc::new(client_config),
            server_name_override,
            trust_anchors,
        })
    }

    #[must_use]
    pub fn client_config(&self) -> Arc<ClientConfig> {
        Arc::clone(&self.client_config)
    }

    #[must_use]
    pub const fn server_name_override(&self) -> Option<&ServerName<'static>> {
        self.server_name_override.as_ref()
    }

    /// Number of root certificates server chains may lead to.
    #[must_use]
    pub const fn trust_anchors(&self) -> usize {
        self.trust_anchors
    }

    /// Name to verify the peer certificate against when dialing `host`.
    pub fn server_name_for(&self, host: &str) -> Result<ServerName<'static>, String> {
        if let Some(name) = &self.server_name_override {
            return Ok(name.clone());
        }
        ServerName::try_from(host.to_string())
            .map_err(|e| format!("invalid server name '{host}': {e}"))
    }
}

fn parse_key_pair(
    cert: &str,
    key: &str,
) -> Result<(Vec<CertificateDer<'static>>, PrivateKeyDer<'static>), HealthCheckError> {
    let chain = CertificateDer::pem_slice_iter(cert.as_bytes())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| HealthCheckError::CredentialParse(format!("client certificate: {e}")))?;
    if chain.is_empty() {
        return Err(HealthCheckError::CredentialParse(
            "client certificate: no PEM certificate found".into(),
        ));
    }

    let key = PrivateKeyDer::from_pem_slice(key.as_bytes())
        .map_err(|e| HealthCheckError::CredentialParse(format!("private key: {e}")))?;

    Ok((chain, key))
}
