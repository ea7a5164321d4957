//! Shared fixtures for the probe integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use rustls::pki_types::pem::PemObject;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::server::WebPkiClientVerifier;
use rustls::{RootCertStore, ServerConfig};
use tokio_rustls::TlsAcceptor;

pub const CA: &str = include_str!("../fixtures/ca.pem");
pub const SERVER_CERT: &str = include_str!("../fixtures/server.pem");
pub const SERVER_KEY: &str = include_str!("../fixtures/server.key");
pub const CLIENT_CERT: &str = include_str!("../fixtures/client.pem");
pub const CLIENT_KEY: &str = include_str!("../fixtures/client.key");

/// TLS acceptor serving the fixture server certificate. With
/// `require_client_cert` the peer must present a certificate signed by
/// the fixture CA.
pub fn tls_acceptor(require_client_cert: bool) -> TlsAcceptor {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let chain: Vec<CertificateDer<'static>> = CertificateDer::pem_slice_iter(SERVER_CERT.as_bytes())
        .collect::<Result<_, _>>()
        .unwrap();
    let key = PrivateKeyDer::from_pem_slice(SERVER_KEY.as_bytes()).unwrap();

    let builder = ServerConfig::builder_with_provider(Arc::clone(&provider))
        .with_safe_default_protocol_versions()
        .unwrap();

    let config = if require_client_cert {
        let mut roots = RootCertStore::empty();
        for cert in CertificateDer::pem_slice_iter(CA.as_bytes()) {
            roots.add(cert.unwrap()).unwrap();
        }
        let verifier = WebPkiClientVerifier::builder_with_provider(Arc::new(roots), provider)
            .build()
            .unwrap();
        builder.with_client_cert_verifier(verifier).with_single_cert(chain, key)
    } else {
        builder.with_no_client_auth().with_single_cert(chain, key)
    }
    .unwrap();

    TlsAcceptor::from(Arc::new(config))
}
