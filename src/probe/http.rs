//! HTTP(S) probe: one GET per attempt, judged by status code.
//!
//! The client is built once per call from the shared [`TlsContext`] and
//! never pools connections, so every attempt dials afresh and nothing
//! outlives the call. The response body is never read.

use std::error::Error as StdError;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use http::header::{HeaderValue, AUTHORIZATION};
use http::{Method, Request};
use http_body_util::Empty;
use hyper_rustls::{FixedServerNameResolver, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use super::retry::{with_retries, Attempt};
use super::{ProbeSettings, Prober};
use crate::config::model::{CheckKind, ClientPasswordAuth, HttpSettings};
use crate::endpoint::{Endpoint, ProbeOutcome};
use crate::tls::TlsContext;

pub type HttpsConnector = hyper_rustls::HttpsConnector<HttpConnector>;
pub type HttpClient = Client<HttpsConnector, Empty<Bytes>>;

/// Build the probe client around the call's rustls config.
///
/// Plain `http://` URLs are allowed so the same client serves `tls: false`.
#[must_use]
pub fn build_http_client(tls: &TlsContext) -> HttpClient {
    let builder = HttpsConnectorBuilder::new()
        .with_tls_config((*tls.client_config()).clone())
        .https_or_http();

    let builder = match tls.server_name_override() {
        Some(name) => builder.with_server_name_resolver(FixedServerNameResolver::new(name.clone())),
        None => builder,
    };

    Client::builder(TokioExecutor::new())
        .pool_max_idle_per_host(0)
        .build(builder.enable_http1().build())
}

pub struct HttpProber {
    client: HttpClient,
    settings: ProbeSettings,
    http: HttpSettings,
    authorization: Option<HeaderValue>,
}

impl HttpProber {
    #[must_use]
    pub fn new(
        settings: ProbeSettings,
        tls: &TlsContext,
        http: HttpSettings,
        password_auth: Option<&ClientPasswordAuth>,
    ) -> Self {
        Self {
            client: build_http_client(tls),
            settings,
            http,
            authorization: password_auth.and_then(basic_auth_header),
        }
    }

    fn scheme(&self) -> &'static str {
        if self.settings.use_tls {
            "https"
        } else {
            "http"
        }
    }

    fn build_request(&self, endpoint: &Endpoint) -> Result<Request<Empty<Bytes>>, String> {
        let raw = format!("{}://{}{}", self.scheme(), endpoint.authority(), self.http.path);
        let url = url::Url::parse(&raw).map_err(|e| format!("invalid url '{raw}': {e}"))?;

        let mut builder = Request::builder().method(Method::GET).uri(url.as_str());
        if let Some(value) = &self.authorization {
            builder = builder.header(AUTHORIZATION, value.clone());
        }
        builder
            .body(Empty::new())
            .map_err(|e| format!("invalid request for '{url}': {e}"))
    }

    async fn attempt(&self, endpoint: &Endpoint, attempt: u32) -> Result<(), Attempt> {
        let request = self.build_request(endpoint).map_err(Attempt::Abort)?;
        let uri = request.uri().clone();

        let result = match tokio::time::timeout(self.settings.timeout, self.client.request(request)).await {
            Ok(Ok(response)) => {
                let code = response.status().as_u16();
                drop(response);
                if self.http.accepted_status_codes().contains(&code) {
                    Ok(())
                } else {
                    Err(Attempt::Retry(format!(
                        "Status code {code} did not match expected values"
                    )))
                }
            }
            Ok(Err(e)) => Err(Attempt::Retry(format!("Get \"{uri}\": {}", error_chain(&e)))),
            Err(_) => Err(Attempt::Retry(format!(
                "Get \"{uri}\": timeout after {:?}",
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
impl Prober for HttpProber {
    fn kind(&self) -> CheckKind {
        CheckKind::Http
    }

    async fn probe(&self, endpoint: &Endpoint) -> ProbeOutcome {
        tracing::info!(
            address = %endpoint.address,
            port = endpoint.port,
            path = %self.http.path,
            tls = self.settings.use_tls,
            basic_auth = self.authorization.is_some(),
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

fn basic_auth_header(auth: &ClientPasswordAuth) -> Option<HeaderValue> {
    let encoded = STANDARD.encode(format!("{}:{}", auth.username, auth.password));
    // base64 output is always a legal header value.
    let mut value = HeaderValue::from_str(&format!("Basic {encoded}")).ok()?;
    value.set_sensitive(true);
    Some(value)
}

/// Flatten an error and its sources into one line.
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = inner.source();
    }
    message
}
