//! Serde data structures for the healthcheck configuration file.
//!
//! Contains [`CheckConfig`] (the root), [`ServerAuth`], [`ClientAuth`]
//! and [`HttpSettings`]. All types derive `Serialize` and `Deserialize`
//! with `deny_unknown_fields` for strict parsing. Strings such as the
//! timeout and PEM blobs are kept raw here; they are parsed when a
//! check starts.

use serde::{Deserialize, Serialize};

use super::duration::DEFAULT_TIMEOUT;
use crate::endpoint::{Endpoint, MaintenanceEntry};

pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_STATUS_CODES: [u16; 2] = [200, 204];

fn default_timeout() -> String {
    DEFAULT_TIMEOUT.to_string()
}

const fn default_retries() -> u32 {
    DEFAULT_RETRIES
}

const fn default_true() -> bool {
    true
}

fn default_status_codes() -> Vec<u16> {
    DEFAULT_STATUS_CODES.to_vec()
}

fn is_default_timeout(v: &str) -> bool {
    v == DEFAULT_TIMEOUT
}

fn is_default_retries(v: &u32) -> bool {
    *v == DEFAULT_RETRIES
}

fn is_true(v: &bool) -> bool {
    *v
}

fn is_false(v: &bool) -> bool {
    !*v
}

fn is_default_status_codes(v: &[u16]) -> bool {
    v == DEFAULT_STATUS_CODES
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    Tcp,
    Http,
}

impl CheckKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Http => "http",
        }
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CheckConfig {
    pub kind: CheckKind,

    #[serde(default = "default_timeout", skip_serializing_if = "is_default_timeout")]
    pub timeout: String,

    #[serde(default = "default_retries", skip_serializing_if = "is_default_retries")]
    pub retries: u32,

    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub tls: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_auth: Option<ServerAuth>,

    #[serde(default, skip_serializing_if = "ClientAuth::is_default")]
    pub client_auth: ClientAuth,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpSettings>,

    pub endpoints: Vec<Endpoint>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub maintenance: Vec<MaintenanceEntry>,
}

impl CheckConfig {
    /// A config with every optional field at its default.
    #[must_use]
    pub fn new(kind: CheckKind, endpoints: Vec<Endpoint>) -> Self {
        Self {
            kind,
            timeout: default_timeout(),
            retries: DEFAULT_RETRIES,
            tls: true,
            server_auth: None,
            client_auth: ClientAuth::default(),
            http: (kind == CheckKind::Http).then(HttpSettings::default),
            endpoints,
            maintenance: Vec::new(),
        }
    }

    /// Endpoints that will actually be probed.
    pub fn active_endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints
            .iter()
            .filter(|e| !e.is_under_maintenance(&self.maintenance))
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerAuth {
    /// PEM bundle of CA certificates trusted to sign server certificates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<String>,

    /// Name checked against server certificates instead of the endpoint address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_server_name: Option<String>,

    /// Also trust the Mozilla root program bundle.
    #[serde(default, skip_serializing_if = "is_false")]
    pub trust_webpki_roots: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClientAuth {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_auth: Option<ClientCertAuth>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_auth: Option<ClientPasswordAuth>,
}

impl ClientAuth {
    fn is_default(&self) -> bool {
        self.cert_auth.is_none() && self.password_auth.is_none()
    }
}

#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClientCertAuth {
    pub cert: String,
    pub key: String,
}

impl std::fmt::Debug for ClientCertAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCertAuth")
            .field("cert", &self.cert)
            .field("key", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClientPasswordAuth {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for ClientPasswordAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientPasswordAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSettings {
    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default = "default_status_codes", skip_serializing_if = "is_default_status_codes")]
    pub status_codes: Vec<u16>,
}

fn default_path() -> String {
    "/".to_string()
}

impl HttpSettings {
    /// Status codes that count as healthy. An empty list means the defaults.
    #[must_use]
    pub fn accepted_status_codes(&self) -> &[u16] {
        if self.status_codes.is_empty() {
            &DEFAULT_STATUS_CODES
        } else {
            &self.status_codes
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            path: default_path(),
            status_codes: default_status_codes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_in() {
        let config: CheckConfig = serde_json::from_str(
            r#"{"kind": "tcp", "endpoints": [{"address": "10.0.0.1", "port": 22}]}"#,
        )
        .unwrap();
        assert_eq!(config.timeout, "10s");
        assert_eq!(config.retries, 3);
        assert!(config.tls);
        assert!(config.http.is_none());
        assert!(config.maintenance.is_empty());
    }

    #[test]
    fn http_defaults() {
        let config: CheckConfig = serde_json::from_str(
            r#"{"kind": "http", "http": {}, "endpoints": []}"#,
        )
        .unwrap();
        let http = config.http.unwrap();
        assert_eq!(http.path, "/");
        assert_eq!(http.status_codes, vec![200, 204]);
    }

    #[test]
    fn empty_status_codes_mean_defaults() {
        let config: CheckConfig = serde_json::from_str(
            r#"{"kind": "http", "http": {"status_codes": []}, "endpoints": []}"#,
        )
        .unwrap();
        let http = config.http.unwrap();
        assert!(http.status_codes.is_empty());
        assert_eq!(http.accepted_status_codes(), DEFAULT_STATUS_CODES);

        let custom = HttpSettings {
            status_codes: vec![301],
            ..HttpSettings::default()
        };
        assert_eq!(custom.accepted_status_codes(), [301]);
    }

    #[test]
    fn unknown_fields_rejected() {
        let result: Result<CheckConfig, _> = serde_json::from_str(
            r#"{"kind": "tcp", "endpoints": [], "retry": 2}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn port_out_of_range_rejected() {
        let result: Result<CheckConfig, _> = serde_json::from_str(
            r#"{"kind": "tcp", "endpoints": [{"address": "h", "port": 70000}]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn secrets_redacted_in_debug() {
        let auth = ClientPasswordAuth {
            username: "probe".into(),
            password: "hunter2".into(),
        };
        let rendered = format!("{auth:?}");
        assert!(rendered.contains("probe"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn serializes_without_defaults() {
        let config = CheckConfig::new(CheckKind::Tcp, vec![Endpoint::new("h", 1)]);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "tcp", "endpoints": [{"address": "h", "port": 1}]})
        );
    }

    #[test]
    fn active_endpoints_skip_maintenance() {
        let mut config = CheckConfig::new(
            CheckKind::Tcp,
            vec![Endpoint::named("a", "h", 1), Endpoint::named("b", "h", 2)],
        );
        config.maintenance.push(MaintenanceEntry::by_name("a"));
        let active: Vec<_> = config.active_endpoints().collect();
        assert_eq!(active, vec![&Endpoint::named("b", "h", 2)]);
    }
}
