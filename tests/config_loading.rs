//! Integration tests for config loading across all file formats.

use std::path::Path;

use healthcheck::config::model::{CheckConfig, CheckKind};
use healthcheck::config::sources::{create_file_source, parse_config_str};
use healthcheck::config::validation::validate;
use healthcheck::{Endpoint, HealthCheckError, MaintenanceEntry};

const YAML: &str = r#"
kind: http
timeout: 5s
retries: 2
tls: false
client_auth:
  password_auth: { username: probe, password: secret }
http:
  path: /health
  status_codes: [200]
endpoints:
  - { name: a, address: 10.0.0.1, port: 8080 }
  - { name: b, address: 10.0.0.2, port: 8080 }
maintenance:
  - { name: b }
"#;

const JSON: &str = r#"{
  "kind": "http",
  "timeout": "5s",
  "retries": 2,
  "tls": false,
  "client_auth": { "password_auth": { "username": "probe", "password": "secret" } },
  "http": { "path": "/health", "status_codes": [200] },
  "endpoints": [
    { "name": "a", "address": "10.0.0.1", "port": 8080 },
    { "name": "b", "address": "10.0.0.2", "port": 8080 }
  ],
  "maintenance": [{ "name": "b" }]
}"#;

const TOML: &str = r#"
kind = "http"
timeout = "5s"
retries = 2
tls = false

[client_auth.password_auth]
username = "probe"
password = "secret"

[http]
path = "/health"
status_codes = [200]

[[endpoints]]
name = "a"
address = "10.0.0.1"
port = 8080

[[endpoints]]
name = "b"
address = "10.0.0.2"
port = 8080

[[maintenance]]
name = "b"
"#;

fn assert_expected(config: &CheckConfig) {
    assert_eq!(config.kind, CheckKind::Http);
    assert_eq!(config.timeout, "5s");
    assert_eq!(config.retries, 2);
    assert!(!config.tls);
    assert_eq!(config.http.as_ref().unwrap().status_codes, vec![200]);
    assert_eq!(config.endpoints[0], Endpoint::named("a", "10.0.0.1", 8080));
    assert_eq!(config.maintenance, vec![MaintenanceEntry::by_name("b")]);
    assert_eq!(config.active_endpoints().count(), 1);
    validate(config).unwrap();
}

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[cfg(feature = "yaml")]
#[tokio::test]
async fn yaml_file_loads_and_validates() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "healthcheck.yaml", YAML);

    let source = create_file_source(&path).unwrap();
    assert_eq!(source.name(), "yaml");
    assert_expected(&source.load().await.unwrap());
}

#[cfg(feature = "json")]
#[tokio::test]
async fn json_file_loads_and_validates() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "healthcheck.json", JSON);
    assert_expected(&create_file_source(&path).unwrap().load().await.unwrap());
}

#[cfg(feature = "toml")]
#[tokio::test]
async fn toml_file_loads_and_validates() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "healthcheck.toml", TOML);
    assert_expected(&create_file_source(&path).unwrap().load().await.unwrap());
}

#[cfg(all(feature = "yaml", feature = "json", feature = "toml"))]
#[test]
fn all_formats_produce_equivalent_configs() {
    let yaml = parse_config_str("yaml", YAML, "yaml").unwrap();
    let json = parse_config_str("json", JSON, "json").unwrap();
    let toml = parse_config_str("toml", TOML, "toml").unwrap();

    assert_eq!(yaml.endpoints, json.endpoints);
    assert_eq!(yaml.endpoints, toml.endpoints);
    assert_eq!(yaml.maintenance, toml.maintenance);
}

#[cfg(feature = "yaml")]
#[tokio::test]
async fn invalid_file_fails_validation_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "healthcheck.yaml",
        "kind: tcp\nendpoints:\n  - { address: '', port: 0 }\n",
    );

    let err = create_file_source(&path).unwrap().load().await.unwrap_err();
    let HealthCheckError::ConfigValidation { errors } = err else {
        panic!("expected validation errors, got {err}");
    };
    assert_eq!(errors.len(), 2);
}

#[cfg(feature = "yaml")]
#[tokio::test]
async fn missing_file_is_reported() {
    let err = create_file_source(Path::new("/nonexistent/healthcheck.yaml"))
        .unwrap()
        .load()
        .await
        .unwrap_err();
    assert!(matches!(err, HealthCheckError::ConfigFileNotFound { .. }));
}

#[cfg(feature = "yaml")]
#[test]
fn unknown_fields_are_rejected() {
    let err = parse_config_str("yaml", "kind: tcp\nendpoints: []\nverbose: true\n", "x.yaml")
        .unwrap_err();
    assert!(matches!(err, HealthCheckError::ConfigParse { .. }));
}

#[test]
fn unsupported_format_returns_error() {
    let result = parse_config_str("xml", "{}", "test.xml");
    assert!(matches!(result, Err(HealthCheckError::UnsupportedFormat(_))));
}
