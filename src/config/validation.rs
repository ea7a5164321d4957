//! Configuration validation with detailed error reporting.
//!
//! The [`validate`] function checks a parsed [`CheckConfig`] for
//! structural errors such as an empty endpoint list, zero ports,
//! duplicate endpoints, unmatchable maintenance entries, a malformed
//! timeout and HTTP settings on a TCP check. Returns a list of
//! [`ValidationError`] values with per-field suggestions.
//!
//! PEM materials are not checked here; they are parsed when the TLS
//! context is built.

use std::collections::HashSet;

use super::duration::parse_duration;
use super::model::{CheckConfig, CheckKind};
use crate::error::{HealthCheckError, ValidationError};

fn error(location: impl Into<String>, field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError {
        location: location.into(),
        field: field.into(),
        message: message.into(),
        suggestion: None,
    }
}

/// Validate an HTTP path. Returns `Ok(())` or a human-readable error.
pub fn validate_path(path: &str) -> Result<(), String> {
    if path.is_empty() {
        return Err("path cannot be empty".into());
    }
    if !path.starts_with('/') {
        return Err(format!("path must start with '/' (did you mean '/{path}'?)"));
    }
    Ok(())
}

/// Validate an expected status code. Returns `Ok(())` or a human-readable error.
pub fn validate_status_code(code: u16) -> Result<(), String> {
    if (100..=599).contains(&code) {
        Ok(())
    } else {
        Err(format!("{code} is not a valid HTTP status code"))
    }
}

pub fn validate(config: &CheckConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match parse_duration(&config.timeout) {
        Ok(d) if d.is_zero() => errors.push(ValidationError {
            location: "(root)".into(),
            field: "timeout".into(),
            message: "timeout must be greater than zero; 0 does not disable the deadline".into(),
            suggestion: Some("every attempt needs a deadline, use a large value like \"5m\"".into()),
        }),
        Ok(_) => {}
        Err(HealthCheckError::InvalidDuration { reason, .. }) => errors.push(ValidationError {
            location: "(root)".into(),
            field: "timeout".into(),
            message: format!("'{}' is not a valid duration: {reason}", config.timeout),
            suggestion: Some("use a value like \"10s\", \"500ms\" or \"1m30s\"".into()),
        }),
        Err(e) => errors.push(error("(root)", "timeout", e.to_string())),
    }

    match (config.kind, &config.http) {
        (CheckKind::Http, None) => errors.push(ValidationError {
            location: "(root)".into(),
            field: "http".into(),
            message: "an http section is required for http checks".into(),
            suggestion: Some("add `http: { path: \"/\" }`".into()),
        }),
        (CheckKind::Tcp, Some(_)) => errors.push(ValidationError {
            location: "(root)".into(),
            field: "http".into(),
            message: "http settings have no effect on tcp checks".into(),
            suggestion: Some("set `kind: http` or remove the http section".into()),
        }),
        (CheckKind::Http, Some(http)) => {
            if let Err(msg) = validate_path(&http.path) {
                errors.push(ValidationError {
                    location: "http".into(),
                    field: "path".into(),
                    message: msg,
                    suggestion: (!http.path.is_empty() && !http.path.starts_with('/'))
                        .then(|| format!("did you mean '/{}'?", http.path)),
                });
            }
            for code in &http.status_codes {
                if let Err(msg) = validate_status_code(*code) {
                    errors.push(error("http", "status_codes", msg));
                }
            }
        }
        (CheckKind::Tcp, None) => {}
    }

    if config.kind == CheckKind::Tcp && config.client_auth.password_auth.is_some() {
        errors.push(error(
            "(root)",
            "client_auth.password_auth",
            "password authentication is only supported by http checks",
        ));
    }

    if let Some(ref password) = config.client_auth.password_auth {
        if password.username.is_empty() {
            errors.push(error(
                "(root)",
                "client_auth.password_auth.username",
                "username cannot be empty when password auth is configured",
            ));
        }
    }

    if let Some(ref cert) = config.client_auth.cert_auth {
        match (cert.cert.is_empty(), cert.key.is_empty()) {
            (false, true) => errors.push(error(
                "(root)",
                "client_auth.cert_auth.key",
                "key is required when cert is set",
            )),
            (true, false) => errors.push(error(
                "(root)",
                "client_auth.cert_auth.cert",
                "cert is required when key is set",
            )),
            _ => {}
        }
    }

    if config.endpoints.is_empty() {
        errors.push(error(
            "(root)",
            "endpoints",
            "at least one endpoint must be defined",
        ));
    }

    let mut seen = HashSet::new();
    for (i, endpoint) in config.endpoints.iter().enumerate() {
        let location = format!("endpoints[{i}]");

        if endpoint.address.trim().is_empty() {
            errors.push(error(&location, "address", "address cannot be empty"));
        }
        if endpoint.port == 0 {
            errors.push(error(&location, "port", "port must be between 1 and 65535"));
        }
        if !seen.insert(endpoint) {
            errors.push(error(&location, "endpoints", "duplicate endpoint"));
        }
    }

    for (i, entry) in config.maintenance.iter().enumerate() {
        let location = format!("maintenance[{i}]");
        let has_name = entry.name.as_deref().is_some_and(|n| !n.is_empty());

        match (has_name, entry.address.is_some(), entry.port.is_some()) {
            (true, _, _) | (false, true, true) => {}
            (false, true, false) => errors.push(ValidationError {
                location,
                field: "port".into(),
                message: "an address-based maintenance entry needs a port".into(),
                suggestion: None,
            }),
            (false, false, true) => errors.push(ValidationError {
                location,
                field: "address".into(),
                message: "a port-based maintenance entry needs an address".into(),
                suggestion: None,
            }),
            (false, false, false) => errors.push(ValidationError {
                location,
                field: "name".into(),
                message: "entry matches nothing".into(),
                suggestion: Some("set `name`, or both `address` and `port`".into()),
            }),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[must_use]
pub fn format_validation_report(path: &str, config: &CheckConfig) -> String {
    let active = config.active_endpoints().count();
    let mut lines = vec![format!(
        "  {} check, {} endpoints ({} under maintenance)\n",
        config.kind,
        config.endpoints.len(),
        config.endpoints.len() - active,
    )];

    lines.push(format!(
        "    timeout: {}, retries: {}, tls: {}",
        config.timeout, config.retries, config.tls
    ));
    if let Some(ref http) = config.http {
        let codes: Vec<String> = http.accepted_status_codes().iter().map(u16::to_string).collect();
        lines.push(format!("    path: {}, status codes: {}", http.path, codes.join(", ")));
    }
    for endpoint in &config.endpoints {
        let marker = if endpoint.is_under_maintenance(&config.maintenance) {
            " (maintenance)"
        } else {
            ""
        };
        lines.push(format!("    - {endpoint}{marker}"));
    }

    format!("{} is valid\n{}", path, lines.join("\n"))
}
