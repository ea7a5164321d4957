//! Endpoint data shapes and the maintenance predicate.
//!
//! [`Endpoint`] is what gets probed, [`MaintenanceEntry`] is what gets
//! excluded, and [`ProbeOutcome`] / [`ProbeReport`] carry results back
//! out. Everything here is an immutable, request-scoped value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A network destination to check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Endpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub address: String,
    pub port: u16,
}

impl Endpoint {
    #[must_use]
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            name: None,
            address: address.into(),
            port,
        }
    }

    #[must_use]
    pub fn named(name: impl Into<String>, address: impl Into<String>, port: u16) -> Self {
        Self {
            name: Some(name.into()),
            address: address.into(),
            port,
        }
    }

    /// Address with any IPv6 brackets removed, as handed to the resolver.
    #[must_use]
    pub fn host(&self) -> &str {
        self.address
            .strip_prefix('[')
            .and_then(|a| a.strip_suffix(']'))
            .unwrap_or(&self.address)
    }

    /// `host:port` authority, with IPv6 literals bracketed.
    #[must_use]
    pub fn authority(&self) -> String {
        let host = self.host();
        if host.contains(':') {
            format!("[{host}]:{}", self.port)
        } else {
            format!("{host}:{}", self.port)
        }
    }

    /// True if any entry in `maintenance` matches this endpoint.
    ///
    /// An entry matches by name when both sides carry a non-empty name
    /// and the names are equal, or by address and port when the entry
    /// sets both and they equal the endpoint's.
    #[must_use]
    pub fn is_under_maintenance(&self, maintenance: &[MaintenanceEntry]) -> bool {
        maintenance.iter().any(|entry| entry.matches(self))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => write!(f, "{name} ({})", self.authority()),
            _ => f.write_str(&self.authority()),
        }
    }
}

/// Descriptor of an endpoint excluded from probing.
///
/// Either `name`, or `address` together with `port`, should be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MaintenanceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl MaintenanceEntry {
    #[must_use]
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn by_address(address: impl Into<String>, port: u16) -> Self {
        Self {
            name: None,
            address: Some(address.into()),
            port: Some(port),
        }
    }

    #[must_use]
    pub fn matches(&self, endpoint: &Endpoint) -> bool {
        let by_name = match (non_empty(self.name.as_deref()), non_empty(endpoint.name.as_deref())) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        };

        by_name
            || matches!(
                (self.address.as_deref(), self.port),
                (Some(address), Some(port)) if address == endpoint.address && port == endpoint.port
            )
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Result of probing one endpoint. An absent or empty `error` means up.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProbeOutcome {
    #[serde(flatten)]
    pub endpoint: Endpoint,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeOutcome {
    #[must_use]
    pub const fn up(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            error: None,
        }
    }

    #[must_use]
    pub fn down(endpoint: Endpoint, error: impl Into<String>) -> Self {
        Self {
            endpoint,
            error: Some(error.into()),
        }
    }

    #[must_use]
    pub fn is_up(&self) -> bool {
        self.error.as_deref().map_or(true, str::is_empty)
    }
}

/// Partitioned, sorted result of one probing call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProbeReport {
    #[serde(default)]
    pub up: Vec<Endpoint>,

    #[serde(default)]
    pub down: Vec<ProbeOutcome>,
}

impl ProbeReport {
    #[must_use]
    pub fn total(&self) -> usize {
        self.up.len() + self.down.len()
    }
}
