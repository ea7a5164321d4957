//! Deterministic ordering for result lists.
//!
//! Probe results arrive in whatever order the network lets them finish.
//! Both the `up` and `down` lists are sorted with [`sort_endpoints`]
//! before being returned, so a report depends only on its inputs.

use std::cmp::Ordering;

use crate::endpoint::{Endpoint, ProbeOutcome};

/// Identity fields shared by every endpoint-shaped value.
pub trait EndpointKey {
    fn name(&self) -> &str;
    fn address(&self) -> &str;
    fn port(&self) -> u16;
}

impl EndpointKey for Endpoint {
    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    fn address(&self) -> &str {
        &self.address
    }

    fn port(&self) -> u16 {
        self.port
    }
}

impl EndpointKey for ProbeOutcome {
    fn name(&self) -> &str {
        self.endpoint.name()
    }

    fn address(&self) -> &str {
        self.endpoint.address()
    }

    fn port(&self) -> u16 {
        self.endpoint.port()
    }
}

/// Orders by name (absent sorts as empty), then address, then port.
pub fn compare<A: EndpointKey, B: EndpointKey>(a: &A, b: &B) -> Ordering {
    a.name()
        .cmp(b.name())
        .then_with(|| a.address().cmp(b.address()))
        .then_with(|| a.port().cmp(&b.port()))
}

/// Stable sort; entries with equal keys keep their relative order.
pub fn sort_endpoints<T: EndpointKey>(items: &mut [T]) {
    items.sort_by(compare);
}
