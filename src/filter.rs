//! Fallback filter over a probe report.
//!
//! [`compute_effective`] picks the endpoint list downstream consumers
//! should use. Normally that is the `up` list; with `not_empty` set and
//! nothing up, the `down` list is handed back instead so a fully
//! partitioned checker still yields a usable best-effort list.

use crate::endpoint::{Endpoint, ProbeOutcome, ProbeReport};

pub const DEFAULT_NOT_EMPTY: bool = true;

#[must_use]
pub fn compute_effective(up: &[Endpoint], down: &[ProbeOutcome], not_empty: bool) -> Vec<Endpoint> {
    if not_empty && up.is_empty() {
        return down.iter().map(|outcome| outcome.endpoint.clone()).collect();
    }
    up.to_vec()
}

impl ProbeReport {
    #[must_use]
    pub fn effective(&self, not_empty: bool) -> Vec<Endpoint> {
        compute_effective(&self.up, &self.down, not_empty)
    }
}
