//! Concurrent fan-out of probes and fan-in of their outcomes.
//!
//! Every endpoint not under maintenance gets its own Tokio task. Tasks
//! report over a channel that only the collector reads, so the up and
//! down lists are built in one place and never shared. The call returns
//! once every task has reported or died.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::Prober;
use crate::endpoint::{Endpoint, MaintenanceEntry, ProbeOutcome, ProbeReport};
use crate::ordering::sort_endpoints;

/// Message recorded for an endpoint whose probe task panicked.
pub const PANICKED: &str = "probe task panicked";

/// Probe every endpoint not excluded by `maintenance` and partition the
/// results. Both lists come back sorted; excluded endpoints appear in
/// neither.
pub async fn run_probes(
    endpoints: &[Endpoint],
    maintenance: &[MaintenanceEntry],
    prober: Arc<dyn Prober>,
) -> ProbeReport {
    let (tx, mut rx) = mpsc::unbounded_channel::<ProbeOutcome>();
    let mut handles: Vec<(Endpoint, JoinHandle<()>)> = Vec::with_capacity(endpoints.len());

    for endpoint in endpoints {
        if endpoint.is_under_maintenance(maintenance) {
            tracing::info!(endpoint = %endpoint, "skipping endpoint under maintenance");
            continue;
        }

        let prober = Arc::clone(&prober);
        let tx = tx.clone();
        let target = endpoint.clone();
        let handle = tokio::spawn(async move {
            let outcome = prober.probe(&target).await;
            // The collector holds the receiver until every task is done.
            let _ = tx.send(outcome);
        });
        handles.push((endpoint.clone(), handle));
    }
    drop(tx);
    tracing::debug!(kind = %prober.kind(), probes = handles.len(), "probes spawned");

    let mut report = ProbeReport::default();
    while let Some(outcome) = rx.recv().await {
        record(&mut report, outcome);
    }

    for (endpoint, handle) in handles {
        if let Err(join_err) = handle.await {
            tracing::error!(endpoint = %endpoint, error = %join_err, "probe task panicked");
            report.down.push(ProbeOutcome::down(endpoint, PANICKED));
        }
    }

    sort_endpoints(&mut report.up);
    sort_endpoints(&mut report.down);
    report
}

fn record(report: &mut ProbeReport, outcome: ProbeOutcome) {
    if outcome.is_up() {
        tracing::debug!(endpoint = %outcome.endpoint, "endpoint is up");
        report.up.push(outcome.endpoint);
    } else {
        tracing::debug!(
            endpoint = %outcome.endpoint,
            error = outcome.error.as_deref().unwrap_or_default(),
            "endpoint is down"
        );
        report.down.push(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::config::model::CheckKind;

    /// Reports every endpoint whose port is in `down` as failed, panics on
    /// port 666, and remembers what it was asked to probe.
    struct FakeProber {
        down: HashSet<u16>,
        probed: Mutex<Vec<Endpoint>>,
    }

    impl FakeProber {
        fn new(down: &[u16]) -> Self {
            Self {
                down: down.iter().copied().collect(),
                probed: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Prober for FakeProber {
        fn kind(&self) -> CheckKind {
            CheckKind::Tcp
        }

        async fn probe(&self, endpoint: &Endpoint) -> ProbeOutcome {
            self.probed.lock().unwrap().push(endpoint.clone());
            // Higher ports finish first so arrival order differs from input order.
            let delay = 10_000u64.saturating_sub(u64::from(endpoint.port)) / 100;
            tokio::time::sleep(Duration::from_millis(delay)).await;
            if endpoint.port == 666 {
                panic!("boom");
            }
            if self.down.contains(&endpoint.port) {
                ProbeOutcome::down(endpoint.clone(), "connection refused")
            } else {
                ProbeOutcome::up(endpoint.clone())
            }
        }
    }

    fn endpoints() -> Vec<Endpoint> {
        vec![
            Endpoint::named("web", "10.0.0.3", 80),
            Endpoint::named("api", "10.0.0.2", 8080),
            Endpoint::named("db", "10.0.0.1", 5432),
            Endpoint::new("10.0.0.9", 9000),
        ]
    }

    #[tokio::test]
    async fn partitions_and_sorts() {
        let prober = Arc::new(FakeProber::new(&[5432]));
        let report = run_probes(&endpoints(), &[], prober).await;

        assert_eq!(
            report.up,
            vec![
                Endpoint::new("10.0.0.9", 9000),
                Endpoint::named("api", "10.0.0.2", 8080),
                Endpoint::named("web", "10.0.0.3", 80),
            ]
        );
        assert_eq!(
            report.down,
            vec![ProbeOutcome::down(
                Endpoint::named("db", "10.0.0.1", 5432),
                "connection refused"
            )]
        );
    }

    #[tokio::test]
    async fn maintenance_endpoints_are_never_probed() {
        let prober = Arc::new(FakeProber::new(&[]));
        let maintenance = [
            MaintenanceEntry::by_name("web"),
            MaintenanceEntry::by_address("10.0.0.9", 9000),
        ];
        let report = run_probes(&endpoints(), &maintenance, Arc::clone(&prober) as Arc<dyn Prober>).await;

        assert_eq!(report.total(), 2);
        let probed = prober.probed.lock().unwrap();
        assert_eq!(probed.len(), 2);
        assert!(probed.iter().all(|e| e.name.as_deref() != Some("web") && e.port != 9000));
    }

    #[tokio::test]
    async fn every_active_endpoint_lands_in_exactly_one_list() {
        let input = endpoints();
        let report = run_probes(&input, &[], Arc::new(FakeProber::new(&[80, 9000]))).await;

        let up: HashSet<_> = report.up.iter().cloned().collect();
        let down: HashSet<_> = report.down.iter().map(|o| o.endpoint.clone()).collect();
        assert!(up.is_disjoint(&down));
        let all: HashSet<_> = up.union(&down).cloned().collect();
        assert_eq!(all, input.into_iter().collect());
        assert!(report.down.iter().all(|o| !o.is_up()));
    }

    #[tokio::test]
    async fn result_does_not_depend_on_input_order() {
        let forward = endpoints();
        let mut reversed = endpoints();
        reversed.reverse();

        let a = run_probes(&forward, &[], Arc::new(FakeProber::new(&[8080]))).await;
        let b = run_probes(&reversed, &[], Arc::new(FakeProber::new(&[8080]))).await;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn all_under_maintenance_yields_empty_report() {
        let prober = Arc::new(FakeProber::new(&[]));
        let maintenance: Vec<_> = endpoints()
            .iter()
            .map(|e| MaintenanceEntry::by_address(e.address.clone(), e.port))
            .collect();
        let report = run_probes(&endpoints(), &maintenance, Arc::clone(&prober) as Arc<dyn Prober>).await;

        assert_eq!(report, ProbeReport::default());
        assert!(prober.probed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_input() {
        let report = run_probes(&[], &[], Arc::new(FakeProber::new(&[]))).await;
        assert_eq!(report.total(), 0);
    }

    #[tokio::test]
    async fn panicking_probe_is_reported_down() {
        let input = vec![Endpoint::new("10.0.0.1", 666), Endpoint::new("10.0.0.1", 80)];
        let report = run_probes(&input, &[], Arc::new(FakeProber::new(&[]))).await;

        assert_eq!(report.up, vec![Endpoint::new("10.0.0.1", 80)]);
        assert_eq!(
            report.down,
            vec![ProbeOutcome::down(Endpoint::new("10.0.0.1", 666), PANICKED)]
        );
    }
}
