use std::collections::BTreeMap;
use std::sync::Arc;

use doctor_mock::MockServiceCheck;
use doctor_probe::{ProbeOutcome, ServiceProber};
use doctor_reporter::Level;
use doctor_reporter::test_support::CaptureReporter;
use doctor_topology::{ClusterNode, Endpoint, Service};

fn node(hostname: &str, services: &[(&str, u16)]) -> ClusterNode {
    ClusterNode::new(
        hostname,
        services
            .iter()
            .map(|(name, port)| ((*name).to_string(), *port))
            .collect::<BTreeMap<_, _>>(),
    )
}

fn prober(check: MockServiceCheck) -> (ServiceProber<MockServiceCheck>, CaptureReporter) {
    let reporter = CaptureReporter::new();
    (
        ServiceProber::new(Arc::new(check), Arc::new(reporter.clone())),
        reporter,
    )
}

#[tokio::test]
async fn test_ssl_skips_all_probes() {
    let check = MockServiceCheck::new();
    let (prober, reporter) = prober(check.clone());

    let nodes = vec![node("10.0.0.1", &[("kv", 11207), ("mgmt", 18091)])];
    let results = prober.probe(&nodes, true).await;

    assert!(results.is_empty());
    assert!(check.checked().is_empty());
    assert_eq!(reporter.events().len(), 1);
    assert!(reporter.contains(Level::Error, "SSL connections is not yet supported"));
}

#[tokio::test]
async fn test_services_probed_in_fixed_order() {
    let check = MockServiceCheck::new();
    let (prober, reporter) = prober(check.clone());

    let nodes = vec![
        node(
            "10.0.0.1",
            &[("fts", 8094), ("n1ql", 8093), ("kv", 11210), ("mgmt", 8091), ("capi", 8092)],
        ),
        node("10.0.0.2", &[("kv", 11210), ("mgmt", 8091), ("n1ql", 0)]),
    ];
    let results = prober.probe(&nodes, false).await;

    assert_eq!(
        results
            .iter()
            .map(|r| (r.hostname.as_str(), r.service))
            .collect::<Vec<_>>(),
        vec![
            ("10.0.0.1", Service::Kv),
            ("10.0.0.1", Service::Mgmt),
            ("10.0.0.1", Service::Capi),
            ("10.0.0.1", Service::N1ql),
            ("10.0.0.1", Service::Fts),
            ("10.0.0.2", Service::Kv),
            ("10.0.0.2", Service::Mgmt),
        ]
    );
    assert_eq!(results[0].outcome, ProbeOutcome::NotTested);
    assert_eq!(check.checked().len(), 5);
    assert_eq!(reporter.count_containing(Level::Info, "not tested"), 2);
    assert!(reporter.contains(
        Level::Info,
        "Successfully connected to N1QL service at `10.0.0.1:8093`"
    ));
}

#[tokio::test]
async fn test_failure_does_not_stop_other_probes() {
    let check = MockServiceCheck::new().with_down(Endpoint::new("10.0.0.1", 8091));
    let (prober, reporter) = prober(check);

    let nodes = vec![
        node("10.0.0.1", &[("mgmt", 8091), ("capi", 8092)]),
        node("10.0.0.2", &[("mgmt", 8091)]),
    ];
    let results = prober.probe(&nodes, false).await;

    assert_eq!(results.len(), 3);
    assert!(matches!(results[0].outcome, ProbeOutcome::Unreachable(_)));
    assert_eq!(results[1].outcome, ProbeOutcome::Reachable);
    assert_eq!(results[2].outcome, ProbeOutcome::Reachable);
    assert_eq!(reporter.count(Level::Error), 1);
    assert!(reporter.contains(
        Level::Error,
        "Failed to connect to MGMT service at `10.0.0.1:8091`"
    ));
}
