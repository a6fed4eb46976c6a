use std::collections::BTreeMap;
use std::sync::Arc;

use doctor_bootstrap::{Attempt, BootstrapEngine, Error, FetchError, Outcome, StrategyKind};
use doctor_connstr::{ResolvedConnectionSpec, SpecResolver, parse};
use doctor_mock::{MockConfigSource, MockDnsResolver, NodeSpec, terse_topology};
use doctor_reporter::Level;
use doctor_reporter::test_support::CaptureReporter;
use doctor_topology::Endpoint;

async fn resolve(connstr: &str) -> ResolvedConnectionSpec {
    let spec = parse(connstr).unwrap();
    SpecResolver::new(
        Arc::new(MockDnsResolver::new()),
        Arc::new(CaptureReporter::new()),
    )
    .resolve(&spec)
    .await
    .unwrap()
}

fn endpoints_only(
    cccp_endpoints: Vec<Endpoint>,
    http_endpoints: Vec<Endpoint>,
) -> ResolvedConnectionSpec {
    ResolvedConnectionSpec {
        use_ssl: false,
        cccp_endpoints,
        http_endpoints,
        bucket: "default".to_string(),
        options: BTreeMap::new(),
        srv_record: None,
    }
}

fn engine(source: MockConfigSource) -> (BootstrapEngine, CaptureReporter) {
    let reporter = CaptureReporter::new();
    (
        BootstrapEngine::new(Arc::new(source), Arc::new(reporter.clone())),
        reporter,
    )
}

#[tokio::test]
async fn test_first_successful_host_is_master() {
    let source = MockConfigSource::new()
        .with_topology(
            Endpoint::new("10.0.0.1", 8091),
            terse_topology(
                "cluster-a",
                vec![
                    NodeSpec::new("10.0.0.1").this_node(),
                    NodeSpec::new("10.0.0.2"),
                ],
            ),
        )
        .with_topology(
            Endpoint::new("10.0.0.2", 8091),
            terse_topology("cluster-b", vec![NodeSpec::new("10.0.0.2").this_node()]),
        );
    let (engine, reporter) = engine(source);

    let spec = resolve("couchbase://10.0.0.1,10.0.0.2/default").await;
    let bootstrap = engine.bootstrap(&spec, "").await.unwrap();

    assert_eq!(bootstrap.strategy, StrategyKind::TerseHttp);
    assert_eq!(
        bootstrap
            .nodes
            .iter()
            .map(|n| n.hostname.as_str())
            .collect::<Vec<_>>(),
        vec!["10.0.0.1", "10.0.0.2"]
    );
    assert_eq!(reporter.count(Level::Error), 1);
    assert!(reporter.contains(
        Level::Error,
        "Bootstrap host `10.0.0.2` appears to be pointing to a different cluster"
    ));
}

#[tokio::test]
async fn test_strategy_order_and_short_circuit() {
    let source = MockConfigSource::new().with_topology(
        Endpoint::new("10.0.0.1", 8091),
        terse_topology("uuid", vec![NodeSpec::new("").this_node()]),
    );
    let (engine, reporter) = engine(source);

    let spec = resolve("couchbase://10.0.0.1").await;
    let bootstrap = engine.bootstrap(&spec, "").await.unwrap();

    assert_eq!(
        bootstrap
            .attempts
            .iter()
            .map(|a| (a.kind, matches!(a.outcome, Outcome::Bootstrapped(_))))
            .collect::<Vec<_>>(),
        vec![(StrategyKind::Cccp, false), (StrategyKind::TerseHttp, true)]
    );
    assert_eq!(bootstrap.attempts[0].outcome, Outcome::Unsupported);
    assert!(reporter.contains(Level::Info, "Attempting to connect to cluster via CCCP"));
    assert!(reporter.contains(Level::Info, "not yet supported by the doctor"));
    assert!(!reporter.contains(Level::Info, "HTTP (Full)"));

    // empty advertised hostname falls back to the contacted host
    assert_eq!(bootstrap.nodes[0].hostname, "10.0.0.1");
}

#[tokio::test]
async fn test_unauthorized_everywhere_is_exhausted() {
    let source = MockConfigSource::new()
        .with_error(Endpoint::new("10.0.0.1", 8091), FetchError::Unauthorized)
        .with_error(Endpoint::new("10.0.0.2", 8091), FetchError::Unauthorized);
    let (engine, reporter) = engine(source.clone());

    let spec = resolve("couchbase://10.0.0.1,10.0.0.2/mybucket").await;
    let err = engine.bootstrap(&spec, "wrong").await.unwrap_err();

    let Error::Exhausted { attempts } = err;
    assert_eq!(
        attempts.iter().map(|a| a.kind).collect::<Vec<_>>(),
        vec![
            StrategyKind::Cccp,
            StrategyKind::TerseHttp,
            StrategyKind::FullHttp
        ]
    );
    assert_eq!(attempts[1].outcome, Outcome::Failed);
    assert_eq!(attempts[2].outcome, Outcome::Unsupported);

    assert_eq!(
        reporter.count_containing(Level::Error, "incorrect bucket/password"),
        2
    );
    assert!(reporter.contains(
        Level::Error,
        "All endpoints specified by your connection string were unreachable"
    ));
    assert_eq!(source.fetches().len(), 2);
}

#[tokio::test]
async fn test_failed_fetch_does_not_stop_later_hosts() {
    let source = MockConfigSource::new()
        .with_error(Endpoint::new("10.0.0.1", 8091), FetchError::Status(500))
        .with_topology(
            Endpoint::new("10.0.0.2", 8091),
            terse_topology("uuid", vec![NodeSpec::new("10.0.0.2").this_node()]),
        );
    let (engine, reporter) = engine(source);

    let spec = resolve("couchbase://10.0.0.1,10.0.0.2").await;
    let bootstrap = engine.bootstrap(&spec, "").await.unwrap();

    assert_eq!(bootstrap.nodes.len(), 1);
    assert!(reporter.contains(Level::Error, "http error (status code: 500)"));
}

#[tokio::test]
async fn test_non_canonical_hostname_warns() {
    let source = MockConfigSource::new().with_topology(
        Endpoint::new("10.0.0.1", 8091),
        terse_topology("uuid", vec![NodeSpec::new("node1.example.com").this_node()]),
    );
    let (engine, reporter) = engine(source);

    let spec = resolve("couchbase://10.0.0.1").await;
    let bootstrap = engine.bootstrap(&spec, "").await.unwrap();

    assert_eq!(bootstrap.nodes[0].hostname, "node1.example.com");
    assert_eq!(reporter.count(Level::Warn), 1);
    assert!(reporter.contains(
        Level::Warn,
        "`10.0.0.1` is not using the canonical node hostname of `node1.example.com`"
    ));
}

#[tokio::test]
async fn test_topology_without_self_node_skips_hostname_check() {
    let source = MockConfigSource::new().with_topology(
        Endpoint::new("10.0.0.1", 8091),
        terse_topology("uuid", vec![NodeSpec::new("node1.example.com")]),
    );
    let (engine, reporter) = engine(source);

    let spec = resolve("couchbase://10.0.0.1").await;
    engine.bootstrap(&spec, "").await.unwrap();

    assert_eq!(reporter.count(Level::Warn), 0);
}

#[tokio::test]
async fn test_topology_without_nodes_fails_strategy() {
    let source = MockConfigSource::new()
        .with_topology(Endpoint::new("10.0.0.1", 8091), terse_topology("uuid", vec![]));
    let (engine, reporter) = engine(source);

    let spec = resolve("couchbase://10.0.0.1").await;
    assert!(engine.bootstrap(&spec, "").await.is_err());
    assert!(reporter.contains(Level::Warn, "without any nodes"));
}

#[tokio::test]
async fn test_strategy_without_endpoints_is_skipped() {
    let source = MockConfigSource::new().with_topology(
        Endpoint::new("10.0.0.1", 8091),
        terse_topology("uuid", vec![NodeSpec::new("10.0.0.1").this_node()]),
    );
    let (engine, reporter) = engine(source);

    let spec = endpoints_only(vec![], vec![Endpoint::new("10.0.0.1", 8091)]);
    let bootstrap = engine.bootstrap(&spec, "").await.unwrap();

    assert_eq!(bootstrap.attempts[0].kind, StrategyKind::Cccp);
    assert_eq!(bootstrap.attempts[0].outcome, Outcome::Skipped);
    assert_eq!(bootstrap.attempts[1].kind, StrategyKind::TerseHttp);
    assert!(matches!(bootstrap.attempts[1].outcome, Outcome::Bootstrapped(_)));

    assert!(reporter.contains(
        Level::Info,
        "Not attempting CCCP, as the connection string does not support it"
    ));
    assert!(!reporter.contains(Level::Info, "Attempting to connect to cluster via CCCP"));
    assert_eq!(reporter.count(Level::Error), 0);
}

#[tokio::test]
async fn test_no_endpoints_at_all_is_exhausted() {
    let source = MockConfigSource::new();
    let (engine, reporter) = engine(source.clone());

    let spec = endpoints_only(vec![], vec![]);
    let err = engine.bootstrap(&spec, "").await.unwrap_err();

    let Error::Exhausted { attempts } = err;
    assert_eq!(
        attempts,
        vec![
            Attempt {
                kind: StrategyKind::Cccp,
                outcome: Outcome::Skipped,
            },
            Attempt {
                kind: StrategyKind::TerseHttp,
                outcome: Outcome::Skipped,
            },
            Attempt {
                kind: StrategyKind::FullHttp,
                outcome: Outcome::Skipped,
            },
        ]
    );

    assert_eq!(
        reporter.count_containing(Level::Info, "as the connection string does not support it"),
        3
    );
    assert!(!reporter.contains(Level::Info, "Attempting to connect"));
    assert_eq!(reporter.count(Level::Error), 1);
    assert!(reporter.contains(Level::Error, "were unreachable"));
    assert!(source.fetches().is_empty());
}
