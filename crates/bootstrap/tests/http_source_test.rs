use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use doctor_bootstrap::{ConfigSource, FetchError, HttpConfigSource, HttpConfigSourceOptions};
use doctor_topology::Endpoint;

// "default:secret"
const AUTHORIZATION: &str = "Basic ZGVmYXVsdDpzZWNyZXQ=";

const TERSE_CONFIG: &str = r#"{
    "rev": 7,
    "uuid": "0f2d6a7bbd6e4e1b8c1f4b5b7e0f3a11",
    "nodesExt": [
        {"services": {"kv": 11210, "mgmt": 8091}, "thisNode": true, "hostname": "$HOST"},
        {"services": {"kv": 11210, "mgmt": 8091}, "hostname": "node2.example.com"}
    ]
}"#;

async fn terse_config(Path(bucket): Path<String>, headers: HeaderMap) -> impl IntoResponse {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .is_some_and(|value| value == AUTHORIZATION);

    match bucket.as_str() {
        "default" if !authorized => (StatusCode::UNAUTHORIZED, String::new()),
        "default" => (StatusCode::OK, TERSE_CONFIG.to_string()),
        "malformed" => (StatusCode::OK, "not json".to_string()),
        _ => (StatusCode::NOT_FOUND, "Requested resource not found.".to_string()),
    }
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(5)).await;
    "{}"
}

async fn start_server() -> SocketAddr {
    let router = Router::new().route("/pools/default/b/{bucket}", get(terse_config));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    addr
}

fn endpoint(addr: SocketAddr) -> Endpoint {
    Endpoint::new("127.0.0.1", addr.port())
}

#[tokio::test]
async fn test_fetch_replaces_host_placeholder() {
    let addr = start_server().await;
    let source = HttpConfigSource::default();

    let topology = source
        .fetch_terse_config(&endpoint(addr), "default", "secret")
        .await
        .unwrap();

    assert_eq!(topology.rev, 7);
    assert_eq!(topology.source_host, "127.0.0.1");
    assert_eq!(topology.self_node().unwrap().hostname, "127.0.0.1");
    assert_eq!(topology.nodes_ext[1].hostname, "node2.example.com");
}

#[tokio::test]
async fn test_fetch_wrong_password_is_unauthorized() {
    let addr = start_server().await;
    let source = HttpConfigSource::default();

    let err = source
        .fetch_terse_config(&endpoint(addr), "default", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err, FetchError::Unauthorized);
    assert_eq!(err.to_string(), "incorrect bucket/password");
}

#[tokio::test]
async fn test_fetch_other_status() {
    let addr = start_server().await;
    let source = HttpConfigSource::default();

    let err = source
        .fetch_terse_config(&endpoint(addr), "missing", "secret")
        .await
        .unwrap_err();

    assert_eq!(err, FetchError::Status(404));
    assert_eq!(err.to_string(), "http error (status code: 404)");
}

#[tokio::test]
async fn test_fetch_malformed_body() {
    let addr = start_server().await;

    let err = HttpConfigSource::default()
        .fetch_terse_config(&endpoint(addr), "malformed", "")
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Malformed(_)));
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    // bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = HttpConfigSource::default()
        .fetch_terse_config(&endpoint(addr), "default", "secret")
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
async fn test_fetch_timeout() {
    let router = Router::new().route("/pools/default/b/{bucket}", get(slow));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let source = HttpConfigSource::new(HttpConfigSourceOptions {
        timeout: Duration::from_millis(100),
    });

    let err = source
        .fetch_terse_config(&endpoint(addr), "default", "secret")
        .await
        .unwrap_err();

    assert_eq!(err, FetchError::Timeout);
}
