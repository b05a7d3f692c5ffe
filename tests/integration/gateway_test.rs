// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::project_body;
use seopulse::domain::gateway::{GatewayError, ProjectGateway};
use seopulse::domain::models::project::ProjectSnapshot;
use seopulse::infrastructure::gateway::endpoint_store::{FileEndpointStore, MemoryEndpointStore};
use seopulse::infrastructure::gateway::http_gateway::HttpGateway;
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway_for(url: Option<&str>, timeout: Duration) -> HttpGateway {
    let store = match url {
        Some(url) => MemoryEndpointStore::with_url(url),
        None => MemoryEndpointStore::default(),
    };
    HttpGateway::new(Arc::new(store), timeout).unwrap()
}

#[tokio::test]
async fn test_get_projects_returns_sorted_projects() {
    let server = MockServer::start().await;
    let mut older = project_body("p2", 100);
    older["history"] = json!([]);
    let mut newer = project_body("p1", 200);
    newer["history"] = json!([
        {"id": "s1", "projectId": "p1", "timestamp": 10, "score": 50, "rank": 9, "page": 1,
         "metaTitle": "", "metaDescription": "", "h1Tag": "", "altTexts": [], "topKeywords": []},
        {"id": "s2", "projectId": "p1", "timestamp": 20, "score": 60, "rank": 7, "page": 1,
         "metaTitle": "", "metaDescription": "", "h1Tag": "", "altTexts": [], "topKeywords": []}
    ]);
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([older, newer])))
        .mount(&server)
        .await;

    let gateway = gateway_for(Some(&server.uri()), Duration::from_secs(2));
    let projects = gateway.get_projects().await.unwrap();

    assert_eq!(projects[0].id, "p1");
    assert_eq!(projects[1].id, "p2");
    assert_eq!(projects[0].history[0].id, "s2");
}

#[tokio::test]
async fn test_unconfigured_gateway_reports_connectivity() {
    let gateway = gateway_for(None, Duration::from_secs(1));
    assert!(gateway.api_url().is_none());
    let err = gateway.get_projects().await.unwrap_err();
    assert!(err.is_connectivity());
}

#[tokio::test]
async fn test_duplicate_snapshot_maps_to_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/snapshots"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "error": "Snapshot already exists: s1" })),
        )
        .mount(&server)
        .await;

    let gateway = gateway_for(Some(&server.uri()), Duration::from_secs(2));
    let err = gateway
        .append_snapshot(&ProjectSnapshot::new("p1", 70, 3, 1))
        .await
        .unwrap_err();
    match err {
        GatewayError::Conflict(message) => assert!(message.contains("already exists")),
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_keeps_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/projects/p1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "disk full" })))
        .mount(&server)
        .await;

    let gateway = gateway_for(Some(&server.uri()), Duration::from_secs(2));
    let err = gateway.delete_project("p1").await.unwrap_err();
    assert!(matches!(
        err,
        GatewayError::Remote { status: 500, ref message } if message == "disk full"
    ));
}

#[tokio::test]
async fn test_endpoint_check_counts_projects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{}, {}])))
        .mount(&server)
        .await;

    let gateway = gateway_for(None, Duration::from_secs(2));
    let result = gateway.test_connection(&server.uri()).await;
    assert!(result.success);
    assert_eq!(result.message, "Connected. 2 projects found.");
    // Testing never changes the configured endpoint
    assert!(gateway.api_url().is_none());
}

#[tokio::test]
async fn test_endpoint_check_rejects_non_list_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>hello</html>"))
        .mount(&server)
        .await;

    let gateway = gateway_for(None, Duration::from_secs(2));
    let result = gateway.test_connection(&server.uri()).await;
    assert!(!result.success);
}

#[tokio::test]
async fn test_endpoint_check_times_out_on_slow_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let gateway = gateway_for(None, Duration::from_millis(300));
    let started = Instant::now();
    let result = gateway.test_connection(&server.uri()).await;
    assert!(!result.success);
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn test_endpoint_check_fails_on_unreachable_endpoint() {
    // Bind then drop a listener so the port is known to be closed
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let gateway = gateway_for(None, Duration::from_millis(500));
    let started = Instant::now();
    let result = gateway.test_connection(&format!("http://{addr}")).await;
    assert!(!result.success);
    assert!(!result.message.is_empty());
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn test_saved_endpoint_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("nested").join("endpoint");

    let gateway = HttpGateway::new(
        Arc::new(FileEndpointStore::new(&file)),
        Duration::from_secs(1),
    )
    .unwrap();
    assert!(gateway.api_url().is_none());
    gateway.set_api_url("http://store.example/api").await.unwrap();
    assert_eq!(gateway.api_url().as_deref(), Some("http://store.example/api"));

    let reopened = HttpGateway::new(
        Arc::new(FileEndpointStore::new(&file)),
        Duration::from_secs(1),
    )
    .unwrap();
    assert_eq!(reopened.api_url().as_deref(), Some("http://store.example/api"));
}
