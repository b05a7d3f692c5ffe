// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::spawn_store;
use seopulse::application::controller::{AppController, Connectivity, LoadOutcome};
use seopulse::dashboard::mode::ToolMode;
use seopulse::dashboard::shell::Shell;
use seopulse::domain::gateway::{GatewayError, ProjectGateway};
use seopulse::domain::models::analysis::AnalysisReport;
use seopulse::domain::models::project::{Project, ProjectSnapshot, ProjectType};
use seopulse::domain::repositories::project_repository::ProjectRepository;
use seopulse::infrastructure::gateway::endpoint_store::MemoryEndpointStore;
use seopulse::infrastructure::gateway::http_gateway::HttpGateway;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn project(id: &str, last_checked: i64) -> Project {
    let mut p = Project::new(
        id,
        format!("https://{id}.example"),
        id.to_uppercase(),
        "DE",
        ProjectType::Blog,
    );
    p.last_checked = last_checked;
    p
}

fn snapshot(id: &str, project_id: &str, timestamp: i64) -> ProjectSnapshot {
    let mut s = ProjectSnapshot::new(project_id, 64, 12, 2);
    s.id = id.to_string();
    s.timestamp = timestamp;
    s
}

#[tokio::test]
async fn test_dashboard_runs_against_live_store() {
    let (base_url, repo) = spawn_store().await;

    let gateway = Arc::new(
        HttpGateway::new(Arc::new(MemoryEndpointStore::default()), Duration::from_secs(2)).unwrap(),
    );
    let controller = AppController::new(gateway.clone(), Duration::from_millis(500));

    // No endpoint yet: offline with an empty list
    assert_eq!(controller.initialize().await, LoadOutcome::Offline);
    let state = controller.state();
    assert_eq!(state.connectivity, Connectivity::Offline);
    assert!(state.projects.is_empty());
    assert!(!state.is_initial_loading);

    let outcome = controller.reconfigure_endpoint(&base_url).await;
    assert!(outcome.test.success, "{}", outcome.test.message);
    assert_eq!(controller.api_url().as_deref(), Some(base_url.as_str()));
    let again = controller.reconfigure_endpoint(&base_url).await;
    assert!(again.reload.is_none());
    let reload = outcome.reload.expect("reload scheduled");
    assert_eq!(reload.await.unwrap(), LoadOutcome::Loaded(0));
    assert_eq!(controller.state().connectivity, Connectivity::Connected);

    controller.track_project(project("p2", 100)).await.unwrap();
    controller.track_project(project("p1", 200)).await.unwrap();
    assert_eq!(controller.initialize().await, LoadOutcome::Loaded(2));
    let state = controller.state();
    let ids: Vec<&str> = state.projects.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);
    assert_eq!(state.active_project.as_deref(), Some("p2"));

    let first = controller.record_snapshot(snapshot("s1", "p1", 150)).await.unwrap();
    let second = controller.record_snapshot(snapshot("s2", "p1", 300)).await.unwrap();
    assert!(first.project_synced);
    assert!(second.project_synced);
    let err = gateway
        .append_snapshot(&snapshot("s1", "p1", 400))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Conflict(_)));
    assert_eq!(repo.count_snapshots("p1").await.unwrap(), 2);

    // Reload reflects what the store persisted
    controller.initialize().await;
    let state = controller.state();
    let p1 = &state.projects[0];
    assert_eq!(p1.id, "p1");
    assert_eq!(p1.last_checked, 300);
    let history: Vec<&str> = p1.history.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(history, vec!["s2", "s1"]);

    controller.remove_project("p1").await.unwrap();
    assert_eq!(repo.count_snapshots("p1").await.unwrap(), 0);
    controller.initialize().await;
    let state = controller.state();
    assert_eq!(state.projects.len(), 1);
    assert_eq!(state.active_project.as_deref(), Some("p2"));
}

#[tokio::test]
async fn test_fresh_controller_selects_most_recent_project() {
    let (base_url, repo) = spawn_store().await;
    repo.upsert(&project("p1", 200)).await.unwrap();
    repo.upsert(&project("p2", 100)).await.unwrap();

    let gateway = Arc::new(
        HttpGateway::new(
            Arc::new(MemoryEndpointStore::with_url(base_url)),
            Duration::from_secs(2),
        )
        .unwrap(),
    );
    let controller = AppController::new(gateway, Duration::from_millis(50));
    assert_eq!(controller.initialize().await, LoadOutcome::Loaded(2));

    let state = controller.state();
    let ids: Vec<&str> = state.projects.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);
    assert_eq!(state.active_project.as_deref(), Some("p1"));

    let mut shell = Shell::new(controller);
    shell.publish_report(
        serde_json::from_value::<AnalysisReport>(json!({
            "kind": "ROADMAP",
            "data": [{"phase": "Foundation", "tasks": ["Fix titles", "Add schema"],
                      "expectedImpact": "High", "timeline": "Month 1"}]
        }))
        .unwrap(),
    );
    shell.switch_mode(ToolMode::Roadmap);

    let frame = shell.render();
    assert!(frame.sidebar.contains("Cloud Active"));
    assert!(frame.header.starts_with("Ranking Roadmap"));
    assert!(frame.header.contains("https://p1.example"));
    assert!(frame.body.contains("Foundation (Month 1): 2 tasks"));
}
