// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, project_body, snapshot_body};
use axum::http::StatusCode;
use seopulse::domain::models::project::Project;
use seopulse::domain::repositories::project_repository::ProjectRepository;
use serde_json::{json, Value};

#[tokio::test]
async fn test_health_and_version_are_public() {
    let app = create_test_app().await;

    let response = app.server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "OK");

    let response = app.server.get("/version").await;
    assert_eq!(response.text(), env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_list_returns_projects_with_ordered_history() {
    let app = create_test_app().await;

    for body in [project_body("p2", 100), project_body("p1", 200)] {
        let response = app.server.post("/projects").json(&body).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!({ "status": "success" }));
    }
    for (id, ts) in [("s1", 10), ("s3", 30), ("s2", 20)] {
        app.server
            .post("/snapshots")
            .json(&snapshot_body(id, "p1", ts))
            .await
            .assert_status_ok();
    }

    let projects: Vec<Project> = app.server.get("/projects").await.json();
    let ids: Vec<&str> = projects.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);
    let history: Vec<i64> = projects[0].history.iter().map(|s| s.timestamp).collect();
    assert_eq!(history, vec![30, 20, 10]);
    assert_eq!(projects[0].history[0].top_keywords, vec!["running shoes"]);
}

#[tokio::test]
async fn test_repeated_post_overwrites_project() {
    let app = create_test_app().await;
    app.server
        .post("/projects")
        .json(&project_body("p1", 100))
        .await
        .assert_status_ok();

    let mut body = project_body("p1", 150);
    body["name"] = json!("Renamed");
    body["trackedKeywords"] = json!(["trail shoes"]);
    app.server.post("/projects").json(&body).await.assert_status_ok();

    let projects: Vec<Project> = app.server.get("/projects").await.json();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].name, "Renamed");
    assert_eq!(projects[0].last_checked, 150);
    assert_eq!(projects[0].tracked_keywords, vec!["trail shoes"]);
}

#[tokio::test]
async fn test_duplicate_snapshot_is_rejected_with_conflict() {
    let app = create_test_app().await;
    app.server
        .post("/projects")
        .json(&project_body("p1", 100))
        .await
        .assert_status_ok();
    app.server
        .post("/snapshots")
        .json(&snapshot_body("s1", "p1", 10))
        .await
        .assert_status_ok();

    let response = app
        .server
        .post("/snapshots")
        .json(&snapshot_body("s1", "p1", 20))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert!(response.json::<Value>()["error"].is_string());
    assert_eq!(app.repo.count_snapshots("p1").await.unwrap(), 1);
}

#[tokio::test]
async fn test_snapshot_for_unknown_project_is_not_found() {
    let app = create_test_app().await;
    let response = app
        .server
        .post("/snapshots")
        .json(&snapshot_body("s1", "ghost", 10))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_payloads_are_bad_requests() {
    let app = create_test_app().await;

    let mut body = project_body("p1", 100);
    body["id"] = json!("");
    let response = app.server.post("/projects").json(&body).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());

    let mut body = project_body("p1", 100);
    body["type"] = json!("SPACESHIP");
    let response = app.server.post("/projects").json(&body).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    app.server
        .post("/projects")
        .json(&project_body("p1", 100))
        .await
        .assert_status_ok();
    let mut body = snapshot_body("s1", "p1", 10);
    body["score"] = json!(140);
    let response = app.server.post("/snapshots").json(&body).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_removes_project_and_history() {
    let app = create_test_app().await;
    for body in [project_body("p1", 200), project_body("p2", 100)] {
        app.server.post("/projects").json(&body).await.assert_status_ok();
    }
    app.server
        .post("/snapshots")
        .json(&snapshot_body("s1", "p1", 10))
        .await
        .assert_status_ok();

    let response = app.server.delete("/projects/p1").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "status": "deleted" }));

    let projects: Vec<Project> = app.server.get("/projects").await.json();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].id, "p2");
    assert_eq!(app.repo.count_snapshots("p1").await.unwrap(), 0);

    // Deleting again is not an error
    app.server.delete("/projects/p1").await.assert_status_ok();
}
