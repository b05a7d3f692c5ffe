// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::Extension;
use axum_test::TestServer;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use seopulse::infrastructure::repositories::project_repo_impl::ProjectRepositoryImpl;
use seopulse::presentation::routes;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub db: Arc<DatabaseConnection>,
    pub repo: Arc<ProjectRepositoryImpl>,
}

async fn migrated_repo() -> (Arc<DatabaseConnection>, Arc<ProjectRepositoryImpl>) {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    let db = Arc::new(db);
    let repo = Arc::new(ProjectRepositoryImpl::new(db.clone()));
    (db, repo)
}

/// 基于 axum-test 的存储服务
pub async fn create_test_app() -> TestApp {
    let (db, repo) = migrated_repo().await;
    let app = routes::routes().layer(Extension(repo.clone()));
    let server = TestServer::new(app).expect("Failed to start test server");
    TestApp { server, db, repo }
}

/// 在随机端口上运行存储服务，返回基础地址
pub async fn spawn_store() -> (String, Arc<ProjectRepositoryImpl>) {
    let (_db, repo) = migrated_repo().await;
    let app = routes::routes().layer(Extension(repo.clone()));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), repo)
}

pub fn project_body(id: &str, last_checked: i64) -> Value {
    json!({
        "id": id,
        "url": format!("https://{id}.example"),
        "name": id.to_uppercase(),
        "country": "US",
        "type": "E-COMMERCE",
        "lastChecked": last_checked,
    })
}

pub fn snapshot_body(id: &str, project_id: &str, timestamp: i64) -> Value {
    json!({
        "id": id,
        "projectId": project_id,
        "timestamp": timestamp,
        "score": 70,
        "rank": 4,
        "page": 1,
        "metaTitle": "Running shoes",
        "metaDescription": "Shop running shoes",
        "h1Tag": "Running shoes",
        "altTexts": ["hero"],
        "topKeywords": ["running shoes"],
    })
}
