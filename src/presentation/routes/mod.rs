// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::infrastructure::repositories::project_repo_impl::ProjectRepositoryImpl;
use crate::presentation::handlers::project_handler;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// 创建应用路由
///
/// 仓库通过 `Extension<Arc<ProjectRepositoryImpl>>` 注入
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version));

    let store_routes = Router::new()
        .route(
            "/projects",
            get(project_handler::list_projects::<ProjectRepositoryImpl>)
                .post(project_handler::save_project::<ProjectRepositoryImpl>),
        )
        .route(
            "/projects/{id}",
            delete(project_handler::delete_project::<ProjectRepositoryImpl>),
        )
        .route(
            "/snapshots",
            post(project_handler::append_snapshot::<ProjectRepositoryImpl>),
        );

    // The dashboard may be served from any origin
    Router::new()
        .merge(public_routes)
        .merge(store_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
