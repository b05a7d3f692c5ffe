// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::project_request::{ProjectRequestDto, SnapshotRequestDto};
use crate::application::use_cases::project_use_case::{ProjectUseCase, ProjectUseCaseError};
use crate::domain::models::project::Project;
use crate::domain::repositories::project_repository::ProjectRepository;
use crate::presentation::errors::AppError;
use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

fn malformed_body(rejection: JsonRejection) -> AppError {
    ProjectUseCaseError::ValidationError(rejection.body_text()).into()
}

/// 列出全部项目
///
/// # 返回值
///
/// 项目按 `lastChecked` 倒序，每个项目附带按时间倒序的 `history`
pub async fn list_projects<R: ProjectRepository + 'static>(
    Extension(repo): Extension<Arc<R>>,
) -> Result<Json<Vec<Project>>, AppError> {
    let projects = ProjectUseCase::new(repo).list_projects().await?;
    Ok(Json(projects))
}

/// 新建或覆盖项目
pub async fn save_project<R: ProjectRepository + 'static>(
    Extension(repo): Extension<Arc<R>>,
    payload: Result<Json<ProjectRequestDto>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(payload) = payload.map_err(malformed_body)?;
    ProjectUseCase::new(repo).save_project(payload).await?;
    Ok(Json(json!({ "status": "success" })))
}

/// 追加快照
pub async fn append_snapshot<R: ProjectRepository + 'static>(
    Extension(repo): Extension<Arc<R>>,
    payload: Result<Json<SnapshotRequestDto>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(payload) = payload.map_err(malformed_body)?;
    ProjectUseCase::new(repo).append_snapshot(payload).await?;
    Ok(Json(json!({ "status": "success" })))
}

/// 删除项目及其全部快照
///
/// 项目不存在时同样返回成功
pub async fn delete_project<R: ProjectRepository + 'static>(
    Extension(repo): Extension<Arc<R>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    ProjectUseCase::new(repo).delete_project(&id).await?;
    Ok(Json(json!({ "status": "deleted" })))
}
