// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::{
    application::dto::project_request::{ProjectRequestDto, SnapshotRequestDto},
    domain::{
        models::project::{Project, ProjectSnapshot},
        repositories::project_repository::{ProjectRepository, RepositoryError},
    },
};
use metrics::counter;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use validator::Validate;

#[derive(Error, Debug)]
pub enum ProjectUseCaseError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Project not found: {0}")]
    NotFound(String),
    #[error("Snapshot already exists: {0}")]
    Conflict(String),
    #[error("Repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ProjectUseCaseError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(what) => ProjectUseCaseError::NotFound(what),
            RepositoryError::Conflict(what) => ProjectUseCaseError::Conflict(what),
            other => ProjectUseCaseError::Repository(other),
        }
    }
}

/// 项目存储用例
///
/// 存储服务各个端点背后的业务规则：请求校验、幂等写入、只追加快照、级联删除。
pub struct ProjectUseCase<R> {
    repo: Arc<R>,
}

impl<R> ProjectUseCase<R>
where
    R: ProjectRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// 列出全部项目及历史
    pub async fn list_projects(&self) -> Result<Vec<Project>, ProjectUseCaseError> {
        Ok(self.repo.list_with_history().await?)
    }

    /// 写入或覆盖项目
    pub async fn save_project(&self, payload: ProjectRequestDto) -> Result<(), ProjectUseCaseError> {
        payload
            .validate()
            .map_err(|e| ProjectUseCaseError::ValidationError(e.to_string()))?;

        let project: Project = payload.into();
        self.repo.upsert(&project).await?;
        counter!("projects_upserted_total").increment(1);
        info!("Project {} saved", project.id);
        Ok(())
    }

    /// 追加快照
    pub async fn append_snapshot(
        &self,
        payload: SnapshotRequestDto,
    ) -> Result<(), ProjectUseCaseError> {
        payload
            .validate()
            .map_err(|e| ProjectUseCaseError::ValidationError(e.to_string()))?;

        let snapshot: ProjectSnapshot = payload.into();
        match self.repo.append_snapshot(&snapshot).await {
            Ok(()) => {
                counter!("snapshots_appended_total").increment(1);
                Ok(())
            }
            Err(RepositoryError::Conflict(what)) => {
                // Producers generate unique ids, so a duplicate points at a retry upstream
                warn!("Rejected duplicate snapshot {}", snapshot.id);
                Err(ProjectUseCaseError::Conflict(what))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 删除项目及其快照
    ///
    /// 删除不存在的项目不算错误
    pub async fn delete_project(&self, id: &str) -> Result<bool, ProjectUseCaseError> {
        let removed = self.repo.delete(id).await?;
        if removed {
            counter!("projects_deleted_total").increment(1);
            info!("Project {} deleted", id);
        }
        Ok(removed)
    }
}
