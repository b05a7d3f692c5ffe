// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::project::{ModelError, Project, ProjectSnapshot};
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found: {0}")]
    NotFound(String),
    /// 主键冲突
    #[error("Record already exists: {0}")]
    Conflict(String),
    /// 存储内容或请求内容不合法
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl From<ModelError> for RepositoryError {
    fn from(err: ModelError) -> Self {
        RepositoryError::Validation(err.to_string())
    }
}

/// 项目仓库特质
///
/// 定义项目及其快照的数据访问接口。
/// 项目按 `id` 幂等写入；快照只允许插入。
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// 列出全部项目及完整历史
    ///
    /// 项目按 `last_checked` 倒序，历史按 `timestamp` 倒序。
    async fn list_with_history(&self) -> Result<Vec<Project>, RepositoryError>;

    /// 按 `id` 插入或覆盖项目
    ///
    /// 同一 `id` 重复调用只会保留一条记录，内容为最后一次写入。
    async fn upsert(&self, project: &Project) -> Result<(), RepositoryError>;

    /// 追加快照
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 插入成功
    /// * `Err(RepositoryError::Conflict)` - 快照ID已存在
    /// * `Err(RepositoryError::NotFound)` - 所属项目不存在
    async fn append_snapshot(&self, snapshot: &ProjectSnapshot) -> Result<(), RepositoryError>;

    /// 删除项目及其全部快照
    ///
    /// # 返回值
    ///
    /// * `Ok(true)` - 项目存在并已删除
    /// * `Ok(false)` - 项目不存在
    async fn delete(&self, id: &str) -> Result<bool, RepositoryError>;

    /// 统计某项目的快照数量
    async fn count_snapshots(&self, project_id: &str) -> Result<u64, RepositoryError>;
}
