// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::project::{Project, ProjectSnapshot};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 持久化网关错误
///
/// 所有网关操作都以该类型返回失败，调用方据此降级处理。
#[derive(Error, Debug)]
pub enum GatewayError {
    /// 未配置端点或远端不可达
    #[error("connectivity error: {0}")]
    Connectivity(String),
    /// 快照ID重复
    #[error("conflict: {0}")]
    Conflict(String),
    /// 请求或响应内容不合法
    #[error("validation error: {0}")]
    Validation(String),
    /// 远端返回的其他错误
    #[error("remote error ({status}): {message}")]
    Remote { status: u16, message: String },
    /// 本地端点配置读写失败
    #[error("endpoint storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl GatewayError {
    /// 是否应被视为离线
    pub fn is_connectivity(&self) -> bool {
        matches!(self, GatewayError::Connectivity(_))
    }
}

/// 连接测试结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionTestResult {
    pub success: bool,
    pub message: String,
}

impl ConnectionTestResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// 项目持久化网关
///
/// 将领域操作翻译为对远端存储服务的请求。
/// 实现不得 panic，所有失败都以 `GatewayError` 返回。
#[async_trait]
pub trait ProjectGateway: Send + Sync {
    /// 当前配置的端点，`None` 表示离线/本地模式
    fn api_url(&self) -> Option<String>;

    /// 持久化端点，不验证可达性
    async fn set_api_url(&self, url: &str) -> Result<(), GatewayError>;

    /// 测试候选端点，不修改已保存的配置
    async fn test_connection(&self, url: &str) -> ConnectionTestResult;

    /// 获取全部项目及历史
    async fn get_projects(&self) -> Result<Vec<Project>, GatewayError>;

    /// 按 `id` 幂等写入项目
    async fn create_or_update_project(&self, project: &Project) -> Result<(), GatewayError>;

    /// 追加快照，ID 重复时返回 `Conflict`
    async fn append_snapshot(&self, snapshot: &ProjectSnapshot) -> Result<(), GatewayError>;

    /// 删除项目
    async fn delete_project(&self, id: &str) -> Result<(), GatewayError>;
}
