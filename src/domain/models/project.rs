// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// 被跟踪的网站项目
///
/// `id` 由客户端生成，在项目生命周期内保持不变，
/// 同时作为其所有快照的外键。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// 项目唯一标识符
    pub id: String,
    /// 站点地址
    pub url: String,
    /// 展示名称
    pub name: String,
    /// 目标国家/地区
    pub country: String,
    /// 站点类型
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    /// 最近一次检查时间（毫秒时间戳）
    pub last_checked: i64,
    /// 跟踪的关键词
    #[serde(default)]
    pub tracked_keywords: Vec<String>,
    /// 历史快照，按时间戳倒序
    #[serde(default)]
    pub history: Vec<ProjectSnapshot>,
}

impl Project {
    /// 创建一个没有历史记录的新项目
    pub fn new(
        id: impl Into<String>,
        url: impl Into<String>,
        name: impl Into<String>,
        country: impl Into<String>,
        project_type: ProjectType,
    ) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            name: name.into(),
            country: country.into(),
            project_type,
            last_checked: Utc::now().timestamp_millis(),
            tracked_keywords: Vec::new(),
            history: Vec::new(),
        }
    }

    /// 最新的快照
    pub fn latest_snapshot(&self) -> Option<&ProjectSnapshot> {
        self.history.first()
    }

    /// 将快照插入历史记录，保持时间戳倒序
    pub fn push_snapshot(&mut self, snapshot: ProjectSnapshot) {
        let pos = self
            .history
            .iter()
            .position(|s| s.timestamp < snapshot.timestamp)
            .unwrap_or(self.history.len());
        if snapshot.timestamp > self.last_checked {
            self.last_checked = snapshot.timestamp;
        }
        self.history.insert(pos, snapshot);
    }
}

/// 项目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProjectType {
    /// 电商站点
    #[serde(rename = "E-COMMERCE")]
    ECommerce,
    /// 博客
    #[serde(rename = "BLOG")]
    Blog,
    /// 通用站点
    #[default]
    #[serde(rename = "GENERAL")]
    General,
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProjectType::ECommerce => write!(f, "E-COMMERCE"),
            ProjectType::Blog => write!(f, "BLOG"),
            ProjectType::General => write!(f, "GENERAL"),
        }
    }
}

impl FromStr for ProjectType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "E-COMMERCE" => Ok(ProjectType::ECommerce),
            "BLOG" => Ok(ProjectType::Blog),
            "GENERAL" => Ok(ProjectType::General),
            other => Err(ModelError::UnknownProjectType(other.to_string())),
        }
    }
}

/// 项目在某一时刻的 SEO 状态快照
///
/// 快照只追加不修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    pub id: String,
    pub project_id: String,
    /// 创建时间（毫秒时间戳）
    pub timestamp: i64,
    /// 综合得分，0-100
    pub score: i32,
    /// 搜索排名
    pub rank: i32,
    /// 搜索结果页码
    pub page: i32,
    pub meta_title: String,
    pub meta_description: String,
    pub h1_tag: String,
    #[serde(default)]
    pub alt_texts: Vec<String>,
    #[serde(default)]
    pub top_keywords: Vec<String>,
}

impl ProjectSnapshot {
    /// 以当前时间和随机 ID 创建快照
    pub fn new(project_id: impl Into<String>, score: i32, rank: i32, page: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            project_id: project_id.into(),
            timestamp: Utc::now().timestamp_millis(),
            score,
            rank,
            page,
            meta_title: String::new(),
            meta_description: String::new(),
            h1_tag: String::new(),
            alt_texts: Vec::new(),
            top_keywords: Vec::new(),
        }
    }
}

/// 模型层错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown project type: {0}")]
    UnknownProjectType(String),

    #[error("malformed string list in column {column}: {reason}")]
    MalformedList { column: &'static str, reason: String },
}

/// 将字符串列表编码为 JSON 文本列
pub fn encode_string_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

/// 解码 JSON 文本列为字符串列表
///
/// 内容必须是字符串数组；`null`、对象或非字符串元素都视为格式错误，
/// 不会被静默转换为空列表。
pub fn decode_string_list(column: &'static str, raw: &str) -> Result<Vec<String>, ModelError> {
    serde_json::from_str::<Vec<String>>(raw).map_err(|e| ModelError::MalformedList {
        column,
        reason: e.to_string(),
    })
}
