// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 仪表盘工具模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolMode {
    /// 项目概览
    #[default]
    Monitor,
    /// 站点审计
    Audit,
    /// 排名路线图
    Roadmap,
    /// 站点地图
    Sitemap,
    /// 商品页优化
    Product,
    /// 分类页分析
    Collection,
    /// 关键词研究
    Keyword,
    /// 博客审计
    Blog,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown tool mode: {0}")]
pub struct UnknownMode(pub String);

impl ToolMode {
    /// 导航栏顺序
    pub const ALL: [ToolMode; 8] = [
        ToolMode::Monitor,
        ToolMode::Audit,
        ToolMode::Roadmap,
        ToolMode::Sitemap,
        ToolMode::Product,
        ToolMode::Collection,
        ToolMode::Keyword,
        ToolMode::Blog,
    ];

    /// 导航栏与页头显示的名称
    pub fn title(self) -> &'static str {
        match self {
            ToolMode::Monitor => "Project Overview",
            ToolMode::Audit => "Site Auditor",
            ToolMode::Roadmap => "Ranking Roadmap",
            ToolMode::Sitemap => "Sitemap Intel",
            ToolMode::Product => "Product Optimizer",
            ToolMode::Collection => "Category Analysis",
            ToolMode::Keyword => "Keyword Explorer",
            ToolMode::Blog => "Blog Audit",
        }
    }

    fn code(self) -> &'static str {
        match self {
            ToolMode::Monitor => "MONITOR",
            ToolMode::Audit => "AUDIT",
            ToolMode::Roadmap => "ROADMAP",
            ToolMode::Sitemap => "SITEMAP",
            ToolMode::Product => "PRODUCT",
            ToolMode::Collection => "COLLECTION",
            ToolMode::Keyword => "KEYWORD",
            ToolMode::Blog => "BLOG",
        }
    }
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ToolMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ToolMode::ALL
            .into_iter()
            .find(|m| m.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownMode(s.to_string()))
    }
}
