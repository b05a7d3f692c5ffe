// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::controller::AppState;
use crate::dashboard::boundary::RenderFault;
use crate::dashboard::mode::ToolMode;
use crate::domain::models::analysis::AnalysisReport;
use chrono::DateTime;

/// 视图渲染上下文
pub struct ViewContext<'a> {
    /// 控制器状态快照
    pub state: &'a AppState,
    /// 当前模式最近一次发布的分析报告
    pub report: Option<&'a AnalysisReport>,
}

/// 分析视图
///
/// 每个工具模式对应一个视图。视图只读取上下文，
/// 失败时返回 `RenderFault`，由外壳的错误边界处理。
pub trait AnalysisView: Send {
    fn render(&self, ctx: &ViewContext<'_>) -> Result<String, RenderFault>;
}

/// 报告所属的工具模式
pub fn report_mode(report: &AnalysisReport) -> ToolMode {
    match report {
        AnalysisReport::Audit(_) => ToolMode::Audit,
        AnalysisReport::Keyword(_) => ToolMode::Keyword,
        AnalysisReport::Product(_) => ToolMode::Product,
        AnalysisReport::Collection(_) => ToolMode::Collection,
        AnalysisReport::Roadmap(_) => ToolMode::Roadmap,
        AnalysisReport::Blog(_) => ToolMode::Blog,
        AnalysisReport::Sitemap(_) => ToolMode::Sitemap,
    }
}

fn format_day(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

/// 项目概览：当前项目的信息与历史快照
#[derive(Debug, Default)]
pub struct MonitorView;

impl AnalysisView for MonitorView {
    fn render(&self, ctx: &ViewContext<'_>) -> Result<String, RenderFault> {
        let Some(project) = ctx.state.active() else {
            return Ok("No project selected. Track a site to start monitoring.".to_string());
        };

        let mut lines = vec![
            format!("{} ({})", project.name, project.url),
            format!(
                "Type: {}  Country: {}  Last checked: {}",
                project.project_type,
                project.country,
                format_day(project.last_checked)
            ),
        ];
        if !project.tracked_keywords.is_empty() {
            lines.push(format!("Keywords: {}", project.tracked_keywords.join(", ")));
        }

        if project.history.is_empty() {
            lines.push("No snapshots yet.".to_string());
            return Ok(lines.join("\n"));
        }

        lines.push("History:".to_string());
        // History is newest first; compare each entry with the one before it
        for (i, snapshot) in project.history.iter().enumerate() {
            let trend = match project.history.get(i + 1) {
                Some(prev) => format!("{:+}", snapshot.score - prev.score),
                None => "-".to_string(),
            };
            lines.push(format!(
                "  {}  score {:>3} ({})  rank #{} (page {})",
                format_day(snapshot.timestamp),
                snapshot.score,
                trend,
                snapshot.rank,
                snapshot.page
            ));
        }
        Ok(lines.join("\n"))
    }
}

/// 分析工具视图：展示本模式最近一次发布的报告
#[derive(Debug)]
pub struct ReportView {
    mode: ToolMode,
}

impl ReportView {
    pub fn new(mode: ToolMode) -> Self {
        Self { mode }
    }
}

impl AnalysisView for ReportView {
    fn render(&self, ctx: &ViewContext<'_>) -> Result<String, RenderFault> {
        let Some(report) = ctx.report else {
            return Ok(format!("No {} results yet.", self.mode.title()));
        };

        let kind = report_mode(report);
        if kind != self.mode {
            return Err(RenderFault::Failed(format!(
                "{} cannot display a {} report",
                self.mode.title(),
                kind.title()
            )));
        }

        let mut lines = Vec::new();
        if let Some(project) = ctx.state.active() {
            lines.push(format!("Project: {}", project.name));
        }
        lines.extend(report.summary_lines());
        Ok(lines.join("\n"))
    }
}
