// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::controller::{AppController, AppState, Connectivity, LoadOutcome};
use crate::dashboard::boundary::{ErrorBoundary, RenderFault};
use crate::dashboard::mode::ToolMode;
use crate::dashboard::views::{report_mode, AnalysisView, MonitorView, ReportView, ViewContext};
use crate::domain::models::analysis::AnalysisReport;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

const BRAND: &str = "SEOPulse";
const LOADING: &str = "SEO Engine Initializing...";

/// 一帧渲染结果
///
/// 侧边栏与页头在错误边界之外渲染，视图故障时仍然可用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub sidebar: String,
    pub header: String,
    pub body: String,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(48);
        writeln!(f, "{}", self.sidebar)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "{}", self.header)?;
        writeln!(f, "{rule}")?;
        write!(f, "{}", self.body)
    }
}

/// 仪表盘外壳
///
/// 持有控制器、当前模式与每个模式的视图，每帧只渲染一个视图
pub struct Shell {
    controller: Arc<AppController>,
    mode: ToolMode,
    views: HashMap<ToolMode, Box<dyn AnalysisView>>,
    reports: HashMap<ToolMode, AnalysisReport>,
    boundary: ErrorBoundary,
    sidebar_open: bool,
}

impl Shell {
    /// 创建外壳并挂载默认视图
    pub fn new(controller: Arc<AppController>) -> Self {
        let mut views: HashMap<ToolMode, Box<dyn AnalysisView>> = HashMap::new();
        for mode in ToolMode::ALL {
            let view: Box<dyn AnalysisView> = match mode {
                ToolMode::Monitor => Box::new(MonitorView),
                other => Box::new(ReportView::new(other)),
            };
            views.insert(mode, view);
        }

        Self {
            controller,
            mode: ToolMode::default(),
            views,
            reports: HashMap::new(),
            boundary: ErrorBoundary::new(),
            sidebar_open: true,
        }
    }

    pub fn controller(&self) -> &Arc<AppController> {
        &self.controller
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn boundary(&self) -> &ErrorBoundary {
        &self.boundary
    }

    /// 切换模式，不影响控制器状态
    pub fn switch_mode(&mut self, mode: ToolMode) {
        debug!("Switching to {}", mode);
        self.mode = mode;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    /// 替换某个模式的视图
    pub fn mount_view(&mut self, mode: ToolMode, view: Box<dyn AnalysisView>) {
        self.views.insert(mode, view);
    }

    /// 发布分析报告，交给对应模式的视图展示
    pub fn publish_report(&mut self, report: AnalysisReport) {
        self.reports.insert(report_mode(&report), report);
    }

    /// 重新挂载错误边界并重新加载数据
    pub async fn reload(&mut self) -> LoadOutcome {
        self.boundary = ErrorBoundary::new();
        self.controller.initialize().await
    }

    /// 渲染一帧
    pub fn render(&mut self) -> Frame {
        let state = self.controller.state();
        if state.is_initial_loading {
            return Frame {
                sidebar: String::new(),
                header: String::new(),
                body: LOADING.to_string(),
            };
        }

        let sidebar = self.render_sidebar(&state);
        let header = self.render_header(&state);

        let ctx = ViewContext {
            state: &state,
            report: self.reports.get(&self.mode),
        };
        let view = self.views.get(&self.mode);
        let mode = self.mode;
        let body = self.boundary.render(|| match view {
            Some(view) => view.render(&ctx),
            None => Err(RenderFault::Failed(format!("no view mounted for {mode}"))),
        });

        Frame {
            sidebar,
            header,
            body,
        }
    }

    fn render_sidebar(&self, state: &AppState) -> String {
        let mut lines = vec![BRAND.to_string()];

        for mode in ToolMode::ALL {
            let marker = if mode == self.mode { '>' } else { ' ' };
            if self.sidebar_open {
                lines.push(format!("{marker} {}", mode.title()));
            } else {
                lines.push(format!("{marker} {mode}"));
            }
        }

        if !self.sidebar_open {
            return lines.join("\n");
        }

        lines.push("Sync Engine".to_string());
        lines.push(
            match state.connectivity {
                Connectivity::Connected => "Cloud Active",
                Connectivity::Unknown | Connectivity::Offline => "Offline",
            }
            .to_string(),
        );

        if state.projects.is_empty() {
            lines.push("No Projects".to_string());
        } else {
            for p in &state.projects {
                let marker = if state.active_project.as_deref() == Some(p.id.as_str()) {
                    '*'
                } else {
                    ' '
                };
                lines.push(format!("{marker} {}", p.name));
            }
        }
        lines.join("\n")
    }

    fn render_header(&self, state: &AppState) -> String {
        let title = self.mode.title();
        match state.active() {
            Some(project) => {
                let initial = project
                    .name
                    .chars()
                    .next()
                    .map(|c| c.to_uppercase().to_string())
                    .unwrap_or_default();
                format!("{title} | TRACKED DOMAIN {} [{initial}]", project.url)
            }
            None => title.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::controller::tests::{project, FakeGateway};
    use crate::dashboard::boundary::BoundaryState;
    use std::time::Duration;

    struct ExplodingView;

    impl AnalysisView for ExplodingView {
        fn render(&self, _ctx: &ViewContext<'_>) -> Result<String, RenderFault> {
            panic!("chart data missing")
        }
    }

    async fn loaded_shell() -> Shell {
        let gateway = FakeGateway::online(vec![project("p1", 200), project("p2", 100)]);
        let controller = AppController::new(gateway, Duration::from_millis(10));
        let shell = Shell::new(controller);
        shell.controller().initialize().await;
        shell
    }

    #[tokio::test]
    async fn test_loading_frame_before_initialize() {
        let gateway = FakeGateway::online(vec![]);
        let mut shell = Shell::new(AppController::new(gateway, Duration::from_millis(10)));
        let frame = shell.render();
        assert_eq!(frame.body, LOADING);
        assert!(frame.sidebar.is_empty());
    }

    #[tokio::test]
    async fn test_frame_shows_badge_selector_and_domain() {
        let mut shell = loaded_shell().await;
        let frame = shell.render();

        assert!(frame.sidebar.contains("Cloud Active"));
        assert!(frame.sidebar.contains("* p1"));
        assert!(frame.sidebar.contains("> Project Overview"));
        assert!(frame.header.starts_with("Project Overview"));
        assert!(frame.header.contains("https://p1.example"));
    }

    #[tokio::test]
    async fn test_offline_frame_without_projects() {
        let controller = AppController::new(FakeGateway::offline(), Duration::from_millis(10));
        controller.initialize().await;
        let mut shell = Shell::new(controller);

        let frame = shell.render();
        assert!(frame.sidebar.contains("Offline"));
        assert!(frame.sidebar.contains("No Projects"));
        assert_eq!(frame.header, "Project Overview");
    }

    #[tokio::test]
    async fn test_switch_mode_leaves_controller_state_alone() {
        let mut shell = loaded_shell().await;
        shell.controller().select_project("p2");
        let before = shell.controller().state();

        shell.switch_mode(ToolMode::Keyword);
        let frame = shell.render();

        assert_eq!(shell.controller().state().active_project, before.active_project);
        assert!(frame.header.starts_with("Keyword Explorer"));
        assert_eq!(frame.body, "No Keyword Explorer results yet.");
    }

    #[tokio::test]
    async fn test_faulting_view_is_contained_until_reload() {
        let mut shell = loaded_shell().await;
        shell.mount_view(ToolMode::Audit, Box::new(ExplodingView));
        shell.switch_mode(ToolMode::Audit);

        let frame = shell.render();
        assert!(frame.body.starts_with("Component Crash"));
        assert!(frame.body.contains("chart data missing"));
        assert!(frame.body.contains("[Reload Page]"));
        assert!(frame.sidebar.contains("Cloud Active"));
        assert!(frame.header.starts_with("Site Auditor"));

        // Faulted boundary stays faulted even for healthy views
        shell.switch_mode(ToolMode::Monitor);
        assert!(shell.render().body.starts_with("Component Crash"));

        assert_eq!(shell.reload().await, LoadOutcome::Loaded(2));
        assert_eq!(shell.boundary().state(), &BoundaryState::Healthy);
        assert!(shell.render().body.starts_with("p1"));
    }

    #[tokio::test]
    async fn test_collapsed_sidebar_hides_sync_panel() {
        let mut shell = loaded_shell().await;
        shell.toggle_sidebar();
        let frame = shell.render();
        assert!(frame.sidebar.contains("> MONITOR"));
        assert!(!frame.sidebar.contains("Sync Engine"));
    }
}
