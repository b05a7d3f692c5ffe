// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 应用状态控制器
//!
//! 仪表盘“当前显示什么”的唯一来源，并与持久化网关保持同步。
//! 所有副作用都通过网关完成，控制器本身不接触网络或本地存储。

use crate::domain::gateway::{ConnectionTestResult, GatewayError, ProjectGateway};
use crate::domain::models::project::{Project, ProjectSnapshot};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// 快照记录结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotRecorded {
    /// 推进后的 `last_checked` 是否已写回远端项目
    pub project_synced: bool,
}

/// 远端存储连接状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// 尚未加载
    #[default]
    Unknown,
    /// 已连接远端存储
    Connected,
    /// 离线模式
    Offline,
}

/// 控制器持有的可观察状态
#[derive(Debug, Clone)]
pub struct AppState {
    /// 项目列表，按 `last_checked` 倒序
    pub projects: Vec<Project>,
    /// 当前选中项目的ID
    pub active_project: Option<String>,
    pub connectivity: Connectivity,
    /// 首次加载完成前为 `true`
    pub is_initial_loading: bool,
    /// 最近一次端点测试的结果
    pub pending_config_test: Option<ConnectionTestResult>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            projects: Vec::new(),
            active_project: None,
            connectivity: Connectivity::Unknown,
            is_initial_loading: true,
            pending_config_test: None,
        }
    }
}

impl AppState {
    /// 当前选中的项目
    pub fn active(&self) -> Option<&Project> {
        let id = self.active_project.as_deref()?;
        self.projects.iter().find(|p| p.id == id)
    }

    fn sort_projects(&mut self) {
        self.projects
            .sort_by(|a, b| b.last_checked.cmp(&a.last_checked));
    }
}

/// 一次加载的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// 加载成功，包含项目数量
    Loaded(usize),
    /// 网关失败，已进入离线模式
    Offline,
    /// 已有加载在进行中，本次未执行
    Skipped,
}

/// 端点重新配置的结果
#[derive(Debug)]
pub struct ReconfigureOutcome {
    /// 连接测试结果，失败时包含原因
    pub test: ConnectionTestResult,
    /// 新安排的延迟重新加载；已有待执行的重新加载时为 `None`
    pub reload: Option<JoinHandle<LoadOutcome>>,
}

/// 应用状态控制器
pub struct AppController {
    gateway: Arc<dyn ProjectGateway>,
    state: RwLock<AppState>,
    /// 串行化加载，加载过程中不可重入
    reload_guard: Mutex<()>,
    /// 是否已有待执行的延迟重新加载
    reload_scheduled: AtomicBool,
    reload_delay: Duration,
}

impl AppController {
    /// 创建控制器
    ///
    /// # 参数
    ///
    /// * `gateway` - 持久化网关
    /// * `reload_delay` - 端点切换成功后到重新加载之间的等待时间
    pub fn new(gateway: Arc<dyn ProjectGateway>, reload_delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            gateway,
            state: RwLock::new(AppState::default()),
            reload_guard: Mutex::new(()),
            reload_scheduled: AtomicBool::new(false),
            reload_delay,
        })
    }

    /// 当前状态的副本
    pub fn state(&self) -> AppState {
        self.state.read().clone()
    }

    /// 当前配置的端点
    pub fn api_url(&self) -> Option<String> {
        self.gateway.api_url()
    }

    /// 从网关加载项目
    ///
    /// 成功时替换项目列表；若没有选中项目（或选中项目已不存在）则选中第一个。
    /// 失败时进入离线模式并清空列表，不保留旧数据。
    /// 无论结果如何都会结束首次加载状态。
    /// 已有加载在进行时直接返回 `LoadOutcome::Skipped`。
    pub async fn initialize(&self) -> LoadOutcome {
        match self.reload_guard.try_lock() {
            Ok(_guard) => self.load().await,
            Err(_) => {
                debug!("Reload already in flight, skipping");
                LoadOutcome::Skipped
            }
        }
    }

    async fn load(&self) -> LoadOutcome {
        let result = self.gateway.get_projects().await;
        let configured = self.gateway.api_url().is_some();

        let mut state = self.state.write();
        let outcome = match result {
            Ok(projects) => {
                state.connectivity = if configured {
                    Connectivity::Connected
                } else {
                    Connectivity::Offline
                };
                let still_present = state
                    .active_project
                    .as_ref()
                    .is_some_and(|id| projects.iter().any(|p| &p.id == id));
                if !still_present {
                    state.active_project = projects.first().map(|p| p.id.clone());
                }
                let count = projects.len();
                state.projects = projects;
                info!("Loaded {} projects", count);
                LoadOutcome::Loaded(count)
            }
            Err(e) => {
                if e.is_connectivity() {
                    info!("Store unavailable, running offline: {}", e);
                } else {
                    warn!("Failed to load projects, running offline: {}", e);
                }
                state.connectivity = Connectivity::Offline;
                state.projects.clear();
                state.active_project = None;
                LoadOutcome::Offline
            }
        };
        state.is_initial_loading = false;
        outcome
    }

    /// 选中项目
    ///
    /// 项目不存在时不做任何修改并返回 `false`
    pub fn select_project(&self, id: &str) -> bool {
        let mut state = self.state.write();
        if state.projects.iter().any(|p| p.id == id) {
            state.active_project = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// 测试并保存新的端点
    ///
    /// 测试成功后保存端点、标记为已连接，并安排一次延迟重新加载。
    /// 测试失败时除记录测试结果外状态不变。
    pub async fn reconfigure_endpoint(self: &Arc<Self>, candidate_url: &str) -> ReconfigureOutcome {
        let test = self.gateway.test_connection(candidate_url).await;
        if !test.success {
            info!("Endpoint test failed: {}", test.message);
            self.state.write().pending_config_test = Some(test.clone());
            return ReconfigureOutcome { test, reload: None };
        }

        if let Err(e) = self.gateway.set_api_url(candidate_url).await {
            warn!("Failed to save endpoint: {}", e);
            let test = ConnectionTestResult::failed(format!(
                "connection succeeded but the endpoint could not be saved: {e}"
            ));
            self.state.write().pending_config_test = Some(test.clone());
            return ReconfigureOutcome { test, reload: None };
        }

        {
            let mut state = self.state.write();
            state.pending_config_test = Some(test.clone());
            state.connectivity = Connectivity::Connected;
        }

        ReconfigureOutcome {
            test,
            reload: self.schedule_reload(),
        }
    }

    fn schedule_reload(self: &Arc<Self>) -> Option<JoinHandle<LoadOutcome>> {
        if self.reload_scheduled.swap(true, Ordering::AcqRel) {
            debug!("Reload already scheduled");
            return None;
        }

        let this = Arc::clone(self);
        Some(tokio::spawn(async move {
            tokio::time::sleep(this.reload_delay).await;
            this.reload_scheduled.store(false, Ordering::Release);
            // Wait out any in-flight load so this one observes the new endpoint
            let _guard = this.reload_guard.lock().await;
            this.load().await
        }))
    }

    /// 新建或更新项目
    ///
    /// 远端写入成功后更新本地列表；没有选中项目时选中它
    pub async fn track_project(&self, project: Project) -> Result<(), GatewayError> {
        self.gateway.create_or_update_project(&project).await?;

        let mut state = self.state.write();
        match state.projects.iter().position(|p| p.id == project.id) {
            Some(idx) => {
                let existing = &mut state.projects[idx];
                let history = std::mem::take(&mut existing.history);
                *existing = project.clone();
                if existing.history.is_empty() {
                    existing.history = history;
                }
            }
            None => state.projects.push(project.clone()),
        }
        state.sort_projects();
        if state.active().is_none() {
            state.active_project = Some(project.id);
        }
        Ok(())
    }

    /// 记录新快照
    ///
    /// 快照追加成功即视为记录成功。快照推进了 `last_checked` 时再尽力同步远端项目，
    /// 同步失败只记录警告，本地 `last_checked` 保持与远端一致。
    ///
    /// # 返回值
    ///
    /// * `Ok(SnapshotRecorded)` - 快照已写入远端，`project_synced` 表示项目是否同步
    /// * `Err(GatewayError)` - 快照追加失败，本地状态未改变
    pub async fn record_snapshot(
        &self,
        snapshot: ProjectSnapshot,
    ) -> Result<SnapshotRecorded, GatewayError> {
        self.gateway.append_snapshot(&snapshot).await?;

        let advanced = {
            let state = self.state.read();
            state
                .projects
                .iter()
                .find(|p| p.id == snapshot.project_id && snapshot.timestamp > p.last_checked)
                .map(|p| Project {
                    last_checked: snapshot.timestamp,
                    history: Vec::new(),
                    ..p.clone()
                })
        };

        let mut project_synced = true;
        if let Some(project) = advanced {
            if let Err(e) = self.gateway.create_or_update_project(&project).await {
                warn!(
                    "Snapshot {} stored but project {} not synced: {}",
                    snapshot.id, project.id, e
                );
                project_synced = false;
            }
        }

        let mut state = self.state.write();
        if let Some(project) = state.projects.iter_mut().find(|p| p.id == snapshot.project_id) {
            let before = project.last_checked;
            project.push_snapshot(snapshot);
            if !project_synced {
                project.last_checked = before;
            }
        }
        state.sort_projects();
        Ok(SnapshotRecorded { project_synced })
    }

    /// 删除项目
    ///
    /// 删除的是当前选中项目时改为选中列表中的第一个
    pub async fn remove_project(&self, id: &str) -> Result<(), GatewayError> {
        self.gateway.delete_project(id).await?;

        let mut state = self.state.write();
        state.projects.retain(|p| p.id != id);
        if state.active_project.as_deref() == Some(id) {
            state.active_project = state.projects.first().map(|p| p.id.clone());
        }
        Ok(())
    }
}
