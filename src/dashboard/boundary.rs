// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;
use tracing::error;

/// 视图渲染失败
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderFault {
    /// 视图主动报告的失败
    #[error("{0}")]
    Failed(String),
    /// 视图渲染时 panic
    #[error("{0}")]
    Panicked(String),
}

/// 错误边界状态
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BoundaryState {
    /// 正常渲染子视图
    #[default]
    Healthy,
    /// 已捕获故障，只渲染恢复界面
    Faulted { message: String },
}

/// 错误边界
///
/// 将视图渲染与外壳隔离。第一次故障后进入 `Faulted` 状态，
/// 此后不再调用子视图，直到外壳用新实例替换它。
#[derive(Debug, Default)]
pub struct ErrorBoundary {
    state: BoundaryState,
}

impl ErrorBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &BoundaryState {
        &self.state
    }

    pub fn is_faulted(&self) -> bool {
        matches!(self.state, BoundaryState::Faulted { .. })
    }

    /// 在边界内渲染
    ///
    /// # 参数
    ///
    /// * `view` - 渲染闭包，返回的错误与 panic 都会被捕获
    ///
    /// # 返回值
    ///
    /// 正常时返回视图内容，故障时返回恢复界面
    pub fn render<F>(&mut self, view: F) -> String
    where
        F: FnOnce() -> Result<String, RenderFault>,
    {
        if let BoundaryState::Faulted { message } = &self.state {
            return recovery_body(message);
        }

        let outcome = panic::catch_unwind(AssertUnwindSafe(view))
            .unwrap_or_else(|payload| Err(RenderFault::Panicked(panic_message(payload))));

        match outcome {
            Ok(body) => body,
            Err(fault) => {
                error!("Boundary caught render fault: {:?}", fault);
                let message = fault.to_string();
                let body = recovery_body(&message);
                self.state = BoundaryState::Faulted { message };
                body
            }
        }
    }
}

/// 故障后的恢复界面
pub fn recovery_body(message: &str) -> String {
    format!("Component Crash\n{message}\n[Reload Page]")
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "view panicked".to_string()
    }
}
