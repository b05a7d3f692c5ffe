// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 存储服务用例与仪表盘状态控制器
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 仪表盘模块
///
/// 模式路由、视图与错误边界
pub mod dashboard;

/// 领域模块
///
/// 包含核心业务实体、网关与仓库接口
pub mod domain;

/// 基础设施模块
///
/// 数据库、HTTP 网关与指标导出
pub mod infrastructure;

/// 表示层模块
///
/// 存储服务的路由、处理器与错误响应
pub mod presentation;

/// 工具模块
pub mod utils;
