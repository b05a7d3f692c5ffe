// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务概念，包括：
/// - 领域模型（models）：项目、快照与分析结果
/// - 仓库接口（repositories）：存储服务端的数据持久化抽象
/// - 网关接口（gateway）：仪表盘访问远端存储的抽象
///
/// 领域层不依赖于任何外部实现。
pub mod gateway;
pub mod models;
pub mod repositories;
