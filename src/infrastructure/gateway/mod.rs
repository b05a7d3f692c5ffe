// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 持久化网关模块
///
/// 仪表盘通过该模块访问远端项目存储服务，
/// 并在本地保存端点配置。
pub mod endpoint_store;
pub mod http_gateway;
