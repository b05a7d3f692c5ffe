// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用层
///
/// 存储服务的用例，以及仪表盘使用的状态控制器
pub mod controller;
pub mod dto;
pub mod use_cases;
