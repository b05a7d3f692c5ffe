// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 项目（project）：被跟踪的站点及其历史快照
/// - 分析结果（analysis）：各分析视图展示的报告
pub mod analysis;
pub mod project;
