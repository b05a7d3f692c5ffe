// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仪表盘展示层
///
/// 外壳按当前模式渲染一个视图，视图故障由错误边界隔离
pub mod boundary;
pub mod mode;
pub mod shell;
pub mod views;
