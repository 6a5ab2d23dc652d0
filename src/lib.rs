// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心业务实体、提取策略和仓库接口
pub mod domain;

/// 引擎模块
///
/// 页面渲染能力的抽象与 Chromium 实现
pub mod engines;

/// 基础设施模块
///
/// 提供数据库、迁移与指标等外部集成
pub mod infrastructure;

/// 队列模块
///
/// 实现批次调度与停顿策略
pub mod queue;

/// 工具模块
///
/// 提供错误类型与日志初始化
pub mod utils;

/// 工作器模块
///
/// 实现单个供应商URL的抓取
pub mod workers;
