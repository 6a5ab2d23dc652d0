// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：供应商、抓取任务、价格记录与抓取结果
/// - 仓库接口（repositories）：记录存储的抽象接口
/// - 服务（services）：拦截检测与价格提取策略链
///
/// 领域层不依赖于任何外部实现，页面渲染与持久化均通过特质注入。
pub mod models;
pub mod repositories;
pub mod services;
