// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 引擎模块
///
/// 页面渲染能力的抽象与基于 Chromium 的实现，
/// 以及子资源过滤与身份字符串轮换
pub mod chromium_engine;
pub mod resource_filter;
pub mod traits;
pub mod user_agents;
