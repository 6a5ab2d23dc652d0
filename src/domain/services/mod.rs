// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 拦截检测（block_detector）：识别反爬拦截页
/// - 提取策略链（extraction）：按固定优先级从渲染后的页面提取价格与库存
pub mod block_detector;
pub mod extraction;
