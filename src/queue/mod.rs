// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 队列模块
///
/// 提供批次调度与批次间停顿策略
pub mod delay_policy;
pub mod scheduler;
