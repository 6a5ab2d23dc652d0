// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 定义记录存储的抽象契约，具体实现由基础设施层提供，
/// 测试中可以替换为内存实现。
pub mod record_store;
