// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 提供单个供应商URL的抓取执行
pub mod scrape_worker;

pub use scrape_worker::ScrapeWorker;
