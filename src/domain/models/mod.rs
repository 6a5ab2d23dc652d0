// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 供应商（vendor）：销售被跟踪商品的电商站点及其注册表
/// - 抓取任务（vendor_url_task）：一个（商品，供应商，URL）三元组
/// - 价格记录（price_record）：只追加的价格时间序列事实
/// - 抓取结果（scrape_outcome）：单个任务的结果与整次运行的汇总
pub mod price_record;
pub mod scrape_outcome;
pub mod vendor;
pub mod vendor_url_task;
