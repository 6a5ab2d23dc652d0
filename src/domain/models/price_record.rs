// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::vendor_url_task::VendorUrlTask;

/// 提取结果
///
/// 所有提取策略统一输出的价格与库存状态
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// 价格，非负有限值
    pub price: f64,
    /// 是否有货
    pub availability: bool,
}

impl ExtractionResult {
    /// 创建提取结果，负数或非有限价格返回 None
    pub fn new(price: f64, availability: bool) -> Option<Self> {
        if price.is_finite() && price >= 0.0 {
            Some(Self {
                price,
                availability,
            })
        } else {
            None
        }
    }
}

/// 价格记录实体
///
/// 每次成功抓取追加一条，从不原地更新，记录存储据此累积时间序列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// 记录唯一标识符
    pub id: Uuid,
    /// 商品ID
    pub product_id: i64,
    /// 供应商ID
    pub vendor_id: i64,
    /// 价格
    pub price: f64,
    /// 是否有货
    pub availability: bool,
    /// 抓取时间
    pub scraped_at: DateTime<Utc>,
}

impl PriceRecord {
    /// 根据成功的抓取结果创建价格记录
    ///
    /// # 参数
    ///
    /// * `task` - 产生结果的抓取任务
    /// * `result` - 提取结果
    ///
    /// # 返回值
    ///
    /// 返回带有新ID和当前时间戳的价格记录
    pub fn from_success(task: &VendorUrlTask, result: ExtractionResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id: task.product_id,
            vendor_id: task.vendor_id,
            price: result.price,
            availability: result.availability,
            scraped_at: Utc::now(),
        }
    }
}
