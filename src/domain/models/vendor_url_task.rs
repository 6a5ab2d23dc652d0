// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 供应商URL抓取任务
///
/// 由记录存储创建，调度器只读消费
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorUrlTask {
    /// 商品页面URL
    pub url: String,
    /// 供应商ID
    pub vendor_id: i64,
    /// 商品ID
    pub product_id: i64,
}

impl VendorUrlTask {
    pub fn new(url: impl Into<String>, vendor_id: i64, product_id: i64) -> Self {
        Self {
            url: url.into(),
            vendor_id,
            product_id,
        }
    }
}
