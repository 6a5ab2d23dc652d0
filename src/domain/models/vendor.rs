// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 供应商实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    /// 供应商ID
    pub id: i64,
    /// 供应商名称
    pub name: String,
    /// 站点域名（可选）
    pub domain: Option<String>,
}

/// 供应商注册表
///
/// 运行开始时从记录存储整体加载，按ID查找
#[derive(Debug, Clone, Default)]
pub struct VendorRegistry {
    vendors: HashMap<i64, Vendor>,
}

impl VendorRegistry {
    pub fn new(vendors: Vec<Vendor>) -> Self {
        Self {
            vendors: vendors.into_iter().map(|v| (v.id, v)).collect(),
        }
    }

    /// 根据ID查找供应商
    pub fn get(&self, vendor_id: i64) -> Option<&Vendor> {
        self.vendors.get(&vendor_id)
    }

    pub fn len(&self) -> usize {
        self.vendors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }
}
