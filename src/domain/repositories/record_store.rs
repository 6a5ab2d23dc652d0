// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;

use crate::domain::models::price_record::PriceRecord;
use crate::domain::models::vendor::Vendor;
use crate::domain::models::vendor_url_task::VendorUrlTask;
use crate::utils::errors::RepositoryError;

/// 记录存储特质
///
/// 提供供应商注册表与抓取任务列表的读取，以及价格记录的追加写入
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// 读取完整的供应商注册表
    async fn list_vendors(&self) -> Result<Vec<Vendor>, RepositoryError>;

    /// 读取完整的供应商URL任务列表
    async fn list_vendor_urls(&self) -> Result<Vec<VendorUrlTask>, RepositoryError>;

    /// 追加一条价格记录，从不覆盖已有记录
    async fn append_price(&self, record: PriceRecord) -> Result<(), RepositoryError>;
}
