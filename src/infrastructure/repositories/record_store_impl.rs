// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;

use crate::domain::models::price_record::PriceRecord;
use crate::domain::models::vendor::Vendor;
use crate::domain::models::vendor_url_task::VendorUrlTask;
use crate::domain::repositories::record_store::RecordStore;
use crate::infrastructure::database::entities::{price, vendor, vendor_url};
use crate::utils::errors::RepositoryError;

/// 记录存储实现
///
/// 基于 SeaORM 的数据库实现，价格记录只插入不更新
pub struct RecordStoreImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl RecordStoreImpl {
    /// 创建新的记录存储实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    ///
    /// # 返回值
    ///
    /// 返回新的记录存储实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<vendor::Model> for Vendor {
    fn from(model: vendor::Model) -> Self {
        Vendor {
            id: model.id,
            name: model.name,
            domain: model.domain,
        }
    }
}

impl From<vendor_url::Model> for VendorUrlTask {
    fn from(model: vendor_url::Model) -> Self {
        VendorUrlTask {
            url: model.url,
            vendor_id: model.vendor_id,
            product_id: model.product_id,
        }
    }
}

#[async_trait]
impl RecordStore for RecordStoreImpl {
    async fn list_vendors(&self) -> Result<Vec<Vendor>, RepositoryError> {
        let models = vendor::Entity::find()
            .order_by_asc(vendor::Column::Id)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Vendor::from).collect())
    }

    async fn list_vendor_urls(&self) -> Result<Vec<VendorUrlTask>, RepositoryError> {
        let models = vendor_url::Entity::find()
            .order_by_asc(vendor_url::Column::Id)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(VendorUrlTask::from).collect())
    }

    async fn append_price(&self, record: PriceRecord) -> Result<(), RepositoryError> {
        let active_model = price::ActiveModel {
            id: Set(record.id),
            product_id: Set(record.product_id),
            vendor_id: Set(record.vendor_id),
            price: Set(record.price),
            availability: Set(record.availability),
            scraped_at: Set(record.scraped_at.into()),
        };

        price::Entity::insert(active_model)
            .exec_without_returning(self.db.as_ref())
            .await?;

        Ok(())
    }
}
