// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use std::sync::Arc;

use pricetrack::config::settings::DatabaseSettings;
use pricetrack::domain::models::price_record::{ExtractionResult, PriceRecord};
use pricetrack::domain::models::vendor_url_task::VendorUrlTask;
use pricetrack::domain::repositories::record_store::RecordStore;
use pricetrack::infrastructure::database::connection;
use pricetrack::infrastructure::database::entities::{price, vendor, vendor_url};
use pricetrack::infrastructure::repositories::RecordStoreImpl;

pub async fn memory_db() -> Arc<DatabaseConnection> {
    let settings = DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: None,
        min_connections: None,
        connect_timeout: None,
        idle_timeout: None,
    };
    Arc::new(connection::connect_and_migrate(&settings).await.unwrap())
}

pub async fn seed_vendor(db: &DatabaseConnection, name: &str, domain: Option<&str>) -> i64 {
    vendor::ActiveModel {
        name: Set(name.to_string()),
        domain: Set(domain.map(str::to_string)),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn seed_url(db: &DatabaseConnection, url: &str, vendor_id: i64, product_id: i64) {
    vendor_url::ActiveModel {
        url: Set(url.to_string()),
        vendor_id: Set(vendor_id),
        product_id: Set(product_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

#[tokio::test]
async fn test_reads_registry_and_task_list() {
    let db = memory_db().await;
    let shop_a = seed_vendor(&db, "Shop A", Some("shop-a.ch")).await;
    let shop_b = seed_vendor(&db, "Shop B", None).await;
    seed_url(&db, "https://shop-a.ch/p/1", shop_a, 10).await;
    seed_url(&db, "https://shop-b.ch/p/1", shop_b, 10).await;

    let store = RecordStoreImpl::new(db.clone());

    let vendors = store.list_vendors().await.unwrap();
    assert_eq!(vendors.len(), 2);
    assert_eq!(vendors[0].name, "Shop A");
    assert_eq!(vendors[0].domain.as_deref(), Some("shop-a.ch"));
    assert_eq!(vendors[1].domain, None);

    let tasks = store.list_vendor_urls().await.unwrap();
    assert_eq!(
        tasks,
        vec![
            VendorUrlTask::new("https://shop-a.ch/p/1", shop_a, 10),
            VendorUrlTask::new("https://shop-b.ch/p/1", shop_b, 10),
        ]
    );
}

#[tokio::test]
async fn test_append_never_overwrites() {
    let db = memory_db().await;
    let store = RecordStoreImpl::new(db.clone());
    let task = VendorUrlTask::new("https://shop-a.ch/p/1", 1, 10);

    let first = PriceRecord::from_success(&task, ExtractionResult::new(99.5, true).unwrap());
    let second = PriceRecord::from_success(&task, ExtractionResult::new(89.0, false).unwrap());
    store.append_price(first.clone()).await.unwrap();
    store.append_price(second.clone()).await.unwrap();

    assert_eq!(price::Entity::find().count(db.as_ref()).await.unwrap(), 2);

    let stored = price::Entity::find_by_id(first.id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.price, 99.5);
    assert!(stored.availability);
    assert_eq!(stored.product_id, 10);
    assert_eq!(stored.vendor_id, 1);
}

#[tokio::test]
async fn test_duplicate_record_id_is_rejected() {
    let db = memory_db().await;
    let store = RecordStoreImpl::new(db);
    let task = VendorUrlTask::new("https://shop-a.ch/p/1", 1, 10);
    let record = PriceRecord::from_success(&task, ExtractionResult::new(1.0, true).unwrap());

    store.append_price(record.clone()).await.unwrap();
    assert!(store.append_price(record).await.is_err());
}

#[tokio::test]
async fn test_empty_store_yields_empty_lists() {
    let store = RecordStoreImpl::new(memory_db().await);
    assert!(store.list_vendors().await.unwrap().is_empty());
    assert!(store.list_vendor_urls().await.unwrap().is_empty());
}
