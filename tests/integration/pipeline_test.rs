// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::{EntityTrait, QueryOrder};
use std::sync::Arc;
use std::time::Duration;

use pricetrack::config::settings::{ExtractionSettings, VendorSettings};
use pricetrack::domain::services::block_detector::BlockDetector;
use pricetrack::domain::services::extraction::ExtractionChain;
use pricetrack::engines::traits::PageRenderer;
use pricetrack::infrastructure::database::entities::price;
use pricetrack::infrastructure::repositories::RecordStoreImpl;
use pricetrack::queue::delay_policy::FixedDelay;
use pricetrack::queue::scheduler::BatchScheduler;
use pricetrack::workers::ScrapeWorker;

use super::helpers::{product_page, FakeRenderer, FakeSite, NAVIGATION_TIMEOUT};
use super::record_store_test::{memory_db, seed_url, seed_vendor};

fn default_chain() -> ExtractionChain {
    let extraction = ExtractionSettings {
        structured_data_attempts: 3,
        structured_data_retry_ms: 10,
        block_phrase: "Access Denied".to_string(),
    };
    let vendors = VendorSettings {
        meta_fallback_domains: vec!["shop-a.ch".to_string()],
        script_fallback_domains: vec!["shop-b.ch".to_string()],
        script_selector: "script#utag_data".to_string(),
        script_variable: "legacy_utag_data".to_string(),
    };
    ExtractionChain::from_settings(&extraction, &vendors).unwrap()
}

#[tokio::test]
async fn test_full_run_persists_every_strategy_result() {
    let db = memory_db().await;
    let generic = seed_vendor(&db, "Generic Shop", None).await;
    let shop_a = seed_vendor(&db, "Shop A", Some("shop-a.ch")).await;
    let shop_b = seed_vendor(&db, "Shop B", Some("shop-b.ch")).await;

    seed_url(&db, "https://generic.example/p/1", generic, 1).await;
    seed_url(&db, "https://www.shop-a.ch/p/2", shop_a, 2).await;
    seed_url(&db, "https://shop-b.ch/p/3", shop_b, 3).await;
    seed_url(&db, "https://generic.example/p/4", generic, 4).await;
    seed_url(&db, "https://generic.example/p/5", generic, 5).await;
    seed_url(&db, "https://generic.example/p/6", generic, 6).await;

    let renderer = Arc::new(FakeRenderer::new([
        (
            "https://generic.example/p/1".to_string(),
            FakeSite::html(product_page("1'234,50", "https://schema.org/InStock")),
        ),
        (
            "https://www.shop-a.ch/p/2".to_string(),
            FakeSite::html(
                r#"<html><head>
                    <meta property="product:price:amount" content="49.90">
                    <meta property="product:availability" content="instock">
                </head><body><h1>Kaffeemaschine</h1></body></html>"#,
            ),
        ),
        (
            "https://shop-b.ch/p/3".to_string(),
            FakeSite::html(
                r#"<html><head><script id="utag_data">
                    var legacy_utag_data = {"prod":[{"price":"19.95","stock":"0"}]};
                </script></head><body><h1>Toaster</h1></body></html>"#,
            ),
        ),
        (
            "https://generic.example/p/4".to_string(),
            FakeSite::html(
                r#"<html><body><span class="price">CHF 12.99</span><div class="stock">In Stock</div></body></html>"#,
            ),
        ),
        ("https://generic.example/p/5".to_string(), FakeSite::blocked()),
        (
            "https://generic.example/p/6".to_string(),
            FakeSite::html(product_page("7.00", "OutOfStock")),
        ),
    ]));

    let store = Arc::new(RecordStoreImpl::new(db.clone()));
    let page_renderer: Arc<dyn PageRenderer> = renderer.clone();
    let worker = Arc::new(ScrapeWorker::new(
        page_renderer,
        default_chain(),
        BlockDetector::new("Access Denied"),
        NAVIGATION_TIMEOUT,
    ));
    let scheduler = BatchScheduler::new(store, worker, Box::new(FixedDelay(Duration::from_millis(50))), 5);

    let report = scheduler.run().await.unwrap();

    assert_eq!(report.batches, 2);
    assert_eq!(report.succeeded, 5);
    assert_eq!(report.blocked, 1);
    assert_eq!(report.persisted, 5);
    assert_eq!(renderer.released(), 6);

    let rows = price::Entity::find()
        .order_by_asc(price::Column::ProductId)
        .all(db.as_ref())
        .await
        .unwrap();
    let observed: Vec<(i64, f64, bool)> = rows
        .iter()
        .map(|r| (r.product_id, r.price, r.availability))
        .collect();
    assert_eq!(
        observed,
        vec![
            (1, 1234.5, true),
            (2, 49.9, true),
            (3, 19.95, false),
            (4, 12.99, true),
            (6, 7.0, false),
        ]
    );
}
