// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod fake_renderer;

use std::sync::Arc;
use std::time::Duration;

use pricetrack::domain::models::vendor::Vendor;
use pricetrack::domain::services::block_detector::BlockDetector;
use pricetrack::domain::services::extraction::selector_fallback::SelectorStrategy;
use pricetrack::domain::services::extraction::structured_data::StructuredDataStrategy;
use pricetrack::domain::services::extraction::ExtractionChain;
use pricetrack::engines::traits::PageRenderer;
use pricetrack::workers::ScrapeWorker;

pub use fake_renderer::{FakeRenderer, FakeSite, PageEvent};
pub use memory_store::MemoryStore;

pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(45);

/// 单次尝试、无供应商回退的策略链
pub fn quick_chain() -> ExtractionChain {
    ExtractionChain::new(
        Box::new(StructuredDataStrategy::new()),
        Box::new(SelectorStrategy::new()),
        Vec::new(),
        1,
        Duration::ZERO,
    )
}

pub fn worker(renderer: Arc<FakeRenderer>) -> Arc<ScrapeWorker> {
    let renderer: Arc<dyn PageRenderer> = renderer;
    Arc::new(ScrapeWorker::new(
        renderer,
        quick_chain(),
        BlockDetector::new("Access Denied"),
        NAVIGATION_TIMEOUT,
    ))
}

pub fn vendor(id: i64, name: &str) -> Vendor {
    Vendor {
        id,
        name: name.to_string(),
        domain: None,
    }
}

/// 带 JSON-LD 商品数据的页面
pub fn product_page(price: &str, availability: &str) -> String {
    format!(
        r#"<html><head><script type="application/ld+json">
            {{"@context": "https://schema.org", "@type": "Product",
              "offers": {{"@type": "Offer", "price": "{}", "availability": "{}"}}}}
        </script></head><body><h1>Product</h1></body></html>"#,
        price, availability
    )
}
