// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

use crate::domain::models::price_record::ExtractionResult;
use crate::domain::services::extraction::normalize::{is_in_stock, parse_price};
use crate::domain::services::extraction::{DomainMatcher, ExtractionStrategy};
use crate::utils::errors::ExtractionMiss;

static PRICE_META: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[property="product:price:amount"], meta[name="product:price:amount"]"#)
        .expect("static selector is valid")
});

static AVAILABILITY_META: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[property="product:availability"], meta[name="product:availability"]"#)
        .expect("static selector is valid")
});

/// 供应商元数据回退策略
///
/// 读取页面的商品价格与库存元数据，两者都存在才算命中
#[derive(Debug, Clone)]
pub struct VendorMetaStrategy {
    domains: DomainMatcher,
}

impl VendorMetaStrategy {
    pub fn new(domains: DomainMatcher) -> Self {
        Self { domains }
    }
}

fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .filter_map(|el| el.value().attr("content"))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

impl ExtractionStrategy for VendorMetaStrategy {
    fn name(&self) -> &'static str {
        "vendor_meta"
    }

    fn applies_to(&self, url: &Url) -> bool {
        self.domains.matches(url)
    }

    fn extract(&self, html: &str) -> Result<ExtractionResult, ExtractionMiss> {
        let document = Html::parse_document(html);

        let price_text = meta_content(&document, &PRICE_META)
            .ok_or(ExtractionMiss::MissingMetadata("product:price:amount"))?;
        let availability_text = meta_content(&document, &AVAILABILITY_META)
            .ok_or(ExtractionMiss::MissingMetadata("product:availability"))?;

        let price = parse_price(&price_text)
            .ok_or_else(|| ExtractionMiss::UnparsablePrice(price_text.clone()))?;

        ExtractionResult::new(price, is_in_stock(&availability_text))
            .ok_or(ExtractionMiss::UnparsablePrice(price_text))
    }
}
