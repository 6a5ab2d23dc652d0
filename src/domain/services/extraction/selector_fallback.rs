// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::domain::models::price_record::ExtractionResult;
use crate::domain::services::extraction::normalize::{is_in_stock, parse_price};
use crate::domain::services::extraction::ExtractionStrategy;
use crate::utils::errors::ExtractionMiss;

const PRICE_SELECTORS: &str = r#"[itemprop="price"], [data-price], .price, .product-price, .price__amount, .current-price, #price"#;

const AVAILABILITY_SELECTORS: &str = r#"[itemprop="availability"], [data-availability], .availability, .stock, .stock-status, #availability"#;

static PRICE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(PRICE_SELECTORS).expect("static selector is valid"));

static AVAILABILITY: Lazy<Selector> =
    Lazy::new(|| Selector::parse(AVAILABILITY_SELECTORS).expect("static selector is valid"));

/// 通用选择器回退策略
///
/// 取文档顺序中第一个匹配常见价格选择器的元素解析价格；
/// 库存取第一个匹配库存选择器的元素，缺失时视为无货
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorStrategy;

impl SelectorStrategy {
    pub fn new() -> Self {
        Self
    }
}

/// 元素文本，为空时依次回退到给定属性
fn element_text(element: ElementRef<'_>, attrs: &[&str]) -> Option<String> {
    let text = element.text().collect::<Vec<_>>().join(" ");
    let text = text.trim();
    if !text.is_empty() {
        return Some(text.to_string());
    }
    attrs
        .iter()
        .filter_map(|attr| element.value().attr(attr))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

impl ExtractionStrategy for SelectorStrategy {
    fn name(&self) -> &'static str {
        "selector"
    }

    fn extract(&self, html: &str) -> Result<ExtractionResult, ExtractionMiss> {
        let document = Html::parse_document(html);

        let element = document
            .select(&PRICE)
            .next()
            .ok_or(ExtractionMiss::NoSelectorMatch)?;
        let text = element_text(element, &["content", "data-price"])
            .ok_or(ExtractionMiss::NoSelectorMatch)?;
        let price = parse_price(&text).ok_or_else(|| ExtractionMiss::UnparsablePrice(text.clone()))?;

        let availability = document
            .select(&AVAILABILITY)
            .next()
            .and_then(|el| element_text(el, &["content", "href", "data-availability"]))
            .is_some_and(|text| is_in_stock(&text));

        ExtractionResult::new(price, availability).ok_or(ExtractionMiss::UnparsablePrice(text))
    }
}
