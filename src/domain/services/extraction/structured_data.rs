// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::domain::models::price_record::ExtractionResult;
use crate::domain::services::extraction::normalize::{is_in_stock, price_from_json};
use crate::domain::services::extraction::ExtractionStrategy;
use crate::utils::errors::ExtractionMiss;

static LD_JSON: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("static selector is valid")
});

/// 结构化数据策略
///
/// 扫描页面中的 JSON-LD 脚本块，寻找 `@type` 含 "product" 且带有 `offers` 的条目。
/// 支持顶层对象、数组与 `@graph` 容器；`offers` 可以是对象或数组（取第一个）。
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredDataStrategy;

impl StructuredDataStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl ExtractionStrategy for StructuredDataStrategy {
    fn name(&self) -> &'static str {
        "structured_data"
    }

    fn extract(&self, html: &str) -> Result<ExtractionResult, ExtractionMiss> {
        let document = Html::parse_document(html);
        let mut miss = ExtractionMiss::NoStructuredData;

        for script in document.select(&LD_JSON) {
            let raw: String = script.text().collect();
            let value: Value = match serde_json::from_str(raw.trim()) {
                Ok(v) => v,
                Err(e) => {
                    miss = ExtractionMiss::MalformedJson(e.to_string());
                    continue;
                }
            };

            let mut products = Vec::new();
            collect_products(&value, &mut products);
            if products.is_empty() && miss == ExtractionMiss::NoStructuredData {
                miss = ExtractionMiss::NoProductEntry;
            }

            for product in products {
                match first_offer(product).and_then(result_from_offer) {
                    Ok(result) => return Ok(result),
                    Err(e) => miss = e,
                }
            }
        }

        Err(miss)
    }
}

fn collect_products<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Array(items) => items.iter().for_each(|item| collect_products(item, out)),
        Value::Object(map) => {
            if is_product(value) {
                out.push(value);
            }
            if let Some(graph) = map.get("@graph") {
                collect_products(graph, out);
            }
        }
        _ => {}
    }
}

fn is_product(entry: &Value) -> bool {
    let denotes_product = |t: &Value| {
        t.as_str()
            .is_some_and(|s| s.to_lowercase().contains("product"))
    };
    match entry.get("@type") {
        Some(Value::Array(types)) => types.iter().any(denotes_product),
        Some(t) => denotes_product(t),
        None => false,
    }
}

fn first_offer(product: &Value) -> Result<&Value, ExtractionMiss> {
    match product.get("offers") {
        Some(Value::Array(offers)) => offers.first().ok_or(ExtractionMiss::MissingOffers),
        Some(offer @ Value::Object(_)) => Ok(offer),
        _ => Err(ExtractionMiss::MissingOffers),
    }
}

fn result_from_offer(offer: &Value) -> Result<ExtractionResult, ExtractionMiss> {
    // AggregateOffer carries lowPrice instead of price
    let raw_price = offer
        .get("price")
        .or_else(|| offer.get("lowPrice"))
        .unwrap_or(&Value::Null);
    let price = price_from_json(raw_price)?;

    let availability = offer
        .get("availability")
        .and_then(Value::as_str)
        .is_some_and(is_in_stock);

    ExtractionResult::new(price, availability)
        .ok_or_else(|| ExtractionMiss::UnparsablePrice(raw_price.to_string()))
}
