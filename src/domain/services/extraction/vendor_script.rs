// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::{anyhow, Result};
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use url::Url;

use crate::domain::models::price_record::ExtractionResult;
use crate::domain::services::extraction::normalize::price_from_json;
use crate::domain::services::extraction::{DomainMatcher, ExtractionStrategy};
use crate::utils::errors::ExtractionMiss;

const PRODUCTS_KEY: &str = "prod";
const PRICE_KEY: &str = "price";
const STOCK_KEY: &str = "stock";

/// 供应商内联脚本回退策略
///
/// 定位指定的内联脚本，取出赋值给已知变量的对象字面量，
/// 读取第一个商品条目的价格与库存数量（库存大于 0 视为有货）
#[derive(Debug, Clone)]
pub struct VendorScriptStrategy {
    domains: DomainMatcher,
    script: Selector,
    script_selector: String,
    variable: String,
    assignment: Regex,
}

impl VendorScriptStrategy {
    /// 创建策略
    ///
    /// # 参数
    ///
    /// * `domains` - 适用的供应商域名
    /// * `script_selector` - 内联脚本的 CSS 选择器
    /// * `variable` - 对象字面量所赋给的变量名
    pub fn new(domains: DomainMatcher, script_selector: &str, variable: &str) -> Result<Self> {
        let script = Selector::parse(script_selector)
            .map_err(|e| anyhow!("invalid script selector {:?}: {:?}", script_selector, e))?;
        let assignment = Regex::new(&format!(r"{}\s*=\s*\{{", regex::escape(variable)))?;

        Ok(Self {
            domains,
            script,
            script_selector: script_selector.to_string(),
            variable: variable.to_string(),
            assignment,
        })
    }

    fn embedded_object<'a>(&self, source: &'a str) -> Result<&'a str, ExtractionMiss> {
        let found = self
            .assignment
            .find(source)
            .ok_or_else(|| ExtractionMiss::VariableNotFound(self.variable.clone()))?;
        // The match ends just past the opening brace
        let start = found.end() - 1;
        balanced_object(&source[start..])
            .ok_or_else(|| ExtractionMiss::MalformedJson("unterminated object literal".to_string()))
    }
}

/// 截取以 `{` 开头的平衡对象字面量，跳过字符串中的括号
fn balanced_object(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string: Option<char> = None;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if let Some(quote) = in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == quote {
                in_string = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => in_string = Some(ch),
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..=idx]);
                }
            }
            _ => {}
        }
    }
    None
}

fn stock_count(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

impl ExtractionStrategy for VendorScriptStrategy {
    fn name(&self) -> &'static str {
        "vendor_script"
    }

    fn applies_to(&self, url: &Url) -> bool {
        self.domains.matches(url)
    }

    fn extract(&self, html: &str) -> Result<ExtractionResult, ExtractionMiss> {
        let document = Html::parse_document(html);
        let source: String = document
            .select(&self.script)
            .next()
            .ok_or_else(|| ExtractionMiss::ScriptNotFound(self.script_selector.clone()))?
            .text()
            .collect();

        let literal = self.embedded_object(&source)?;
        let data: Value = serde_json::from_str(literal)
            .map_err(|e| ExtractionMiss::MalformedJson(e.to_string()))?;

        let product = data
            .get(PRODUCTS_KEY)
            .and_then(Value::as_array)
            .and_then(|products| products.first())
            .ok_or(ExtractionMiss::MissingProduct)?;

        let raw_price = product.get(PRICE_KEY).unwrap_or(&Value::Null);
        let price = price_from_json(raw_price)?;
        let availability = stock_count(product.get(STOCK_KEY)) > 0.0;

        ExtractionResult::new(price, availability)
            .ok_or_else(|| ExtractionMiss::UnparsablePrice(raw_price.to_string()))
    }
}
