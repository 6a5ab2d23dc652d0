// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::Value;

use crate::utils::errors::ExtractionMiss;

/// 解析带有本地化格式的价格文本
///
/// 只保留数字与 `.`/`,` 分隔符，空格、撇号与货币符号全部丢弃。
/// 同时出现两种分隔符时最后出现的一个是小数点；只出现一次的逗号视为小数点；
/// 重复出现的同一分隔符视为千位分隔符。
///
/// ```
/// use pricetrack::domain::services::extraction::normalize::parse_price;
///
/// assert_eq!(parse_price("1'234,50 CHF"), Some(1234.50));
/// assert_eq!(parse_price("12.99"), Some(12.99));
/// ```
pub fn parse_price(text: &str) -> Option<f64> {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    let kept = kept.trim_matches(|c| c == '.' || c == ',');
    if !kept.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let last_dot = kept.rfind('.');
    let last_comma = kept.rfind(',');
    let normalized = match (last_dot, last_comma) {
        (Some(dot), Some(comma)) => {
            let (decimal, thousands) = if dot > comma { ('.', ',') } else { (',', '.') };
            kept.replace(thousands, "").replace(decimal, ".")
        }
        (None, Some(_)) => single_separator(kept, ','),
        (Some(_), None) => single_separator(kept, '.'),
        (None, None) => kept.to_string(),
    };

    normalized
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
}

fn single_separator(text: &str, sep: char) -> String {
    if text.matches(sep).count() > 1 {
        text.replace(sep, "")
    } else {
        text.replace(sep, ".")
    }
}

/// 解析 JSON 中的价格字段，兼容数字与字符串两种表示
pub fn price_from_json(value: &Value) -> Result<f64, ExtractionMiss> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or_else(|| ExtractionMiss::UnparsablePrice(n.to_string())),
        Value::String(s) => parse_price(s).ok_or_else(|| ExtractionMiss::UnparsablePrice(s.clone())),
        other => Err(ExtractionMiss::UnparsablePrice(other.to_string())),
    }
}

/// 判断库存文本是否表示有货
///
/// 忽略大小写、空白、下划线和连字符后匹配 "instock"，
/// 因此 "In Stock"、"in stock" 与 schema.org 的 "InStock" 都视为有货；
/// "out of stock" / "not in stock" 视为无货
pub fn is_in_stock(text: &str) -> bool {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect();

    // "not in stock" compacts to a string containing "instock"
    if compact.contains("notinstock") || compact.contains("outofstock") {
        return false;
    }
    compact.contains("instock")
}
