// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::Url;

use crate::domain::models::price_record::ExtractionResult;
use crate::utils::errors::ExtractionMiss;

pub mod chain;
pub mod domain_matcher;
pub mod normalize;
pub mod selector_fallback;
pub mod structured_data;
pub mod vendor_meta;
pub mod vendor_script;

pub use chain::{Extraction, ExtractionChain};
pub use domain_matcher::DomainMatcher;

/// 提取策略特质
///
/// 每个策略只面对一份 HTML 快照，未命中时返回明确的 `ExtractionMiss`
pub trait ExtractionStrategy: Send + Sync {
    /// 策略名称
    fn name(&self) -> &'static str;

    /// 策略是否适用于该页面URL，供应商专用回退据此声明域名谓词
    fn applies_to(&self, _url: &Url) -> bool {
        true
    }

    /// 从 HTML 快照提取价格与库存
    fn extract(&self, html: &str) -> Result<ExtractionResult, ExtractionMiss>;
}
