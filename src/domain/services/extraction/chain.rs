// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::settings::{ExtractionSettings, VendorSettings};
use crate::domain::models::price_record::ExtractionResult;
use crate::domain::services::extraction::selector_fallback::SelectorStrategy;
use crate::domain::services::extraction::structured_data::StructuredDataStrategy;
use crate::domain::services::extraction::vendor_meta::VendorMetaStrategy;
use crate::domain::services::extraction::vendor_script::VendorScriptStrategy;
use crate::domain::services::extraction::{DomainMatcher, ExtractionStrategy};
use crate::engines::traits::{EngineError, RenderedPage};

/// 一次成功的提取及其来源策略
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extraction {
    pub result: ExtractionResult,
    pub strategy: &'static str,
}

/// 提取策略链
///
/// 固定优先级：
/// 1. 结构化数据策略（带重试，页面可能异步注入数据）
/// 2. 通用选择器回退
/// 3. 供应商专用回退，按声明顺序取第一个域名匹配的策略，互斥执行
pub struct ExtractionChain {
    structured: Box<dyn ExtractionStrategy>,
    generic: Box<dyn ExtractionStrategy>,
    vendor_fallbacks: Vec<Box<dyn ExtractionStrategy>>,
    attempts: u32,
    retry_delay: Duration,
}

impl ExtractionChain {
    /// 创建策略链
    ///
    /// # 参数
    ///
    /// * `structured` - 最高优先级的策略，会被重试
    /// * `generic` - 通用回退策略
    /// * `vendor_fallbacks` - 供应商专用回退策略，按顺序匹配域名
    /// * `attempts` - 最高优先级策略的尝试次数（至少一次）
    /// * `retry_delay` - 两次尝试之间的停顿
    pub fn new(
        structured: Box<dyn ExtractionStrategy>,
        generic: Box<dyn ExtractionStrategy>,
        vendor_fallbacks: Vec<Box<dyn ExtractionStrategy>>,
        attempts: u32,
        retry_delay: Duration,
    ) -> Self {
        Self {
            structured,
            generic,
            vendor_fallbacks,
            attempts: attempts.max(1),
            retry_delay,
        }
    }

    /// 根据配置组装默认策略链
    pub fn from_settings(
        extraction: &ExtractionSettings,
        vendors: &VendorSettings,
    ) -> anyhow::Result<Self> {
        let meta = VendorMetaStrategy::new(DomainMatcher::new(&vendors.meta_fallback_domains));
        let script = VendorScriptStrategy::new(
            DomainMatcher::new(&vendors.script_fallback_domains),
            &vendors.script_selector,
            &vendors.script_variable,
        )?;

        let vendor_fallbacks: Vec<Box<dyn ExtractionStrategy>> =
            vec![Box::new(meta), Box::new(script)];

        Ok(Self::new(
            Box::new(StructuredDataStrategy::new()),
            Box::new(SelectorStrategy::new()),
            vendor_fallbacks,
            extraction.structured_data_attempts,
            Duration::from_millis(extraction.structured_data_retry_ms),
        ))
    }

    /// 在已渲染的页面上运行策略链
    ///
    /// # 参数
    ///
    /// * `page` - 已导航完成的页面
    /// * `task_url` - 任务URL，页面URL不可用时用于域名匹配
    ///
    /// # 返回值
    ///
    /// * `Ok(Some(Extraction))` - 某个策略命中
    /// * `Ok(None)` - 所有策略均未命中
    /// * `Err(EngineError)` - 读取页面失败
    pub async fn extract(
        &self,
        page: &dyn RenderedPage,
        task_url: &str,
    ) -> Result<Option<Extraction>, EngineError> {
        for attempt in 1..=self.attempts {
            let html = page.content().await?;
            match self.structured.extract(&html) {
                Ok(result) => return Ok(Some(self.hit(self.structured.as_ref(), result))),
                Err(miss) => debug!(
                    "{} attempt {}/{} found nothing: {}",
                    self.structured.name(),
                    attempt,
                    self.attempts,
                    miss
                ),
            }
            if attempt < self.attempts {
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        let html = page.content().await?;
        match self.generic.extract(&html) {
            Ok(result) => return Ok(Some(self.hit(self.generic.as_ref(), result))),
            Err(miss) => debug!("{} found nothing: {}", self.generic.name(), miss),
        }

        let page_url = page
            .current_url()
            .await?
            .unwrap_or_else(|| task_url.to_string());
        let Some(url) = Url::parse(&page_url)
            .ok()
            .or_else(|| Url::parse(task_url).ok())
        else {
            debug!("unparsable page url {}, no vendor fallback applies", page_url);
            return Ok(None);
        };

        let Some(fallback) = self.vendor_fallbacks.iter().find(|s| s.applies_to(&url)) else {
            return Ok(None);
        };
        match fallback.extract(&html) {
            Ok(result) => Ok(Some(self.hit(fallback.as_ref(), result))),
            Err(miss) => {
                debug!("{} found nothing: {}", fallback.name(), miss);
                Ok(None)
            }
        }
    }

    fn hit(&self, strategy: &dyn ExtractionStrategy, result: ExtractionResult) -> Extraction {
        debug!(
            "{} extracted price={} available={}",
            strategy.name(),
            result.price,
            result.availability
        );
        Extraction {
            result,
            strategy: strategy.name(),
        }
    }
}
