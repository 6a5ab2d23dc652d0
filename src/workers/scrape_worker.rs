// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use futures::FutureExt;
use metrics::{counter, histogram};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, instrument, warn};

use crate::domain::models::scrape_outcome::ScrapeOutcome;
use crate::domain::models::vendor::Vendor;
use crate::domain::models::vendor_url_task::VendorUrlTask;
use crate::domain::services::block_detector::BlockDetector;
use crate::domain::services::extraction::ExtractionChain;
use crate::engines::resource_filter::ResourceFilter;
use crate::engines::traits::{EngineError, PageRenderer, RenderedPage};
use crate::engines::user_agents::UserAgentPool;
use crate::infrastructure::metrics::{SCRAPE_DURATION, SCRAPE_OUTCOMES};

/// 抓取工作者
///
/// 负责单个供应商URL的完整生命周期：
/// 获取隔离上下文 → 导航 → 拦截检测 → 策略链提取 → 释放上下文。
/// 工作者在同一批次的所有任务间只读共享。
pub struct ScrapeWorker {
    renderer: Arc<dyn PageRenderer>,
    chain: ExtractionChain,
    detector: BlockDetector,
    user_agents: UserAgentPool,
    filter: ResourceFilter,
    navigation_timeout: Duration,
}

impl ScrapeWorker {
    /// 创建新的抓取工作者实例
    pub fn new(
        renderer: Arc<dyn PageRenderer>,
        chain: ExtractionChain,
        detector: BlockDetector,
        navigation_timeout: Duration,
    ) -> Self {
        Self {
            renderer,
            chain,
            detector,
            user_agents: UserAgentPool::new(),
            filter: ResourceFilter::new(),
            navigation_timeout,
        }
    }

    /// 替换身份字符串池
    pub fn with_user_agents(mut self, user_agents: UserAgentPool) -> Self {
        self.user_agents = user_agents;
        self
    }

    /// 抓取单个供应商URL
    ///
    /// 任何失败都折叠进返回的 `ScrapeOutcome`，从不向调用方传播；
    /// 一旦获取了浏览上下文，所有退出路径都会释放它。
    /// 任务内部的 panic 在释放上下文之后继续向上传播
    #[instrument(skip(self, task, vendor), fields(url = %task.url, vendor = %vendor.name, product_id = task.product_id))]
    pub async fn scrape(&self, task: &VendorUrlTask, vendor: &Vendor) -> ScrapeOutcome {
        info!("Scraping vendor page");
        let started = Instant::now();

        let outcome = match self
            .renderer
            .new_context(self.user_agents.pick(), self.filter)
            .await
        {
            Ok(page) => {
                let driven = AssertUnwindSafe(self.drive(page.as_ref(), task))
                    .catch_unwind()
                    .await;
                if let Err(e) = page.release().await {
                    warn!("Failed to release browsing context: {}", e);
                }
                match driven {
                    Ok(outcome) => outcome,
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
            Err(e) => ScrapeOutcome::Error(e),
        };

        match &outcome {
            ScrapeOutcome::Success(result) => info!(
                "Scrape succeeded: price={}, available={}",
                result.price, result.availability
            ),
            ScrapeOutcome::Blocked => warn!("Page blocked by bot protection"),
            ScrapeOutcome::NotFound => warn!("No extraction strategy found a price"),
            ScrapeOutcome::Error(e) => error!("Scrape failed: {}", e),
        }

        counter!(SCRAPE_OUTCOMES, "outcome" => outcome.label()).increment(1);
        histogram!(SCRAPE_DURATION).record(started.elapsed().as_secs_f64());

        outcome
    }

    async fn drive(&self, page: &dyn RenderedPage, task: &VendorUrlTask) -> ScrapeOutcome {
        let navigation = tokio::time::timeout(
            self.navigation_timeout,
            page.navigate(&task.url, self.navigation_timeout),
        )
        .await
        .unwrap_or_else(|_| Err(EngineError::Timeout(self.navigation_timeout.as_secs())));
        if let Err(e) = navigation {
            return ScrapeOutcome::Error(e);
        }

        let text = match page.visible_text().await {
            Ok(text) => text,
            Err(e) => return ScrapeOutcome::Error(e),
        };
        if self.detector.is_blocked(&text) {
            return ScrapeOutcome::Blocked;
        }

        match self.chain.extract(page, &task.url).await {
            Ok(Some(extraction)) => ScrapeOutcome::Success(extraction.result),
            Ok(None) => ScrapeOutcome::NotFound,
            Err(e) => ScrapeOutcome::Error(e),
        }
    }
}
