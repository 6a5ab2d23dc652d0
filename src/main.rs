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

use anyhow::Context;
use pricetrack::config::settings::Settings;
use pricetrack::domain::services::block_detector::BlockDetector;
use pricetrack::domain::services::extraction::ExtractionChain;
use pricetrack::engines::chromium_engine::ChromiumRenderer;
use pricetrack::engines::traits::PageRenderer;
use pricetrack::infrastructure::database::connection;
use pricetrack::infrastructure::metrics;
use pricetrack::infrastructure::repositories::RecordStoreImpl;
use pricetrack::queue::delay_policy::RandomDelay;
use pricetrack::queue::scheduler::BatchScheduler;
use pricetrack::utils::telemetry;
use pricetrack::workers::ScrapeWorker;
use std::sync::Arc;
use tracing::{debug, info};
use validator::Validate;

/// 主函数
///
/// 一次性批处理：加载配置，连接记录存储，启动浏览器，跑完所有批次后退出
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting pricetrack...");

    // Initialize Prometheus Metrics
    let metrics_handle = metrics::init_metrics();

    // 2. Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate().context("invalid configuration")?;
    info!("Configuration loaded");

    // 3. Connect to database and apply migrations
    let db = connection::connect_and_migrate(&settings.database)
        .await
        .context("failed to connect to the record store")?;
    let store = Arc::new(RecordStoreImpl::new(Arc::new(db)));
    info!("Database connection established");

    // 4. Start the browser
    let renderer = Arc::new(ChromiumRenderer::launch(&settings.browser).await?);
    info!("Page renderer {} ready", renderer.name());

    // 5. Assemble the pipeline
    let chain = ExtractionChain::from_settings(&settings.extraction, &settings.vendors)?;
    let worker = Arc::new(ScrapeWorker::new(
        renderer.clone(),
        chain,
        BlockDetector::new(settings.extraction.block_phrase.clone()),
        settings.browser.navigation_timeout(),
    ));
    let (min_delay, max_delay) = settings.scheduler.delay_range();
    let scheduler = BatchScheduler::new(
        store,
        worker,
        Box::new(RandomDelay::new(min_delay, max_delay)),
        settings.scheduler.batch_size,
    );

    // 6. Run all batches
    let outcome = scheduler.run().await;

    // The scheduler held the last other reference to the renderer
    drop(scheduler);
    match Arc::try_unwrap(renderer) {
        Ok(renderer) => renderer.shutdown().await,
        Err(_) => debug!("Renderer still shared at shutdown"),
    }

    let report = outcome?;
    info!(
        batches = report.batches,
        succeeded = report.succeeded,
        blocked = report.blocked,
        not_found = report.not_found,
        errored = report.errored,
        skipped = report.skipped,
        persisted = report.persisted,
        persist_failed = report.persist_failed,
        "Run complete"
    );

    if let Some(handle) = metrics_handle {
        debug!("Metrics snapshot:\n{}", handle.render());
    }

    Ok(())
}
