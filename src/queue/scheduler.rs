// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::counter;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::domain::models::price_record::{ExtractionResult, PriceRecord};
use crate::domain::models::scrape_outcome::{RunReport, ScrapeOutcome};
use crate::domain::models::vendor::VendorRegistry;
use crate::domain::models::vendor_url_task::VendorUrlTask;
use crate::domain::repositories::record_store::RecordStore;
use crate::infrastructure::metrics::{RECORDS_FAILED, RECORDS_PERSISTED, TASKS_SKIPPED};
use crate::queue::delay_policy::DelayPolicy;
use crate::utils::errors::SchedulerError;
use crate::workers::scrape_worker::ScrapeWorker;

/// 批次调度器
///
/// 将任务列表切分为固定大小的批次：批次内并发执行并全部结算后才进入下一批，
/// 批次之间按停顿策略等待一次
pub struct BatchScheduler {
    /// 记录存储
    store: Arc<dyn RecordStore>,
    /// 抓取工作者
    worker: Arc<ScrapeWorker>,
    /// 批次间停顿策略
    delay: Box<dyn DelayPolicy>,
    /// 每批任务数
    batch_size: usize,
}

impl BatchScheduler {
    /// 创建新的批次调度器实例
    ///
    /// # 参数
    ///
    /// * `store` - 记录存储
    /// * `worker` - 抓取工作者
    /// * `delay` - 批次间停顿策略
    /// * `batch_size` - 每批任务数，0 按 1 处理
    pub fn new(
        store: Arc<dyn RecordStore>,
        worker: Arc<ScrapeWorker>,
        delay: Box<dyn DelayPolicy>,
        batch_size: usize,
    ) -> Self {
        Self {
            store,
            worker,
            delay,
            batch_size: batch_size.max(1),
        }
    }

    /// 执行一次完整运行
    ///
    /// # 返回值
    ///
    /// * `Ok(RunReport)` - 运行汇总，任务列表为空时为空汇总
    /// * `Err(SchedulerError)` - 无法读取供应商注册表或任务列表
    pub async fn run(&self) -> Result<RunReport, SchedulerError> {
        info!("Starting price scrape run");

        let registry = VendorRegistry::new(self.store.list_vendors().await?);
        let tasks = self.store.list_vendor_urls().await?;
        info!(
            "Loaded {} vendors and {} vendor urls",
            registry.len(),
            tasks.len()
        );

        if tasks.is_empty() {
            warn!("No vendor urls to scrape");
            return Ok(RunReport::default());
        }

        Ok(self.run_tasks(&registry, tasks).await)
    }

    /// 按批次处理给定任务
    pub async fn run_tasks(&self, registry: &VendorRegistry, tasks: Vec<VendorUrlTask>) -> RunReport {
        let mut report = RunReport::default();
        let total_batches = tasks.len().div_ceil(self.batch_size);

        for (index, batch) in tasks.chunks(self.batch_size).enumerate() {
            if index > 0 {
                let pause = self.delay.next_delay();
                info!("Pausing {}ms before next batch", pause.as_millis());
                sleep(pause).await;
            }

            info!(
                "Starting batch {}/{} with {} tasks",
                index + 1,
                total_batches,
                batch.len()
            );
            self.run_batch(registry, batch, &mut report).await;
            report.batches += 1;
            info!("Batch {}/{} settled", index + 1, total_batches);
        }

        report
    }

    async fn run_batch(
        &self,
        registry: &VendorRegistry,
        batch: &[VendorUrlTask],
        report: &mut RunReport,
    ) {
        let mut running = JoinSet::new();

        for task in batch {
            let Some(vendor) = registry.get(task.vendor_id).cloned() else {
                warn!(
                    "Skipping {}: vendor {} is not registered",
                    task.url, task.vendor_id
                );
                report.skipped += 1;
                counter!(TASKS_SKIPPED).increment(1);
                continue;
            };

            let worker = self.worker.clone();
            let task = task.clone();
            running.spawn(async move {
                let outcome = worker.scrape(&task, &vendor).await;
                (task, outcome)
            });
        }

        // Every spawned task is joined before the batch ends
        while let Some(joined) = running.join_next().await {
            match joined {
                Ok((task, outcome)) => {
                    report.record(&outcome);
                    if let ScrapeOutcome::Success(result) = outcome {
                        self.persist(&task, result, report).await;
                    }
                }
                Err(e) => {
                    error!("Scrape task aborted: {}", e);
                    report.errored += 1;
                }
            }
        }
    }

    async fn persist(&self, task: &VendorUrlTask, result: ExtractionResult, report: &mut RunReport) {
        let record = PriceRecord::from_success(task, result);
        match self.store.append_price(record).await {
            Ok(()) => {
                report.persisted += 1;
                counter!(RECORDS_PERSISTED).increment(1);
            }
            Err(e) => {
                error!(
                    "Failed to persist price for product {} at vendor {}: {}",
                    task.product_id, task.vendor_id, e
                );
                report.persist_failed += 1;
                counter!(RECORDS_FAILED).increment(1);
            }
        }
    }
}
