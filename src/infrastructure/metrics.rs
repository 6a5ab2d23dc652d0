// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::warn;

pub const SCRAPE_OUTCOMES: &str = "pricetrack_scrape_outcomes_total";
pub const SCRAPE_DURATION: &str = "pricetrack_scrape_duration_seconds";
pub const RECORDS_PERSISTED: &str = "pricetrack_price_records_persisted_total";
pub const RECORDS_FAILED: &str = "pricetrack_price_records_failed_total";
pub const TASKS_SKIPPED: &str = "pricetrack_tasks_skipped_total";

/// 初始化指标系统
///
/// 进程是一次性任务，不启动 HTTP 监听；返回的句柄用于在运行结束时渲染快照。
/// 全局记录器已被安装时返回 None，指标宏继续写入已有记录器
pub fn init_metrics() -> Option<PrometheusHandle> {
    let handle = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => handle,
        Err(e) => {
            warn!("Failed to install Prometheus recorder: {}", e);
            return None;
        }
    };

    describe_counter!(SCRAPE_OUTCOMES, "Scrape tasks finished, labelled by outcome");
    describe_histogram!(SCRAPE_DURATION, "Duration of a single scrape task in seconds");
    describe_counter!(RECORDS_PERSISTED, "Price records appended to the record store");
    describe_counter!(
        RECORDS_FAILED,
        "Price records dropped because the record store rejected them"
    );
    describe_counter!(
        TASKS_SKIPPED,
        "Tasks skipped because their vendor is not registered"
    );

    Some(handle)
}
