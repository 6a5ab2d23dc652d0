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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;
use validator::{Validate, ValidationError};

/// 应用程序配置设置
///
/// 包含记录存储、浏览器、批次调度、提取策略和供应商回退等所有配置项
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_delay_range"))]
pub struct Settings {
    /// 数据库配置
    #[validate(nested)]
    pub database: DatabaseSettings,
    /// 浏览器配置
    pub browser: BrowserSettings,
    /// 批次调度配置
    #[validate(nested)]
    pub scheduler: SchedulerSettings,
    /// 提取策略配置
    #[validate(nested)]
    pub extraction: ExtractionSettings,
    /// 供应商专用回退配置
    pub vendors: VendorSettings,
}

/// 数据库配置设置
#[derive(Debug, Deserialize, Validate)]
pub struct DatabaseSettings {
    /// 数据库连接URL（记录存储凭据）
    #[validate(length(min = 1, message = "database url cannot be empty"))]
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 浏览器配置设置
#[derive(Debug, Deserialize)]
pub struct BrowserSettings {
    /// 远程 Chrome 调试地址，为空时本地启动
    pub remote_debugging_url: Option<String>,
    /// CDP 请求超时（秒）
    pub request_timeout_secs: u64,
    /// 页面导航超时（秒）
    pub navigation_timeout_secs: u64,
    /// 网络空闲判定所需的静默时间（毫秒）
    pub network_idle_ms: u64,
}

/// 批次调度配置设置
#[derive(Debug, Deserialize, Validate)]
pub struct SchedulerSettings {
    /// 每批并发任务数
    #[validate(range(min = 1, max = 100))]
    pub batch_size: usize,
    /// 批次间最小停顿（毫秒）
    pub min_delay_ms: u64,
    /// 批次间最大停顿（毫秒）
    pub max_delay_ms: u64,
}

/// 提取策略配置设置
#[derive(Debug, Deserialize, Validate)]
pub struct ExtractionSettings {
    /// 结构化数据策略的尝试次数
    #[validate(range(min = 1, max = 10))]
    pub structured_data_attempts: u32,
    /// 结构化数据重试间隔（毫秒）
    pub structured_data_retry_ms: u64,
    /// 拦截页特征短语
    #[validate(length(min = 1))]
    pub block_phrase: String,
}

/// 供应商专用回退配置
#[derive(Debug, Deserialize)]
pub struct VendorSettings {
    /// 使用页面元数据回退的供应商域名
    pub meta_fallback_domains: Vec<String>,
    /// 使用内联脚本回退的供应商域名
    pub script_fallback_domains: Vec<String>,
    /// 内联脚本选择器
    pub script_selector: String,
    /// 内联脚本中的变量名
    pub script_variable: String,
}

fn validate_delay_range(settings: &Settings) -> Result<(), ValidationError> {
    if settings.scheduler.min_delay_ms > settings.scheduler.max_delay_ms {
        return Err(ValidationError::new("min_delay_ms must not exceed max_delay_ms"));
    }
    Ok(())
}

impl BrowserSettings {
    /// 页面导航超时
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    /// CDP 请求超时
    ///
    /// chromiumoxide 用它淘汰挂起的导航，因此不低于导航超时
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(self.navigation_timeout_secs))
    }
}

impl SchedulerSettings {
    /// 批次间停顿范围
    pub fn delay_range(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.min_delay_ms),
            Duration::from_millis(self.max_delay_ms),
        )
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载内置默认值、`config/default`、`config/{APP_ENVIRONMENT}` 与
    /// `PRICETRACK__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败（例如缺少数据库凭据）
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("PRICETRACK").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 带默认值的配置构建器
    pub fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            // Default DB pool settings
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            // Default browser settings
            .set_default(
                "browser.remote_debugging_url",
                std::env::var("CHROMIUM_REMOTE_DEBUGGING_URL").ok(),
            )?
            .set_default("browser.request_timeout_secs", 30)?
            .set_default("browser.navigation_timeout_secs", 45)?
            .set_default("browser.network_idle_ms", 1000)?
            // Default scheduler settings
            .set_default("scheduler.batch_size", 5)?
            .set_default("scheduler.min_delay_ms", 1000)?
            .set_default("scheduler.max_delay_ms", 4000)?
            // Default extraction settings
            .set_default("extraction.structured_data_attempts", 3)?
            .set_default("extraction.structured_data_retry_ms", 1000)?
            .set_default("extraction.block_phrase", "Access Denied")?
            // Default vendor fallback settings
            .set_default("vendors.meta_fallback_domains", vec!["brack.ch"])?
            .set_default("vendors.script_fallback_domains", vec!["interdiscount.ch"])?
            .set_default("vendors.script_selector", "script#utag_data")?
            .set_default("vendors.script_variable", "legacy_utag_data")
    }
}
