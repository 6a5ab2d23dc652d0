// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 仓库层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("未找到数据")]
    NotFound,

    #[error("无效参数: {0}")]
    InvalidParameter(String),

    #[error("内部错误: {0}")]
    InternalError(String),
}

impl From<sea_orm::DbErr> for RepositoryError {
    fn from(err: sea_orm::DbErr) -> Self {
        RepositoryError::DatabaseError(err.to_string())
    }
}

/// 页面渲染引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 浏览器启动或连接失败
    #[error("Browser launch failed: {0}")]
    Launch(String),
    /// 浏览上下文创建或释放失败
    #[error("Browser context error: {0}")]
    Context(String),
    /// 导航失败
    #[error("Navigation failed: {0}")]
    Navigation(String),
    /// 超时
    #[error("Timeout after {0}s")]
    Timeout(u64),
    /// DOM 访问失败
    #[error("DOM access failed: {0}")]
    Dom(String),
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

/// 调度器错误类型
///
/// 只有无法获取任务列表才会中止整个运行
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("记录存储读取失败: {0}")]
    Store(#[from] RepositoryError),
}

/// 提取策略未命中的原因
///
/// 策略内部的任何畸形数据都归为未命中，交由下一个策略处理
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionMiss {
    #[error("no structured data block")]
    NoStructuredData,

    #[error("no product entry in structured data")]
    NoProductEntry,

    #[error("product entry has no offers")]
    MissingOffers,

    #[error("malformed json: {0}")]
    MalformedJson(String),

    #[error("unparsable price: {0:?}")]
    UnparsablePrice(String),

    #[error("no element matched price selectors")]
    NoSelectorMatch,

    #[error("missing page metadata field: {0}")]
    MissingMetadata(&'static str),

    #[error("inline script not found: {0}")]
    ScriptNotFound(String),

    #[error("variable not assigned in script: {0}")]
    VariableNotFound(String),

    #[error("embedded object has no product entry")]
    MissingProduct,
}
