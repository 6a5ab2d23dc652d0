// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;

use crate::domain::models::price_record::ExtractionResult;
use crate::utils::errors::EngineError;

/// 单个抓取任务的结果
///
/// 任务从不向调用方抛出错误，所有失败都折叠为该枚举的某个变体
#[derive(Debug)]
pub enum ScrapeOutcome {
    /// 提取成功
    Success(ExtractionResult),
    /// 命中反爬拦截页
    Blocked,
    /// 所有提取策略均未命中
    NotFound,
    /// 导航、超时或 DOM 访问失败
    Error(EngineError),
}

impl ScrapeOutcome {
    /// 用于日志与指标的标签
    pub fn label(&self) -> &'static str {
        match self {
            ScrapeOutcome::Success(_) => "success",
            ScrapeOutcome::Blocked => "blocked",
            ScrapeOutcome::NotFound => "not_found",
            ScrapeOutcome::Error(_) => "error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ScrapeOutcome::Success(_))
    }
}

impl fmt::Display for ScrapeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeOutcome::Success(r) => {
                write!(f, "success (price={}, available={})", r.price, r.availability)
            }
            ScrapeOutcome::Error(e) => write!(f, "error ({})", e),
            other => f.write_str(other.label()),
        }
    }
}

/// 一次完整运行的汇总
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// 已执行批次数
    pub batches: usize,
    pub succeeded: usize,
    pub blocked: usize,
    pub not_found: usize,
    pub errored: usize,
    /// 供应商无法解析而跳过的任务
    pub skipped: usize,
    /// 成功写入的价格记录
    pub persisted: usize,
    /// 写入失败的价格记录
    pub persist_failed: usize,
}

impl RunReport {
    /// 记录单个任务结果
    pub fn record(&mut self, outcome: &ScrapeOutcome) {
        match outcome {
            ScrapeOutcome::Success(_) => self.succeeded += 1,
            ScrapeOutcome::Blocked => self.blocked += 1,
            ScrapeOutcome::NotFound => self.not_found += 1,
            ScrapeOutcome::Error(_) => self.errored += 1,
        }
    }

    /// 已处理（含跳过）的任务总数
    pub fn total(&self) -> usize {
        self.succeeded + self.blocked + self.not_found + self.errored + self.skipped
    }
}
