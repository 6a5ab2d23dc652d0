// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 子资源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Document,
    Stylesheet,
    Image,
    Media,
    Font,
    Script,
    Xhr,
    Fetch,
    Other,
}

/// 请求拦截决策
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestDecision {
    /// 中止加载
    Abort,
    /// 继续加载
    Continue,
}

/// 资源过滤器
///
/// 中止与提取无关的渲染资源（图片、样式表、字体、媒体），其余一律放行
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceFilter;

impl ResourceFilter {
    pub fn new() -> Self {
        Self
    }

    /// 根据资源类型决定是否加载
    pub fn decide(&self, kind: ResourceKind) -> RequestDecision {
        match kind {
            ResourceKind::Image
            | ResourceKind::Stylesheet
            | ResourceKind::Font
            | ResourceKind::Media => RequestDecision::Abort,
            _ => RequestDecision::Continue,
        }
    }
}
