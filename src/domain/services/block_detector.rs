// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 反爬拦截检测器
///
/// 页面可见文本中出现特征短语（忽略大小写）即判定为拦截页
#[derive(Debug, Clone)]
pub struct BlockDetector {
    phrase: String,
}

impl BlockDetector {
    pub fn new(phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into().to_lowercase(),
        }
    }

    /// 判断页面是否被拦截
    pub fn is_blocked(&self, visible_text: &str) -> bool {
        !self.phrase.is_empty() && visible_text.to_lowercase().contains(&self.phrase)
    }
}
