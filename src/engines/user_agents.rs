// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

const DESKTOP_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36 Edg/119.0.0.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
];

/// 用户代理池
///
/// 每个浏览上下文随机挑选一个身份字符串，降低任务间的指纹关联
#[derive(Debug, Clone)]
pub struct UserAgentPool {
    agents: Vec<String>,
}

impl UserAgentPool {
    pub fn new() -> Self {
        Self::with_agents(DESKTOP_USER_AGENTS.iter().map(|s| s.to_string()).collect())
    }

    /// 使用自定义列表，空列表回退到内置列表
    pub fn with_agents(agents: Vec<String>) -> Self {
        if agents.is_empty() {
            return Self::new();
        }
        Self { agents }
    }

    /// 随机挑选一个身份字符串
    pub fn pick(&self) -> &str {
        &self.agents[rand::random_range(0..self.agents.len())]
    }
}

impl Default for UserAgentPool {
    fn default() -> Self {
        Self::new()
    }
}
