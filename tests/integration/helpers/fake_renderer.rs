// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

use pricetrack::engines::resource_filter::ResourceFilter;
use pricetrack::engines::traits::{EngineError, PageRenderer, RenderedPage};

/// 替身站点上的一个页面
#[derive(Debug, Clone, Default)]
pub struct FakeSite {
    pub html: String,
    pub visible_text: String,
    pub latency: Duration,
    pub fail_navigation: bool,
    pub fail_dom: bool,
    pub panic_on_navigate: bool,
}

impl FakeSite {
    pub fn html(html: impl Into<String>) -> Self {
        let html = html.into();
        Self {
            visible_text: html.clone(),
            html,
            ..Default::default()
        }
    }

    pub fn blocked() -> Self {
        Self {
            html: "<html><body><h1>Access Denied</h1></body></html>".to_string(),
            visible_text: "Access Denied\nReference #18.6c2f".to_string(),
            ..Default::default()
        }
    }

    pub fn navigation_failure() -> Self {
        Self {
            fail_navigation: true,
            ..Default::default()
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

/// 页面生命周期事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    Navigated(String),
    Released(String),
}

#[derive(Default)]
struct Shared {
    sites: HashMap<String, FakeSite>,
    events: Mutex<Vec<(Instant, PageEvent)>>,
    user_agents: Mutex<Vec<String>>,
    opened: AtomicUsize,
    released: AtomicUsize,
}

/// 手写的页面渲染替身
///
/// 按URL返回预设页面，并记录上下文的打开、导航与释放。
/// 导航按站点延迟完整睡眠，不自行执行超时
#[derive(Clone, Default)]
pub struct FakeRenderer {
    shared: Arc<Shared>,
    fail_context: bool,
}

impl FakeRenderer {
    pub fn new(sites: impl IntoIterator<Item = (String, FakeSite)>) -> Self {
        Self {
            shared: Arc::new(Shared {
                sites: sites.into_iter().collect(),
                ..Default::default()
            }),
            fail_context: false,
        }
    }

    pub fn failing_contexts() -> Self {
        Self {
            fail_context: true,
            ..Default::default()
        }
    }

    pub fn opened(&self) -> usize {
        self.shared.opened.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.shared.released.load(Ordering::SeqCst)
    }

    pub fn events(&self) -> Vec<(Instant, PageEvent)> {
        self.shared.events.lock().unwrap().clone()
    }

    pub fn user_agents(&self) -> Vec<String> {
        self.shared.user_agents.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageRenderer for FakeRenderer {
    async fn new_context(
        &self,
        user_agent: &str,
        _filter: ResourceFilter,
    ) -> Result<Box<dyn RenderedPage>, EngineError> {
        if self.fail_context {
            return Err(EngineError::Context("browser is gone".to_string()));
        }
        self.shared.opened.fetch_add(1, Ordering::SeqCst);
        self.shared
            .user_agents
            .lock()
            .unwrap()
            .push(user_agent.to_string());

        Ok(Box::new(FakePage {
            shared: self.shared.clone(),
            target: Mutex::new(String::new()),
            current: Mutex::new(None),
        }))
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

struct FakePage {
    shared: Arc<Shared>,
    target: Mutex<String>,
    current: Mutex<Option<(String, FakeSite)>>,
}

impl FakePage {
    fn site(&self) -> Result<FakeSite, EngineError> {
        self.current
            .lock()
            .unwrap()
            .as_ref()
            .map(|(_, site)| site.clone())
            .ok_or_else(|| EngineError::Dom("page not navigated".to_string()))
    }

    fn dom_site(&self) -> Result<FakeSite, EngineError> {
        let site = self.site()?;
        if site.fail_dom {
            return Err(EngineError::Dom("execution context destroyed".to_string()));
        }
        Ok(site)
    }
}

#[async_trait]
impl RenderedPage for FakePage {
    async fn navigate(&self, url: &str, _timeout: Duration) -> Result<(), EngineError> {
        *self.target.lock().unwrap() = url.to_string();
        self.shared
            .events
            .lock()
            .unwrap()
            .push((Instant::now(), PageEvent::Navigated(url.to_string())));

        let site = self
            .shared
            .sites
            .get(url)
            .cloned()
            .ok_or_else(|| EngineError::Navigation(format!("net::ERR_NAME_NOT_RESOLVED at {}", url)))?;

        if site.panic_on_navigate {
            panic!("renderer crashed on {}", url);
        }
        tokio::time::sleep(site.latency).await;
        if site.fail_navigation {
            return Err(EngineError::Navigation("net::ERR_CONNECTION_RESET".to_string()));
        }

        *self.current.lock().unwrap() = Some((url.to_string(), site));
        Ok(())
    }

    async fn current_url(&self) -> Result<Option<String>, EngineError> {
        Ok(self.current.lock().unwrap().as_ref().map(|(url, _)| url.clone()))
    }

    async fn visible_text(&self) -> Result<String, EngineError> {
        Ok(self.dom_site()?.visible_text)
    }

    async fn content(&self) -> Result<String, EngineError> {
        Ok(self.dom_site()?.html)
    }

    async fn release(self: Box<Self>) -> Result<(), EngineError> {
        let url = self.target.lock().unwrap().clone();
        self.shared
            .events
            .lock()
            .unwrap()
            .push((Instant::now(), PageEvent::Released(url)));
        self.shared.released.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
