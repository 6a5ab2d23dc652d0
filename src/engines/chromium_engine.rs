// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::fetch::{
    ContinueRequestParams, EnableParams as FetchEnableParams, EventRequestPaused,
    FailRequestParams, RequestPattern,
};
use chromiumoxide::cdp::browser_protocol::browser::BrowserContextId;
use chromiumoxide::cdp::browser_protocol::network::{ErrorReason, ResourceType};
use chromiumoxide::cdp::browser_protocol::target::{
    CreateBrowserContextParams, CreateTargetParams, DisposeBrowserContextParams,
};
use chromiumoxide::handler::HandlerConfig;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::config::settings::BrowserSettings;
use crate::engines::resource_filter::{RequestDecision, ResourceFilter, ResourceKind};
use crate::engines::traits::{EngineError, PageRenderer, RenderedPage};

const VISIBLE_TEXT_JS: &str = "document.body ? document.body.innerText : ''";

/// Chromium 渲染引擎
///
/// 基于 chromiumoxide 实现，进程内只启动（或连接）一个浏览器实例，
/// 每个任务在其上创建独立的 CDP 浏览上下文
pub struct ChromiumRenderer {
    browser: Arc<Browser>,
    handler: JoinHandle<()>,
    network_idle: Duration,
}

impl ChromiumRenderer {
    /// 启动本地浏览器或连接远程浏览器
    ///
    /// # 参数
    ///
    /// * `settings` - 浏览器配置
    ///
    /// # 返回值
    ///
    /// * `Ok(ChromiumRenderer)` - 就绪的渲染引擎
    /// * `Err(EngineError)` - 启动或连接失败
    pub async fn launch(settings: &BrowserSettings) -> Result<Self, EngineError> {
        let request_timeout = settings.request_timeout();
        let (browser, mut handler) = if let Some(ref url) = settings.remote_debugging_url {
            info!("Connecting to remote Chrome instance at: {}", url);
            let config = HandlerConfig {
                request_timeout,
                ..Default::default()
            };
            Browser::connect_with_config(url.as_str(), config)
                .await
                .map_err(|e| {
                    EngineError::Launch(format!("Failed to connect to remote Chrome: {}", e))
                })?
        } else {
            let config = BrowserConfig::builder()
                .no_sandbox()
                .request_timeout(request_timeout)
                .arg("--disable-gpu")
                .arg("--disable-dev-shm-usage")
                .build()
                .map_err(EngineError::Launch)?;

            Browser::launch(config)
                .await
                .map_err(|e| EngineError::Launch(e.to_string()))?
        };

        // Drive the CDP connection for the lifetime of the browser
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("chromium handler event error: {}", e);
                }
            }
        });

        Ok(Self {
            browser: Arc::new(browser),
            handler,
            network_idle: Duration::from_millis(settings.network_idle_ms),
        })
    }

    /// 关闭浏览器
    ///
    /// 所有页面释放之后调用；仍有页面持有浏览器引用时只停止事件处理
    pub async fn shutdown(self) {
        match Arc::try_unwrap(self.browser) {
            Ok(mut browser) => {
                if let Err(e) = browser.close().await {
                    warn!("Failed to close browser: {}", e);
                }
                let _ = browser.wait().await;
            }
            Err(_) => warn!("Browser still referenced at shutdown"),
        }
        self.handler.abort();
    }

    async fn dispose_context(browser: &Browser, context_id: BrowserContextId) {
        if let Err(e) = browser
            .execute(DisposeBrowserContextParams::new(context_id))
            .await
        {
            warn!("Failed to dispose browser context: {}", e);
        }
    }

    async fn open_page(
        &self,
        context_id: &BrowserContextId,
        user_agent: &str,
        filter: ResourceFilter,
    ) -> Result<(Page, JoinHandle<()>), EngineError> {
        let params = CreateTargetParams::builder()
            .url("about:blank")
            .browser_context_id(context_id.clone())
            .build()
            .map_err(EngineError::Context)?;

        let page = self
            .browser
            .new_page(params)
            .await
            .map_err(|e| EngineError::Context(e.to_string()))?;

        page.set_user_agent(user_agent)
            .await
            .map_err(|e| EngineError::Context(e.to_string()))?;

        let interceptor = match install_interceptor(&page, filter).await {
            Ok(handle) => handle,
            Err(e) => {
                let _ = page.close().await;
                return Err(e);
            }
        };

        Ok((page, interceptor))
    }
}

/// 启用 Fetch 域拦截，按资源过滤器中止或放行每个请求
async fn install_interceptor(
    page: &Page,
    filter: ResourceFilter,
) -> Result<JoinHandle<()>, EngineError> {
    let mut paused = page
        .event_listener::<EventRequestPaused>()
        .await
        .map_err(|e| EngineError::Context(e.to_string()))?;

    page.execute(
        FetchEnableParams::builder()
            .pattern(RequestPattern::builder().url_pattern("*").build())
            .build(),
    )
    .await
    .map_err(|e| EngineError::Context(e.to_string()))?;

    let page = page.clone();
    Ok(tokio::spawn(async move {
        while let Some(event) = paused.next().await {
            let kind = resource_kind(&event.resource_type);
            let result = match filter.decide(kind) {
                RequestDecision::Abort => page
                    .execute(FailRequestParams::new(
                        event.request_id.clone(),
                        ErrorReason::BlockedByClient,
                    ))
                    .await
                    .map(|_| ()),
                RequestDecision::Continue => page
                    .execute(ContinueRequestParams::new(event.request_id.clone()))
                    .await
                    .map(|_| ()),
            };
            if let Err(e) = result {
                // The page may already be navigating away or closing
                trace!("request interception reply failed: {}", e);
            }
        }
    }))
}

fn resource_kind(resource_type: &ResourceType) -> ResourceKind {
    match resource_type {
        ResourceType::Document => ResourceKind::Document,
        ResourceType::Stylesheet => ResourceKind::Stylesheet,
        ResourceType::Image => ResourceKind::Image,
        ResourceType::Media => ResourceKind::Media,
        ResourceType::Font => ResourceKind::Font,
        ResourceType::Script => ResourceKind::Script,
        ResourceType::Xhr => ResourceKind::Xhr,
        ResourceType::Fetch => ResourceKind::Fetch,
        _ => ResourceKind::Other,
    }
}

#[async_trait]
impl PageRenderer for ChromiumRenderer {
    async fn new_context(
        &self,
        user_agent: &str,
        filter: ResourceFilter,
    ) -> Result<Box<dyn RenderedPage>, EngineError> {
        let context_id = self
            .browser
            .execute(CreateBrowserContextParams::default())
            .await
            .map_err(|e| EngineError::Context(e.to_string()))?
            .result
            .browser_context_id;

        match self.open_page(&context_id, user_agent, filter).await {
            Ok((page, interceptor)) => Ok(Box::new(ChromiumPage {
                browser: self.browser.clone(),
                context_id: Some(context_id),
                page,
                interceptor,
                network_idle: self.network_idle,
            })),
            Err(e) => {
                Self::dispose_context(&self.browser, context_id).await;
                Err(e)
            }
        }
    }

    fn name(&self) -> &'static str {
        "chromium"
    }
}

/// 隔离浏览上下文中的 Chromium 页面
///
/// 未经 `release` 就被丢弃时（例如任务 panic 展开），
/// `Drop` 会停止拦截任务并在后台销毁上下文
pub struct ChromiumPage {
    browser: Arc<Browser>,
    /// `release` 之后为 `None`
    context_id: Option<BrowserContextId>,
    page: Page,
    interceptor: JoinHandle<()>,
    network_idle: Duration,
}

impl ChromiumPage {
    /// 网络空闲启发式等待
    ///
    /// chromiumoxide 没有稳定的 networkidle 事件，这里轮询资源条目数量，
    /// 在 `readyState == complete` 且数量保持不变达到静默时间后返回
    async fn wait_for_network_idle(&self, timeout: Duration) {
        let js = format!(
            r#"(async () => {{
                const timeoutMs = {timeout_ms};
                const idleMs = {idle_ms};
                const interval = 250;
                const start = Date.now();
                let lastCount = performance.getEntriesByType('resource').length;
                let stableMs = 0;
                while (Date.now() - start < timeoutMs) {{
                    await new Promise(r => setTimeout(r, interval));
                    const curCount = performance.getEntriesByType('resource').length;
                    if (document.readyState === 'complete' && curCount === lastCount) {{
                        stableMs += interval;
                        if (stableMs >= idleMs) {{
                            return true;
                        }}
                    }} else {{
                        stableMs = 0;
                    }}
                    lastCount = curCount;
                }}
                return false;
            }})()"#,
            timeout_ms = timeout.as_millis(),
            idle_ms = self.network_idle.as_millis(),
        );

        match self.page.evaluate(js).await {
            Ok(val) => match val.into_value::<bool>() {
                Ok(true) => debug!("network idle reached"),
                _ => debug!("network idle heuristic did not settle"),
            },
            Err(e) => warn!("network idle heuristic failed: {}", e),
        }
    }
}

#[async_trait]
impl RenderedPage for ChromiumPage {
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), EngineError> {
        tokio::time::timeout(timeout, async {
            self.page
                .goto(url)
                .await
                .map_err(|e| EngineError::Navigation(e.to_string()))?;
            self.wait_for_network_idle(timeout).await;
            Ok(())
        })
        .await
        .map_err(|_| EngineError::Timeout(timeout.as_secs()))?
    }

    async fn current_url(&self) -> Result<Option<String>, EngineError> {
        self.page
            .url()
            .await
            .map_err(|e| EngineError::Dom(e.to_string()))
    }

    async fn visible_text(&self) -> Result<String, EngineError> {
        self.page
            .evaluate(VISIBLE_TEXT_JS)
            .await
            .map_err(|e| EngineError::Dom(e.to_string()))?
            .into_value::<String>()
            .map_err(|e| EngineError::Dom(e.to_string()))
    }

    async fn content(&self) -> Result<String, EngineError> {
        self.page
            .content()
            .await
            .map_err(|e| EngineError::Dom(e.to_string()))
    }

    async fn release(mut self: Box<Self>) -> Result<(), EngineError> {
        self.interceptor.abort();
        let closed = self
            .page
            .clone()
            .close()
            .await
            .map_err(|e| EngineError::Context(e.to_string()));
        // Disposing the context also tears down any page left open
        if let Some(context_id) = self.context_id.take() {
            ChromiumRenderer::dispose_context(&self.browser, context_id).await;
        }
        closed
    }
}

impl Drop for ChromiumPage {
    fn drop(&mut self) {
        self.interceptor.abort();
        let Some(context_id) = self.context_id.take() else {
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let browser = self.browser.clone();
                runtime.spawn(async move {
                    ChromiumRenderer::dispose_context(&browser, context_id).await;
                });
            }
            Err(_) => warn!("Browser context dropped outside a runtime, not disposed"),
        }
    }
}
