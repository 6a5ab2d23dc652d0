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

use async_trait::async_trait;
use std::time::Duration;

use crate::engines::resource_filter::ResourceFilter;
pub use crate::utils::errors::EngineError;

/// 页面渲染引擎特质
///
/// 引擎实例在所有任务间只读共享，每个任务通过它打开自己的隔离浏览上下文
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// 创建隔离的浏览上下文
    ///
    /// # 参数
    ///
    /// * `user_agent` - 该上下文使用的身份字符串
    /// * `filter` - 子资源加载过滤策略
    ///
    /// # 返回值
    ///
    /// * `Ok(Box<dyn RenderedPage>)` - 已就绪的页面
    /// * `Err(EngineError)` - 上下文创建失败
    async fn new_context(
        &self,
        user_agent: &str,
        filter: ResourceFilter,
    ) -> Result<Box<dyn RenderedPage>, EngineError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}

/// 隔离浏览上下文中的单个页面
///
/// 调用方必须在所有退出路径上调用 `release`
#[async_trait]
pub trait RenderedPage: Send + Sync {
    /// 导航到目标URL并等待网络空闲，整体受 `timeout` 约束
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), EngineError>;

    /// 当前页面URL（跟随重定向后）
    async fn current_url(&self) -> Result<Option<String>, EngineError>;

    /// 页面可见文本
    async fn visible_text(&self) -> Result<String, EngineError>;

    /// 当前 DOM 的 HTML 快照
    async fn content(&self) -> Result<String, EngineError>;

    /// 关闭页面并销毁浏览上下文
    async fn release(self: Box<Self>) -> Result<(), EngineError>;
}
