//! 页面批量抓取

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio_util::sync::CancellationToken;

use super::fetcher::{fetch_with_deadline, ResourceFetcher};

/// 并行抓取固定页面列表，单页失败以空字符串占位
#[derive(Clone)]
pub struct PageFetcher {
    fetcher: Arc<dyn ResourceFetcher>,
    timeout: Duration,
}

impl PageFetcher {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>, timeout: Duration) -> Self {
        Self { fetcher, timeout }
    }

    /// 抓取全部页面，结果与输入一一对应、顺序一致
    pub async fn fetch_all(&self, pages: &[String]) -> Vec<String> {
        self.fetch_all_with_cancel(pages, &CancellationToken::new())
            .await
    }

    /// 同 `fetch_all`，取消令牌触发后尚未完成的页面返回空字符串
    pub async fn fetch_all_with_cancel(
        &self,
        pages: &[String],
        cancel: &CancellationToken,
    ) -> Vec<String> {
        let fetches = pages.iter().map(|page| async move {
            match fetch_with_deadline(self.fetcher.as_ref(), page, self.timeout, cancel).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("页面 {} 抓取失败，跳过: {}", page, e);
                    String::new()
                }
            }
        });

        join_all(fetches).await
    }
}
