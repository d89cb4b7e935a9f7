//! 资源抓取
//!
//! `ResourceFetcher` 是所有 I/O 的唯一入口：翻译文件和页面都通过它读取。
//! 提供 HTTP 和本地目录两种实现，外加统一的超时与取消包装。

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use encoding_rs::{Encoding, UTF_8};
use reqwest::header::CONTENT_TYPE;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::{LingoError, LingoResult};

/// 按站点内路径读取文本资源
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// 读取资源文本；非成功状态、网络错误都以 `Err` 返回
    async fn fetch(&self, path: &str) -> LingoResult<String>;

    /// 用于日志的来源描述
    fn describe(&self) -> String;
}

/// 带截止时间和取消令牌的抓取
///
/// 超时返回 `LingoError::Timeout`，取消返回 `LingoError::Cancelled`。
pub async fn fetch_with_deadline(
    fetcher: &dyn ResourceFetcher,
    path: &str,
    deadline: Duration,
    cancel: &CancellationToken,
) -> LingoResult<String> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(LingoError::Cancelled(path.to_string())),
        outcome = tokio::time::timeout(deadline, fetcher.fetch(path)) => match outcome {
            Ok(result) => result,
            Err(_) => Err(LingoError::Timeout(format!(
                "{} 超过 {} 毫秒",
                path,
                deadline.as_millis()
            ))),
        },
    }
}

/// 按 Content-Type 中的 charset 解码，缺省为 UTF-8
pub fn decode_body(data: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(charset_from_content_type)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);

    let (text, _, _) = encoding.decode(data);
    text.into_owned()
}

fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches('"').to_string())
        } else {
            None
        }
    })
}

/// 通过 HTTP 读取站点资源
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> LingoResult<Self> {
        let mut base_url = Url::parse(base_url)?;

        // Url::join replaces the last segment unless the base ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .user_agent(concat!("site-lingo/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LingoError::Config(format!("无法创建HTTP客户端: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// 解析站点内路径为完整 URL
    pub fn resolve(&self, path: &str) -> LingoResult<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> LingoResult<String> {
        let url = self.resolve(path)?;
        tracing::debug!("抓取 {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LingoError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let data = response.bytes().await?;

        Ok(decode_body(&data, content_type.as_deref()))
    }

    fn describe(&self) -> String {
        self.base_url.to_string()
    }
}

/// 从本地目录读取静态站点
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new<P: AsRef<Path>>(root: P) -> LingoResult<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(LingoError::Config(format!(
                "站点目录不存在: {}",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    /// 解析站点内路径，拒绝跳出站点目录的路径
    pub fn resolve(&self, path: &str) -> LingoResult<PathBuf> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let relative = Path::new(path.trim_start_matches('/'));

        let escapes = relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir));
        if escapes || relative.as_os_str().is_empty() {
            return Err(LingoError::Io(format!("拒绝访问站点外路径: {}", path)));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ResourceFetcher for FileFetcher {
    async fn fetch(&self, path: &str) -> LingoResult<String> {
        let file = self.resolve(path)?;
        tracing::debug!("读取 {}", file.display());

        let data = tokio::fs::read(&file)
            .await
            .map_err(|e| LingoError::from(e).with_context(file.display()))?;

        Ok(decode_body(&data, None))
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}
