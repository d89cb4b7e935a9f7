// 集成测试公共模块
//
// 内存中的站点抓取器和页面夹具

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use site_lingo::config::SiteConfig;
use site_lingo::error::{LingoError, LingoResult};
use site_lingo::i18n::MemoryPreferences;
use site_lingo::{ResourceFetcher, Site};

/// 内存站点：按路径返回固定内容，记录每个路径的请求次数
#[derive(Default)]
pub struct MockFetcher {
    pages: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    calls: Mutex<HashMap<String, usize>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, path: &str, body: &str) -> Self {
        self.pages.insert(path.to_string(), body.to_string());
        self
    }

    /// 该路径的响应先等待一段时间
    pub fn with_delay(mut self, path: &str, delay: Duration) -> Self {
        self.delays.insert(path.to_string(), delay);
        self
    }

    pub fn calls(&self, path: &str) -> usize {
        self.calls.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl ResourceFetcher for MockFetcher {
    async fn fetch(&self, path: &str) -> LingoResult<String> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_insert(0) += 1;

        if let Some(delay) = self.delays.get(path) {
            tokio::time::sleep(*delay).await;
        }

        self.pages
            .get(path)
            .cloned()
            .ok_or_else(|| LingoError::HttpStatus {
                status: 404,
                url: path.to_string(),
            })
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

pub const SPANISH: &str = r#"{
    "search": {
        "title": "Resultados",
        "empty_query": "Escribe un término de búsqueda",
        "no_results": "No se encontraron resultados",
        "error": "La búsqueda falló"
    },
    "menu": {"drink": "Bebida del día"}
}"#;

pub const ENGLISH: &str = r#"{
    "search": {
        "title": "Results",
        "empty_query": "Enter a search term",
        "no_results": "No results found",
        "error": "Search failed"
    },
    "menu": {"drink": "Drink of the day"}
}"#;

pub const INDEX: &str = r#"<!DOCTYPE html>
<html><head><title>Inicio</title><script>var cafe = "café";</script></head>
<body>
<h1 data-i18n="menu.drink">Bebida</h1>
<p>Me gusta el café con leche por la mañana.</p>
</body></html>"#;

pub const CODE: &str = r#"<html><body>
<p>Aprende C++ y c. en una semana.</p>
</body></html>"#;

/// 带两种语言翻译和两个页面的站点
pub fn fixture_site() -> MockFetcher {
    MockFetcher::new()
        .with_page("i18n/es.json", SPANISH)
        .with_page("i18n/en.json", ENGLISH)
        .with_page("index.html", INDEX)
        .with_page("code.html", CODE)
}

pub fn config_with_pages(pages: &[&str]) -> SiteConfig {
    SiteConfig {
        pages: pages.iter().map(|page| page.to_string()).collect(),
        ..SiteConfig::default()
    }
}

pub fn site(fetcher: Arc<MockFetcher>, pages: &[&str]) -> Site {
    Site::with_fetcher(
        config_with_pages(pages),
        fetcher,
        Arc::new(MemoryPreferences::new()),
        None,
    )
}
