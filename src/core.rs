//! 站点上下文
//!
//! `Site` 把配置、资源抓取、语言偏好、翻译存储和搜索引擎装配在一起，是命令行和
//! 嵌入方使用本库的入口。多个 `Site` 可以同时存在，彼此不共享状态。

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::error::{helpers, LingoError, LingoResult};
use crate::i18n::{
    DomTranslator, FilePreferences, MemoryPreferences, PreferenceStore, TranslationStore,
};
use crate::network::{FileFetcher, HttpFetcher, PageFetcher, ResourceFetcher};
use crate::parsers::html::{html_to_dom, serialize_document};
use crate::search::{ResultView, SearchEngine, SearchOptions, SearchOutcome, StaticNavigation};

/// 按配置选择资源来源：优先 `base_url`，其次 `site_root`
pub fn build_fetcher(config: &SiteConfig) -> LingoResult<Arc<dyn ResourceFetcher>> {
    if let Some(base_url) = &config.base_url {
        tracing::info!("资源来源: {}", base_url);
        return Ok(Arc::new(HttpFetcher::new(base_url, config.fetch_timeout())?));
    }

    if let Some(site_root) = &config.site_root {
        tracing::info!("资源来源: {}", site_root.display());
        return Ok(Arc::new(FileFetcher::new(site_root)?));
    }

    Err(helpers::config_error(
        "未配置站点来源，请设置 base_url 或 site_root",
    ))
}

/// 语言偏好存储；未配置路径时只保存在内存中
pub fn build_preferences(config: &SiteConfig) -> Arc<dyn PreferenceStore> {
    match &config.preferences_path {
        Some(path) => Arc::new(FilePreferences::open(path)),
        None => Arc::new(MemoryPreferences::new()),
    }
}

/// 从 `LC_ALL` / `LC_MESSAGES` / `LANG` 读取系统语言环境
pub fn system_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty() && value != "C" && value != "POSIX")
}

pub struct Site {
    config: SiteConfig,
    fetcher: Arc<dyn ResourceFetcher>,
    store: Arc<TranslationStore>,
    engine: SearchEngine,
}

impl Site {
    /// 按配置装配站点
    pub fn from_config(config: SiteConfig, locale: Option<&str>) -> LingoResult<Self> {
        config.validate()?;
        let fetcher = build_fetcher(&config)?;
        let preferences = build_preferences(&config);
        Ok(Self::with_fetcher(config, fetcher, preferences, locale))
    }

    /// 使用指定的抓取器和偏好存储装配站点
    pub fn with_fetcher(
        config: SiteConfig,
        fetcher: Arc<dyn ResourceFetcher>,
        preferences: Arc<dyn PreferenceStore>,
        locale: Option<&str>,
    ) -> Self {
        let store = Arc::new(TranslationStore::from_config(
            &config,
            fetcher.clone(),
            preferences,
            locale,
        ));
        let engine = SearchEngine::new(
            store.clone(),
            PageFetcher::new(fetcher.clone(), config.fetch_timeout()),
            SearchOptions::from_config(&config),
        );

        Self {
            config,
            fetcher,
            store,
            engine,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &Arc<dyn ResourceFetcher> {
        &self.fetcher
    }

    pub fn store(&self) -> &Arc<TranslationStore> {
        &self.store
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// 切换语言并加载对应翻译表
    pub async fn use_language(&self, code: &str) -> LingoResult<()> {
        if !self.store.set_language(code) {
            return Err(LingoError::UnsupportedLanguage(code.to_string()));
        }
        self.store.load_translations(code).await;
        Ok(())
    }

    /// 加载当前语言的翻译表
    pub async fn load_current_language(&self) {
        let current = self.store.current_language();
        self.store.load_translations(&current).await;
    }

    /// 按当前语言翻译一份 HTML 文档，返回序列化后的结果
    pub async fn translate_html(&self, html: &str) -> LingoResult<String> {
        self.load_current_language().await;

        let dom = html_to_dom(html);
        let rewritten = DomTranslator::new(&self.store).translate_document(&dom)?;
        tracing::info!("已翻译 {} 个元素", rewritten);

        Ok(serialize_document(&dom))
    }

    /// 以给定查询词搜索，结果渲染到 `view`
    pub async fn search(&self, query: &str, view: &dyn ResultView) -> SearchOutcome {
        let navigation = StaticNavigation::new().with_param(&self.config.query_param, query);
        self.engine.search(&navigation, view).await
    }
}
