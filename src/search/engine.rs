//! 站内搜索引擎
//!
//! 一次搜索：读取查询 → 加载当前语言翻译 → 并行抓取页面 → 逐页翻译并提取
//! 正文 → 生成高亮摘要 → 渲染。整个过程由 `search` 兜底，任何错误都只会
//! 渲染成一条通用的失败提示。
//!
//! 重叠调用时以最后一次为准：新的调用会取消上一次的抓取，被取代的调用不再渲染。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use regex::Regex;
use tokio_util::sync::CancellationToken;

use super::document::{DocumentModel, HtmlDocumentModel};
use super::query::{read_query, NavigationContext};
use super::render::ResultView;
use super::snippet::{query_pattern, SnippetBuilder};
use crate::config::constants::{KEY_EMPTY_QUERY, KEY_NO_RESULTS, KEY_SEARCH_FAILED};
use crate::config::SiteConfig;
use crate::error::LingoResult;
use crate::i18n::TranslationStore;
use crate::network::PageFetcher;

/// 单条搜索结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub page: String,
    pub snippet: String,
}

/// 搜索状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    QueryRead,
    EmptyQuery,
    Searching,
    Rendered,
}

/// 一次 `search` 调用的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    EmptyQuery,
    NoResults,
    Results(Vec<SearchResult>),
    /// 已渲染失败提示
    Failed(String),
    /// 被更新的调用取代，没有渲染
    Superseded,
}

/// 搜索参数
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub pages: Vec<String>,
    pub query_param: String,
    pub snippets: SnippetBuilder,
}

impl SearchOptions {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            pages: config.pages.clone(),
            query_param: config.query_param.clone(),
            snippets: SnippetBuilder::new(config.context_chars, config.escape_snippets),
        }
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::from_config(&SiteConfig::default())
    }
}

pub struct SearchEngine<D: DocumentModel = HtmlDocumentModel> {
    store: Arc<TranslationStore>,
    pages: PageFetcher,
    documents: D,
    options: SearchOptions,
    generation: AtomicU64,
    active: Mutex<CancellationToken>,
    state: Mutex<SearchState>,
}

impl SearchEngine<HtmlDocumentModel> {
    pub fn new(store: Arc<TranslationStore>, pages: PageFetcher, options: SearchOptions) -> Self {
        Self::with_documents(store, pages, options, HtmlDocumentModel)
    }
}

impl<D: DocumentModel> SearchEngine<D> {
    /// 使用自定义文档模型
    pub fn with_documents(
        store: Arc<TranslationStore>,
        pages: PageFetcher,
        options: SearchOptions,
        documents: D,
    ) -> Self {
        Self {
            store,
            pages,
            documents,
            options,
            generation: AtomicU64::new(0),
            active: Mutex::new(CancellationToken::new()),
            state: Mutex::new(SearchState::Idle),
        }
    }

    pub fn store(&self) -> &Arc<TranslationStore> {
        &self.store
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn state(&self) -> SearchState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, state: SearchState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// 开始新一轮搜索：取消上一轮的抓取并领取新的代号
    fn begin(&self) -> (u64, CancellationToken) {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        active.cancel();
        *active = CancellationToken::new();

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        (generation, active.clone())
    }

    /// 执行搜索并渲染到 `view`
    ///
    /// 不会返回错误：失败时记录日志、渲染通用失败提示并返回 `Failed`。
    pub async fn search(
        &self,
        navigation: &dyn NavigationContext,
        view: &dyn ResultView,
    ) -> SearchOutcome {
        let (generation, cancel) = self.begin();

        match self.run(generation, &cancel, navigation, view).await {
            Ok(outcome) => outcome,
            Err(_) if !self.is_current(generation) => SearchOutcome::Superseded,
            Err(e) => {
                tracing::error!("搜索失败: {}", e);
                view.render_error(&self.store.translate_key(KEY_SEARCH_FAILED));
                self.set_state(SearchState::Rendered);
                SearchOutcome::Failed(e.to_string())
            }
        }
    }

    async fn run(
        &self,
        generation: u64,
        cancel: &CancellationToken,
        navigation: &dyn NavigationContext,
        view: &dyn ResultView,
    ) -> LingoResult<SearchOutcome> {
        let query = read_query(navigation, &self.options.query_param);
        self.set_state(SearchState::QueryRead);
        view.show_query(&query);

        if query.is_empty() {
            self.set_state(SearchState::EmptyQuery);
            view.render_no_query(&self.store.translate_key(KEY_EMPTY_QUERY));
            return Ok(SearchOutcome::EmptyQuery);
        }

        self.set_state(SearchState::Searching);
        tracing::info!("搜索 {:?}（第 {} 次）", query, generation);

        let pattern = query_pattern(&query)?;

        let language = self.store.current_language();
        self.store.load_translations(&language).await;

        let bodies = self
            .pages
            .fetch_all_with_cancel(&self.options.pages, cancel)
            .await;

        if !self.is_current(generation) {
            tracing::debug!("第 {} 次搜索已被取代", generation);
            return Ok(SearchOutcome::Superseded);
        }

        let mut results = Vec::new();
        for (page, body) in self.options.pages.iter().zip(bodies.iter()) {
            if body.is_empty() {
                continue;
            }
            if let Some(result) = self.search_page(page, body, &pattern)? {
                results.push(result);
            }
        }

        tracing::info!("{:?} 命中 {} 个页面", query, results.len());

        let outcome = if results.is_empty() {
            view.render_no_results(&self.store.translate_key(KEY_NO_RESULTS));
            SearchOutcome::NoResults
        } else {
            view.render_results(&results);
            SearchOutcome::Results(results)
        };
        self.set_state(SearchState::Rendered);

        Ok(outcome)
    }

    fn search_page(
        &self,
        page: &str,
        body: &str,
        pattern: &Regex,
    ) -> LingoResult<Option<SearchResult>> {
        let document = self.documents.parse(body)?;

        // Untranslated text is still searchable
        if let Err(e) = self.documents.apply_translations(&document, &self.store) {
            tracing::warn!("页面 {} 翻译失败，按原文搜索: {}", page, e);
        }

        let text = self.documents.visible_text(&document);
        let snippet = self.options.snippets.highlight(&text, pattern);
        tracing::debug!("{}: {}", page, if snippet.is_some() { "命中" } else { "未命中" });

        Ok(snippet.map(|snippet| SearchResult {
            page: page.to_string(),
            snippet,
        }))
    }
}
