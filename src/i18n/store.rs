//! 翻译表存储
//!
//! 每种语言最多只有一张翻译表（加载中或已缓存）。表首次加载后在实例生命周期内
//! 一直保留，不做淘汰也不做失效检查。同一语言的并发加载共享同一次抓取。

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use dashmap::DashMap;
use serde_json::{Map, Value};
use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;

use super::language::LanguageSettings;
use super::preferences::PreferenceStore;
use crate::config::constants::{DEFAULT_TRANSLATION_PATH, LANGUAGE_PREFERENCE_KEY};
use crate::config::SiteConfig;
use crate::error::{LingoError, LingoResult};
use crate::network::fetcher::{fetch_with_deadline, ResourceFetcher};

/// 一种语言的嵌套翻译表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationTable {
    root: Map<String, Value>,
}

impl TranslationTable {
    /// 空表（降级时使用）
    pub fn empty() -> Self {
        Self::default()
    }

    /// 解析 JSON 文本，顶层必须是对象
    pub fn from_json(text: &str) -> LingoResult<Self> {
        match serde_json::from_str(text)? {
            Value::Object(root) => Ok(Self { root }),
            other => Err(LingoError::Parse(format!(
                "翻译表顶层必须是对象，实际为 {}",
                json_kind(&other)
            ))),
        }
    }

    /// 按点分路径查找字符串值
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let mut segments = key.split('.');
        let mut current = self.root.get(segments.next()?)?;

        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }

        current.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

type TableSlot = Arc<OnceCell<Arc<TranslationTable>>>;

/// 翻译存储：当前语言 + 按语言缓存的翻译表
pub struct TranslationStore {
    fetcher: Arc<dyn ResourceFetcher>,
    preferences: Arc<dyn PreferenceStore>,
    languages: LanguageSettings,
    path_template: String,
    fetch_timeout: Duration,
    current: RwLock<String>,
    tables: DashMap<String, TableSlot>,
}

impl TranslationStore {
    /// 创建存储，初始语言由偏好和环境语言决定
    pub fn new(
        fetcher: Arc<dyn ResourceFetcher>,
        preferences: Arc<dyn PreferenceStore>,
        languages: LanguageSettings,
        locale: Option<&str>,
    ) -> Self {
        let stored = preferences.get(LANGUAGE_PREFERENCE_KEY);
        let initial = languages.resolve_initial(stored.as_deref(), locale);
        tracing::debug!("初始语言: {}", initial);

        Self {
            fetcher,
            preferences,
            languages,
            path_template: DEFAULT_TRANSLATION_PATH.to_string(),
            fetch_timeout: crate::config::constants::DEFAULT_FETCH_TIMEOUT,
            current: RwLock::new(initial),
            tables: DashMap::new(),
        }
    }

    pub fn from_config(
        config: &SiteConfig,
        fetcher: Arc<dyn ResourceFetcher>,
        preferences: Arc<dyn PreferenceStore>,
        locale: Option<&str>,
    ) -> Self {
        Self::new(
            fetcher,
            preferences,
            LanguageSettings::from_config(config),
            locale,
        )
        .with_path_template(&config.translation_path)
        .with_fetch_timeout(config.fetch_timeout())
    }

    /// 翻译文件路径模板，`{lang}` 会被替换为语言代码
    pub fn with_path_template(mut self, template: &str) -> Self {
        self.path_template = template.to_string();
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn languages(&self) -> &LanguageSettings {
        &self.languages
    }

    pub fn current_language(&self) -> String {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 切换语言；不支持的语言返回 false 且不做任何修改
    pub fn set_language(&self, code: &str) -> bool {
        if !self.languages.is_supported(code) {
            tracing::debug!("拒绝不支持的语言: {}", code);
            return false;
        }

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = code.to_string();

        if let Err(e) = self.preferences.set(LANGUAGE_PREFERENCE_KEY, code) {
            tracing::warn!("语言偏好保存失败: {}", e);
        }

        true
    }

    /// 加载某语言的翻译表
    ///
    /// 已缓存时直接返回；失败时记录日志并缓存空表，不重试。同一语言的并发调用
    /// 只会触发一次抓取。
    pub async fn load_translations(&self, code: &str) {
        let slot = self.slot(code);
        slot.get_or_init(|| self.fetch_table(code)).await;
    }

    async fn fetch_table(&self, code: &str) -> Arc<TranslationTable> {
        let path = self.path_template.replace("{lang}", code);
        tracing::info!("加载翻译表 {} ({})", code, path);

        let fetched = fetch_with_deadline(
            self.fetcher.as_ref(),
            &path,
            self.fetch_timeout,
            &CancellationToken::new(),
        )
        .await;

        let table = fetched.and_then(|text| TranslationTable::from_json(&text));
        match table {
            Ok(table) => Arc::new(table),
            Err(e) => {
                tracing::warn!("翻译表 {} 加载失败，使用空表: {}", code, e);
                Arc::new(TranslationTable::empty())
            }
        }
    }

    fn slot(&self, code: &str) -> TableSlot {
        self.tables
            .entry(code.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .value()
            .clone()
    }

    /// 已加载的翻译表（加载中或未加载时为 None）
    pub fn table(&self, code: &str) -> Option<Arc<TranslationTable>> {
        self.tables.get(code)?.get().cloned()
    }

    pub fn is_loaded(&self, code: &str) -> bool {
        self.table(code).is_some()
    }

    /// 在当前语言中查找翻译，找不到时原样返回键
    pub fn translate_key(&self, key: &str) -> String {
        let current = self.current_language();

        self.table(&current)
            .and_then(|table| table.lookup(key).map(str::to_string))
            .unwrap_or_else(|| key.to_string())
    }
}
