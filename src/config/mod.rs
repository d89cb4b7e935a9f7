//! 站点配置管理模块
//!
//! 提供简化的配置管理，支持环境变量、配置文件和默认值

pub mod manager;

// 重新导出主要类型
pub use manager::{ConfigManager, SiteConfig};

/// 配置常量
pub mod constants {
    use std::time::Duration;

    // 语言相关
    pub const DEFAULT_LANGUAGE: &str = "es";
    pub const SUPPORTED_LANGUAGES: &[&str] = &["es", "en"];
    pub const DEFAULT_TRANSLATION_PATH: &str = "i18n/{lang}.json";
    pub const LANGUAGE_PREFERENCE_KEY: &str = "language";

    // 搜索相关
    pub const DEFAULT_QUERY_PARAM: &str = "q";
    pub const DEFAULT_PAGES: &[&str] = &["index.html"];
    pub const SNIPPET_CONTEXT_CHARS: usize = 80;
    pub const HIGHLIGHT_OPEN: &str = "<mark>";
    pub const HIGHLIGHT_CLOSE: &str = "</mark>";
    pub const SNIPPET_ELLIPSIS: &str = "...";

    // 结果区域
    pub const DEFAULT_RESULTS_HEADING_TAG: &str = "h2";
    pub const DEFAULT_RESULTS_CONTAINER_ID: &str = "search-results";
    pub const DEFAULT_SEARCH_INPUT_ID: &str = "search-input";

    // 提示文本的翻译键
    pub const KEY_EMPTY_QUERY: &str = "search.empty_query";
    pub const KEY_NO_RESULTS: &str = "search.no_results";
    pub const KEY_SEARCH_FAILED: &str = "search.error";
    pub const KEY_RESULTS_TITLE: &str = "search.title";

    // DOM 标记
    pub const TRANSLATE_ATTR: &str = "data-i18n";
    pub const TARGET_ATTR: &str = "data-i18n-attr";
    pub const MARKUP_ATTR: &str = "data-i18n-html";

    // 网络
    pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

    // 提取可见文本时跳过的元素
    pub const INVISIBLE_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

    // 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "site-lingo.toml",
        ".site-lingo.toml",
        "site-lingo.json",
        "~/.config/site-lingo/config.toml",
    ];
}
