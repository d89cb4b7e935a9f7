//! # Site Lingo
//!
//! 静态站点的界面多语言与站内全文搜索。
//!
//! ## 模块组织
//!
//! - `config` - 站点配置、默认值和标记名
//! - `core` - 站点上下文，把各组件装配在一起
//! - `env` - 类型化的环境变量
//! - `error` - 统一错误类型
//! - `i18n` - 翻译表存储、语言偏好和 DOM 翻译
//! - `network` - 资源抓取（HTTP / 本地目录）与页面批量抓取
//! - `parsers` - HTML 解析、改写、序列化和文本提取
//! - `search` - 查询读取、高亮片段、搜索流程和结果渲染

pub mod config;
pub mod core;
pub mod env;
pub mod error;
pub mod i18n;
pub mod network;
pub mod parsers;
pub mod search;

// Re-export commonly used items for convenience
pub use crate::config::{ConfigManager, SiteConfig};
pub use crate::core::Site;
pub use crate::error::{LingoError, LingoResult};
pub use crate::i18n::{DomTranslator, TranslationStore};
pub use crate::network::{PageFetcher, ResourceFetcher};
pub use crate::search::{
    DomResultView, NavigationContext, ResultView, SearchEngine, SearchOutcome, SearchResult,
};
