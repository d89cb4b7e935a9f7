//! # 搜索模块
//!
//! - `query` - 导航上下文与查询读取
//! - `snippet` - 字面量匹配与高亮片段
//! - `document` - 页面文档能力接口（解析、翻译、提取文本）
//! - `render` - 结果输出
//! - `engine` - 搜索流程与重叠调用处理

pub mod document;
pub mod engine;
pub mod query;
pub mod render;
pub mod snippet;

pub use document::{DocumentModel, HtmlDocumentModel};
pub use engine::{SearchEngine, SearchOptions, SearchOutcome, SearchResult, SearchState};
pub use query::{read_query, NavigationContext, StaticNavigation, UrlNavigation};
pub use render::{DomResultView, ResultView};
pub use snippet::{query_pattern, SnippetBuilder};
