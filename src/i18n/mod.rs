//! 国际化模块
//!
//! - **language**: 支持的语言和初始语言解析
//! - **preferences**: 语言偏好持久化
//! - **store**: 翻译表加载、缓存与键查找
//! - **dom_translator**: 按 `data-i18n` 标记改写 DOM

pub mod dom_translator;
pub mod language;
pub mod preferences;
pub mod store;

pub use dom_translator::{DomTranslator, TranslationTarget};
pub use language::{primary_subtag, LanguageSettings};
pub use preferences::{FilePreferences, MemoryPreferences, PreferenceStore};
pub use store::{TranslationStore, TranslationTable};
