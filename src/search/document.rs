//! 搜索时的页面文档能力接口
//!
//! 搜索引擎只依赖"解析 → 翻译 → 提取文本"三个能力，不关心具体的树结构。

use markup5ever_rcdom::RcDom;

use crate::error::LingoResult;
use crate::i18n::{DomTranslator, TranslationStore};
use crate::parsers::html::{html_to_dom, visible_text};

pub trait DocumentModel {
    type Document;

    fn parse(&self, html: &str) -> LingoResult<Self::Document>;

    /// 按当前语言翻译文档（只作用于这份临时副本）
    fn apply_translations(
        &self,
        document: &Self::Document,
        store: &TranslationStore,
    ) -> LingoResult<()>;

    /// 可见正文文本
    fn visible_text(&self, document: &Self::Document) -> String;
}

/// 基于 html5ever 的实现
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlDocumentModel;

impl DocumentModel for HtmlDocumentModel {
    type Document = RcDom;

    fn parse(&self, html: &str) -> LingoResult<RcDom> {
        Ok(html_to_dom(html))
    }

    fn apply_translations(&self, document: &RcDom, store: &TranslationStore) -> LingoResult<()> {
        DomTranslator::new(store).translate_document(document)?;
        Ok(())
    }

    fn visible_text(&self, document: &RcDom) -> String {
        visible_text(document)
    }
}
