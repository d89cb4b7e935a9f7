//! 按 `data-i18n` 标记改写 DOM
//!
//! - `input` / `textarea`：有 placeholder 时写 placeholder，否则写值
//! - 带 `data-i18n-attr="name"`：写入指定属性
//! - 带 `data-i18n-html`：按 HTML 片段注入（翻译文件必须可信）
//! - 其余：替换为纯文本

use markup5ever_rcdom::{Handle, RcDom};

use super::store::TranslationStore;
use crate::config::constants::{MARKUP_ATTR, TARGET_ATTR, TRANSLATE_ATTR};
use crate::error::{LingoError, LingoResult};
use crate::parsers::html::{
    find_elements_with_attr, get_node_attr, get_node_name, set_inner_html, set_node_attr,
    set_text_content,
};

/// 元素的改写方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationTarget {
    Placeholder,
    Value,
    TextareaContent,
    Attribute(String),
    Markup,
    Text,
}

impl TranslationTarget {
    /// 根据元素类型和标记决定改写方式
    pub fn for_element(element: &Handle) -> LingoResult<Self> {
        let has_placeholder = get_node_attr(element, "placeholder").is_some();

        match get_node_name(element) {
            Some("input") if has_placeholder => return Ok(TranslationTarget::Placeholder),
            Some("input") => return Ok(TranslationTarget::Value),
            Some("textarea") if has_placeholder => return Ok(TranslationTarget::Placeholder),
            Some("textarea") => return Ok(TranslationTarget::TextareaContent),
            _ => {}
        }

        if let Some(attr) = get_node_attr(element, TARGET_ATTR) {
            let attr = attr.trim();
            if attr.is_empty() || attr.chars().any(|c| c.is_whitespace() || c == '=') {
                return Err(LingoError::Parse(format!(
                    "{} 的值不是合法属性名: {:?}",
                    TARGET_ATTR, attr
                )));
            }
            return Ok(TranslationTarget::Attribute(attr.to_string()));
        }

        if get_node_attr(element, MARKUP_ATTR).is_some() {
            return Ok(TranslationTarget::Markup);
        }

        Ok(TranslationTarget::Text)
    }
}

/// DOM 翻译器
pub struct DomTranslator<'a> {
    store: &'a TranslationStore,
}

impl<'a> DomTranslator<'a> {
    pub fn new(store: &'a TranslationStore) -> Self {
        Self { store }
    }

    /// 翻译整个文档
    pub fn translate_document(&self, dom: &RcDom) -> LingoResult<usize> {
        self.translate_tree(&dom.document)
    }

    /// 翻译子树中所有带标记的元素，返回改写的元素数
    ///
    /// 遇到非法标记时停止并返回错误，之前已改写的元素保持改写后的状态。
    /// 子树可以是未挂载到任何显示文档上的游离树。
    pub fn translate_tree(&self, root: &Handle) -> LingoResult<usize> {
        let elements = find_elements_with_attr(root, TRANSLATE_ATTR);
        let mut rewritten = 0;

        for element in elements.iter() {
            let Some(key) = get_node_attr(element, TRANSLATE_ATTR) else {
                continue;
            };
            let target = TranslationTarget::for_element(element)?;
            let translated = self.store.translate_key(&key);

            apply(element, &target, &translated);
            rewritten += 1;
        }

        tracing::debug!("已改写 {} 个元素", rewritten);
        Ok(rewritten)
    }
}

fn apply(element: &Handle, target: &TranslationTarget, translated: &str) {
    match target {
        TranslationTarget::Placeholder => {
            set_node_attr(element, "placeholder", Some(translated.to_string()))
        }
        TranslationTarget::Value => set_node_attr(element, "value", Some(translated.to_string())),
        TranslationTarget::TextareaContent | TranslationTarget::Text => {
            set_text_content(element, translated)
        }
        TranslationTarget::Attribute(name) => {
            set_node_attr(element, name, Some(translated.to_string()))
        }
        TranslationTarget::Markup => set_inner_html(element, translated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::language::LanguageSettings;
    use crate::i18n::preferences::MemoryPreferences;
    use crate::network::fetcher::ResourceFetcher;
    use crate::parsers::html::{find_element_by_id, html_to_dom, serialize_children};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct Table;

    #[async_trait]
    impl ResourceFetcher for Table {
        async fn fetch(&self, _path: &str) -> LingoResult<String> {
            Ok(r#"{
                "nav": {"home": "Home", "search": "Search the site"},
                "intro": "Welcome to <strong>our</strong> site",
                "logo": {"alt": "Company logo"}
            }"#
            .to_string())
        }

        fn describe(&self) -> String {
            "table".to_string()
        }
    }

    async fn english_store() -> TranslationStore {
        let store = TranslationStore::new(
            Arc::new(Table),
            Arc::new(MemoryPreferences::new()),
            LanguageSettings::new(["es", "en"], "es"),
            Some("en-US"),
        );
        store.load_translations("en").await;
        store
    }

    #[tokio::test]
    async fn rewrites_each_element_kind() {
        let store = english_store().await;
        let dom = html_to_dom(
            r#"<body>
            <a id="home" data-i18n="nav.home">Inicio</a>
            <input id="q" data-i18n="nav.search" placeholder="Buscar">
            <input id="go" type="submit" data-i18n="nav.search" value="Buscar">
            <textarea id="note" data-i18n="nav.search">Buscar</textarea>
            <img id="logo" data-i18n="logo.alt" data-i18n-attr="alt" alt="Logotipo">
            <p id="intro" data-i18n="intro" data-i18n-html>Bienvenido</p>
            <p id="plain" data-i18n="intro">Bienvenido</p>
            </body>"#,
        );

        let rewritten = DomTranslator::new(&store).translate_document(&dom).unwrap();
        assert_eq!(rewritten, 7);

        let node = |id: &str| find_element_by_id(&dom.document, id).unwrap();
        assert_eq!(serialize_children(&node("home")), "Home");
        assert_eq!(
            get_node_attr(&node("q"), "placeholder").as_deref(),
            Some("Search the site")
        );
        assert_eq!(get_node_attr(&node("q"), "value"), None);
        assert_eq!(
            get_node_attr(&node("go"), "value").as_deref(),
            Some("Search the site")
        );
        assert_eq!(serialize_children(&node("note")), "Search the site");
        assert_eq!(
            get_node_attr(&node("logo"), "alt").as_deref(),
            Some("Company logo")
        );
        assert_eq!(
            serialize_children(&node("intro")),
            "Welcome to <strong>our</strong> site"
        );
        assert_eq!(
            serialize_children(&node("plain")),
            "Welcome to &lt;strong&gt;our&lt;/strong&gt; site"
        );
    }

    #[tokio::test]
    async fn missing_keys_show_the_key() {
        let store = english_store().await;
        let dom = html_to_dom(r#"<h1 id="t" data-i18n="page.title">Título</h1>"#);

        DomTranslator::new(&store).translate_document(&dom).unwrap();

        let title = find_element_by_id(&dom.document, "t").unwrap();
        assert_eq!(serialize_children(&title), "page.title");
    }

    #[tokio::test]
    async fn subtree_only() {
        let store = english_store().await;
        let dom = html_to_dom(
            r#"<div id="scope"><b id="in" data-i18n="nav.home">Inicio</b></div><b id="out" data-i18n="nav.home">Inicio</b>"#,
        );
        let scope = find_element_by_id(&dom.document, "scope").unwrap();

        assert_eq!(DomTranslator::new(&store).translate_tree(&scope).unwrap(), 1);
        assert_eq!(
            serialize_children(&find_element_by_id(&dom.document, "out").unwrap()),
            "Inicio"
        );
    }

    #[tokio::test]
    async fn empty_attribute_target_is_an_error() {
        let store = english_store().await;
        let dom = html_to_dom(r#"<img data-i18n="logo.alt" data-i18n-attr="">"#);

        assert!(matches!(
            DomTranslator::new(&store).translate_document(&dom),
            Err(LingoError::Parse(_))
        ));
    }
}
