//! 搜索结果渲染
//!
//! 每种渲染都会先清空输出区域（保留标题元素），所以可以反复调用。

use markup5ever_rcdom::{Handle, RcDom};

use super::engine::SearchResult;
use crate::config::constants::{
    DEFAULT_RESULTS_CONTAINER_ID, DEFAULT_SEARCH_INPUT_ID, SNIPPET_ELLIPSIS,
};
use crate::error::{LingoError, LingoResult};
use crate::parsers::html::{
    append_child, create_element, create_text, find_element_by_id, get_node_attr, get_node_name,
    html_to_dom, remove_children, serialize_node, set_inner_html, set_node_attr,
};

pub const RESULT_CLASS: &str = "search-result";
pub const SNIPPET_CLASS: &str = "search-snippet";
pub const MESSAGE_CLASS: &str = "search-message";
pub const ERROR_CLASS: &str = "search-message search-error";

/// 搜索结果的输出端
pub trait ResultView {
    /// 把当前查询回写到搜索框
    fn show_query(&self, query: &str);

    fn render_no_query(&self, message: &str);

    fn render_no_results(&self, message: &str);

    fn render_results(&self, results: &[SearchResult]);

    fn render_error(&self, message: &str);
}

/// 渲染到搜索页 DOM 中的结果容器
pub struct DomResultView {
    dom: RcDom,
    container: Handle,
    input: Option<Handle>,
    heading_tag: String,
}

impl DomResultView {
    /// 从搜索页 HTML 创建，结果容器必须存在，搜索框可选
    pub fn from_html(
        html: &str,
        container_id: &str,
        input_id: &str,
        heading_tag: &str,
    ) -> LingoResult<Self> {
        let dom = html_to_dom(html);
        let container = find_element_by_id(&dom.document, container_id).ok_or_else(|| {
            LingoError::Parse(format!("搜索页中没有 id 为 {} 的结果容器", container_id))
        })?;
        let input = find_element_by_id(&dom.document, input_id);

        Ok(Self {
            dom,
            container,
            input,
            heading_tag: heading_tag.to_string(),
        })
    }

    /// 最小的搜索页：搜索框 + 以 `heading_tag` 为标题的结果容器
    pub fn search_page(heading: &str, heading_tag: &str) -> Self {
        let html = format!(
            r#"<!DOCTYPE html><html><head><meta charset="utf-8"></head><body><input type="search" id="{input}" name="q"><div id="{container}"></div></body></html>"#,
            input = DEFAULT_SEARCH_INPUT_ID,
            container = DEFAULT_RESULTS_CONTAINER_ID,
        );
        let dom = html_to_dom(&html);
        let input = find_element_by_id(&dom.document, DEFAULT_SEARCH_INPUT_ID);
        let container = find_element_by_id(&dom.document, DEFAULT_RESULTS_CONTAINER_ID)
            .unwrap_or_else(|| dom.document.clone());

        let title = create_element(heading_tag, &[]);
        append_child(&title, create_text(heading));
        append_child(&container, title);

        Self {
            dom,
            container,
            input,
            heading_tag: heading_tag.to_string(),
        }
    }

    pub fn dom(&self) -> &RcDom {
        &self.dom
    }

    pub fn container(&self) -> &Handle {
        &self.container
    }

    /// 结果容器的 HTML
    pub fn container_html(&self) -> String {
        serialize_node(&self.container)
    }

    /// 搜索框当前的值
    pub fn query_value(&self) -> Option<String> {
        self.input
            .as_ref()
            .and_then(|input| get_node_attr(input, "value"))
    }

    /// 当前渲染的结果条数
    pub fn result_count(&self) -> usize {
        self.container
            .children
            .borrow()
            .iter()
            .filter(|child| get_node_attr(child, "class").as_deref() == Some(RESULT_CLASS))
            .count()
    }

    /// 清空容器，只保留第一个标题元素
    fn clear(&self) {
        let mut heading = None;
        for child in remove_children(&self.container) {
            if heading.is_none() && get_node_name(&child) == Some(self.heading_tag.as_str()) {
                heading = Some(child);
            }
        }

        if let Some(heading) = heading {
            append_child(&self.container, heading);
        }
    }

    fn render_message(&self, message: &str, class: &str) {
        self.clear();
        let paragraph = create_element("p", &[("class", class)]);
        append_child(&paragraph, create_text(message));
        append_child(&self.container, paragraph);
    }
}

impl ResultView for DomResultView {
    fn show_query(&self, query: &str) {
        if let Some(input) = &self.input {
            set_node_attr(input, "value", Some(query.to_string()));
        }
    }

    fn render_no_query(&self, message: &str) {
        self.render_message(message, MESSAGE_CLASS);
    }

    fn render_no_results(&self, message: &str) {
        self.render_message(message, MESSAGE_CLASS);
    }

    fn render_results(&self, results: &[SearchResult]) {
        self.clear();

        for result in results {
            let item = create_element("div", &[("class", RESULT_CLASS)]);

            let link = create_element("a", &[("href", result.page.as_str())]);
            append_child(&link, create_text(&result.page));
            append_child(&item, link);

            // Snippets carry <mark> tags, so they go in as markup
            let snippet = create_element("p", &[("class", SNIPPET_CLASS)]);
            set_inner_html(
                &snippet,
                &format!("{}{}{}", SNIPPET_ELLIPSIS, result.snippet, SNIPPET_ELLIPSIS),
            );
            append_child(&item, snippet);

            append_child(&self.container, item);
        }
    }

    fn render_error(&self, message: &str) {
        self.render_message(message, ERROR_CLASS);
    }
}
