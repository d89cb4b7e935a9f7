//! 匹配定位与高亮片段

use regex::{Regex, RegexBuilder};

use crate::config::constants::{HIGHLIGHT_CLOSE, HIGHLIGHT_OPEN, SNIPPET_CONTEXT_CHARS};
use crate::error::{LingoError, LingoResult};
use crate::parsers::html::escape_html;

/// 按字面量、忽略大小写匹配查询词的正则
pub fn query_pattern(query: &str) -> LingoResult<Regex> {
    RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
        .map_err(|e| LingoError::Internal(format!("无法构建查询正则: {}", e)))
}

/// 片段生成器
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetBuilder {
    context_chars: usize,
    escape_markup: bool,
}

impl Default for SnippetBuilder {
    fn default() -> Self {
        Self {
            context_chars: SNIPPET_CONTEXT_CHARS,
            escape_markup: true,
        }
    }
}

impl SnippetBuilder {
    pub fn new(context_chars: usize, escape_markup: bool) -> Self {
        Self {
            context_chars,
            escape_markup,
        }
    }

    /// 在文本中查找查询词并生成片段；没有匹配时返回 None
    pub fn build(&self, text: &str, query: &str) -> LingoResult<Option<String>> {
        if query.is_empty() {
            return Ok(None);
        }
        Ok(self.highlight(text, &query_pattern(query)?))
    }

    /// 以第一个匹配为中心截取前后各 `context_chars` 个字符，去掉首尾空白后
    /// 把窗口内所有匹配包进 `<mark>`
    pub fn highlight(&self, text: &str, pattern: &Regex) -> Option<String> {
        let first = pattern.find(text)?;

        let start = text[..first.start()]
            .char_indices()
            .rev()
            .take(self.context_chars)
            .last()
            .map_or(first.start(), |(i, _)| i);
        let end = text[first.end()..]
            .char_indices()
            .nth(self.context_chars)
            .map_or(text.len(), |(i, _)| first.end() + i);

        let window = text[start..end].trim();

        let mut snippet = String::with_capacity(window.len() + 16);
        let mut last = 0;
        for found in pattern.find_iter(window) {
            snippet.push_str(&self.text(&window[last..found.start()]));
            snippet.push_str(HIGHLIGHT_OPEN);
            snippet.push_str(&self.text(found.as_str()));
            snippet.push_str(HIGHLIGHT_CLOSE);
            last = found.end();
        }
        snippet.push_str(&self.text(&window[last..]));

        Some(snippet)
    }

    fn text(&self, raw: &str) -> String {
        if self.escape_markup {
            escape_html(raw)
        } else {
            raw.to_string()
        }
    }
}
