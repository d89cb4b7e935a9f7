//! 可见文本提取

use markup5ever_rcdom::{Handle, NodeData, RcDom};

use super::dom::{find_nodes, get_node_name};
use super::utils::collapse_whitespace;
use crate::config::constants::INVISIBLE_ELEMENTS;

/// 拼接子树中的文本节点（跳过脚本、样式等不可见元素）
pub fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    let mut stack = vec![node.clone()];

    while let Some(current) = stack.pop() {
        match &current.data {
            NodeData::Text { contents } => text.push_str(&contents.borrow()),
            NodeData::Element { .. } => {
                if get_node_name(&current).map_or(false, |name| INVISIBLE_ELEMENTS.contains(&name))
                {
                    continue;
                }
                for child in current.children.borrow().iter().rev() {
                    stack.push(child.clone());
                }
            }
            NodeData::Document => {
                for child in current.children.borrow().iter().rev() {
                    stack.push(child.clone());
                }
            }
            _ => {}
        }
    }

    text
}

/// 提取文档 `<body>` 的可见文本，没有 body 时退回整个文档
pub fn visible_text(dom: &RcDom) -> String {
    let raw = match find_nodes(&dom.document, vec!["html", "body"]).first() {
        Some(body) => text_content(body),
        None => text_content(&dom.document),
    };

    collapse_whitespace(&raw)
}
