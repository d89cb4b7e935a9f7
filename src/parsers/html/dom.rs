use std::cell::RefCell;
use std::rc::Rc;

use html5ever::interface::{Attribute, QualName};
use html5ever::parse_document;
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{namespace_url, ns, LocalName};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom};

/// 将 HTML 文本解析为 DOM
pub fn html_to_dom(html: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(html)
}

/// 查找指定路径的DOM节点
pub fn find_nodes(node: &Handle, node_names: Vec<&str>) -> Vec<Handle> {
    let mut found_nodes = Vec::new();
    let Some(&node_name) = node_names.first() else {
        return found_nodes;
    };

    if node_names.len() == 1 {
        if let NodeData::Element { ref name, .. } = node.data {
            if &*name.local == node_name {
                found_nodes.push(node.clone());
            }
        }

        for child_node in node.children.borrow().iter() {
            found_nodes.append(&mut find_nodes(child_node, node_names.clone()));
        }
    } else if let NodeData::Element { ref name, .. } = node.data {
        if &*name.local == node_name {
            let mut new_node_names = node_names;
            new_node_names.remove(0);
            found_nodes.append(&mut find_nodes(node, new_node_names));
        } else {
            for child_node in node.children.borrow().iter() {
                found_nodes.append(&mut find_nodes(child_node, node_names.clone()));
            }
        }
    } else {
        for child_node in node.children.borrow().iter() {
            found_nodes.append(&mut find_nodes(child_node, node_names.clone()));
        }
    }

    found_nodes
}

/// 按文档顺序查找带有指定属性的元素
pub fn find_elements_with_attr(node: &Handle, attr_name: &str) -> Vec<Handle> {
    let mut found = Vec::new();
    let mut stack = vec![node.clone()];

    while let Some(current) = stack.pop() {
        if get_node_attr(&current, attr_name).is_some() {
            found.push(current.clone());
        }
        for child in current.children.borrow().iter().rev() {
            stack.push(child.clone());
        }
    }

    found
}

/// 按 id 查找元素
pub fn find_element_by_id(node: &Handle, id: &str) -> Option<Handle> {
    find_elements_with_attr(node, "id")
        .into_iter()
        .find(|element| get_node_attr(element, "id").as_deref() == Some(id))
}

/// 获取节点属性值
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => {
            for attr in attrs.borrow().iter() {
                if &*attr.name.local == attr_name {
                    return Some(attr.value.to_string());
                }
            }
            None
        }
        _ => None,
    }
}

/// 获取节点名称
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// 设置节点属性
pub fn set_node_attr(node: &Handle, attr_name: &str, attr_value: Option<String>) {
    if let NodeData::Element { attrs, .. } = &node.data {
        let attrs_mut = &mut attrs.borrow_mut();
        let mut i = 0;
        let mut found_existing_attr: bool = false;

        while i < attrs_mut.len() {
            if &attrs_mut[i].name.local == attr_name {
                found_existing_attr = true;

                if let Some(attr_value) = attr_value.as_deref() {
                    attrs_mut[i].value.clear();
                    attrs_mut[i].value.push_slice(attr_value);
                } else {
                    // Remove attr completely if attr_value is not defined
                    attrs_mut.remove(i);
                    continue;
                }
            }

            i += 1;
        }

        if !found_existing_attr {
            if let Some(attr_value) = attr_value {
                attrs_mut.push(Attribute {
                    name: QualName::new(None, ns!(), LocalName::from(attr_name)),
                    value: StrTendril::from(attr_value),
                });
            }
        }
    };
}

/// 创建游离的元素节点
pub fn create_element(tag: &str, attrs: &[(&str, &str)]) -> Handle {
    Node::new(NodeData::Element {
        name: QualName::new(None, ns!(html), LocalName::from(tag)),
        attrs: RefCell::new(
            attrs
                .iter()
                .map(|(name, value)| Attribute {
                    name: QualName::new(None, ns!(), LocalName::from(*name)),
                    value: StrTendril::from(*value),
                })
                .collect(),
        ),
        template_contents: RefCell::new(None),
        mathml_annotation_xml_integration_point: false,
    })
}

/// 创建文本节点
pub fn create_text(text: &str) -> Handle {
    Node::new(NodeData::Text {
        contents: RefCell::new(StrTendril::from(text)),
    })
}

/// 追加子节点
pub fn append_child(parent: &Handle, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

/// 移除全部子节点
pub fn remove_children(node: &Handle) -> Vec<Handle> {
    let removed: Vec<Handle> = node.children.borrow_mut().drain(..).collect();
    for child in removed.iter() {
        child.parent.set(None);
    }
    removed
}

/// 用单个文本节点替换全部子节点（对应 textContent 赋值）
pub fn set_text_content(node: &Handle, text: &str) {
    remove_children(node);
    if !text.is_empty() {
        append_child(node, create_text(text));
    }
}

/// 将一段 HTML 片段解析为游离节点
///
/// 片段在一个独立文档的 `<body>` 中解析，然后从中摘出；调用方必须确认
/// 片段来源可信。
pub fn parse_fragment(markup: &str) -> Vec<Handle> {
    let dom = html_to_dom(&format!("<!DOCTYPE html><html><head></head><body>{}</body></html>", markup));

    // Detach before `dom` drops, its Drop impl empties every reachable subtree
    match find_nodes(&dom.document, vec!["html", "body"]).first() {
        Some(body) => remove_children(body),
        None => Vec::new(),
    }
}

/// 用 HTML 片段替换全部子节点（对应 innerHTML 赋值）
pub fn set_inner_html(node: &Handle, markup: &str) {
    remove_children(node);
    for child in parse_fragment(markup) {
        append_child(node, child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::html::serializer::serialize_children;

    #[test]
    fn finds_nested_path() {
        let dom = html_to_dom("<html><body><div><p>one</p></div><p>two</p></body></html>");
        let paragraphs = find_nodes(&dom.document, vec!["html", "body", "p"]);
        assert_eq!(paragraphs.len(), 2);
    }

    #[test]
    fn empty_path_finds_nothing() {
        let dom = html_to_dom("<p>x</p>");
        assert!(find_nodes(&dom.document, vec![]).is_empty());
    }

    #[test]
    fn attr_lookup_and_update() {
        let dom = html_to_dom(r#"<input id="q" placeholder="Buscar">"#);
        let input = find_element_by_id(&dom.document, "q").unwrap();

        assert_eq!(get_node_name(&input), Some("input"));
        assert_eq!(get_node_attr(&input, "placeholder").as_deref(), Some("Buscar"));

        set_node_attr(&input, "placeholder", Some("Search".to_string()));
        set_node_attr(&input, "value", Some("café".to_string()));
        assert_eq!(get_node_attr(&input, "placeholder").as_deref(), Some("Search"));
        assert_eq!(get_node_attr(&input, "value").as_deref(), Some("café"));

        set_node_attr(&input, "value", None);
        assert_eq!(get_node_attr(&input, "value"), None);
    }

    #[test]
    fn elements_with_attr_come_in_document_order() {
        let dom = html_to_dom(
            r#"<div data-k="a"><span data-k="b"></span></div><p data-k="c"></p>"#,
        );
        let keys: Vec<String> = find_elements_with_attr(&dom.document, "data-k")
            .iter()
            .filter_map(|n| get_node_attr(n, "data-k"))
            .collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn inner_html_survives_fragment_dom_drop() {
        let dom = html_to_dom("<div id='t'>old</div>");
        let target = find_element_by_id(&dom.document, "t").unwrap();

        set_inner_html(&target, "Hola <strong>mundo</strong>!");

        assert_eq!(serialize_children(&target), "Hola <strong>mundo</strong>!");
    }

    #[test]
    fn text_content_is_escaped_on_output() {
        let dom = html_to_dom("<p id='t'>old</p>");
        let target = find_element_by_id(&dom.document, "t").unwrap();

        set_text_content(&target, "a < b");

        assert_eq!(serialize_children(&target), "a &lt; b");
    }
}
