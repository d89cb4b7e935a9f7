//! HTML解析和处理模块
//!
//! - `dom`: 基础DOM操作、片段解析
//! - `text`: 可见文本提取
//! - `serializer`: 序列化功能
//! - `utils`: 转义和空白处理

pub mod dom;
pub mod serializer;
pub mod text;
pub mod utils;

pub use dom::{
    append_child, create_element, create_text, find_element_by_id, find_elements_with_attr,
    find_nodes, get_node_attr, get_node_name, html_to_dom, parse_fragment, remove_children,
    set_inner_html, set_node_attr, set_text_content,
};
pub use serializer::{serialize_children, serialize_document, serialize_node};
pub use text::{text_content, visible_text};
pub use utils::{collapse_whitespace, escape_html};
