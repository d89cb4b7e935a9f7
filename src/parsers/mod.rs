//! # 解析器模块
//!
//! 这个模块包含HTML文档的解析和处理功能：
//!
//! - HTML解析和DOM操作
//! - 可见文本提取
//! - DOM序列化

pub mod html;

pub use html::{html_to_dom, serialize_document, visible_text};
