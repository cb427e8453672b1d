//! # 解析器模块
//!
//! 目前只包含 HTML：文档解析、DOM 查询与序列化。翻译引擎通过这里的
//! 辅助函数访问节点，自身不直接处理 `NodeData` 的属性细节。

pub mod html;

pub use html::{
    find_content_root, find_presentation_root, get_node_attr, get_node_name, html_to_dom,
    serialize_document, set_node_attr,
};
