//! HTML解析和处理模块
//!
//! - `dom`: 基础DOM操作（解析、查找、属性读写）
//! - `serializer`: 序列化功能
//! - `utils`: 内容根与展示根的定位

pub mod dom;
pub mod serializer;
pub mod utils;

pub use dom::{
    find_element_by_id, find_nodes, get_child_node_by_name, get_node_attr, get_node_name,
    get_text_content, html_to_dom, set_node_attr,
};
pub use serializer::serialize_document;
pub use utils::{find_content_root, find_presentation_root, WHITESPACES};
