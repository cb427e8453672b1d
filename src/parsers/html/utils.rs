use markup5ever_rcdom::Handle;

use super::dom::{find_element_by_id, find_nodes, get_child_node_by_name};

/// ASCII 空白字符
pub const WHITESPACES: &[char] = &[' ', '\t', '\n', '\x0c', '\r'];

/// 按选择器查找内容根节点
///
/// 支持两种形式：`#id` 按 `id` 属性匹配，其余按标签名匹配第一个元素。
pub fn find_content_root(document: &Handle, selector: &str) -> Option<Handle> {
    let selector = selector.trim_matches(WHITESPACES);

    if selector.is_empty() {
        return None;
    }

    match selector.strip_prefix('#') {
        Some(id) => find_element_by_id(document, id),
        None => {
            let tag_name = selector.to_lowercase();
            find_nodes(document, &[tag_name.as_str()])
                .into_iter()
                .next()
        }
    }
}

/// 获取用于设置 `dir`/`lang` 的根元素（即 `<html>`）
pub fn find_presentation_root(document: &Handle) -> Option<Handle> {
    get_child_node_by_name(document, "html")
}
