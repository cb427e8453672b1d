use encoding_rs::Encoding;
use html5ever::interface::{Attribute, QualName};
use html5ever::parse_document;
use html5ever::tendril::{format_tendril, TendrilSink};
use html5ever::{namespace_url, ns, LocalName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::translation::error::TranslationResult;

/// 将 HTML 字节转换为 DOM
///
/// 无法识别的编码标签按 UTF-8（有损）处理。
pub fn html_to_dom(data: &[u8], document_encoding: &str) -> TranslationResult<RcDom> {
    let s: String = match Encoding::for_label(document_encoding.as_bytes()) {
        Some(encoding) => {
            let (string, _, _) = encoding.decode(data);
            string.into_owned()
        }
        None => String::from_utf8_lossy(data).into_owned(),
    };

    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut s.as_bytes())?;

    Ok(dom)
}

/// 查找指定路径的DOM节点
///
/// `node_names` 描述一条标签路径（如 `["html", "body"]`），返回所有匹配末端的元素。
pub fn find_nodes(node: &Handle, node_names: &[&str]) -> Vec<Handle> {
    let mut found_nodes = Vec::new();

    let Some((first, rest)) = node_names.split_first() else {
        return found_nodes;
    };

    let matches_first = get_node_name(node).is_some_and(|name| name == *first);

    if matches_first && rest.is_empty() {
        found_nodes.push(node.clone());
    }

    if matches_first && !rest.is_empty() {
        found_nodes.append(&mut find_nodes_in_children(node, rest));
    } else {
        found_nodes.append(&mut find_nodes_in_children(node, node_names));
    }

    found_nodes
}

fn find_nodes_in_children(node: &Handle, node_names: &[&str]) -> Vec<Handle> {
    node.children
        .borrow()
        .iter()
        .flat_map(|child| find_nodes(child, node_names))
        .collect()
}

/// 按 `id` 属性查找第一个元素（文档顺序）
pub fn find_element_by_id(node: &Handle, id: &str) -> Option<Handle> {
    if get_node_attr(node, "id").as_deref() == Some(id) {
        return Some(node.clone());
    }

    node.children
        .borrow()
        .iter()
        .find_map(|child| find_element_by_id(child, id))
}

/// 根据名称获取子节点
pub fn get_child_node_by_name(parent: &Handle, node_name: &str) -> Option<Handle> {
    let children = parent.children.borrow();
    children
        .iter()
        .find(|child| get_node_name(child) == Some(node_name))
        .cloned()
}

/// 获取节点属性值
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == attr_name)
            .map(|attr| attr.value.to_string()),
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

/// 获取文本节点的内容
pub fn get_text_content(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Text { contents } => Some(contents.borrow().to_string()),
        _ => None,
    }
}

/// 设置节点属性
///
/// `attr_value` 为 `None` 时删除该属性。非元素节点静默忽略。
pub fn set_node_attr(node: &Handle, attr_name: &str, attr_value: Option<&str>) {
    let NodeData::Element { attrs, .. } = &node.data else {
        return;
    };

    let attrs_mut = &mut attrs.borrow_mut();

    match attr_value {
        Some(value) => {
            let mut found_existing_attr = false;

            for attr in attrs_mut.iter_mut().filter(|a| &*a.name.local == attr_name) {
                attr.value.clear();
                attr.value.push_slice(value);
                found_existing_attr = true;
            }

            if !found_existing_attr {
                attrs_mut.push(Attribute {
                    name: QualName::new(None, ns!(), LocalName::from(attr_name)),
                    value: format_tendril!("{}", value),
                });
            }
        }
        // Remove attr completely if attr_value is not defined
        None => attrs_mut.retain(|a| &*a.name.local != attr_name),
    }
}
