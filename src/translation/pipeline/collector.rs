//! 文本片段
//!
//! 把文本节点的内容拆成 前导空白 / 正文 / 尾随空白 三段。替换时只换正文，
//! 两侧空白原样保留。

use std::ops::Range;

use markup5ever_rcdom::{Handle, NodeData};

/// 一个文本节点内容的切分结果（借用原字符串）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextFragment<'a> {
    pub leading: &'a str,
    pub core: &'a str,
    pub trailing: &'a str,
}

impl<'a> TextFragment<'a> {
    /// 切分文本
    ///
    /// 纯空白文本的正文为空，全部空白计入 `leading`。
    pub fn parse(payload: &'a str) -> Self {
        let range = Self::core_range(payload);

        Self {
            leading: &payload[..range.start],
            core: &payload[range.clone()],
            trailing: &payload[range.end..],
        }
    }

    fn core_range(payload: &str) -> Range<usize> {
        let start = payload.len() - payload.trim_start().len();
        let end = start + payload[start..].trim_end().len();
        start..end
    }

    /// 正文是否为空
    pub fn is_blank(&self) -> bool {
        self.core.is_empty()
    }

    /// 用新正文重组，保留两侧空白
    pub fn rebuild(&self, core: &str) -> String {
        let mut out = String::with_capacity(self.leading.len() + core.len() + self.trailing.len());
        out.push_str(self.leading);
        out.push_str(core);
        out.push_str(self.trailing);
        out
    }
}

/// 收集元素的直接文本子节点（文档顺序）
pub fn direct_text_children(element: &Handle) -> Vec<Handle> {
    element
        .children
        .borrow()
        .iter()
        .filter(|child| matches!(child.data, NodeData::Text { .. }))
        .cloned()
        .collect()
}

/// 收集元素的直接子元素（文档顺序）
pub fn direct_element_children(element: &Handle) -> Vec<Handle> {
    element
        .children
        .borrow()
        .iter()
        .filter(|child| matches!(child.data, NodeData::Element { .. }))
        .cloned()
        .collect()
}
