//! 树遍历与替换引擎
//!
//! 给定一个根节点和方向，遍历元素子树并就地改写文本节点内容。
//!
//! ## 遍历规则
//!
//! 对每个访问到的元素：
//! 1. 标签在 `skip_elements` 中（默认 script/style/noscript）时，整棵子树跳过；
//! 2. 按文档顺序处理直接文本子节点：去除首尾空白，过滤空片段和纯符号/数字片段，
//!    查表得到候选译文，与原文不同则写回 `前导空白 + 译文 + 尾随空白`；
//! 3. 按文档顺序进入子元素。
//!
//! 遍历使用显式栈，顺序为先序深度优先、先文本后子元素。每处理完一个元素的
//! 文本批次、进入子元素之前，按 `yield_interval` 让出一次调度器。
//!
//! 引擎只改写文本内容，从不增删或移动节点。单个片段失败只记录日志并计数，
//! 不会中断遍历，因此 [`TreeWalker::walk`] 本身不返回错误。

use std::cell::RefCell;
use std::fmt;
use std::time::{Duration, Instant};

use html5ever::tendril::StrTendril;
use markup5ever_rcdom::{Handle, NodeData};

use crate::parsers::html::get_node_name;
use crate::translation::{
    config::TranslationConfig,
    error::{TranslationError, TranslationResult},
    lookup::Lookup,
    pipeline::{direct_element_children, direct_text_children, TextFilter, TextFragment},
    storage::RestorationRecord,
};

/// 遍历方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkDirection {
    /// 原文 → 译文
    Forward,
    /// 译文 → 原文
    Reverse,
}

impl fmt::Display for WalkDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalkDirection::Forward => f.write_str("forward"),
            WalkDirection::Reverse => f.write_str("reverse"),
        }
    }
}

/// 单个片段的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Substitution {
    /// 查表无结果，未改写
    Unchanged,
    /// 按查表结果改写
    Replaced,
    /// 按还原记录改写
    Restored,
}

/// 单次遍历的统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub elements_visited: usize,
    pub elements_skipped: usize,
    pub fragments_seen: usize,
    pub fragments_blank: usize,
    pub fragments_filtered: usize,
    pub fragments_unchanged: usize,
    pub fragments_translated: usize,
    pub fragments_restored: usize,
    pub fragments_failed: usize,
    /// 反向遍历前丢弃的失效记录（节点已被释放）
    pub records_pruned: usize,
    pub yields: usize,
    pub elapsed: Duration,
}

impl WalkStats {
    /// 被改写的片段总数
    pub fn fragments_mutated(&self) -> usize {
        self.fragments_translated + self.fragments_restored
    }

}

/// 树遍历器
///
/// 借用查表、过滤器和配置，不持有文档。
pub struct TreeWalker<'a> {
    lookup: &'a dyn Lookup,
    filter: &'a TextFilter,
    config: &'a TranslationConfig,
    yield_interval: usize,
}

impl<'a> TreeWalker<'a> {
    pub fn new(lookup: &'a dyn Lookup, filter: &'a TextFilter, config: &'a TranslationConfig) -> Self {
        Self {
            lookup,
            filter,
            config,
            yield_interval: config.yield_interval,
        }
    }

    /// 覆盖让出间隔（0 表示从不让出）
    pub fn with_yield_interval(mut self, yield_interval: usize) -> Self {
        self.yield_interval = yield_interval;
        self
    }

    /// 遍历 `root` 子树并按方向改写文本
    ///
    /// 正向遍历把每个被改写节点的原内容登记到 `record`；反向遍历先丢弃节点已
    /// 释放的记录，再优先从 `record` 整段写回原内容，没有记录时才使用反向查表。
    pub async fn walk(
        &self,
        root: &Handle,
        direction: WalkDirection,
        record: &mut RestorationRecord,
    ) -> WalkStats {
        let start_time = Instant::now();
        let mut stats = WalkStats::default();
        let mut stack: Vec<Handle> = vec![root.clone()];
        let mut since_yield = 0;

        tracing::debug!("开始{}遍历", direction);

        if direction == WalkDirection::Reverse {
            stats.records_pruned = record.prune();
            if stats.records_pruned > 0 {
                tracing::debug!("丢弃 {} 条失效的还原记录", stats.records_pruned);
            }
        }

        while let Some(node) = stack.pop() {
            match node.data {
                NodeData::Element { .. } if self.is_excluded(&node) => {
                    stats.elements_skipped += 1;
                    continue;
                }
                NodeData::Element { .. } | NodeData::Document => {}
                _ => continue,
            }

            stats.elements_visited += 1;

            for text_node in direct_text_children(&node) {
                self.process_text_node(&text_node, direction, record, &mut stats);
            }

            if self.yield_interval > 0 {
                since_yield += 1;
                if since_yield >= self.yield_interval {
                    since_yield = 0;
                    stats.yields += 1;
                    tokio::task::yield_now().await;
                }
            }

            // 逆序压栈，保证按文档顺序出栈
            stack.extend(direct_element_children(&node).into_iter().rev());
        }

        stats.elapsed = start_time.elapsed();

        tracing::debug!(
            "{}遍历完成: 访问 {} 个元素，跳过 {} 个，改写 {} 个片段，失败 {} 个，耗时 {:?}",
            direction,
            stats.elements_visited,
            stats.elements_skipped,
            stats.fragments_mutated(),
            stats.fragments_failed,
            stats.elapsed
        );

        stats
    }

    fn is_excluded(&self, element: &Handle) -> bool {
        get_node_name(element).is_some_and(|tag_name| self.config.is_skipped_element(tag_name))
    }

    fn process_text_node(
        &self,
        node: &Handle,
        direction: WalkDirection,
        record: &mut RestorationRecord,
        stats: &mut WalkStats,
    ) {
        stats.fragments_seen += 1;

        match self.substitute(node, direction, record, stats) {
            Ok(Some(Substitution::Unchanged)) => stats.fragments_unchanged += 1,
            Ok(Some(Substitution::Replaced)) => stats.fragments_translated += 1,
            Ok(Some(Substitution::Restored)) => stats.fragments_restored += 1,
            Ok(None) => {}
            Err(e) => {
                stats.fragments_failed += 1;
                tracing::warn!("片段处理失败，保持原样: {}", e);
            }
        }
    }

    /// 处理一个文本节点；`Ok(None)` 表示片段被过滤
    fn substitute(
        &self,
        node: &Handle,
        direction: WalkDirection,
        record: &mut RestorationRecord,
        stats: &mut WalkStats,
    ) -> TranslationResult<Option<Substitution>> {
        let NodeData::Text { contents } = &node.data else {
            return Ok(None);
        };

        let payload = contents
            .try_borrow()
            .map(|c| c.to_string())
            .map_err(|_| TranslationError::MalformedNode("文本节点正被占用，无法读取".to_string()))?;

        if direction == WalkDirection::Reverse {
            if let Some(original) = record.original_for(node, &payload) {
                let original = original.to_string();
                write_payload(contents, original, &payload)?;
                return Ok(Some(Substitution::Restored));
            }
        }

        let fragment = TextFragment::parse(&payload);

        if fragment.is_blank() {
            stats.fragments_blank += 1;
            return Ok(None);
        }

        if !self.filter.should_translate(fragment.core) {
            stats.fragments_filtered += 1;
            return Ok(None);
        }

        let candidate = match direction {
            WalkDirection::Forward => self.lookup.lookup(fragment.core)?,
            WalkDirection::Reverse => self.lookup.inverse_lookup(fragment.core)?,
        };

        if candidate == fragment.core {
            return Ok(Some(Substitution::Unchanged));
        }

        if candidate.trim().is_empty() {
            return Err(TranslationError::lookup_failed(fragment.core, "查表结果为空"));
        }

        let rebuilt = fragment.rebuild(&candidate);
        write_payload(contents, rebuilt.clone(), &payload)?;

        if direction == WalkDirection::Forward {
            let id = record.record(node, &payload, &rebuilt);
            tracing::trace!("{}: {:?} -> {:?}", id, payload, rebuilt);
        }

        Ok(Some(Substitution::Replaced))
    }
}

fn write_payload(
    contents: &RefCell<StrTendril>,
    value: String,
    current: &str,
) -> TranslationResult<()> {
    let mut contents = contents.try_borrow_mut().map_err(|_| {
        TranslationError::MalformedNode(format!("无法写入文本节点 \"{}\"", current.trim()))
    })?;
    *contents = StrTendril::from(value);
    Ok(())
}
