//! 还原记录
//!
//! 正向遍历时为每个被改写的文本节点登记改写前后的完整内容（含首尾空白），
//! 反向遍历优先按节点整段写回，保证即使查表不对称或译文自带空白也能逐字节还原。

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::{Rc, Weak};

use markup5ever_rcdom::{Handle, Node, WeakHandle};

/// 片段标识，记录内单调递增
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FragmentId(u64);

impl FragmentId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fragment-{}", self.0)
    }
}

/// 一条还原记录
#[derive(Debug, Clone)]
pub struct RestorationEntry {
    /// 改写前的节点内容
    pub original: String,
    /// 写入节点的内容
    pub translated: String,
    node: WeakHandle,
}

impl RestorationEntry {
    /// 记录是否属于该节点
    pub fn belongs_to(&self, node: &Handle) -> bool {
        self.node
            .upgrade()
            .is_some_and(|live| Rc::ptr_eq(&live, node))
    }
}

/// 片段标识 → 原文 的映射
#[derive(Debug, Default)]
pub struct RestorationRecord {
    entries: BTreeMap<FragmentId, RestorationEntry>,
    by_node: HashMap<*const Node, FragmentId>,
    next_id: u64,
}

impl RestorationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一个被改写的片段，返回新分配的标识
    pub fn record(&mut self, node: &Handle, original: &str, translated: &str) -> FragmentId {
        self.next_id += 1;
        let id = FragmentId(self.next_id);

        let entry = RestorationEntry {
            original: original.to_string(),
            translated: translated.to_string(),
            node: Rc::downgrade(node),
        };

        if let Some(previous) = self.by_node.insert(Rc::as_ptr(node), id) {
            self.entries.remove(&previous);
        }
        self.entries.insert(id, entry);

        id
    }

    /// 按节点取回改写前的内容
    ///
    /// 仅当节点当前内容仍等于登记的译文时返回，节点被外部改写过则视为无记录。
    pub fn original_for(&self, node: &Handle, current: &str) -> Option<&str> {
        let id = self.by_node.get(&Rc::as_ptr(node))?;
        let entry = self.entries.get(id)?;

        (entry.belongs_to(node) && entry.translated == current).then_some(entry.original.as_str())
    }

    /// 按标识查询
    pub fn get(&self, id: FragmentId) -> Option<&RestorationEntry> {
        self.entries.get(&id)
    }

    /// 按标识顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (FragmentId, &RestorationEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 清空记录，标识从头开始
    pub fn clear(&mut self) {
        self.entries.clear();
        self.by_node.clear();
        self.next_id = 0;
    }

    /// 丢弃节点已被释放的记录
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| Weak::strong_count(&entry.node) > 0);

        let entries = &self.entries;
        self.by_node.retain(|_, id| entries.contains_key(id));
        before - self.entries.len()
    }
}
