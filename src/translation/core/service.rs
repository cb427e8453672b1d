//! 翻译服务核心实现
//!
//! [`TranslationService`] 持有一棵外部拥有的文档树的句柄，负责在"原文"与"译文"
//! 两种显示模式之间切换。
//!
//! ## 状态
//!
//! - `mode`: 当前模式，初始为 [`TranslationMode::Original`]
//! - `in_flight`: 是否有切换正在进行
//! - `record`: 正向遍历时登记的原文，回到原文模式时清空
//!
//! 所有状态都放在 `Cell`/`RefCell` 中，方法只需要 `&self`。文档节点基于 `Rc`，
//! 服务因此是 `!Send` 的，必须在单线程运行时（如 tokio `current_thread` 或
//! `LocalSet`）上驱动。
//!
//! ## 切换流程
//!
//! 1. 已有切换在进行时立即返回 [`ToggleOutcome::Busy`]，文档与状态不变；
//! 2. 置 `in_flight`，由守卫在任何退出路径上清除；
//! 3. 解析内容根与呈现根，失败则在任何改写之前返回 [`ToggleOutcome::Failed`]；
//! 4. 按当前模式选择方向遍历内容根；
//! 5. 在呈现根上设置 `dir`/`lang`，翻转模式。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use dom_translate::parsers::html_to_dom;
//! use dom_translate::translation::{DictionaryLookup, TranslationConfig, TranslationService};
//!
//! let dom = html_to_dom(b"<p>Save</p>", "utf-8")?;
//! let lookup = DictionaryLookup::from_pairs([("Save", "حفظ")]);
//! let service = TranslationService::new(dom.document.clone(), lookup, TranslationConfig::default())?;
//!
//! service.toggle().await; // 原文 → 译文
//! service.toggle().await; // 译文 → 原文
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::time::{Duration, Instant};

use markup5ever_rcdom::{Handle, RcDom};

use super::engine::{TreeWalker, WalkDirection, WalkStats};
use crate::parsers::html::{find_content_root, find_presentation_root, get_node_attr, set_node_attr};
use crate::translation::{
    config::TranslationConfig,
    error::{TranslationError, TranslationResult},
    lookup::Lookup,
    pipeline::TextFilter,
    storage::RestorationRecord,
};

/// 显示模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TranslationMode {
    /// 显示原文
    #[default]
    Original,
    /// 显示译文
    Translated,
}

impl TranslationMode {
    /// 切换后的模式
    pub fn toggled(self) -> Self {
        match self {
            TranslationMode::Original => TranslationMode::Translated,
            TranslationMode::Translated => TranslationMode::Original,
        }
    }

    /// 从当前模式出发切换时的遍历方向
    fn walk_direction(self) -> WalkDirection {
        match self {
            TranslationMode::Original => WalkDirection::Forward,
            TranslationMode::Translated => WalkDirection::Reverse,
        }
    }
}

impl fmt::Display for TranslationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationMode::Original => f.write_str("original"),
            TranslationMode::Translated => f.write_str("translated"),
        }
    }
}

/// 一次切换请求的结果
#[derive(Debug)]
pub enum ToggleOutcome {
    /// 已有切换在进行，本次请求被忽略
    Busy,
    /// 已处于目标模式，无需切换
    Unchanged(TranslationMode),
    /// 切换完成
    Completed {
        mode: TranslationMode,
        stats: WalkStats,
    },
    /// 切换在改写文档之前失败，模式不变
    Failed(TranslationError),
}

impl ToggleOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ToggleOutcome::Completed { .. })
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, ToggleOutcome::Busy)
    }

    /// 切换完成后的模式
    pub fn mode(&self) -> Option<TranslationMode> {
        match self {
            ToggleOutcome::Completed { mode, .. } | ToggleOutcome::Unchanged(mode) => Some(*mode),
            _ => None,
        }
    }

    /// 转换为 `Result`；`Busy` 视为成功但不带统计
    pub fn into_result(self) -> TranslationResult<Option<WalkStats>> {
        match self {
            ToggleOutcome::Completed { stats, .. } => Ok(Some(stats)),
            ToggleOutcome::Busy | ToggleOutcome::Unchanged(_) => Ok(None),
            ToggleOutcome::Failed(e) => Err(e),
        }
    }
}

/// 服务累计统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceStats {
    pub toggles_completed: usize,
    pub toggles_rejected: usize,
    pub toggles_failed: usize,
    pub fragments_mutated: usize,
    pub fragments_failed: usize,
    pub processing_time: Duration,
}

/// 呈现根在翻译前的 `dir`/`lang`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PresentationAttrs {
    dir: Option<String>,
    lang: Option<String>,
}

impl PresentationAttrs {
    fn capture(root: &Handle) -> Self {
        Self {
            dir: get_node_attr(root, "dir"),
            lang: get_node_attr(root, "lang"),
        }
    }
}

/// 在作用域结束时清除 `in_flight`
struct InFlightGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> InFlightGuard<'a> {
    /// 已有切换在进行时返回 `None`
    fn engage(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            return None;
        }
        Some(Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// 可逆翻译的状态持有者
///
/// 每个文档一个实例。文档由调用方拥有，服务只持有根句柄。
pub struct TranslationService {
    document: Handle,
    lookup: Box<dyn Lookup>,
    filter: TextFilter,
    config: TranslationConfig,
    mode: Cell<TranslationMode>,
    in_flight: Cell<bool>,
    record: RefCell<RestorationRecord>,
    record_len: Cell<usize>,
    original_attrs: RefCell<Option<PresentationAttrs>>,
    stats: Cell<ServiceStats>,
}

impl TranslationService {
    /// 创建服务
    ///
    /// 配置无效或目标文字区间无法构建过滤器时返回 `ConfigError`。
    pub fn new<L: Lookup + 'static>(
        document: Handle,
        lookup: L,
        config: TranslationConfig,
    ) -> TranslationResult<Self> {
        config.validate()?;
        let filter = TextFilter::from_config(&config)?;

        tracing::debug!(
            "创建翻译服务: {} → {}，内容根 {}",
            config.source_locale,
            config.target_locale,
            config.content_root
        );

        Ok(Self {
            document,
            lookup: Box::new(lookup),
            filter,
            config,
            mode: Cell::new(TranslationMode::Original),
            in_flight: Cell::new(false),
            record: RefCell::new(RestorationRecord::new()),
            record_len: Cell::new(0),
            original_attrs: RefCell::new(None),
            stats: Cell::new(ServiceStats::default()),
        })
    }

    /// 基于已解析的 `RcDom` 创建服务
    pub fn from_dom<L: Lookup + 'static>(
        dom: &RcDom,
        lookup: L,
        config: TranslationConfig,
    ) -> TranslationResult<Self> {
        Self::new(dom.document.clone(), lookup, config)
    }

    /// 在两种模式之间切换一次
    ///
    /// 从原文模式出发做正向遍历，从译文模式出发做反向遍历。单个片段的失败
    /// 不会影响结果，只有在改写之前发现的问题（找不到内容根）才会返回
    /// [`ToggleOutcome::Failed`]。
    pub async fn toggle(&self) -> ToggleOutcome {
        let target = self.mode.get().toggled();
        self.transition(target).await
    }

    /// 切换到指定模式，已处于该模式时返回 [`ToggleOutcome::Unchanged`]
    pub async fn set_mode(&self, target: TranslationMode) -> ToggleOutcome {
        if self.in_flight.get() {
            return self.reject();
        }

        if self.mode.get() == target {
            tracing::debug!("已处于{}模式，忽略", target);
            return ToggleOutcome::Unchanged(target);
        }

        self.transition(target).await
    }

    /// 恢复原文
    pub async fn reset(&self) -> ToggleOutcome {
        self.set_mode(TranslationMode::Original).await
    }

    async fn transition(&self, target: TranslationMode) -> ToggleOutcome {
        let Some(_guard) = InFlightGuard::engage(&self.in_flight) else {
            return self.reject();
        };

        let start_time = Instant::now();
        let outcome = match self.run_toggle(target).await {
            Ok(stats) => ToggleOutcome::Completed { mode: target, stats },
            Err(e) => {
                crate::translation::error::helpers::log(&e);
                ToggleOutcome::Failed(e)
            }
        };

        self.update_stats(&outcome, start_time.elapsed());
        outcome
    }

    async fn run_toggle(&self, target: TranslationMode) -> TranslationResult<WalkStats> {
        let current = self.mode.get();

        let content_root = find_content_root(&self.document, &self.config.content_root)
            .ok_or_else(|| TranslationError::MissingContentRoot(self.config.content_root.clone()))?;
        let presentation_root = find_presentation_root(&self.document)
            .unwrap_or_else(|| content_root.clone());

        tracing::info!("开始切换: {} → {}", current, target);

        // 遍历期间会让出调度器，记录先取出，避免跨 await 持有借用
        let mut record = self.record.take();
        let walker = TreeWalker::new(self.lookup.as_ref(), &self.filter, &self.config);
        let stats = walker
            .walk(&content_root, current.walk_direction(), &mut record)
            .await;

        self.apply_presentation_attrs(&presentation_root, target);

        if target == TranslationMode::Original {
            record.clear();
        }
        self.record_len.set(record.len());
        self.record.replace(record);
        self.mode.set(target);

        tracing::info!(
            "切换完成: 当前{}模式，改写 {} 个片段，失败 {} 个，耗时 {:?}",
            target,
            stats.fragments_mutated(),
            stats.fragments_failed,
            stats.elapsed
        );

        Ok(stats)
    }

    /// 译文模式写入目标方向与语言；回到原文模式时恢复翻译前的取值，
    /// 原本没有的属性写入配置的原文方向与语言
    fn apply_presentation_attrs(&self, root: &Handle, target: TranslationMode) {
        let (dir, lang) = match target {
            TranslationMode::Translated => {
                let mut original_attrs = self.original_attrs.borrow_mut();
                if original_attrs.is_none() {
                    *original_attrs = Some(PresentationAttrs::capture(root));
                }
                (
                    self.config.target_direction.as_str().to_string(),
                    self.config.target_locale.clone(),
                )
            }
            TranslationMode::Original => {
                let original = self.original_attrs.take().unwrap_or_default();
                (
                    original
                        .dir
                        .unwrap_or_else(|| self.config.source_direction.as_str().to_string()),
                    original
                        .lang
                        .unwrap_or_else(|| self.config.source_locale.clone()),
                )
            }
        };

        set_node_attr(root, "dir", Some(dir.as_str()));
        set_node_attr(root, "lang", Some(lang.as_str()));
    }

    fn reject(&self) -> ToggleOutcome {
        tracing::debug!("切换正在进行，忽略本次请求");
        let mut stats = self.stats.get();
        stats.toggles_rejected += 1;
        self.stats.set(stats);
        ToggleOutcome::Busy
    }

    fn update_stats(&self, outcome: &ToggleOutcome, elapsed: Duration) {
        let mut stats = self.stats.get();
        match outcome {
            ToggleOutcome::Completed { stats: walk, .. } => {
                stats.toggles_completed += 1;
                stats.fragments_mutated += walk.fragments_mutated();
                stats.fragments_failed += walk.fragments_failed;
            }
            ToggleOutcome::Failed(_) => stats.toggles_failed += 1,
            ToggleOutcome::Busy | ToggleOutcome::Unchanged(_) => {}
        }
        stats.processing_time += elapsed;
        self.stats.set(stats);
    }

    /// 当前模式
    pub fn mode(&self) -> TranslationMode {
        self.mode.get()
    }

    /// 是否有切换正在进行
    pub fn in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// 还原记录中的片段数
    ///
    /// 记录在遍历期间被取出，切换进行中返回切换开始前的条目数。
    pub fn record_len(&self) -> usize {
        self.record_len.get()
    }

    pub fn document(&self) -> &Handle {
        &self.document
    }

    pub fn config(&self) -> &TranslationConfig {
        &self.config
    }

    pub fn stats(&self) -> ServiceStats {
        self.stats.get()
    }
}
