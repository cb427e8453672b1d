//! 翻译模块
//!
//! 在一棵已加载的文档树上就地切换原文与译文：
//! - **core**: 状态持有者与树遍历引擎
//! - **pipeline**: 文本片段切分与过滤
//! - **storage**: 还原记录
//! - **lookup**: 双向查表
//! - **config**: 配置管理
//! - **error**: 错误处理
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use dom_translate::parsers::html_to_dom;
//! use dom_translate::translation::{DictionaryLookup, TranslationConfig, TranslationService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dom = html_to_dom(b"<p>Save</p>", "utf-8")?;
//! let lookup = DictionaryLookup::from_pairs([("Save", "حفظ")]);
//! let service = TranslationService::from_dom(&dom, lookup, TranslationConfig::default())?;
//!
//! service.toggle().await.into_result()?;
//! # Ok(())
//! # }
//! ```

/// 配置管理模块
///
/// 语言、方向、内容根、跳过标签等设置
pub mod config;

/// 核心模块 - 翻译服务与遍历引擎
pub mod core;

/// 错误处理模块
pub mod error;

/// 查表模块
pub mod lookup;

/// 文本处理管道模块 - 片段切分与过滤
pub mod pipeline;

/// 存储模块 - 还原记录
pub mod storage;

// ============================================================================
// 公共API重新导出
// ============================================================================

pub use config::{load_translation_config, ConfigManager, TextDirection, TranslationConfig};
pub use core::{
    ServiceStats, ToggleOutcome, TranslationMode, TranslationService, TreeWalker, WalkDirection,
    WalkStats,
};
pub use error::{TranslationError, TranslationResult};
pub use lookup::{DictionaryLookup, Lookup};
pub use pipeline::{TextFilter, TextFragment};
pub use storage::{FragmentId, RestorationRecord};
