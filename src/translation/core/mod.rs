//! 翻译系统核心模块
//!
//! - **服务层** (`service.rs`): 持有模式、进行中标记和还原记录，对外提供切换接口
//! - **引擎层** (`engine.rs`): 遍历文档子树，就地改写文本节点
//!
//! ## 模块依赖关系
//!
//! ```text
//! TranslationService (service.rs)
//!     ├── TranslationConfig (config/manager.rs)
//!     ├── RestorationRecord (storage/record.rs)
//!     └── TreeWalker (engine.rs)
//!             ├── Lookup (lookup.rs)
//!             ├── TextFilter (pipeline/filters.rs)
//!             └── TextFragment (pipeline/collector.rs)
//! ```

pub mod engine;
pub mod service;

pub use engine::{TreeWalker, WalkDirection, WalkStats};
pub use service::{ServiceStats, ToggleOutcome, TranslationMode, TranslationService};
