//! # dom-translate
//!
//! 在已加载的 HTML 文档树上就地、可逆地翻译可见文本。
//!
//! ## 模块组织
//!
//! - `parsers` - HTML 解析、节点工具与序列化
//! - `translation` - 翻译服务、遍历引擎、查表与配置
//! - `env` - 环境变量

pub mod env;
pub mod parsers;
pub mod translation;

// Re-export commonly used items for convenience
pub use parsers::*;
pub use translation::{
    DictionaryLookup, Lookup, ToggleOutcome, TranslationConfig, TranslationError,
    TranslationMode, TranslationResult, TranslationService,
};
