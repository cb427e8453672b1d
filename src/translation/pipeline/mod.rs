//! 文本处理管道模块
//!
//! - `collector`: 文本片段切分、子节点收集
//! - `filters`: 判断片段是否需要查表

pub mod collector;
pub mod filters;

pub use collector::{direct_element_children, direct_text_children, TextFragment};
pub use filters::{FilterReason, TextFilter};
