//! 存储模块
//!
//! 当前只有还原记录：正向遍历时登记原文，回到原始模式时清空。

pub mod record;

pub use record::{FragmentId, RestorationEntry, RestorationRecord};
