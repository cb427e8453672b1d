//! 文本过滤器模块
//!
//! 判断一个片段是否值得查表。纯符号/数字片段（不含字母，也不含目标文字）
//! 在两个方向上都保持原样。

use regex::Regex;

use crate::translation::config::TranslationConfig;
use crate::translation::error::TranslationResult;

/// 文本过滤器
#[derive(Debug, Clone)]
pub struct TextFilter {
    /// 只由数字或非单词字符组成，且不含目标文字
    symbol_only: Regex,
    script_start: char,
    script_end: char,
}

/// 过滤原因
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum FilterReason {
    Empty,
    SymbolsOrNumbers,
}

impl TextFilter {
    /// 以目标文字区间创建过滤器
    pub fn new(script_start: char, script_end: char) -> TranslationResult<Self> {
        let pattern = format!(
            r"^[[\d\W]&&[^\x{{{:X}}}-\x{{{:X}}}]]+$",
            script_start as u32, script_end as u32
        );

        Ok(Self {
            symbol_only: Regex::new(&pattern)?,
            script_start,
            script_end,
        })
    }

    /// 按配置创建过滤器
    pub fn from_config(config: &TranslationConfig) -> TranslationResult<Self> {
        Self::new(config.target_script_start, config.target_script_end)
    }

    /// 判断已去除首尾空白的片段是否需要查表
    pub fn should_translate(&self, trimmed: &str) -> bool {
        self.filter_reason(trimmed).is_none()
    }

    /// 返回片段被过滤的原因
    pub fn filter_reason(&self, trimmed: &str) -> Option<FilterReason> {
        if trimmed.is_empty() {
            Some(FilterReason::Empty)
        } else if self.is_symbols_or_numbers(trimmed) {
            Some(FilterReason::SymbolsOrNumbers)
        } else {
            None
        }
    }

    /// 检查是否为纯符号或数字
    pub fn is_symbols_or_numbers(&self, text: &str) -> bool {
        self.symbol_only.is_match(text)
    }

    /// 检查是否包含目标文字
    pub fn contains_target_script(&self, text: &str) -> bool {
        text.chars()
            .any(|c| (self.script_start..=self.script_end).contains(&c))
    }
}

impl Default for TextFilter {
    fn default() -> Self {
        let config = TranslationConfig::default();
        // 默认区间是常量，构造不会失败
        Self::from_config(&config).unwrap_or_else(|e| unreachable!("默认过滤器无效: {}", e))
    }
}
