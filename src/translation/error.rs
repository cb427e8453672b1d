//! 翻译模块统一错误处理
//!
//! 错误分两层：
//! - 片段级（查表失败、节点无法写入）：记录日志后跳过该片段，遍历继续；
//! - 切换级（内容根缺失等）：在 `toggle()` 顶层记录，模式保持不变。

use std::fmt;

use thiserror::Error;

/// 翻译错误类型
#[derive(Error, Debug, Clone)]
pub enum TranslationError {
    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// 查表失败（单个片段）
    #[error("查表失败 \"{text}\": {reason}")]
    LookupFailed { text: String, reason: String },

    /// 节点无法读写
    #[error("节点异常: {0}")]
    MalformedNode(String),

    /// 找不到内容根
    #[error("找不到内容根: {0}")]
    MissingContentRoot(String),

    /// 解析错误
    #[error("解析错误: {0}")]
    ParseError(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    SerializationError(String),

    /// IO 错误
    #[error("IO错误: {0}")]
    IoError(String),
}

impl TranslationError {
    /// 构造查表失败错误
    pub fn lookup_failed<T: fmt::Display>(text: &str, reason: T) -> Self {
        TranslationError::LookupFailed {
            text: text.to_string(),
            reason: reason.to_string(),
        }
    }

    /// 是否只影响单个片段
    pub fn is_fragment_level(&self) -> bool {
        matches!(
            self,
            TranslationError::LookupFailed { .. } | TranslationError::MalformedNode(_)
        )
    }

    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TranslationError::ConfigError(_) => ErrorSeverity::Critical,
            TranslationError::LookupFailed { .. } => ErrorSeverity::Warning,
            TranslationError::MalformedNode(_) => ErrorSeverity::Warning,
            TranslationError::MissingContentRoot(_) => ErrorSeverity::Error,
            TranslationError::ParseError(_) => ErrorSeverity::Error,
            TranslationError::SerializationError(_) => ErrorSeverity::Error,
            TranslationError::IoError(_) => ErrorSeverity::Error,
        }
    }

    /// 获取错误类别
    pub fn category(&self) -> ErrorCategory {
        match self {
            TranslationError::ConfigError(_) => ErrorCategory::Configuration,
            TranslationError::LookupFailed { .. } => ErrorCategory::Lookup,
            TranslationError::MalformedNode(_) => ErrorCategory::Document,
            TranslationError::MissingContentRoot(_) => ErrorCategory::Document,
            TranslationError::ParseError(_) => ErrorCategory::Parsing,
            TranslationError::SerializationError(_) => ErrorCategory::Serialization,
            TranslationError::IoError(_) => ErrorCategory::Io,
        }
    }

    /// 创建带上下文的错误
    pub fn with_context<T: fmt::Display>(mut self, context: T) -> Self {
        match &mut self {
            TranslationError::LookupFailed { reason, .. } => {
                *reason = format!("{} (上下文: {})", reason, context);
            }
            TranslationError::ConfigError(msg)
            | TranslationError::MalformedNode(msg)
            | TranslationError::MissingContentRoot(msg)
            | TranslationError::ParseError(msg)
            | TranslationError::SerializationError(msg)
            | TranslationError::IoError(msg) => {
                *msg = format!("{} (上下文: {})", msg, context);
            }
        }

        self
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Warning,
    Error,
    Critical,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Configuration,
    Lookup,
    Document,
    Parsing,
    Serialization,
    Io,
}

impl From<std::io::Error> for TranslationError {
    fn from(error: std::io::Error) -> Self {
        TranslationError::IoError(error.to_string())
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::ParseError(format!("JSON解析错误: {}", error))
    }
}

impl From<toml::de::Error> for TranslationError {
    fn from(error: toml::de::Error) -> Self {
        TranslationError::ParseError(format!("TOML解析错误: {}", error))
    }
}

impl From<toml::ser::Error> for TranslationError {
    fn from(error: toml::ser::Error) -> Self {
        TranslationError::SerializationError(format!("TOML序列化错误: {}", error))
    }
}

impl From<regex::Error> for TranslationError {
    fn from(error: regex::Error) -> Self {
        TranslationError::ConfigError(format!("正则表达式无效: {}", error))
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;

/// 错误处理助手函数
pub mod helpers {
    use super::*;

    /// 按严重程度记录错误，附带错误类别
    pub fn log(error: &TranslationError) {
        let category = error.category();
        match error.severity() {
            ErrorSeverity::Warning => tracing::warn!(?category, "翻译警告: {}", error),
            ErrorSeverity::Error => tracing::error!(?category, "翻译错误: {}", error),
            ErrorSeverity::Critical => tracing::error!(?category, "翻译严重错误: {}", error),
        }
    }
}
