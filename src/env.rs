//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问

use std::env;
use std::fmt;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => match Self::DEFAULT {
                Some(default) => Ok(default),
                None => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Required environment variable not set".to_string(),
                }),
            },
        }
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "DOM_TRANSLATE_LOG_LEVEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }
}

/// 翻译相关环境变量
pub mod translation {
    use super::*;

    /// 原始语言标签
    pub struct SourceLocale;
    impl EnvVar<String> for SourceLocale {
        const NAME: &'static str = "DOM_TRANSLATE_SOURCE_LOCALE";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Locale tag of the original content (e.g. en)";

        fn parse(value: &str) -> EnvResult<String> {
            parse_locale(value, Self::NAME)
        }
    }

    /// 目标语言标签
    pub struct TargetLocale;
    impl EnvVar<String> for TargetLocale {
        const NAME: &'static str = "DOM_TRANSLATE_TARGET_LOCALE";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Locale tag of the translated content (e.g. ar)";

        fn parse(value: &str) -> EnvResult<String> {
            parse_locale(value, Self::NAME)
        }
    }

    /// 内容根选择器
    pub struct ContentRoot;
    impl EnvVar<String> for ContentRoot {
        const NAME: &'static str = "DOM_TRANSLATE_CONTENT_ROOT";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Content root selector: a tag name or #id";

        fn parse(value: &str) -> EnvResult<String> {
            let trimmed = value.trim();
            if trimmed.is_empty() || trimmed == "#" {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Selector cannot be empty".to_string(),
                });
            }
            Ok(trimmed.to_string())
        }
    }

    /// 词典文件路径
    pub struct Dictionary;
    impl EnvVar<String> for Dictionary {
        const NAME: &'static str = "DOM_TRANSLATE_DICTIONARY";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Path to a TOML or JSON dictionary file";

        fn parse(value: &str) -> EnvResult<String> {
            if value.trim().is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Path cannot be empty".to_string(),
                });
            }
            Ok(shellexpand::tilde(value.trim()).into_owned())
        }
    }

    /// 让出调度器的元素间隔
    pub struct YieldInterval;
    impl EnvVar<usize> for YieldInterval {
        const NAME: &'static str = "DOM_TRANSLATE_YIELD_INTERVAL";
        const DEFAULT: Option<usize> = None;
        const DESCRIPTION: &'static str =
            "Yield to the scheduler every N elements during a walk (0 disables)";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_usize(value, Self::NAME, 0, 1_000_000)
        }
    }
}

fn parse_locale(value: &str, var_name: &str) -> EnvResult<String> {
    let trimmed = value.trim();
    let valid = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(trimmed.to_string())
    } else {
        Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Invalid locale tag '{}'", value),
        })
    }
}

fn parse_usize(value: &str, var_name: &str, min: usize, max: usize) -> EnvResult<usize> {
    let num: usize = value.trim().parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid non-negative number".to_string(),
    })?;

    if num < min {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} is below minimum {}", num, min),
        });
    }

    if num > max {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} exceeds maximum {}", num, max),
        });
    }

    Ok(num)
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    let mut docs = String::new();
    docs.push_str("# Environment Variables Documentation\n\n");

    let entries = [
        (core::LogLevel::NAME, core::LogLevel::DESCRIPTION),
        (translation::SourceLocale::NAME, translation::SourceLocale::DESCRIPTION),
        (translation::TargetLocale::NAME, translation::TargetLocale::DESCRIPTION),
        (translation::ContentRoot::NAME, translation::ContentRoot::DESCRIPTION),
        (translation::Dictionary::NAME, translation::Dictionary::DESCRIPTION),
        (translation::YieldInterval::NAME, translation::YieldInterval::DESCRIPTION),
    ];

    for (name, description) in entries {
        docs.push_str(&format!("- `{}`: {}\n", name, description));
    }

    docs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(core::LogLevel::parse("DEBUG").unwrap(), "debug");
        assert!(core::LogLevel::parse("loud").is_err());
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!(translation::TargetLocale::parse(" ar-EG ").unwrap(), "ar-EG");
        assert!(translation::TargetLocale::parse("").is_err());
        assert!(translation::SourceLocale::parse("en US").is_err());
    }

    #[test]
    fn test_content_root_parsing() {
        assert_eq!(translation::ContentRoot::parse("#app").unwrap(), "#app");
        assert!(translation::ContentRoot::parse("#").is_err());
        assert!(translation::ContentRoot::parse("  ").is_err());
    }

    #[test]
    fn test_yield_interval_parsing() {
        assert_eq!(translation::YieldInterval::parse("0").unwrap(), 0);
        assert_eq!(translation::YieldInterval::parse("16").unwrap(), 16);
        assert!(translation::YieldInterval::parse("-1").is_err());
        assert!(translation::YieldInterval::parse("2000000").is_err());
    }

    #[test]
    fn test_generate_env_docs_lists_all_variables() {
        let docs = generate_env_docs();
        assert!(docs.contains("DOM_TRANSLATE_TARGET_LOCALE"));
        assert!(docs.contains("DOM_TRANSLATE_YIELD_INTERVAL"));
    }
}
