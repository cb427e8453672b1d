//! 翻译配置管理模块
//!
//! 提供简化的配置管理，支持环境变量、配置文件和默认值

pub mod manager;

// 重新导出主要类型
pub use manager::{ConfigManager, TextDirection, TranslationConfig};

/// 配置常量
pub mod constants {
    /// 默认原始语言
    pub const DEFAULT_SOURCE_LOCALE: &str = "en";
    /// 默认目标语言
    pub const DEFAULT_TARGET_LOCALE: &str = "ar";

    /// 默认内容根（标签名或 `#id`）
    pub const DEFAULT_CONTENT_ROOT: &str = "body";

    /// 目标文字的 Unicode 区间（阿拉伯文）
    pub const DEFAULT_TARGET_SCRIPT_START: char = '\u{0600}';
    pub const DEFAULT_TARGET_SCRIPT_END: char = '\u{06FF}';

    /// 每处理多少个元素让出一次调度器
    pub const DEFAULT_YIELD_INTERVAL: usize = 1;

    // 跳过的元素（连同整个子树）
    pub const SKIP_ELEMENTS: &[&str] = &["script", "style", "noscript"];

    // 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "dom-translate.toml",
        ".dom-translate.toml",
        "dom-translate.json",
        "~/.config/dom-translate/config.toml",
        "/etc/dom-translate/config.toml",
    ];

    // 按顺序尝试加载的 .env 文件
    pub const ENV_FILES: &[&str] = &[".env.local", ".env.development", ".env.production", ".env"];
}

/// 加载配置，失败时回退到默认配置
pub fn load_translation_config() -> TranslationConfig {
    match ConfigManager::new() {
        Ok(manager) => manager.into_config(),
        Err(e) => {
            tracing::warn!("配置加载失败，使用默认配置: {}", e);
            TranslationConfig::default()
        }
    }
}
