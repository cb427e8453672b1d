//! 简化的配置管理器
//!
//! 提供统一的配置接口，支持文件配置、环境变量和默认值

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::constants;
use crate::translation::error::{TranslationError, TranslationResult};

/// 文字方向，对应 `dir` 属性的取值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

impl fmt::Display for TextDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 翻译配置
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TranslationConfig {
    // 语言与方向
    pub source_locale: String,
    pub target_locale: String,
    pub source_direction: TextDirection,
    pub target_direction: TextDirection,

    // 遍历范围
    pub content_root: String,
    pub skip_elements: Vec<String>,

    // 目标文字区间，用于识别纯符号/数字片段
    pub target_script_start: char,
    pub target_script_end: char,

    // 调度
    pub yield_interval: usize,

    // 词典
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionary_path: Option<String>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            source_locale: constants::DEFAULT_SOURCE_LOCALE.to_string(),
            target_locale: constants::DEFAULT_TARGET_LOCALE.to_string(),
            source_direction: TextDirection::Ltr,
            target_direction: TextDirection::Rtl,

            content_root: constants::DEFAULT_CONTENT_ROOT.to_string(),
            skip_elements: constants::SKIP_ELEMENTS
                .iter()
                .map(|s| s.to_string())
                .collect(),

            target_script_start: constants::DEFAULT_TARGET_SCRIPT_START,
            target_script_end: constants::DEFAULT_TARGET_SCRIPT_END,

            yield_interval: constants::DEFAULT_YIELD_INTERVAL,

            dictionary_path: None,
        }
    }
}

impl TranslationConfig {
    /// 创建带指定目标语言的默认配置
    pub fn default_with_locale(target_locale: &str) -> Self {
        Self {
            target_locale: target_locale.to_string(),
            ..Self::default()
        }
    }

    /// 验证配置
    pub fn validate(&self) -> TranslationResult<()> {
        if self.source_locale.trim().is_empty() || self.target_locale.trim().is_empty() {
            return Err(TranslationError::ConfigError("语言标签不能为空".to_string()));
        }

        let selector = self.content_root.trim();
        if selector.is_empty() || selector == "#" {
            return Err(TranslationError::ConfigError("内容根选择器不能为空".to_string()));
        }

        if self.target_script_start > self.target_script_end {
            return Err(TranslationError::ConfigError(format!(
                "目标文字区间无效: U+{:04X} > U+{:04X}",
                self.target_script_start as u32, self.target_script_end as u32
            )));
        }

        Ok(())
    }

    /// 应用环境变量覆盖
    pub fn apply_env_overrides(&mut self) {
        use crate::env::{translation, EnvVar};

        if let Ok(source_locale) = translation::SourceLocale::get() {
            self.source_locale = source_locale;
        }

        if let Ok(target_locale) = translation::TargetLocale::get() {
            self.target_locale = target_locale;
        }

        if let Ok(content_root) = translation::ContentRoot::get() {
            tracing::info!("环境变量覆盖内容根: {}", content_root);
            self.content_root = content_root;
        }

        if let Ok(dictionary) = translation::Dictionary::get() {
            self.dictionary_path = Some(dictionary);
        }

        if let Ok(interval) = translation::YieldInterval::get() {
            self.yield_interval = interval;
        }
    }

    /// 判断标签是否需要跳过
    pub fn is_skipped_element(&self, tag_name: &str) -> bool {
        self.skip_elements
            .iter()
            .any(|skip| skip.eq_ignore_ascii_case(tag_name))
    }
}

/// 简化的配置管理器
#[derive(Debug)]
pub struct ConfigManager {
    config: TranslationConfig,
}

impl ConfigManager {
    /// 创建新的配置管理器（搜索默认路径）
    pub fn new() -> TranslationResult<Self> {
        let config = Self::load_config()?;
        Self::finish(config)
    }

    /// 从指定文件创建配置管理器
    pub fn from_file(path: &str) -> TranslationResult<Self> {
        Self::load_dotenv();
        let config = Self::load_from_file(path)?;
        Self::finish(config)
    }

    fn finish(mut config: TranslationConfig) -> TranslationResult<Self> {
        config.apply_env_overrides();
        config.validate()?;

        Ok(Self { config })
    }

    /// 取出配置
    pub fn into_config(self) -> TranslationConfig {
        self.config
    }

    fn load_config() -> TranslationResult<TranslationConfig> {
        Self::load_dotenv();

        for path in constants::CONFIG_PATHS {
            let expanded_path = shellexpand::tilde(path);
            if Path::new(expanded_path.as_ref()).exists() {
                tracing::info!("加载配置文件: {}", expanded_path);
                return Self::load_from_file(&expanded_path);
            }
        }

        tracing::info!("未找到配置文件，使用默认配置");
        Ok(TranslationConfig::default())
    }

    /// 从指定文件加载配置（按扩展名选择 TOML 或 JSON）
    pub fn load_from_file(path: &str) -> TranslationResult<TranslationConfig> {
        let expanded_path = shellexpand::tilde(path);
        let content = std::fs::read_to_string(expanded_path.as_ref()).map_err(|e| {
            TranslationError::ConfigError(format!("读取配置文件失败: {}", e)).with_context(path)
        })?;

        let parsed = if expanded_path.ends_with(".json") {
            serde_json::from_str(&content)
                .map_err(|e| TranslationError::ConfigError(format!("解析JSON配置失败: {}", e)))
        } else {
            toml::from_str(&content)
                .map_err(|e| TranslationError::ConfigError(format!("解析TOML配置失败: {}", e)))
        };
        parsed.map_err(|e| e.with_context(path))
    }

    fn load_dotenv() {
        for env_file in constants::ENV_FILES {
            if Path::new(env_file).exists() && dotenv::from_filename(env_file).is_ok() {
                tracing::info!("已加载环境变量文件: {}", env_file);
                break;
            }
        }
    }

    /// 生成示例配置文件
    pub fn generate_example_config(path: &str) -> TranslationResult<()> {
        let config = TranslationConfig::default();
        let content = toml::to_string_pretty(&config)?;

        std::fs::write(path, content)
            .map_err(|e| TranslationError::ConfigError(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = TranslationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.target_direction, TextDirection::Rtl);
        assert!(config.is_skipped_element("SCRIPT"));
        assert!(!config.is_skipped_element("p"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = TranslationConfig::default_with_locale("");
        assert!(config.validate().is_err());

        config = TranslationConfig {
            content_root: "#".to_string(),
            ..TranslationConfig::default()
        };
        assert!(config.validate().is_err());

        config = TranslationConfig {
            target_script_start: '\u{06FF}',
            target_script_end: '\u{0600}',
            ..TranslationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_toml_uses_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "target_locale = \"fa\"\ncontent_root = \"#app\"\nyield_interval = 0").unwrap();

        let config = ConfigManager::load_from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.target_locale, "fa");
        assert_eq!(config.content_root, "#app");
        assert_eq!(config.yield_interval, 0);
        assert_eq!(config.source_locale, "en");
        assert_eq!(config.skip_elements, vec!["script", "style", "noscript"]);
    }

    #[test]
    fn test_load_json_config() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"source_direction": "rtl", "target_direction": "ltr"}}"#).unwrap();

        let config = ConfigManager::load_from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.source_direction, TextDirection::Rtl);
        assert_eq!(config.target_direction, TextDirection::Ltr);
    }

    #[test]
    fn test_load_invalid_file_is_config_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "yield_interval = \"many\"").unwrap();

        let path = file.path().to_str().unwrap();
        let err = ConfigManager::load_from_file(path).unwrap_err();
        assert!(matches!(err, TranslationError::ConfigError(_)));
        assert!(err.to_string().contains(path));
    }

    #[test]
    fn test_generate_example_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("example.toml");
        let path = path.to_str().unwrap();

        ConfigManager::generate_example_config(path).unwrap();
        let loaded = ConfigManager::load_from_file(path).unwrap();
        assert_eq!(loaded, TranslationConfig::default());
    }
}
