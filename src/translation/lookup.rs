//! 查表能力
//!
//! 引擎只依赖 [`Lookup`]：输入一段已去除首尾空白的文本，返回对应译文；
//! 没有条目时原样返回。`Err` 只影响当前片段。

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;

use crate::translation::error::{TranslationError, TranslationResult};

/// 双向查表
pub trait Lookup {
    /// 原文 → 译文
    fn lookup(&self, text: &str) -> TranslationResult<String>;

    /// 译文 → 原文
    fn inverse_lookup(&self, text: &str) -> TranslationResult<String>;
}

/// 基于内存词典的查表实现
#[derive(Debug, Clone, Default)]
pub struct DictionaryLookup {
    forward: HashMap<String, String>,
    inverse: HashMap<String, String>,
}

/// 词典文件格式：`[entries]` 表或顶层平铺表
#[derive(Deserialize)]
#[serde(untagged)]
enum DictionaryFile {
    Nested { entries: BTreeMap<String, String> },
    Flat(BTreeMap<String, String>),
}

impl DictionaryLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按顺序构建词典
    ///
    /// 多个原文对应同一译文时，反向表保留第一个。
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut dictionary = Self::new();
        for (source, target) in pairs {
            dictionary.insert(source, target);
        }
        dictionary
    }

    /// 添加一条词条
    pub fn insert<S: Into<String>, T: Into<String>>(&mut self, source: S, target: T) {
        let source = source.into().trim().to_string();
        let target = target.into().trim().to_string();

        if source.is_empty() || target.is_empty() {
            tracing::debug!("忽略空词条: {:?} -> {:?}", source, target);
            return;
        }

        match self.inverse.get(&target) {
            Some(existing) if existing != &source => {
                tracing::debug!(
                    "译文 {:?} 已对应原文 {:?}，反向表忽略 {:?}",
                    target,
                    existing,
                    source
                );
            }
            Some(_) => {}
            None => {
                self.inverse.insert(target.clone(), source.clone());
            }
        }

        self.forward.insert(source, target);
    }

    /// 从 TOML 或 JSON 文件加载（按扩展名判断）
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> TranslationResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TranslationError::IoError(format!("读取词典失败 {}: {}", path.display(), e))
        })?;

        let file: DictionaryFile = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            _ => toml::from_str(&content)?,
        };

        let entries = match file {
            DictionaryFile::Nested { entries } => entries,
            DictionaryFile::Flat(entries) => entries,
        };

        tracing::info!("已加载词典 {}: {} 条", path.display(), entries.len());

        Ok(Self::from_pairs(entries))
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

impl Lookup for DictionaryLookup {
    fn lookup(&self, text: &str) -> TranslationResult<String> {
        Ok(self
            .forward
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_string()))
    }

    fn inverse_lookup(&self, text: &str) -> TranslationResult<String> {
        Ok(self
            .inverse
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_string()))
    }
}
