// 集成测试公共模块
//
// 提供测试辅助工具和共享功能

use std::cell::Cell;
use std::path::PathBuf;

use dom_translate::parsers::html::{find_nodes, get_node_attr, get_text_content, html_to_dom};
use dom_translate::translation::{
    DictionaryLookup, Lookup, TranslationConfig, TranslationError, TranslationResult,
    TranslationService,
};

use markup5ever_rcdom::{Handle, RcDom};
use tempfile::TempDir;

/// HTML测试辅助工具
pub struct HtmlTestHelper;

impl HtmlTestHelper {
    /// 创建测试用的DOM
    pub fn create_test_dom(html: &str) -> RcDom {
        html_to_dom(html.as_bytes(), "utf-8").expect("test HTML should parse")
    }

    /// 简单的英文页面，包含需要跳过的子树
    pub fn create_simple_english_page() -> String {
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Settings</title>
    <style>p { color: red; }</style>
</head>
<body>
    <h1>Settings</h1>
    <p>  Hello world  </p>
    <div class="actions">
        <button>Save</button>
        <button>Cancel</button>
    </div>
    <p>42</p>
    <script>var label = "Save";</script>
    <noscript>Save</noscript>
</body>
</html>"#
            .to_string()
    }

    /// 某个标签下所有元素的第一个子节点文本
    pub fn texts_of(dom: &RcDom, tag: &str) -> Vec<String> {
        find_nodes(&dom.document, &[tag])
            .iter()
            .filter_map(|element| element.children.borrow().first().cloned())
            .filter_map(|text| get_text_content(&text))
            .collect()
    }

    /// 所有文本节点内容，按文档顺序
    pub fn all_text(dom: &RcDom) -> Vec<String> {
        let mut texts = Vec::new();
        collect_text(&dom.document, &mut texts);
        texts
    }

    pub fn html_attr(dom: &RcDom, name: &str) -> Option<String> {
        find_nodes(&dom.document, &["html"])
            .first()
            .and_then(|html| get_node_attr(html, name))
    }
}

fn collect_text(node: &Handle, texts: &mut Vec<String>) {
    if let Some(text) = get_text_content(node) {
        texts.push(text);
    }
    for child in node.children.borrow().iter() {
        collect_text(child, texts);
    }
}

/// 测试数据生成器
pub struct TestDataGenerator;

impl TestDataGenerator {
    pub fn english_arabic_dictionary() -> DictionaryLookup {
        DictionaryLookup::from_pairs([
            ("Hello world", "مرحبا بالعالم"),
            ("Settings", "الإعدادات"),
            ("Save", "حفظ"),
            ("Cancel", "إلغاء"),
        ])
    }

    pub fn service_for(dom: &RcDom) -> TranslationService {
        TranslationService::from_dom(
            dom,
            Self::english_arabic_dictionary(),
            TranslationConfig::default(),
        )
        .expect("default config should be valid")
    }
}

/// 查表失败注入
///
/// 对指定文本返回错误，并统计调用次数。
pub struct FlakyLookup {
    pub poison: &'static str,
    pub inner: DictionaryLookup,
    pub calls: Cell<usize>,
}

impl FlakyLookup {
    pub fn new(poison: &'static str) -> Self {
        Self {
            poison,
            inner: TestDataGenerator::english_arabic_dictionary(),
            calls: Cell::new(0),
        }
    }
}

impl Lookup for FlakyLookup {
    fn lookup(&self, text: &str) -> TranslationResult<String> {
        self.calls.set(self.calls.get() + 1);
        if text == self.poison {
            return Err(TranslationError::lookup_failed(text, "injected failure"));
        }
        self.inner.lookup(text)
    }

    fn inverse_lookup(&self, text: &str) -> TranslationResult<String> {
        self.calls.set(self.calls.get() + 1);
        if text == self.poison {
            return Err(TranslationError::lookup_failed(text, "injected failure"));
        }
        self.inner.inverse_lookup(text)
    }
}

/// 临时文件环境
pub struct TestEnvironment {
    pub dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("temp dir"),
        }
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("write test file");
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
