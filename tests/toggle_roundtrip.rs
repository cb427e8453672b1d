//! 切换往返集成测试
//!
//! 正向再反向之后文档逐字节恢复，属性与模式保持一致

use dom_translate::parsers::serialize_document;
use dom_translate::translation::{
    DictionaryLookup, ToggleOutcome, TranslationConfig, TranslationMode, TranslationService,
};

#[allow(dead_code)]
mod common {
    include!("common/mod.rs");
}

use common::{HtmlTestHelper, TestDataGenerator};

#[tokio::test]
async fn test_hello_world_scenario() {
    let dom = HtmlTestHelper::create_test_dom("<body><p>  Hello world  </p></body>");
    let service = TestDataGenerator::service_for(&dom);

    assert!(service.toggle().await.is_completed());
    assert_eq!(HtmlTestHelper::texts_of(&dom, "p"), vec!["  مرحبا بالعالم  "]);
    assert_eq!(service.mode(), TranslationMode::Translated);
    assert_eq!(HtmlTestHelper::html_attr(&dom, "dir").as_deref(), Some("rtl"));

    assert!(service.toggle().await.is_completed());
    assert_eq!(HtmlTestHelper::texts_of(&dom, "p"), vec!["  Hello world  "]);
    assert_eq!(service.mode(), TranslationMode::Original);
    assert_eq!(HtmlTestHelper::html_attr(&dom, "dir").as_deref(), Some("ltr"));
}

#[tokio::test]
async fn test_digits_only_scenario() {
    let dom = HtmlTestHelper::create_test_dom("<p>42</p>");
    let lookup = DictionaryLookup::from_pairs([("42", "اثنان وأربعون")]);
    let service = TranslationService::from_dom(&dom, lookup, TranslationConfig::default()).unwrap();

    service.toggle().await;
    assert_eq!(HtmlTestHelper::texts_of(&dom, "p"), vec!["42"]);

    service.toggle().await;
    assert_eq!(HtmlTestHelper::texts_of(&dom, "p"), vec!["42"]);
}

#[tokio::test]
async fn test_full_page_round_trip_is_byte_exact() {
    let page = HtmlTestHelper::create_simple_english_page();
    let dom = HtmlTestHelper::create_test_dom(&page);
    let before = serialize_document(&dom, "utf-8").unwrap();
    let service = TestDataGenerator::service_for(&dom);

    service.toggle().await;
    let translated = HtmlTestHelper::all_text(&dom);
    assert!(translated.iter().any(|t| t == "حفظ"));
    assert!(translated.iter().any(|t| t == "  مرحبا بالعالم  "));

    service.toggle().await;
    let after = String::from_utf8(serialize_document(&dom, "utf-8").unwrap()).unwrap();
    // Only the presentation attributes differ from the untouched parse
    let after = after.replace(r#"<html dir="ltr" lang="en">"#, "<html>");
    assert_eq!(after.as_bytes(), before.as_slice());
}

#[tokio::test]
async fn test_skipped_subtrees_survive_toggles() {
    let page = HtmlTestHelper::create_simple_english_page();
    let dom = HtmlTestHelper::create_test_dom(&page);
    let service = TestDataGenerator::service_for(&dom);

    service.toggle().await;

    // The head is outside the content root, script/style/noscript are skipped
    assert_eq!(HtmlTestHelper::texts_of(&dom, "title"), vec!["Settings"]);
    assert_eq!(HtmlTestHelper::texts_of(&dom, "h1"), vec!["الإعدادات"]);
    assert_eq!(HtmlTestHelper::texts_of(&dom, "script"), vec![r#"var label = "Save";"#]);
    assert_eq!(HtmlTestHelper::texts_of(&dom, "noscript"), vec!["Save"]);
    assert_eq!(HtmlTestHelper::texts_of(&dom, "style"), vec!["p { color: red; }"]);
}

#[tokio::test]
async fn test_untranslatable_page_is_a_no_op() {
    let html = "<div>Nothing here<p>is in the dictionary</p></div>";
    let dom = HtmlTestHelper::create_test_dom(html);
    let before = HtmlTestHelper::all_text(&dom);
    let service = TestDataGenerator::service_for(&dom);

    let outcome = service.toggle().await;
    let ToggleOutcome::Completed { stats, .. } = outcome else {
        panic!("expected a completed toggle");
    };

    assert_eq!(stats.fragments_mutated(), 0);
    assert_eq!(HtmlTestHelper::all_text(&dom), before);
    assert_eq!(service.record_len(), 0);
}

#[tokio::test]
async fn test_many_toggles_alternate_modes() {
    let dom = HtmlTestHelper::create_test_dom("<ul><li>Save</li><li> Cancel</li></ul>");
    let service = TestDataGenerator::service_for(&dom);

    for round in 1..=6 {
        service.toggle().await;
        let expected = if round % 2 == 1 {
            vec!["حفظ", " إلغاء"]
        } else {
            vec!["Save", " Cancel"]
        };
        assert_eq!(HtmlTestHelper::texts_of(&dom, "li"), expected, "round {}", round);
    }

    assert_eq!(service.mode(), TranslationMode::Original);
    assert_eq!(service.stats().toggles_completed, 6);
}

#[tokio::test]
async fn test_overlapping_requests_on_one_thread() {
    let dom = HtmlTestHelper::create_test_dom("<div><p>Save</p><p>Cancel</p></div>");
    let service = TestDataGenerator::service_for(&dom);

    let (first, second, third) = tokio::join!(service.toggle(), service.toggle(), service.reset());

    assert!(first.is_completed());
    assert!(second.is_busy());
    assert!(third.is_busy());
    assert!(!service.in_flight());
    assert_eq!(service.mode(), TranslationMode::Translated);
    assert_eq!(HtmlTestHelper::texts_of(&dom, "p"), vec!["حفظ", "إلغاء"]);
}

#[tokio::test]
async fn test_external_edit_falls_back_to_inverse_lookup() {
    use dom_translate::parsers::html::find_nodes;
    use html5ever::tendril::StrTendril;
    use markup5ever_rcdom::NodeData;

    let dom = HtmlTestHelper::create_test_dom("<p>Save</p>");
    let service = TestDataGenerator::service_for(&dom);
    service.toggle().await;

    // Page script swaps the translated text for another known translation
    let p = find_nodes(&dom.document, &["p"]).remove(0);
    let text = p.children.borrow()[0].clone();
    if let NodeData::Text { contents } = &text.data {
        *contents.borrow_mut() = StrTendril::from("إلغاء");
    }

    service.toggle().await;
    assert_eq!(HtmlTestHelper::texts_of(&dom, "p"), vec!["Cancel"]);
}

#[tokio::test]
async fn test_padded_lookup_output_round_trips_exactly() {
    use dom_translate::translation::{Lookup, TranslationResult};

    struct PaddingLookup;

    impl Lookup for PaddingLookup {
        fn lookup(&self, text: &str) -> TranslationResult<String> {
            Ok(if text == "Save" { " حفظ".to_string() } else { text.to_string() })
        }

        fn inverse_lookup(&self, text: &str) -> TranslationResult<String> {
            Ok(if text == "حفظ" { "Save".to_string() } else { text.to_string() })
        }
    }

    let dom = HtmlTestHelper::create_test_dom("<p> Save </p>");
    let service =
        TranslationService::from_dom(&dom, PaddingLookup, TranslationConfig::default()).unwrap();

    service.toggle().await;
    assert_eq!(HtmlTestHelper::texts_of(&dom, "p"), vec!["  حفظ "]);

    service.toggle().await;
    assert_eq!(HtmlTestHelper::texts_of(&dom, "p"), vec![" Save "]);
}

#[tokio::test]
async fn test_translated_text_in_skipped_subtrees_survives_round_trip() {
    let html = "<p>Save</p><script>var s = \"حفظ\";</script><noscript>حفظ</noscript>";
    let dom = HtmlTestHelper::create_test_dom(html);
    let service = TestDataGenerator::service_for(&dom);

    service.toggle().await;
    service.toggle().await;

    assert_eq!(HtmlTestHelper::texts_of(&dom, "p"), vec!["Save"]);
    assert_eq!(HtmlTestHelper::texts_of(&dom, "script"), vec!["var s = \"حفظ\";"]);
    assert_eq!(HtmlTestHelper::texts_of(&dom, "noscript"), vec!["حفظ"]);
}
