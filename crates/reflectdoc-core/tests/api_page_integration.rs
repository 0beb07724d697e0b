//! End-to-end tests for the rule-based API page
//!
//! These tests run the full load → merge → generate → write path against a
//! fixture reflection tree.

#![recursion_limit = "256"]


use pretty_assertions::assert_eq;
use reflectdoc_core::report::{pass_percentage, result_class, BadgeColor};
use reflectdoc_core::transform::{documented_types, generate_api_page, ApiPageOptions, TypeCategory};
use reflectdoc_core::{load_reflection, load_report, merge_report, write_api_page, Kind};
use test_support::*;

#[test]
fn test_focus_results_merge_and_band() {
    let mut tree = window_api_tree();
    let summary = merge_report(&mut tree, &focus_report());
    assert_eq!(summary.attached, 1);
    assert!(summary.unmatched.is_empty());

    let focus = find(&tree, "Method", "focus");
    let results = focus.signatures[0].results.expect("results on first signature");
    assert_eq!(results.combined.passed, 7);
    assert_eq!(results.combined.total, 8);
    assert_eq!(pass_percentage(&results.combined), Some(88));
    assert_eq!(result_class(&results.combined), "test-color-75");
    assert_eq!(BadgeColor::for_result(&results.combined), BadgeColor::Green);

    let html = generate_api_page(&tree, &ApiPageOptions::default()).unwrap();
    assert!(html.contains(r#"<span class="test-result test-color-75">7/8</span>"#));
    assert!(!html.contains("test-color-100\">7/8"));
}

#[test]
fn test_event_interface_is_its_own_category() {
    let tree = window_api_tree();
    let types = documented_types(&tree);

    let categories: Vec<(&str, TypeCategory)> =
        types.iter().map(|t| (t.name.as_str(), t.category)).collect();
    assert_eq!(
        categories,
        vec![
            ("Window", TypeCategory::Class),
            ("Window", TypeCategory::Interface),
            ("WindowOptions", TypeCategory::Interface),
            ("ShowEvent", TypeCategory::Event),
        ]
    );

    let html = generate_api_page(&tree, &ApiPageOptions::default()).unwrap();
    assert!(html.contains(r#"<section id="ShowEvent-event" class="docs-title"><h2>ShowEvent</h2>"#));
    assert!(html.contains(r#"<section id="Window" class="docs-title"><h2>Window</h2><p>A desktop window</p>"#));
    assert!(html.contains(r#"<section id="Window-interface" class="docs-title"><h2>Window</h2><p>Window as seen by the container</p>"#));
    // references to Window resolve to the class
    assert!(html.contains(r##"<dt class="code return-value"><a href="#Window">Window</a></dt>"##));
}

#[test]
fn test_rule_engine_documents_first_signature_only() {
    let tree = window_api_tree();
    assert_eq!(find(&tree, "Method", "focus").signatures.len(), 2);

    let html = generate_api_page(&tree, &ApiPageOptions::default()).unwrap();
    assert!(html.contains("Focus the window"));
    assert!(!html.contains("Focus after a delay"));
    assert!(!html.contains("delay ["));
    assert!(html.contains(
        r#"<h5>Returns</h5><dl><dt class="code return-value">Promise&lt;void&gt;</dt><dd>Resolves once focused</dd></dl>"#
    ));
}

#[test]
fn test_page_layout() {
    let tree = window_api_tree();
    let html = generate_api_page(&tree, &ApiPageOptions::default()).unwrap();

    assert!(html.starts_with("---\nlayout: api\nsectionid: docs\nclass: docs\n---\n<section id=\"Window\""));
    let order: Vec<usize> = [
        r#"<section id="Window" "#,
        r#"<section id="Window-interface" "#,
        r#"<section id="WindowOptions-interface" "#,
        r#"<section id="ShowEvent-event" "#,
    ]
    .iter()
    .map(|needle| html.find(needle).expect("type section present"))
    .collect();
    assert!(order.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_function_and_union_types_link_documented_names() {
    let tree = window_api_tree();
    let html = generate_api_page(&tree, &ApiPageOptions::default()).unwrap();
    assert!(html.contains(
        r##"<dt class="code argument">event [string | <a href="#ShowEvent-event">ShowEvent</a>]</dt><dd></dd>"##
    ));
    assert!(html.contains(
        r##"<dt class="code argument">listener [(event: <a href="#ShowEvent-event">ShowEvent</a>) => void]</dt><dd>Called with the event</dd>"##
    ));
    // Rectangle is not documented, so it stays plain text
    assert!(!html.contains("href=\"#Rectangle"));
}

#[test]
fn test_ignored_and_unknown_nodes_produce_nothing() {
    let tree = window_api_tree();
    let html = generate_api_page(&tree, &ApiPageOptions::default()).unwrap();
    assert!(!html.contains("internalState"));
    assert!(!html.contains("Registry"));
    assert!(!html.contains("Direction"));
    assert!(documented_types(&tree)
        .iter()
        .all(|t| t.kind() == Kind::Class || t.kind() == Kind::Interface));
    assert!(documented_types(&tree).iter().all(|t| t.name != "Registry"));
}

#[test]
fn test_cli_flow_through_files() {
    let temp = tempfile::tempdir().unwrap();
    let infile = write_json(temp.path(), "type-info.json", &window_api_json());
    let mut report = serde_json::Map::new();
    report.insert(
        "ssf.Window.focus".to_string(),
        serde_json::json!({"electron": {"passed": 3, "total": 4}, "openfin": {"passed": 0, "total": 0}, "browser": {"passed": 4, "total": 4}}),
    );
    report.insert(
        "ssf.Window.missing".to_string(),
        serde_json::json!({"electron": {"passed": 1, "total": 1}}),
    );
    let testfile = write_json(temp.path(), "test-report.json", &serde_json::Value::Object(report));

    let mut tree = load_reflection(&infile).unwrap();
    let report = load_report(&testfile).expect("report loads");
    let summary = merge_report(&mut tree, &report);
    assert_eq!(summary.unmatched, vec!["ssf.Window.missing".to_string()]);

    let html = generate_api_page(&tree, &ApiPageOptions::default()).unwrap();
    let written = write_api_page(temp.path(), &html).unwrap();
    assert_eq!(written, temp.path().join("api.html"));
    assert_eq!(std::fs::read_to_string(written).unwrap(), html);
}

#[test]
fn test_malformed_input_is_fatal() {
    let temp = tempfile::tempdir().unwrap();
    let infile = temp.path().join("type-info.json");
    std::fs::write(&infile, "{\"children\": [").unwrap();
    let err = load_reflection(&infile).unwrap_err();
    assert!(err.is_fatal());
}
