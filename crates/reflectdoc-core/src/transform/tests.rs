//! Tests for the API page rule set
//!
//! Copyright (c) 2025 Reflectdoc Team
//! Licensed under the Apache-2.0 license

use super::*;
use crate::reflection::{parse_reflection, ReflectionNode};
use crate::report::{merge_report, EnvironmentResults, TestReport, TestResult};
use serde_json::json;

fn window_tree() -> ReflectionNode {
    let value = json!({
        "name": "ssf",
        "children": [{
            "name": "\"window\"",
            "kindString": "Module",
            "children": [
                {
                    "name": "Window",
                    "kindString": "Class",
                    "comment": {"shortText": "A window"},
                    "children": [
                        {
                            "name": "constructor",
                            "kindString": "Constructor",
                            "signatures": [{
                                "name": "new Window",
                                "kindString": "Constructor signature",
                                "type": {"type": "reference", "name": "Window"}
                            }]
                        },
                        {
                            "name": "id",
                            "kindString": "Property",
                            "type": {"type": "intrinsic", "name": "string"}
                        },
                        {
                            "name": "focus",
                            "kindString": "Method",
                            "signatures": [
                                {
                                    "name": "focus",
                                    "kindString": "Call signature",
                                    "comment": {"shortText": "Focus", "returns": "nothing"},
                                    "type": {"type": "intrinsic", "name": "void"}
                                },
                                {
                                    "name": "focus",
                                    "kindString": "Call signature",
                                    "comment": {"shortText": "Second overload"},
                                    "type": {"type": "intrinsic", "name": "void"}
                                }
                            ]
                        },
                        {
                            "name": "getCurrentWindow",
                            "kindString": "Method",
                            "flags": {"isStatic": true},
                            "signatures": [{
                                "name": "getCurrentWindow",
                                "kindString": "Call signature",
                                "parameters": [{
                                    "name": "options",
                                    "kindString": "Parameter",
                                    "type": {"type": "reference", "name": "WindowOptions"},
                                    "comment": {"text": "Window options"}
                                }],
                                "type": {"type": "reference", "name": "Window"}
                            }]
                        },
                        {
                            "name": "internal",
                            "kindString": "Method",
                            "comment": {"tags": [{"tag": "ignore"}]},
                            "signatures": [{"name": "internal", "kindString": "Call signature"}]
                        }
                    ]
                },
                {
                    "name": "Window",
                    "kindString": "Interface",
                    "children": [{
                        "name": "title",
                        "kindString": "Property",
                        "flags": {"isOptional": true},
                        "type": {"type": "intrinsic", "name": "string"}
                    }]
                },
                {"name": "WindowOptions", "kindString": "Interface"},
                {
                    "name": "ShowEvent",
                    "kindString": "Interface",
                    "children": [{"name": "show", "kindString": "Property"}]
                },
                {
                    "name": "Hidden",
                    "kindString": "Class",
                    "comment": {"tags": [{"tag": "ignore"}]}
                }
            ]
        }]
    });
    parse_reflection(&value.to_string()).unwrap()
}

fn page(tree: &ReflectionNode) -> String {
    generate_api_page(tree, &ApiPageOptions::default()).unwrap()
}

#[test]
fn test_documented_types_order_and_ignore() {
    let types = documented_types(&window_tree());
    assert_eq!(
        types,
        vec![
            DocumentedType::new("Window", TypeCategory::Class),
            DocumentedType::new("Window", TypeCategory::Interface),
            DocumentedType::new("WindowOptions", TypeCategory::Interface),
            DocumentedType::new("ShowEvent", TypeCategory::Event),
        ]
    );
}

#[test]
fn test_sections_follow_fixed_order() {
    let html = page(&window_tree());
    let position = |needle: &str| {
        html.find(needle)
            .unwrap_or_else(|| panic!("missing {needle}"))
    };

    assert!(html.contains(r#"<section id="Window" class="docs-title"><h2>Window</h2><p>A window</p><h3>Static Methods</h3><section class="static methods">"#));
    assert!(position("<h3>Static Methods</h3>") < position("<h3>Constructors</h3>"));
    assert!(position("<h3>Constructors</h3>") < position("<h3>Properties</h3>"));
    assert!(position("<h3>Properties</h3>") < position("<h3>Methods</h3>"));
}

#[test]
fn test_empty_categories_have_no_heading() {
    let html = page(&window_tree());
    assert!(html.contains(
        r#"<section id="WindowOptions-interface" class="docs-title"><h2>WindowOptions</h2><p></p></section>"#
    ));
}

#[test]
fn test_event_interface_sections() {
    let html = page(&window_tree());
    assert!(html.contains(r#"<section id="ShowEvent-event" class="docs-title"><h2>ShowEvent</h2><p></p><h3>Events</h3><section class="events">"#));
    assert!(!html.contains("ShowEvent-interface\" class=\"docs-title\""));
}

#[test]
fn test_class_and_interface_of_same_name_do_not_collide() {
    let html = page(&window_tree());
    assert_eq!(html.matches(r#"<section id="Window" class="docs-title">"#).count(), 1);
    assert_eq!(html.matches(r#"<section id="Window-interface" class="docs-title">"#).count(), 1);
    assert!(html.contains(
        r#"<section class="property" id="title"><h4 class="property-name">title</h4><p></p></section>"#
    ));
}

#[test]
fn test_only_first_signature_is_documented() {
    let html = page(&window_tree());
    assert!(html.contains(
        r#"<section class="method"><section><h4 class="method-name" id="Window-focus">focus</h4><p>Focus</p><h5>Returns</h5><dl><dt class="code return-value">void</dt><dd>nothing</dd></dl></section></section>"#
    ));
    assert!(!html.contains("Second overload"));
    assert_eq!(html.matches(r#"id="Window-focus""#).count(), 1);
}

#[test]
fn test_constructor_section() {
    let html = page(&window_tree());
    assert!(html.contains(
        r##"<h3>Constructors</h3><section class="constructors"><section class="method"><section><h4 class="method-name" id="Window-new Window">new Window</h4><p></p><h5>Returns</h5><dl><dt class="code return-value"><a href="#Window">Window</a></dt><dd></dd></dl></section></section></section>"##
    ));
}

#[test]
fn test_parameters_and_links() {
    let html = page(&window_tree());
    assert!(html.contains(
        r##"<h5>Arguments</h5><dl><dt class="code argument">options [<a href="#WindowOptions-interface">WindowOptions</a>]</dt><dd>Window options</dd></dl>"##
    ));
}

#[test]
fn test_ignored_nodes_are_excluded() {
    let html = page(&window_tree());
    assert!(!html.contains("internal"));
    assert!(!html.contains("Hidden"));
}

#[test]
fn test_merged_results_render_on_first_signature() {
    let mut tree = window_tree();
    let mut report = TestReport::new();
    report.insert(
        "ssf.Window.focus".to_string(),
        EnvironmentResults {
            electron: Some(TestResult::new(3, 4)),
            openfin: Some(TestResult::new(0, 0)),
            browser: Some(TestResult::new(4, 4)),
        },
    );
    report.insert(
        "ssf.Window.id".to_string(),
        EnvironmentResults {
            electron: Some(TestResult::new(1, 2)),
            ..EnvironmentResults::default()
        },
    );
    merge_report(&mut tree, &report);

    let html = page(&tree);
    assert!(html.contains(
        r#"<h4 class="method-name" id="Window-focus">focus</h4><section class="test-results"><h5 class="test-result-title">Tests</h5><span class="test-result test-color-75">7/8</span>"#
    ));
    assert!(html.contains(r#"<h5 class="test-result-title">OpenFin</h5><span class="test-result ">0/0</span>"#));
    assert!(html.contains(
        r#"<h4 class="property-name">id</h4><section class="test-results"><h5 class="test-result-title">Tests</h5><span class="test-result test-color-50">1/2</span>"#
    ));
    // the method wrapper itself does not repeat the results
    assert_eq!(html.matches(r#"<section class="test-results">"#).count(), 2);
}

#[test]
fn test_constructor_results_render_on_first_signature() {
    let mut tree = window_tree();
    let mut report = TestReport::new();
    report.insert(
        "ssf.Window()".to_string(),
        EnvironmentResults {
            electron: Some(TestResult::new(5, 5)),
            ..EnvironmentResults::default()
        },
    );
    assert_eq!(merge_report(&mut tree, &report).attached, 1);

    let html = page(&tree);
    assert!(html.contains(
        r#"<h4 class="method-name" id="Window-new Window">new Window</h4><section class="test-results"><h5 class="test-result-title">Tests</h5><span class="test-result test-color-100">5/5</span>"#
    ));
}

#[test]
fn test_ignored_signatures_and_parameters_are_excluded() {
    let tree = parse_reflection(
        &json!({
            "name": "ssf",
            "children": [{
                "name": "Window",
                "kindString": "Class",
                "children": [
                    {
                        "name": "secret",
                        "kindString": "Method",
                        "signatures": [{
                            "name": "secret",
                            "kindString": "Call signature",
                            "comment": {"shortText": "SECRET_TEXT", "tags": [{"tag": "ignore"}]},
                            "type": {"type": "intrinsic", "name": "void"}
                        }]
                    },
                    {
                        "name": "open",
                        "kindString": "Method",
                        "signatures": [{
                            "name": "open",
                            "kindString": "Call signature",
                            "parameters": [
                                {
                                    "name": "url",
                                    "kindString": "Parameter",
                                    "type": {"type": "intrinsic", "name": "string"}
                                },
                                {
                                    "name": "hiddenParam",
                                    "kindString": "Parameter",
                                    "comment": {"tags": [{"tag": "ignore"}]},
                                    "type": {"type": "intrinsic", "name": "string"}
                                }
                            ],
                            "type": {"type": "intrinsic", "name": "void"}
                        }]
                    },
                    {
                        "name": "close",
                        "kindString": "Method",
                        "signatures": [{
                            "name": "close",
                            "kindString": "Call signature",
                            "parameters": [{
                                "name": "force",
                                "kindString": "Parameter",
                                "comment": {"tags": [{"tag": "ignore"}]}
                            }]
                        }]
                    }
                ]
            }]
        })
        .to_string(),
    )
    .unwrap();

    let html = page(&tree);
    assert!(!html.contains("SECRET_TEXT"));
    assert!(!html.contains(r#"id="Window-secret""#));
    assert!(!html.contains("hiddenParam"));
    assert!(html.contains(
        r#"<h5>Arguments</h5><dl><dt class="code argument">url [string]</dt><dd></dd></dl>"#
    ));
    assert!(html.contains(r#"<h4 class="method-name" id="Window-close">close</h4><p></p><h5>Returns</h5>"#));
    assert_eq!(html.matches(r#"<section class="method">"#).count(), 2);
}

#[test]
fn test_types_under_ignored_modules_render_once() {
    let tree = parse_reflection(
        &json!({
            "name": "ssf",
            "children": [
                {
                    "name": "\"internal\"",
                    "kindString": "Module",
                    "comment": {"tags": [{"tag": "ignore"}]},
                    "children": [{
                        "name": "Window",
                        "kindString": "Class",
                        "comment": {"shortText": "Internal copy"}
                    }]
                },
                {
                    "name": "\"window\"",
                    "kindString": "Module",
                    "children": [{
                        "name": "Window",
                        "kindString": "Class",
                        "comment": {"shortText": "Public copy"}
                    }]
                }
            ]
        })
        .to_string(),
    )
    .unwrap();

    let html = page(&tree);
    assert_eq!(html.matches(r#"<section id="Window" class="docs-title">"#).count(), 1);
    assert!(html.contains("Public copy"));
    assert!(!html.contains("Internal copy"));
}

#[test]
fn test_event_links_target_event_sections() {
    let tree = parse_reflection(
        &json!({
            "name": "ssf",
            "children": [
                {
                    "name": "Window",
                    "kindString": "Class",
                    "children": [{
                        "name": "lastShown",
                        "kindString": "Method",
                        "signatures": [{
                            "name": "lastShown",
                            "kindString": "Call signature",
                            "type": {"type": "reference", "name": "ShowEvent"}
                        }]
                    }]
                },
                {"name": "ShowEvent", "kindString": "Interface"}
            ]
        })
        .to_string(),
    )
    .unwrap();

    let html = page(&tree);
    assert!(html.contains(r#"<section id="ShowEvent-event" class="docs-title">"#));
    assert!(html.contains(
        r##"<dt class="code return-value"><a href="#ShowEvent-event">ShowEvent</a></dt>"##
    ));
}

#[test]
fn test_unknown_kinds_are_unmatched() {
    let tree = parse_reflection(
        &json!({
            "name": "ssf",
            "children": [{
                "name": "Window",
                "kindString": "Class",
                "children": [{"name": "Direction", "kindString": "Enumeration"}]
            }]
        })
        .to_string(),
    )
    .unwrap();
    let html = page(&tree);
    assert!(!html.contains("Direction"));
    assert!(html.ends_with(r#"<section id="Window" class="docs-title"><h2>Window</h2><p></p></section>"#));
}

#[test]
fn test_engine_depth_limit_is_configurable() {
    let options = ApiPageOptions {
        limits: EngineLimits { max_depth: 1 },
        ..ApiPageOptions::default()
    };
    let err = generate_api_page(&window_tree(), &options).unwrap_err();
    assert!(matches!(err, crate::error::Error::Transform { .. }));
}
