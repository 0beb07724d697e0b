//! Per-type markdown renderer
//!
//! Walks the reflection tree by node kind and accumulates one markdown
//! document per class (`Window`) and interface (`IWindow`). Unlike the API
//! page, every signature of a method is rendered and test results are looked
//! up in the report directly by key rather than merged into the tree.
//!
//! # Examples
//!
//! ```
//! use reflectdoc_core::markdown::{MarkdownOptions, MarkdownRenderer};
//! use reflectdoc_core::reflection::parse_reflection;
//!
//! let tree = parse_reflection(r#"{
//!     "name": "ssf",
//!     "children": [{"name": "Window", "kindString": "Class"}]
//! }"#).unwrap();
//!
//! let documents = MarkdownRenderer::new(MarkdownOptions::default()).render(&tree);
//! assert_eq!(documents.get("Window"), Some("# Window  \n"));
//! ```
//!
//! Copyright (c) 2025 Reflectdoc Team
//! Licensed under the Apache-2.0 license

pub mod templates;
pub mod types;

pub use templates::Template;
pub use types::{parameter_list, type_string};

use crate::reflection::{Kind, ReflectionNode};
use crate::report::TestReport;

/// Namespace prefixed to report keys
pub const DEFAULT_NAMESPACE: &str = "ssf";

/// Prefix of the links on the navigation page
pub const DEFAULT_LINK_PREFIX: &str = "/ContainerJS/docs";

/// Options for the markdown renderer and site writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownOptions {
    pub namespace: String,
    pub link_prefix: String,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            link_prefix: DEFAULT_LINK_PREFIX.to_string(),
        }
    }
}

/// Markdown documents keyed by type, in the order they were first opened
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSet {
    entries: Vec<(String, String)>,
}

impl DocumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a document with its heading; re-opening a key resets its text
    /// but keeps its position
    pub fn open(&mut self, key: &str, heading: String) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, body)) => *body = heading,
            None => self.entries.push((key.to_string(), heading)),
        }
    }

    /// Append to an open document; returns false when `key` was never opened
    pub fn append(&mut self, key: &str, text: &str) -> bool {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, body)) => {
                body.push_str(text);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, body)| body.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, b)| (k.as_str(), b.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Renders the reflection tree into a [`DocumentSet`]
pub struct MarkdownRenderer<'r> {
    report: Option<&'r TestReport>,
    options: MarkdownOptions,
}

impl<'r> MarkdownRenderer<'r> {
    pub fn new(options: MarkdownOptions) -> Self {
        Self {
            report: None,
            options,
        }
    }

    /// Use a test report for member badges
    pub fn with_report(mut self, report: &'r TestReport) -> Self {
        self.report = Some(report);
        self
    }

    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }

    /// Render every top-level child of `root`
    pub fn render(&self, root: &ReflectionNode) -> DocumentSet {
        let mut documents = DocumentSet::new();
        for child in &root.children {
            self.render_node(child, None, &mut documents);
        }
        documents
    }

    fn render_node(&self, node: &ReflectionNode, context: Option<&str>, documents: &mut DocumentSet) {
        if node.is_ignored() {
            tracing::trace!(name = %node.name, kind = %node.kind, "Skipping ignored node");
            return;
        }

        match node.kind {
            Kind::Module => {
                for child in &node.children {
                    self.render_node(child, None, documents);
                }
            }
            Kind::Class => {
                documents.open(&node.name, format!("# {}  \n", node.name));
                for child in &node.children {
                    self.render_node(child, Some(&node.name), documents);
                }
            }
            Kind::Interface => {
                let key = format!("I{}", node.name);
                documents.open(&key, format!("# {} (Interface)  \n", node.name));
                for child in &node.children {
                    self.render_node(child, Some(&key), documents);
                }
            }
            Kind::Method | Kind::Constructor | Kind::Property => match context {
                Some(key) => self.render_member(node, key, documents),
                None => {
                    tracing::debug!(name = %node.name, kind = %node.kind, "Member outside a class or interface, skipping");
                }
            },
            _ => {}
        }
    }

    fn render_member(&self, node: &ReflectionNode, key: &str, documents: &mut DocumentSet) {
        let mut text = String::new();
        match node.kind {
            Kind::Method => {
                let report_key = format!("{}.{}.{}", self.options.namespace, key, node.name);
                let marker = if node.flags.is_static { " (static)" } else { "" };
                text.push_str(&format!(
                    "#### {}{}  {}\n",
                    node.name,
                    marker,
                    self.badges(&node.name, &report_key)
                ));
                self.push_signatures(node, &mut text);
            }
            Kind::Constructor => {
                let report_key = format!("{}.{}()", self.options.namespace, key);
                text.push_str(&format!(
                    "#### {}  {}\n",
                    node.name,
                    self.badges(&node.name, &report_key)
                ));
                self.push_signatures(node, &mut text);
            }
            Kind::Property => {
                text.push_str(&format!(
                    "**{}{}**: `{}`  \n",
                    node.name,
                    if node.flags.is_optional { "?" } else { "" },
                    type_string(node.type_.as_ref())
                ));
                if let Some(short_text) = node.short_text().filter(|t| !t.is_empty()) {
                    text.push_str(&format!("{}  \n", short_text));
                }
            }
            _ => return,
        }
        documents.append(key, &text);
    }

    fn push_signatures(&self, node: &ReflectionNode, text: &mut String) {
        for signature in node.signatures.iter().filter(|s| !s.is_ignored()) {
            let return_type = type_string(signature.type_.as_ref());
            text.push_str(&format!(
                "`{}({}) => {}`  \n",
                signature.name,
                parameter_list(&signature.parameters).join(", "),
                return_type
            ));

            if let Some(comment) = &signature.comment {
                if let Some(short_text) = comment.short_text.as_deref().filter(|t| !t.is_empty()) {
                    text.push_str(&format!("{}  \n", short_text));
                }
                if let Some(returns) = comment.returns.as_deref().filter(|t| !t.is_empty()) {
                    text.push_str(&format!("**Returns:** `{}` - {}  \n", return_type, returns));
                }
            }
        }
    }

    fn badges(&self, name: &str, report_key: &str) -> String {
        match self.report.and_then(|report| report.get(report_key)) {
            Some(entry) => Template::result_badges(name, |env| entry.get(env)),
            None => Template::default_badges(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::{Comment, CommentTag, Type};
    use crate::report::{EnvironmentResults, TestResult};
    use pretty_assertions::assert_eq;

    fn signature(name: &str, short_text: &str) -> ReflectionNode {
        let mut node = ReflectionNode::new(Kind::CallSignature, name);
        node.type_ = Some(Type::intrinsic("void"));
        node.comment = Some(Comment {
            short_text: Some(short_text.to_string()),
            ..Comment::default()
        });
        node
    }

    fn ignored(mut node: ReflectionNode) -> ReflectionNode {
        node.comment = Some(Comment {
            tags: vec![CommentTag {
                tag: "ignore".to_string(),
                text: None,
            }],
            ..Comment::default()
        });
        node
    }

    #[test]
    fn test_document_set_reopen_keeps_position() {
        let mut documents = DocumentSet::new();
        documents.open("Window", "# Window  \n".to_string());
        documents.open("IWindow", "# Window (Interface)  \n".to_string());
        assert!(documents.append("Window", "extra"));
        documents.open("Window", "# Window  \n".to_string());
        assert!(!documents.append("Missing", "text"));

        assert_eq!(documents.keys().collect::<Vec<_>>(), vec!["Window", "IWindow"]);
        assert_eq!(documents.get("Window"), Some("# Window  \n"));
    }

    #[test]
    fn test_method_renders_every_signature() {
        let mut method = ReflectionNode::new(Kind::Method, "show");
        method.signatures = vec![signature("show", "Show it"), signature("show", "Show it again")];
        let mut class = ReflectionNode::new(Kind::Class, "Window");
        class.children.push(method);
        let mut root = ReflectionNode::new(Kind::Module, "ssf");
        root.children.push(class);

        let documents = MarkdownRenderer::new(MarkdownOptions::default()).render(&root);
        let body = documents.get("Window").unwrap();
        assert_eq!(body.matches("`show() => void`  \n").count(), 2);
        assert!(body.contains("Show it  \n"));
        assert!(body.contains("Show it again  \n"));
    }

    #[test]
    fn test_ignored_class_and_descendants() {
        let mut class = ignored(ReflectionNode::new(Kind::Class, "Hidden"));
        class.children.push(ReflectionNode::new(Kind::Property, "secret"));
        let mut module = ReflectionNode::new(Kind::Module, "\"hidden\"");
        module.children.push(class);
        let mut root = ReflectionNode::new(Kind::Module, "ssf");
        root.children.push(module);

        let documents = MarkdownRenderer::new(MarkdownOptions::default()).render(&root);
        assert!(documents.is_empty());
    }

    #[test]
    fn test_badges_use_namespace_and_document_key() {
        let mut report = TestReport::new();
        report.insert(
            "ns.Window.focus".to_string(),
            EnvironmentResults {
                electron: Some(TestResult::new(4, 4)),
                openfin: Some(TestResult::new(1, 4)),
                browser: Some(TestResult::new(0, 0)),
            },
        );
        let mut class = ReflectionNode::new(Kind::Class, "Window");
        class.children.push(ReflectionNode::new(Kind::Method, "focus"));
        class.children.push(ReflectionNode::new(Kind::Method, "blur"));
        let mut root = ReflectionNode::new(Kind::Module, "ssf");
        root.children.push(class);

        let options = MarkdownOptions {
            namespace: "ns".to_string(),
            ..MarkdownOptions::default()
        };
        let documents = MarkdownRenderer::new(options).with_report(&report).render(&root);
        let body = documents.get("Window").unwrap();
        assert!(body.contains(
            "#### focus  ![focus](https://img.shields.io/badge/Electron-4%2F4-brightgreen.svg)  \
             ![focus](https://img.shields.io/badge/OpenFin-1%2F4-yellow.svg)  \
             ![focus](https://img.shields.io/badge/Browser-0%2F0-lightgrey.svg) \n"
        ));
        assert!(body.contains("#### blur  ![blur](https://img.shields.io/badge/Electron-no_test_data-lightgrey.svg)"));
    }

    #[test]
    fn test_member_outside_type_is_skipped() {
        let mut root = ReflectionNode::new(Kind::Module, "ssf");
        root.children.push(ReflectionNode::new(Kind::Method, "orphan"));
        let documents = MarkdownRenderer::new(MarkdownOptions::default()).render(&root);
        assert!(documents.is_empty());
    }
}
