//! Rule-based transform of the reflection tree into an HTML API page
//!
//! A list of (selector, action) rules is matched against the reflection
//! tree. Each fired rule hands its action and matches to a [`Generator`],
//! which builds generic [`Markup`] and may re-dispatch the rule list over a
//! sub-tree through [`MatchContext::runner`].
//!
//! # Module Organization
//!
//! - [`markup`] - Generic element tree and its HTML serialization
//! - [`rule`] - Rules and the fluent rule builder
//! - [`engine`] - Rule dispatch and the match context
//! - [`format`] - Type, comment and prose formatting for the page
//! - [`api_page`] - The rule set and generator for the API page
//!
//! # Examples
//!
//! ```
//! use reflectdoc_core::reflection::parse_reflection;
//! use reflectdoc_core::transform::{generate_api_page, ApiPageOptions};
//!
//! let tree = parse_reflection(r#"{
//!     "name": "ssf",
//!     "children": [{"name": "Window", "kindString": "Class"}]
//! }"#).unwrap();
//!
//! let page = generate_api_page(&tree, &ApiPageOptions::default()).unwrap();
//! assert!(page.starts_with("---\nlayout: api\n"));
//! assert!(page.contains(r#"<section id="Window" class="docs-title"><h2>Window</h2>"#));
//! ```
//!
//! Copyright (c) 2025 Reflectdoc Team
//! Licensed under the Apache-2.0 license

pub mod api_page;
pub mod engine;
pub mod format;
pub mod markup;
pub mod rule;

#[cfg(test)]
mod tests;

pub use api_page::{
    documented_types, generate_api_page, rules_for, ApiAction, ApiFrontMatter, ApiPageOptions,
    DocumentedType, TypeCategory,
};
pub use engine::{EngineLimits, Generator, MatchContext, RuleEngine};
pub use markup::{parent_element, text_element, to_html, GenericElement, Markup};
pub use rule::{Rule, RuleBuilder};
