//! Node predicates for structural queries
//!
//! Predicates are evaluated against a single reflection node with
//! short-circuit `And`/`Or`. They replace the inline `{condition}` filters of
//! a string path language with a typed expression tree.
//!
//! Copyright (c) 2025 Reflectdoc Team
//! Licensed under the Apache-2.0 license

use crate::reflection::{Kind, ReflectionNode};

/// Boolean attributes a predicate can test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Static,
    Optional,
}

/// A condition over one reflection node
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Always true
    Any,
    /// `kindString` equals the given kind
    Kind(Kind),
    /// `name` equals the given string
    Name(String),
    /// `name` ends with the given suffix
    NameEndsWith(String),
    /// Flag equals the expected value (`false` selects the negation)
    Flag(Flag, bool),
    /// Comment carries a tag with exactly this name
    Tagged(String),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn kind(kind: Kind) -> Self {
        Predicate::Kind(kind)
    }

    /// Any of the given kinds
    pub fn kinds<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = Kind>,
    {
        Predicate::Or(kinds.into_iter().map(Predicate::Kind).collect())
    }

    pub fn name(name: impl Into<String>) -> Self {
        Predicate::Name(name.into())
    }

    pub fn flag(flag: Flag, expected: bool) -> Self {
        Predicate::Flag(flag, expected)
    }

    /// Nodes that are not tagged `ignore`
    pub fn not_ignored() -> Self {
        Predicate::Not(Box::new(Predicate::Tagged(
            crate::reflection::IGNORE_TAG.to_string(),
        )))
    }

    /// Conjunction with another predicate
    pub fn and(self, other: Predicate) -> Self {
        match self {
            Predicate::Any => other,
            Predicate::And(mut all) => {
                all.push(other);
                Predicate::And(all)
            }
            first => Predicate::And(vec![first, other]),
        }
    }

    /// Evaluate the predicate against a node
    pub fn matches(&self, node: &ReflectionNode) -> bool {
        match self {
            Predicate::Any => true,
            Predicate::Kind(kind) => &node.kind == kind,
            Predicate::Name(name) => &node.name == name,
            Predicate::NameEndsWith(suffix) => node.name.ends_with(suffix.as_str()),
            Predicate::Flag(flag, expected) => flag_value(node, *flag) == *expected,
            Predicate::Tagged(tag) => node.has_tag(tag),
            Predicate::And(all) => all.iter().all(|p| p.matches(node)),
            Predicate::Or(any) => any.iter().any(|p| p.matches(node)),
            Predicate::Not(inner) => !inner.matches(node),
        }
    }
}

fn flag_value(node: &ReflectionNode, flag: Flag) -> bool {
    match flag {
        Flag::Static => node.flags.is_static,
        Flag::Optional => node.flags.is_optional,
    }
}
