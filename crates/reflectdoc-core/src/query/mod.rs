//! Structural queries over the reflection tree
//!
//! Rules select nodes with a [`Selector`]: an ordered chain of steps built in
//! code rather than parsed from a path string. A selector evaluated against a
//! node yields every match in document order.
//!
//! ```
//! use reflectdoc_core::query::{Predicate, Selector};
//! use reflectdoc_core::reflection::{Kind, ReflectionNode};
//!
//! let mut root = ReflectionNode::new(Kind::Module, "ssf");
//! root.children.push(ReflectionNode::new(Kind::Class, "Window"));
//!
//! let classes = Selector::deep_children()
//!     .filter(Predicate::kind(Kind::Class))
//!     .select(&root)
//!     .unwrap();
//! assert_eq!(classes[0].name, "Window");
//! ```
//!
//! Copyright (c) 2025 Reflectdoc Team
//! Licensed under the Apache-2.0 license

pub mod predicate;
pub mod selector;

pub use predicate::{Flag, Predicate};
pub use selector::{Axis, QueryLimits, Step};

use crate::error::Result;
use crate::reflection::ReflectionNode;

/// A compiled chain of query steps
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    steps: Vec<Step>,
    limits: QueryLimits,
}

impl Selector {
    fn starting_at(axis: Axis) -> Self {
        Self {
            steps: vec![Step {
                axis,
                predicate: Predicate::Any,
                prune: None,
            }],
            limits: QueryLimits::default(),
        }
    }

    /// Start at the node the selector is evaluated against
    pub fn self_node() -> Self {
        Self::starting_at(Axis::SelfNode)
    }

    /// Start at the direct children of the evaluated node
    pub fn children() -> Self {
        Self::starting_at(Axis::Children)
    }

    /// Start at every descendant reachable through `children`
    pub fn deep_children() -> Self {
        Self::starting_at(Axis::DeepChildren)
    }

    /// Narrow the current step with an additional predicate
    pub fn filter(mut self, predicate: Predicate) -> Self {
        if let Some(step) = self.steps.last_mut() {
            let current = std::mem::replace(&mut step.predicate, Predicate::Any);
            step.predicate = current.and(predicate);
        }
        self
    }

    /// Continue to the direct children of the current matches that satisfy
    /// `predicate`
    pub fn then_children(mut self, predicate: Predicate) -> Self {
        self.steps.push(Step {
            axis: Axis::Children,
            predicate,
            prune: None,
        });
        self
    }

    /// Keep the current deep step out of any subtree whose root satisfies
    /// `predicate`
    pub fn prune(mut self, predicate: Predicate) -> Self {
        if let Some(step) = self.steps.last_mut() {
            step.prune = Some(match step.prune.take() {
                Some(current) => Predicate::Or(vec![current, predicate]),
                None => predicate,
            });
        }
        self
    }

    /// Override the evaluation limits
    pub fn with_limits(mut self, limits: QueryLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Every node matched from `root`, in document order
    pub fn select<'a>(&self, root: &'a ReflectionNode) -> Result<Vec<&'a ReflectionNode>> {
        selector::execute(&self.steps, vec![root], &self.limits)
    }

    /// First node matched from `root`
    pub fn select_first<'a>(&self, root: &'a ReflectionNode) -> Result<Option<&'a ReflectionNode>> {
        Ok(self.select(root)?.into_iter().next())
    }

    /// Whether the selector matches anything from `root`
    pub fn exists(&self, root: &ReflectionNode) -> Result<bool> {
        Ok(!self.select(root)?.is_empty())
    }
}
