//! Selector steps and their execution
//!
//! A selector is a chain of steps; each step moves along an axis of the tree
//! and keeps the nodes that satisfy its predicate. Results stay in document
//! order.
//!
//! Copyright (c) 2025 Reflectdoc Team
//! Licensed under the Apache-2.0 license

use super::predicate::Predicate;
use crate::error::{Error, Result};
use crate::reflection::ReflectionNode;

/// Direction a step moves from each input node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// The input node itself
    SelfNode,
    /// Direct members of the `children` sequence
    Children,
    /// Members of any `children` sequence at any depth below the input
    DeepChildren,
}

/// One step of a selector
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub axis: Axis,
    pub predicate: Predicate,
    /// Deep searches neither match nor descend into nodes satisfying this
    pub prune: Option<Predicate>,
}

/// Bounds on query evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    /// Maximum nesting depth visited by a deep search
    pub max_depth: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}

/// Execute a chain of steps starting from the given nodes
pub(crate) fn execute<'a>(
    steps: &[Step],
    inputs: Vec<&'a ReflectionNode>,
    limits: &QueryLimits,
) -> Result<Vec<&'a ReflectionNode>> {
    let mut current = inputs;
    for step in steps {
        let mut next = Vec::new();
        for node in current {
            match step.axis {
                Axis::SelfNode => {
                    if step.predicate.matches(node) {
                        next.push(node);
                    }
                }
                Axis::Children => {
                    next.extend(node.children.iter().filter(|c| step.predicate.matches(c)));
                }
                Axis::DeepChildren => {
                    collect_deep(node, step, 0, limits, &mut next)?;
                }
            }
        }
        if next.is_empty() {
            return Ok(next);
        }
        current = next;
    }
    Ok(current)
}

fn collect_deep<'a>(
    node: &'a ReflectionNode,
    step: &Step,
    depth: usize,
    limits: &QueryLimits,
    out: &mut Vec<&'a ReflectionNode>,
) -> Result<()> {
    if depth >= limits.max_depth {
        return Err(Error::Query {
            message: "Maximum depth exceeded in deep search".to_string(),
            depth,
        });
    }
    for child in &node.children {
        if step.prune.as_ref().is_some_and(|prune| prune.matches(child)) {
            continue;
        }
        if step.predicate.matches(child) {
            out.push(child);
        }
        collect_deep(child, step, depth + 1, limits, out)?;
    }
    Ok(())
}
