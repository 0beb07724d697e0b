//! Rule engine
//!
//! The engine walks an ordered rule list over a set of input nodes. For each
//! input node the first rule whose selector matches fires exactly once with
//! all of its matches; a node no rule matches produces nothing. Generators
//! recurse by calling [`MatchContext::runner`], which dispatches the same rule
//! list over a sub-tree, so the rule list is configuration and recursion
//! depth is bounded by [`EngineLimits`].
//!
//! Copyright (c) 2025 Reflectdoc Team
//! Licensed under the Apache-2.0 license

use super::markup::Markup;
use super::rule::Rule;
use crate::error::{Error, Result};
use crate::reflection::ReflectionNode;

/// Bounds on rule dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineLimits {
    /// Maximum nesting of `runner` re-dispatches
    pub max_depth: usize,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

/// Produces markup for a fired rule
pub trait Generator<A> {
    fn generate(&self, action: &A, ctx: &MatchContext<'_, A>) -> Result<Vec<Markup>>;
}

/// An ordered list of rules
#[derive(Debug, Clone)]
pub struct RuleEngine<A> {
    rules: Vec<Rule<A>>,
    limits: EngineLimits,
}

impl<A> Default for RuleEngine<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> RuleEngine<A> {
    /// Create an empty engine
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            limits: EngineLimits::default(),
        }
    }

    /// Append a rule; earlier rules take precedence
    pub fn add_rule(mut self, rule: Rule<A>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append multiple rules in order
    pub fn add_rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = Rule<A>>,
    {
        self.rules.extend(rules);
        self
    }

    pub fn with_limits(mut self, limits: EngineLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn rules(&self) -> &[Rule<A>] {
        &self.rules
    }

    /// Run the rules against `root`
    pub fn transform<'a>(
        &'a self,
        root: &'a ReflectionNode,
        generator: &'a dyn Generator<A>,
    ) -> Result<Vec<Markup>> {
        self.dispatch(&[root], generator, 0)
    }

    fn dispatch<'a>(
        &'a self,
        nodes: &[&'a ReflectionNode],
        generator: &'a dyn Generator<A>,
        depth: usize,
    ) -> Result<Vec<Markup>> {
        if depth > self.limits.max_depth {
            return Err(Error::transform(
                format!("Maximum rule depth {} exceeded", self.limits.max_depth),
                None,
            ));
        }

        let mut output = Vec::new();
        for &node in nodes {
            for rule in &self.rules {
                let matched = rule.selector.select(node)?;
                if matched.is_empty() {
                    continue;
                }

                tracing::trace!(rule = %rule.id, node = %node.name, matches = matched.len(), "Rule fired");
                let ctx = MatchContext {
                    rule,
                    matched,
                    engine: self,
                    generator,
                    depth,
                };
                let generated = generator
                    .generate(&rule.action, &ctx)
                    .map_err(|e| attribute_to_rule(e, &rule.id))?;
                output.extend(generated);
                break;
            }
        }
        Ok(output)
    }
}

fn attribute_to_rule(err: Error, rule_id: &str) -> Error {
    match err {
        Error::Transform { message, rule: None } => Error::Transform {
            message,
            rule: Some(rule_id.to_string()),
        },
        other => other,
    }
}

/// What a generator sees when its rule fires
pub struct MatchContext<'a, A> {
    rule: &'a Rule<A>,
    matched: Vec<&'a ReflectionNode>,
    engine: &'a RuleEngine<A>,
    generator: &'a dyn Generator<A>,
    depth: usize,
}

impl<'a, A> MatchContext<'a, A> {
    /// Every node the rule's selector matched, in document order
    pub fn matched(&self) -> &[&'a ReflectionNode] {
        &self.matched
    }

    /// The first matched node
    pub fn first(&self) -> Option<&'a ReflectionNode> {
        self.matched.first().copied()
    }

    pub fn rule_id(&self) -> &str {
        &self.rule.id
    }

    /// Re-dispatch the rule list over `nodes`, or over the matched nodes
    /// themselves when `None`
    pub fn runner(&self, nodes: Option<&[&'a ReflectionNode]>) -> Result<Vec<Markup>> {
        let targets = nodes.unwrap_or(&self.matched);
        self.engine.dispatch(targets, self.generator, self.depth + 1)
    }
}
