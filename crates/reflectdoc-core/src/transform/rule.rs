//! Transform rules and their builder
//!
//! Copyright (c) 2025 Reflectdoc Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::query::Selector;

/// A single rewrite rule: when `selector` matches from an input node, the
/// generator is invoked with `action`
#[derive(Debug, Clone, PartialEq)]
pub struct Rule<A> {
    /// Identifier used in logs and errors
    pub id: String,
    pub selector: Selector,
    pub action: A,
}

impl<A> Rule<A> {
    pub fn new(id: impl Into<String>, selector: Selector, action: A) -> Self {
        Self {
            id: id.into(),
            selector,
            action,
        }
    }
}

/// Builder for creating rules
pub struct RuleBuilder<A> {
    id: String,
    selector: Option<Selector>,
    action: Option<A>,
}

impl<A> RuleBuilder<A> {
    /// Create a new rule builder
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            selector: None,
            action: None,
        }
    }

    /// Set the selector
    pub fn selector(mut self, selector: Selector) -> Self {
        self.selector = Some(selector);
        self
    }

    /// Set the action handed to the generator
    pub fn action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Build the rule
    pub fn build(self) -> Result<Rule<A>> {
        let selector = self.selector.ok_or_else(|| Error::Configuration {
            message: format!("Rule '{}' has no selector", self.id),
        })?;
        let action = self.action.ok_or_else(|| Error::Configuration {
            message: format!("Rule '{}' has no action", self.id),
        })?;

        Ok(Rule {
            id: self.id,
            selector,
            action,
        })
    }
}
