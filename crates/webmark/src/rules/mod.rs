//! Rule system for HTML to Markdown conversion.

mod markdown;
mod rule;

use markdown::markdown_rules;
pub use rule::{Filter, Rule};

use crate::convert::Context;
use crate::node::NodeRef;

/// The fixed dispatch table used by the formatter
pub struct Rules {
    /// Element rules, first match wins
    rules: Vec<Rule>,
    /// Remove rules (element and its subtree emit nothing)
    remove_rules: Vec<Filter>,
}

impl Rules {
    /// Create the built-in rule table
    pub fn new() -> Self {
        Self {
            rules: markdown_rules(),
            remove_rules: vec![Filter::AnyOf(&["script", "style", "noscript"])],
        }
    }

    /// Find the rule for a node
    pub fn for_node(&self, node: &NodeRef, ctx: &Context) -> Option<&Rule> {
        let tag = node.tag_name();
        self.rules
            .iter()
            .find(|rule| rule.filter.matches(tag, node, ctx))
    }

    /// Check if a node and its subtree should be dropped
    pub fn should_remove(&self, node: &NodeRef, ctx: &Context) -> bool {
        let tag = node.tag_name();
        self.remove_rules
            .iter()
            .any(|filter| filter.matches(tag, node, ctx))
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}
