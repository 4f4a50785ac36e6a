//! Filters select elements, rules turn them into Markdown.

use crate::convert::{Context, Emitter};
use crate::node::NodeRef;

type EmitFn = Box<dyn Fn(&NodeRef, &Context, &mut Emitter<'_>) + Send + Sync>;
type MatchFn = Box<dyn Fn(&str, &NodeRef, &Context) -> bool + Send + Sync>;

/// Which elements a rule (or a removal) applies to.
///
/// Tag names are compared against the node's lower-cased name.
pub enum Filter {
    Tag(&'static str),
    AnyOf(&'static [&'static str]),
    /// Arbitrary test on tag, node and context
    When(MatchFn),
}

impl Filter {
    pub fn when<F>(test: F) -> Self
    where
        F: Fn(&str, &NodeRef, &Context) -> bool + Send + Sync + 'static,
    {
        Filter::When(Box::new(test))
    }

    pub fn matches(&self, tag: &str, node: &NodeRef, ctx: &Context) -> bool {
        match self {
            Filter::Tag(name) => *name == tag,
            Filter::AnyOf(names) => names.contains(&tag),
            Filter::When(test) => test(tag, node, ctx),
        }
    }
}

/// A filter paired with the code that writes the matched element.
pub struct Rule {
    pub filter: Filter,
    emit: EmitFn,
}

impl Rule {
    pub fn new<F>(filter: Filter, emit: F) -> Self
    where
        F: Fn(&NodeRef, &Context, &mut Emitter<'_>) + Send + Sync + 'static,
    {
        Self {
            filter,
            emit: Box::new(emit),
        }
    }

    pub fn for_tag<F>(tag: &'static str, emit: F) -> Self
    where
        F: Fn(&NodeRef, &Context, &mut Emitter<'_>) + Send + Sync + 'static,
    {
        Self::new(Filter::Tag(tag), emit)
    }

    pub fn for_tags<F>(tags: &'static [&'static str], emit: F) -> Self
    where
        F: Fn(&NodeRef, &Context, &mut Emitter<'_>) + Send + Sync + 'static,
    {
        Self::new(Filter::AnyOf(tags), emit)
    }

    /// Write `node` through this rule
    pub fn apply(&self, node: &NodeRef, ctx: &Context, out: &mut Emitter<'_>) {
        (self.emit)(node, ctx, out)
    }
}
