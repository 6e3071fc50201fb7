//! Compiled templates.

use emjay_ir::Value;
use emjay_parse::{parse, ParseError};
use tracing::debug;

use crate::build::build;
use crate::placeholder::Placeholders;
use crate::strip_indent::strip_indent;
use crate::substitute::substitute;

/// A template compiled from its fragments, ready to render.
#[derive(Clone, Debug, PartialEq)]
pub enum Template {
    /// No interpolation slots: every render returns this same tree.
    Static(Value),
    /// Tree with placeholder tokens, substituted on every render.
    Dynamic {
        tree: Value,
        placeholders: Placeholders,
    },
}

impl Template {
    /// Encode, parse and build `fragments`.
    #[tracing::instrument(level = "debug", skip_all, fields(fragments = fragments.len()))]
    pub fn compile(fragments: &[&str]) -> Result<Template, ParseError> {
        let placeholders = Placeholders::for_fragments(fragments);
        let text = strip_indent(&placeholders.encode(fragments));
        let tree = build(&parse(&text)?);

        debug!(slots = placeholders.slots(), "compiled template");
        if placeholders.slots() == 0 {
            Ok(Template::Static(tree))
        } else {
            Ok(Template::Dynamic { tree, placeholders })
        }
    }

    /// Render with `interpolations`, positionally aligned to the slots.
    ///
    /// Static templates ignore `interpolations` and return their tree;
    /// the returned node is pointer-equal on every call.
    pub fn render(&self, interpolations: &[Value]) -> Value {
        match self {
            Template::Static(tree) => tree.clone(),
            Template::Dynamic { tree, placeholders } => {
                substitute(tree, interpolations, *placeholders)
            }
        }
    }

    /// The built tree, with placeholder tokens for dynamic templates.
    pub fn tree(&self) -> &Value {
        match self {
            Template::Static(tree) | Template::Dynamic { tree, .. } => tree,
        }
    }

    /// Number of interpolation slots.
    pub fn slots(&self) -> usize {
        match self {
            Template::Static(_) => 0,
            Template::Dynamic { placeholders, .. } => placeholders.slots(),
        }
    }
}
