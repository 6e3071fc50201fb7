//! Virtual nodes.
//!
//! The shape mirrors what the rendering library diffs: `tag`, `key`,
//! `attrs`, `children`, plus reserved slots (`text`, `dom`, `dom_size`,
//! `state`, `events`, `instance`) that emjay always leaves empty for the
//! renderer to fill in.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::{Opaque, Value};

/// Tag of a node grouping several children without an element.
pub const FRAGMENT_TAG: &str = "[";

/// Tag of a raw text node.
pub const TEXT_TAG: &str = "#";

/// Attribute dictionary, in insertion order.
pub type Attrs = IndexMap<String, Value, FxBuildHasher>;

/// A virtual DOM node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VNode {
    /// Element name, [`FRAGMENT_TAG`] or [`TEXT_TAG`].
    pub tag: Option<String>,
    /// Identity hint for list diffing, copied from `attrs.key`.
    pub key: Option<Value>,
    /// `None` means "no attributes", which the renderer fast-paths.
    pub attrs: Option<Attrs>,
    pub children: Option<Children>,
    pub text: Option<String>,
    pub dom: Option<Opaque>,
    pub dom_size: Option<usize>,
    pub state: Option<Opaque>,
    pub events: Option<Opaque>,
    pub instance: Option<Opaque>,
}

/// Node content: a text run, or a sequence of child values.
///
/// Sequence members are usually [`Value::Node`]s, but after substitution
/// they may also be text spans (`Value::Str`) and raw interpolations,
/// which the renderer normalizes itself.
#[derive(Clone, Debug, PartialEq)]
pub enum Children {
    Text(String),
    List(Vec<Value>),
}

impl Children {
    pub fn is_empty(&self) -> bool {
        match self {
            Children::Text(_) => false,
            Children::List(items) => items.is_empty(),
        }
    }
}

impl VNode {
    /// Create a node; `key` is taken from `attrs`.
    pub fn new(tag: impl Into<String>, children: Option<Children>, attrs: Option<Attrs>) -> Self {
        VNode {
            tag: Some(tag.into()),
            key: key_of(attrs.as_ref()),
            attrs,
            children,
            ..VNode::default()
        }
    }

    /// Text node: `{tag: "#", children: text}`.
    pub fn text(text: impl Into<String>) -> Self {
        VNode::new(TEXT_TAG, Some(Children::Text(text.into())), None)
    }

    /// Fragment node: `{tag: "[", children}`.
    pub fn fragment(children: Vec<Value>) -> Self {
        VNode::new(FRAGMENT_TAG, Some(Children::List(children)), None)
    }

    #[inline]
    pub fn is_fragment(&self) -> bool {
        self.tag.as_deref() == Some(FRAGMENT_TAG)
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        self.tag.as_deref() == Some(TEXT_TAG)
    }

    /// Child sequence, if the node has one.
    pub fn child_list(&self) -> Option<&[Value]> {
        match &self.children {
            Some(Children::List(items)) => Some(items),
            _ => None,
        }
    }

    /// Whether the node carries no content at all.
    pub fn is_childless(&self) -> bool {
        self.children.as_ref().map_or(true, Children::is_empty)
    }
}

/// The `key` attribute, if present.
pub fn key_of(attrs: Option<&Attrs>) -> Option<Value> {
    attrs.and_then(|attrs| attrs.get("key")).cloned()
}
