//! Syntax tree to virtual node conversion.
//!
//! The parser wraps every run of siblings in a [`Block`]. Most of those
//! wrappers are redundant, and left in place every element would gain
//! extra fragment layers. The builder rewrites the tree bottom-up:
//!
//! | node | result |
//! |------|--------|
//! | empty block | removed |
//! | block inside a block | its children, spliced into the parent |
//! | block with one child | that child |
//! | other block | fragment node (`[`) |
//! | text | text node (`#`) |
//! | tag | element node; a fragment body is lifted into its children |
//! | comment | removed |

use std::sync::Arc;

use emjay_ir::{Block, Children, Node, Tag, VNode, Value};
use emjay_stack::ensure_sufficient_stack;

use crate::attrs;

/// Result of building one syntax node.
#[derive(Debug)]
enum Built {
    Removed,
    One(Value),
    /// Only produced where the parent accepts a spliced sequence.
    Many(Vec<Value>),
}

/// Build the virtual tree of a parsed template.
///
/// An empty template builds to [`Value::Undefined`].
pub fn build(root: &Block) -> Value {
    match build_block(root, false) {
        Built::One(value) => value,
        Built::Removed | Built::Many(_) => Value::Undefined,
    }
}

/// Build a block; `splice` is set when the parent is itself a block.
fn build_block(block: &Block, splice: bool) -> Built {
    let mut children = Vec::with_capacity(block.nodes.len());
    for node in &block.nodes {
        match build_node(node) {
            Built::Removed => {}
            Built::One(value) => children.push(value),
            Built::Many(values) => children.extend(values),
        }
    }

    if children.is_empty() {
        Built::Removed
    } else if splice {
        Built::Many(children)
    } else if children.len() == 1 {
        children.pop().map_or(Built::Removed, Built::One)
    } else {
        Built::One(node_value(VNode::fragment(children)))
    }
}

fn build_node(node: &Node) -> Built {
    match node {
        Node::Block(block) => build_block(block, true),
        Node::Text(text) => Built::One(node_value(VNode::text(text.value.clone()))),
        Node::Tag(tag) => Built::One(ensure_sufficient_stack(|| build_tag(tag))),
        Node::Comment(_) => Built::Removed,
    }
}

fn build_tag(tag: &Tag) -> Value {
    let body = match &tag.block {
        Some(block) => build_block(block, false),
        None => Built::Removed,
    };

    let children = match body {
        Built::Removed => None,
        Built::One(Value::Node(node)) if node.is_fragment() => match &node.children {
            Some(children) => Some(children.clone()),
            None => Some(Children::List(Vec::new())),
        },
        Built::One(value) => Some(Children::List(vec![value])),
        Built::Many(values) => Some(Children::List(values)),
    };

    node_value(VNode::new(tag.name.clone(), children, attrs::normalize(&tag.attrs)))
}

#[inline]
fn node_value(node: VNode) -> Value {
    Value::Node(Arc::new(node))
}
