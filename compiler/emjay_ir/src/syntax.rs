//! Markup syntax tree.
//!
//! The parser wraps content in grouping [`Block`]s eagerly: the document
//! root, every tag body and every nested run of siblings is a block, even
//! when it holds one node or none. Collapsing those redundant blocks is
//! the tree builder's job, not the parser's.

use crate::Span;

/// Grouping node: an ordered run of siblings without an element wrapper.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Block {
    pub nodes: Vec<Node>,
    pub span: Span,
}

impl Block {
    pub fn new(nodes: Vec<Node>, span: Span) -> Self {
        Block { nodes, span }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// One syntax tree node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Block(Block),
    Tag(Tag),
    Text(Text),
    Comment(Comment),
}

impl Node {
    pub fn span(&self) -> Span {
        match self {
            Node::Block(block) => block.span,
            Node::Tag(tag) => tag.span,
            Node::Text(text) => text.span,
            Node::Comment(comment) => comment.span,
        }
    }
}

/// Element node: `name#id.class(attr=value) body`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    /// Attributes in source order, shorthands included.
    pub attrs: Vec<Attribute>,
    /// Nested content; `None` when the tag was never given a body.
    pub block: Option<Block>,
    pub span: Span,
}

/// Literal text run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Text {
    pub value: String,
    pub span: Span,
}

impl Text {
    pub fn new(value: impl Into<String>, span: Span) -> Self {
        Text {
            value: value.into(),
            span,
        }
    }
}

/// `// comment` (buffered) or `//- comment` (unbuffered).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub value: String,
    pub buffered: bool,
    pub span: Span,
}

/// One `name=value` pair from an attribute list or a shorthand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: AttrValue,
    pub span: Span,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: AttrValue, span: Span) -> Self {
        Attribute {
            name: name.into(),
            value,
            span,
        }
    }
}

/// Attribute value as written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrValue {
    /// Boolean shorthand: the attribute was named without `=`.
    True,
    /// Raw value text, quotes included (`'stylesheet'`, `bar`).
    Expr(String),
}
