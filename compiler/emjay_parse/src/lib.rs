//! Recursive descent parser for emjay markup.
//!
//! Turns the lexer's token stream into the syntax tree of
//! [`emjay_ir::syntax`]. Content is wrapped in [`Block`]s eagerly:
//!
//! - the document root is a block;
//! - every tag has a body block, empty when nothing follows the head;
//! - an indented run of children is its own block inside the body.
//!
//! Shorthands become attributes in source order: `#main` is
//! `id='main'` and `.big` is `class='big'`, quoted like a literal.

mod cursor;
mod error;


pub use cursor::Cursor;
pub use error::ParseError;

use emjay_ir::{AttrValue, Attribute, Block, Comment, Node, Span, Tag, Text};
use emjay_lexer::{lex, TokenKind, TokenList};
use emjay_stack::ensure_sufficient_stack;
use tracing::trace;

/// Element name used when a line starts with `#id` or `.class`.
const DEFAULT_TAG: &str = "div";

/// What a run of items is terminated by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Until {
    Eof,
    Outdent,
}

/// Lex and parse template text into its root block.
pub fn parse(text: &str) -> Result<Block, ParseError> {
    let tokens = lex(text)?;
    let block = Parser::new(&tokens).parse_document()?;
    trace!(nodes = block.nodes.len(), "parsed template");
    Ok(block)
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
        }
    }

    /// Parse the whole token stream as the root block.
    pub fn parse_document(&mut self) -> Result<Block, ParseError> {
        let nodes = self.parse_items(Until::Eof)?;
        if !self.cursor.is_at_end() {
            return Err(self.cursor.unexpected("end of template"));
        }
        Ok(block_of(nodes, self.cursor.current_span()))
    }

    /// Parse sibling lines up to (not including) the terminator.
    fn parse_items(&mut self, until: Until) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();
        // Consecutive text lines are joined by a newline text node.
        let mut after_text = false;

        loop {
            let token = self.cursor.current();
            match &token.kind {
                TokenKind::Eof => {
                    if until == Until::Outdent {
                        return Err(self.cursor.unexpected("outdent"));
                    }
                    break;
                }
                TokenKind::Outdent => {
                    if until == Until::Eof {
                        return Err(self.cursor.unexpected("end of template"));
                    }
                    break;
                }
                TokenKind::Newline => {
                    self.cursor.advance();
                }
                TokenKind::Text(value) => {
                    self.cursor.advance();
                    if after_text {
                        nodes.push(Node::Text(Text::new("\n", Span::point(token.span.start))));
                    }
                    if !value.is_empty() {
                        nodes.push(Node::Text(Text::new(value.clone(), token.span)));
                    }
                    after_text = true;
                }
                TokenKind::Comment { value, buffered } => {
                    self.cursor.advance();
                    nodes.push(Node::Comment(Comment {
                        value: value.clone(),
                        buffered: *buffered,
                        span: token.span,
                    }));
                    after_text = false;
                }
                kind if kind.starts_tag() => {
                    let tag = ensure_sufficient_stack(|| self.parse_tag())?;
                    nodes.push(Node::Tag(tag));
                    after_text = false;
                }
                _ => return Err(self.cursor.unexpected("tag, text or comment")),
            }
        }

        Ok(nodes)
    }

    /// Parse one tag: head, optional inline body, optional indented block.
    fn parse_tag(&mut self) -> Result<Tag, ParseError> {
        let start = self.cursor.current_span();

        let name = if let TokenKind::Tag(name) = self.cursor.current_kind() {
            self.cursor.advance();
            name.clone()
        } else {
            DEFAULT_TAG.to_owned()
        };
        let attrs = self.parse_attributes()?;

        let mut body = Vec::new();
        match self.cursor.current_kind() {
            TokenKind::Colon => {
                self.cursor.advance();
                if !self.cursor.current_kind().starts_tag() {
                    return Err(self.cursor.unexpected("tag"));
                }
                let nested = ensure_sufficient_stack(|| self.parse_tag())?;
                body.push(Node::Tag(nested));
            }
            TokenKind::StartPipelessText => {
                self.cursor.advance();
                self.parse_text_block(&mut body)?;
            }
            TokenKind::Text(value) => {
                let span = self.cursor.advance().span;
                body.push(Node::Text(Text::new(value.clone(), span)));
            }
            _ => {}
        }

        if self.cursor.check(&TokenKind::Indent) {
            let indent = self.cursor.advance().span;
            let children = self.parse_items(Until::Outdent)?;
            let span = children
                .iter()
                .map(Node::span)
                .fold(indent, Span::merge);
            self.cursor.expect(&TokenKind::Outdent)?;
            body.push(Node::Block(Block::new(children, span)));
        }

        let span = start.merge(self.cursor.previous_span());
        let block = block_of(body, Span::point(span.end));
        Ok(Tag {
            name,
            attrs,
            block: Some(block),
            span,
        })
    }

    /// `#id`, `.class` and `( ... )` runs following the tag name.
    fn parse_attributes(&mut self) -> Result<Vec<Attribute>, ParseError> {
        let mut attrs = Vec::new();
        loop {
            let token = self.cursor.current();
            match &token.kind {
                TokenKind::Id(id) => {
                    self.cursor.advance();
                    attrs.push(Attribute::new("id", quoted(id), token.span));
                }
                TokenKind::Class(class) => {
                    self.cursor.advance();
                    attrs.push(Attribute::new("class", quoted(class), token.span));
                }
                TokenKind::StartAttributes => {
                    self.cursor.advance();
                    while let TokenKind::Attribute { name, value } = self.cursor.current_kind() {
                        let span = self.cursor.advance().span;
                        attrs.push(Attribute::new(name.clone(), value.clone(), span));
                    }
                    self.cursor.expect(&TokenKind::EndAttributes)?;
                }
                _ => return Ok(attrs),
            }
        }
    }

    /// Lines of a `tag.` block: text tokens, with newlines kept as text.
    fn parse_text_block(&mut self, body: &mut Vec<Node>) -> Result<(), ParseError> {
        loop {
            let token = self.cursor.current();
            match &token.kind {
                TokenKind::Text(value) => {
                    body.push(Node::Text(Text::new(value.clone(), token.span)));
                }
                TokenKind::Newline => {
                    body.push(Node::Text(Text::new("\n", token.span)));
                }
                TokenKind::EndPipelessText => {
                    self.cursor.advance();
                    return Ok(());
                }
                _ => return Err(self.cursor.unexpected("end of text block")),
            }
            self.cursor.advance();
        }
    }
}

/// Wrap nodes in a block spanning them, or a point block at `fallback`.
fn block_of(nodes: Vec<Node>, fallback: Span) -> Block {
    let span = match (nodes.first(), nodes.last()) {
        (Some(first), Some(last)) => first.span().merge(last.span()),
        _ => fallback,
    };
    Block::new(nodes, span)
}

/// Shorthand values are stored quoted, like a written literal.
fn quoted(value: &str) -> AttrValue {
    AttrValue::Expr(format!("'{value}'"))
}
