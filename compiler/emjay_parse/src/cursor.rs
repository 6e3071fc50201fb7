//! Token cursor for navigating the token stream.

use std::mem::discriminant;

use emjay_ir::Span;
use emjay_lexer::{Token, TokenKind, TokenList};
use tracing::trace;

use crate::ParseError;

static EOF: Token = Token {
    kind: TokenKind::Eof,
    span: Span::DUMMY,
};

/// Cursor for navigating tokens.
///
/// Never moves past the final [`TokenKind::Eof`]; reading at or beyond
/// the end yields that token.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    pub fn current(&self) -> &'a Token {
        self.tokens.get(self.pos).unwrap_or(&EOF)
    }

    #[inline]
    pub fn current_kind(&self) -> &'a TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Get the previous token's span.
    #[inline]
    pub fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1).and_then(|pos| self.tokens.get(pos)) {
            Some(token) => token.span,
            None => Span::DUMMY,
        }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Check if the current token has the same kind as `kind`, ignoring
    /// payloads.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        discriminant(self.current_kind()) == discriminant(kind)
    }

    /// Advance to the next token, returning the one just consumed.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        trace!(pos = self.pos, kind = token.kind.describe(), "advance");
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Expect the current token to be of the given kind, advance and
    /// return it.
    #[inline]
    pub fn expect(&mut self, kind: &TokenKind) -> Result<&'a Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    /// Build the error for a token that is not `expected`.
    #[cold]
    #[inline(never)]
    pub fn unexpected(&self, expected: &'static str) -> ParseError {
        let token = self.current();
        match token.kind {
            TokenKind::Eof => ParseError::UnexpectedEof { span: token.span },
            TokenKind::Indent => ParseError::UnexpectedIndent { span: token.span },
            _ => ParseError::UnexpectedToken {
                found: token.kind.describe(),
                expected,
                span: token.span,
            },
        }
    }
}
