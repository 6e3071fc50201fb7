//! Token types.

use std::ops::Index;

use emjay_ir::{AttrValue, Span};

/// A token with its location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Token kinds.
///
/// Text payloads are owned: templates are short and lexed once per call
/// site, so interning buys nothing here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// Element name at the start of a tag head.
    Tag(String),
    /// `#id` shorthand.
    Id(String),
    /// `.class` shorthand.
    Class(String),
    StartAttributes,
    Attribute { name: String, value: AttrValue },
    EndAttributes,
    /// Inline text, a piped line, a literal HTML line, or one line of a
    /// text block.
    Text(String),
    /// `.` at the end of a tag head: following deeper lines are text.
    StartPipelessText,
    EndPipelessText,
    /// `:` block expansion.
    Colon,
    Comment { value: String, buffered: bool },
    /// Line break between siblings (or between lines of a text block).
    Newline,
    Indent,
    Outdent,
    Eof,
}

impl TokenKind {
    /// Short description for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Tag(_) => "tag",
            TokenKind::Id(_) => "id shorthand",
            TokenKind::Class(_) => "class shorthand",
            TokenKind::StartAttributes => "`(`",
            TokenKind::Attribute { .. } => "attribute",
            TokenKind::EndAttributes => "`)`",
            TokenKind::Text(_) => "text",
            TokenKind::StartPipelessText => "text block",
            TokenKind::EndPipelessText => "end of text block",
            TokenKind::Colon => "`:`",
            TokenKind::Comment { .. } => "comment",
            TokenKind::Newline => "newline",
            TokenKind::Indent => "indent",
            TokenKind::Outdent => "outdent",
            TokenKind::Eof => "end of template",
        }
    }

    /// Whether this token can start a tag head.
    #[inline]
    pub fn starts_tag(&self) -> bool {
        matches!(
            self,
            TokenKind::Tag(_) | TokenKind::Id(_) | TokenKind::Class(_)
        )
    }
}

/// Lexer output. Always ends with [`TokenKind::Eof`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList::default()
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Token kinds only, for assertions and debugging.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|token| token.kind.clone()).collect()
    }
}

impl Index<usize> for TokenList {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
