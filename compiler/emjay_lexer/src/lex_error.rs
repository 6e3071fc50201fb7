//! Lexer errors.

use emjay_ir::Span;
use thiserror::Error;

/// A lexer error: WHAT went wrong and WHERE.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
#[error("{kind} at {span}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    #[inline]
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { kind, span }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum LexErrorKind {
    // === Indentation ===
    #[error("indentation mixes tabs and spaces")]
    MixedIndent,
    /// Outdent to a level that no enclosing line used.
    #[error("inconsistent indentation: outdent to column {found} does not match any enclosing level")]
    InconsistentIndent { found: usize },

    // === Tag heads ===
    #[error("expected a tag name, `#id` or `.class`")]
    ExpectedTag,
    #[error("unexpected character `{found}`")]
    UnexpectedCharacter { found: char },

    // === Attributes ===
    #[error("attribute list is never closed")]
    UnterminatedAttributes,
    #[error("string is never closed")]
    UnterminatedString,
    #[error("expected an attribute value after `=`")]
    ExpectedAttributeValue,

    // === Unsupported syntax ===
    #[error("code lines and buffered code are not supported")]
    UnsupportedCode,
    #[error("`{keyword}` is not supported")]
    UnsupportedKeyword { keyword: String },
    #[error("`{construct}` is not supported")]
    UnsupportedConstruct { construct: &'static str },
}
