//! Parse error types.

use emjay_ir::Span;
use emjay_lexer::LexError;
use thiserror::Error;

/// Errors from lexing or parsing template text.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ParseError {
    /// The lexer rejected the text.
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found} at {span}")]
    UnexpectedToken {
        found: &'static str,
        expected: &'static str,
        span: Span,
    },

    /// Indented content where nothing can own it, e.g. under a text line.
    #[error("unexpected indentation at {span}")]
    UnexpectedIndent { span: Span },

    #[error("unexpected end of template at {span}")]
    UnexpectedEof { span: Span },
}

impl ParseError {
    /// Location of the error in the template text.
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(err) => err.span,
            ParseError::UnexpectedToken { span, .. }
            | ParseError::UnexpectedIndent { span }
            | ParseError::UnexpectedEof { span } => *span,
        }
    }
}
