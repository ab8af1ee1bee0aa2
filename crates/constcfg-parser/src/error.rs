//! Parser error definitions.

use constcfg_lexer::{LexError, TokenKind};
use thiserror::Error;

/// A parser error.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("unexpected token: expected {expected}, found {found:?}")]
    UnexpectedToken {
        expected: String,
        found: TokenKind,
        span: std::ops::Range<usize>,
    },

    #[error("unexpected end of file: expected {expected}")]
    UnexpectedEof {
        expected: String,
        span: std::ops::Range<usize>,
    },

    #[error("expected declaration, found {found:?}")]
    ExpectedDecl {
        found: TokenKind,
        span: std::ops::Range<usize>,
    },

    #[error("expected expression, found {found:?}")]
    ExpectedExpr {
        found: TokenKind,
        span: std::ops::Range<usize>,
    },

    #[error("expected type")]
    ExpectedType { span: std::ops::Range<usize> },

    #[error("{source}")]
    LexError {
        source: LexError,
        span: std::ops::Range<usize>,
    },
}

impl ParseError {
    /// Get the span of this error.
    pub fn span(&self) -> std::ops::Range<usize> {
        match self {
            ParseError::UnexpectedToken { span, .. } => span.clone(),
            ParseError::UnexpectedEof { span, .. } => span.clone(),
            ParseError::ExpectedDecl { span, .. } => span.clone(),
            ParseError::ExpectedExpr { span, .. } => span.clone(),
            ParseError::ExpectedType { span } => span.clone(),
            ParseError::LexError { span, .. } => span.clone(),
        }
    }
}
