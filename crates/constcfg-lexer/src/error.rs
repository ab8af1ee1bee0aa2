//! Lexer error definitions.

use thiserror::Error;

/// A lexer error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character")]
    UnexpectedChar { span: std::ops::Range<usize> },

    #[error("unterminated string literal")]
    UnterminatedString { span: std::ops::Range<usize> },

    #[error("unterminated raw string literal")]
    UnterminatedRawString { span: std::ops::Range<usize> },

    #[error("invalid character literal")]
    InvalidChar { span: std::ops::Range<usize> },

    #[error("unterminated block comment")]
    UnterminatedComment { span: std::ops::Range<usize> },
}

impl LexError {
    /// Get the span of this error.
    pub fn span(&self) -> std::ops::Range<usize> {
        match self {
            LexError::UnexpectedChar { span }
            | LexError::UnterminatedString { span }
            | LexError::UnterminatedRawString { span }
            | LexError::InvalidChar { span }
            | LexError::UnterminatedComment { span } => span.clone(),
        }
    }
}
