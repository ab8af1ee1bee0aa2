//! Error types for encoding and decoding.

use miette::{Diagnostic, SourceSpan};
use smol_str::SmolStr;
use thiserror::Error;

/// Boxed error returned by field setters.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding or decoding a record.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// The value handed to the encoder is not a record.
    #[error("value is not a record")]
    #[diagnostic(
        code(constcfg::not_record),
        help("pass a type declared with `record!` or one implementing `Record`")
    )]
    NotRecordKind,

    /// The text is not a valid declaration file, or a string literal in it
    /// could not be unquoted.
    #[error("{message}")]
    #[diagnostic(code(constcfg::parse))]
    Parse {
        message: String,
        #[label("here")]
        span: SourceSpan,
    },

    /// A literal could not be converted to its field's type.
    #[error("cannot assign {literal:?} to field `{field}`: {source}")]
    #[diagnostic(code(constcfg::type_coercion))]
    TypeCoercion {
        field: SmolStr,
        literal: String,
        source: BoxError,
    },
}

impl Error {
    pub(crate) fn parse(message: impl Into<String>, span: std::ops::Range<usize>) -> Self {
        Error::Parse {
            message: message.into(),
            span: span.into(),
        }
    }
}

impl From<constcfg_parser::ParseError> for Error {
    fn from(err: constcfg_parser::ParseError) -> Self {
        Error::parse(err.to_string(), err.span())
    }
}
