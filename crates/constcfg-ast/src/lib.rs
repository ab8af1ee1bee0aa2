//! # constcfg AST
//!
//! Syntax tree for constant-declaration files.
//!
//! The tree keeps literal source text and byte spans; it is produced by
//! `constcfg-parser` and walked by the decoder in `constcfg`.

mod span;
mod ast;

pub use span::{Span, Spanned};
pub use ast::*;
