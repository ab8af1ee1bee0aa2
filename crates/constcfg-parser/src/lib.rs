//! # constcfg Parser
//!
//! Parses constant-declaration files into a syntax tree.
//!
//! Uses recursive descent for declarations and Pratt parsing for
//! expressions. Expressions the decoder cannot use (arithmetic, calls,
//! composite literals) still parse, so files written by hand stay readable.
//!
//! ## Example
//!
//! ```
//! use constcfg_parser::parse;
//!
//! let source = r#"
//!     package config
//!
//!     const (
//!         Host = "localhost"
//!         Port = 8080
//!     )
//! "#;
//!
//! let result = parse(source);
//! assert!(result.errors.is_empty());
//! assert_eq!(result.ast.const_specs().count(), 2);
//! ```

mod parser;
mod error;

pub use parser::Parser;
pub use error::ParseError;

use constcfg_ast::SourceFile;

/// Result of parsing.
pub struct ParseResult {
    /// The parsed syntax tree (may be partial if errors occurred)
    pub ast: SourceFile,
    /// Any errors encountered during parsing
    pub errors: Vec<ParseError>,
}

/// Parse source text into a syntax tree.
pub fn parse(source: &str) -> ParseResult {
    let mut parser = Parser::new(source);
    let ast = parser.parse_source_file();
    ParseResult {
        ast,
        errors: parser.into_errors(),
    }
}
