//! # constcfg Lexer
//!
//! Tokenizes constant-declaration files (a small subset of Go source) into a
//! stream of tokens.
//!
//! The lexer uses the `logos` crate. Literal tokens keep their exact source
//! text so later stages can decide how to interpret them.
//!
//! ## Example
//!
//! ```
//! use constcfg_lexer::{Lexer, TokenKind};
//!
//! let source = "const Port = 8080";
//! let lexer = Lexer::new(source);
//!
//! for token in lexer {
//!     println!("{:?}", token);
//! }
//! ```

mod error;
mod lexer;
mod token;

pub use error::LexError;
pub use lexer::Lexer;
pub use token::{Token, TokenKind};

/// Tokenize source text into a vector of tokens.
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<LexError>) {
    let lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    for result in lexer {
        match result {
            Ok(token) => tokens.push(token),
            Err(err) => errors.push(err),
        }
    }

    (tokens, errors)
}
