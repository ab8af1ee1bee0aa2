//! High-level lexer interface.

use crate::error::LexError;
use crate::token::{Token, TokenKind};
use logos::Logos;

/// A lexer for constant-declaration files.
///
/// Wraps the logos-generated lexer, drops comments, and classifies
/// failed matches into [`LexError`] variants.
pub struct Lexer<'source> {
    inner: logos::Lexer<'source, TokenKind>,
    /// Track if we've emitted EOF
    done: bool,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'source str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            done: false,
        }
    }

    /// Get the source text.
    pub fn source(&self) -> &'source str {
        self.inner.source()
    }

    fn next_inner(&mut self) -> Option<Result<Token, LexError>> {
        loop {
            match self.inner.next() {
                Some(Ok(kind)) => {
                    let span = self.inner.span();

                    // A block comment containing a line break ends the line
                    if kind == TokenKind::BlockComment(true) {
                        return Some(Ok(Token::new(TokenKind::Newline, span)));
                    }

                    if kind.is_trivia() {
                        continue;
                    }

                    return Some(Ok(Token::new(kind, span)));
                }
                Some(Err(())) => {
                    let span = self.inner.span();
                    return Some(Err(classify(self.inner.slice(), span)));
                }
                None => {
                    if !self.done {
                        self.done = true;
                        let pos = self.inner.source().len();
                        return Some(Ok(Token::new(TokenKind::Eof, pos..pos)));
                    }
                    return None;
                }
            }
        }
    }
}

/// Pick the error variant from the text logos failed to match.
fn classify(slice: &str, span: std::ops::Range<usize>) -> LexError {
    if slice.starts_with("/*") {
        return LexError::UnterminatedComment { span };
    }
    match slice.chars().next() {
        Some('"') => LexError::UnterminatedString { span },
        Some('`') => LexError::UnterminatedRawString { span },
        Some('\'') => LexError::InvalidChar { span },
        _ => LexError::UnexpectedChar { span },
    }
}

impl<'source> Iterator for Lexer<'source> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_inner()
    }
}
