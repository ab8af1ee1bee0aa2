//! Token definitions for constant-declaration files.

use logos::Logos;
use smol_str::SmolStr;

/// A token with its kind and span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: std::ops::Range<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, span: std::ops::Range<usize>) -> Self {
        Self { kind, span }
    }
}

/// Token kinds.
///
/// Literals keep their source text untouched; unquoting and numeric
/// conversion happen later, against the type of the field being assigned.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\f]+")]
pub enum TokenKind {
    // ========================================================================
    // Keywords
    // ========================================================================
    #[token("package")]
    Package,
    #[token("import")]
    Import,
    #[token("const")]
    Const,
    #[token("var")]
    Var,
    #[token("type")]
    Type,
    #[token("func")]
    Func,

    // ========================================================================
    // Operators
    // ========================================================================
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("&^")]
    AndNot,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("!")]
    Bang,

    #[token("==")]
    EqEq,
    #[token("!=")]
    Ne,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    Le,
    #[token(">=")]
    Ge,

    #[token("=")]
    Eq,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,

    // ========================================================================
    // Delimiters
    // ========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    // ========================================================================
    // Literals
    // ========================================================================
    /// Integer literal (decimal, hex, octal or binary)
    #[regex(r"[0-9][0-9_]*", source_text)]
    #[regex(r"0[xX][0-9a-fA-F_]+", source_text)]
    #[regex(r"0[oO][0-7_]+", source_text)]
    #[regex(r"0[bB][01_]+", source_text)]
    Int(SmolStr),

    /// Floating-point literal
    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9_]+)?", source_text)]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9_]+", source_text)]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?", source_text)]
    Float(SmolStr),

    /// Imaginary literal, e.g. `2i`
    #[regex(r"[0-9][0-9_]*i", source_text)]
    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9_]+)?i", source_text)]
    Imag(SmolStr),

    /// Character literal, e.g. `'a'` or `'\n'`
    #[regex(r"'(\\[^\n][^'\n]*|[^\\'\n])'", source_text)]
    Char(SmolStr),

    /// Interpreted string literal, quotes and escapes included
    #[regex(r#""([^"\\\n]|\\[^\n])*""#, source_text)]
    String(SmolStr),

    /// Raw string literal between backticks, may span lines
    #[regex(r"`[^`]*`", source_text)]
    RawString(SmolStr),

    /// Identifier
    #[regex(r"[\p{L}_][\p{L}\p{Nd}_]*", source_text)]
    Ident(SmolStr),

    // ========================================================================
    // Whitespace and Comments
    // ========================================================================
    /// Newline (terminates a declaration)
    #[token("\n")]
    Newline,

    /// Single-line comment
    #[regex(r"//[^\n]*")]
    LineComment,

    /// Block comment; carries whether it spans a line break
    #[token("/*", lex_block_comment)]
    BlockComment(bool),

    /// End of file
    Eof,
}

impl TokenKind {
    /// Check if this token is a keyword.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Package
                | TokenKind::Import
                | TokenKind::Const
                | TokenKind::Var
                | TokenKind::Type
                | TokenKind::Func
        )
    }

    /// Check if this token is trivia (comments, etc.)
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment(_))
    }
}

fn source_text(lex: &mut logos::Lexer<TokenKind>) -> SmolStr {
    SmolStr::from(lex.slice())
}

/// Consume a `/* ... */` comment. Block comments do not nest.
fn lex_block_comment(lex: &mut logos::Lexer<TokenKind>) -> Option<bool> {
    let remainder = lex.remainder();
    match remainder.find("*/") {
        Some(end) => {
            let multiline = remainder[..end].contains('\n');
            lex.bump(end + 2);
            Some(multiline)
        }
        None => {
            // Unclosed comment - swallow the rest so the error covers it
            lex.bump(remainder.len());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logos::Logos;

    fn text(s: &str) -> SmolStr {
        SmolStr::from(s)
    }

    #[test]
    fn test_keywords() {
        let mut lex = TokenKind::lexer("package import const var type func");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Package)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Import)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Const)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Var)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Type)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Func)));
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        let mut lex = TokenKind::lexer("constant variable");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Ident(text("constant")))));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Ident(text("variable")))));
    }

    #[test]
    fn test_integers_keep_source_text() {
        let mut lex = TokenKind::lexer("42 1_000 0xFF 0o755 0b1010");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Int(text("42")))));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Int(text("1_000")))));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Int(text("0xFF")))));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Int(text("0o755")))));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Int(text("0b1010")))));
    }

    #[test]
    fn test_floats_and_imaginary() {
        let mut lex = TokenKind::lexer("1.23 1e9 .5 2. 3i 1.5i");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Float(text("1.23")))));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Float(text("1e9")))));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Float(text(".5")))));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Float(text("2.")))));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Imag(text("3i")))));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Imag(text("1.5i")))));
    }

    #[test]
    fn test_strings() {
        let mut lex = TokenKind::lexer(r#""hello" "a \"quoted\" word\n""#);
        assert_eq!(lex.next(), Some(Ok(TokenKind::String(text(r#""hello""#)))));
        assert_eq!(
            lex.next(),
            Some(Ok(TokenKind::String(text(r#""a \"quoted\" word\n""#))))
        );
    }

    #[test]
    fn test_raw_string_spans_lines() {
        let mut lex = TokenKind::lexer("`first\nsecond`");
        assert_eq!(
            lex.next(),
            Some(Ok(TokenKind::RawString(text("`first\nsecond`"))))
        );
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn test_char_literals() {
        let mut lex = TokenKind::lexer(r"'a' '\n' '\''");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Char(text("'a'")))));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Char(text(r"'\n'")))));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Char(text(r"'\''")))));
    }

    #[test]
    fn test_unicode_identifier() {
        let mut lex = TokenKind::lexer("Größe _x1");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Ident(text("Größe")))));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Ident(text("_x1")))));
    }

    #[test]
    fn test_block_comment_reports_line_break() {
        let mut lex = TokenKind::lexer("/* one */ /* two\nthree */");
        assert_eq!(lex.next(), Some(Ok(TokenKind::BlockComment(false))));
        assert_eq!(lex.next(), Some(Ok(TokenKind::BlockComment(true))));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn test_operators() {
        let mut lex = TokenKind::lexer("+ - * / % & | ^ << >> &^ && || ! == != <= >= = .");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Plus)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Minus)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Star)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Slash)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Percent)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Amp)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Pipe)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Caret)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Shl)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Shr)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::AndNot)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::AndAnd)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::OrOr)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Bang)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::EqEq)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Ne)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Le)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Ge)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Eq)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Dot)));
    }
}
