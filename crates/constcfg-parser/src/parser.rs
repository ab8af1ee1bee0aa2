//! Recursive descent parser for constant-declaration files.

use constcfg_ast::*;
use constcfg_lexer::{Lexer, Token, TokenKind};
use smol_str::SmolStr;

use crate::error::ParseError;

/// Binary operator precedence levels for Pratt parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    LogicalOr,      // ||
    LogicalAnd,     // &&
    Comparison,     // == != < <= > >=
    Additive,       // + - | ^
    Multiplicative, // * / % << >> & &^
}

fn binary_op(kind: &TokenKind) -> Option<(BinaryOp, Precedence)> {
    let op = match kind {
        TokenKind::OrOr => (BinaryOp::LogicalOr, Precedence::LogicalOr),
        TokenKind::AndAnd => (BinaryOp::LogicalAnd, Precedence::LogicalAnd),
        TokenKind::EqEq => (BinaryOp::Eq, Precedence::Comparison),
        TokenKind::Ne => (BinaryOp::Ne, Precedence::Comparison),
        TokenKind::Lt => (BinaryOp::Lt, Precedence::Comparison),
        TokenKind::Le => (BinaryOp::Le, Precedence::Comparison),
        TokenKind::Gt => (BinaryOp::Gt, Precedence::Comparison),
        TokenKind::Ge => (BinaryOp::Ge, Precedence::Comparison),
        TokenKind::Plus => (BinaryOp::Add, Precedence::Additive),
        TokenKind::Minus => (BinaryOp::Sub, Precedence::Additive),
        TokenKind::Pipe => (BinaryOp::Or, Precedence::Additive),
        TokenKind::Caret => (BinaryOp::Xor, Precedence::Additive),
        TokenKind::Star => (BinaryOp::Mul, Precedence::Multiplicative),
        TokenKind::Slash => (BinaryOp::Div, Precedence::Multiplicative),
        TokenKind::Percent => (BinaryOp::Rem, Precedence::Multiplicative),
        TokenKind::Shl => (BinaryOp::Shl, Precedence::Multiplicative),
        TokenKind::Shr => (BinaryOp::Shr, Precedence::Multiplicative),
        TokenKind::Amp => (BinaryOp::And, Precedence::Multiplicative),
        TokenKind::AndNot => (BinaryOp::AndNot, Precedence::Multiplicative),
        _ => return None,
    };
    Some(op)
}

fn unary_op(kind: &TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Minus => Some(UnaryOp::Neg),
        TokenKind::Plus => Some(UnaryOp::Plus),
        TokenKind::Bang => Some(UnaryOp::Not),
        TokenKind::Caret => Some(UnaryOp::BitNot),
        TokenKind::Amp => Some(UnaryOp::Addr),
        TokenKind::Star => Some(UnaryOp::Deref),
        _ => None,
    }
}

/// Which declaration a value spec belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecKind {
    Const,
    Var,
}

/// Parser for constant-declaration files.
pub struct Parser<'source> {
    lexer: Lexer<'source>,
    current: Token,
    previous: Token,
    /// Whether a line break separates `previous` from `current`
    line_break: bool,
    /// Open brackets around the current expression; line breaks inside them
    /// do not end it
    depth: u32,
    errors: Vec<ParseError>,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        let mut parser = Self {
            lexer: Lexer::new(source),
            current: Token::new(TokenKind::Eof, 0..0),
            previous: Token::new(TokenKind::Eof, 0..0),
            line_break: false,
            depth: 0,
            errors: Vec::new(),
        };
        parser.advance();
        parser
    }

    /// Get the collected errors.
    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    /// Pull the next token, folding newlines into a flag and recording
    /// lexer errors.
    fn next_significant_token(&mut self) -> (Token, bool) {
        let mut line_break = false;
        loop {
            match self.lexer.next() {
                Some(Ok(token)) => {
                    if matches!(token.kind, TokenKind::Newline) {
                        line_break = true;
                        continue;
                    }
                    return (token, line_break);
                }
                Some(Err(err)) => {
                    self.error(ParseError::LexError {
                        span: err.span(),
                        source: err,
                    });
                }
                None => {
                    let end = self.lexer.source().len();
                    return (Token::new(TokenKind::Eof, end..end), line_break);
                }
            }
        }
    }

    fn advance(&mut self) {
        let (next, line_break) = self.next_significant_token();
        self.previous = std::mem::replace(&mut self.current, next);
        self.line_break = line_break;
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    fn at_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Eof)
    }

    /// A line break ends the current expression unless it sits inside
    /// brackets.
    fn ends_line(&self) -> bool {
        self.line_break && self.depth == 0
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Option<()> {
        if self.check(&kind) {
            self.advance();
            Some(())
        } else {
            self.unexpected(expected);
            None
        }
    }

    /// A spec or declaration ends at a line break, `;`, a closing `)` or
    /// the end of input.
    fn expect_terminator(&mut self) -> Option<()> {
        if self.check(&TokenKind::Semicolon) {
            self.advance();
            return Some(());
        }
        if self.line_break || self.at_end() || self.check(&TokenKind::RParen) {
            return Some(());
        }
        self.unexpected("newline or `;`");
        None
    }

    fn unexpected(&mut self, expected: &str) {
        let span = self.current.span.clone();
        let err = if self.at_end() {
            ParseError::UnexpectedEof {
                expected: expected.to_string(),
                span,
            }
        } else {
            ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: self.current.kind.clone(),
                span,
            }
        };
        self.error(err);
    }

    fn error(&mut self, err: ParseError) {
        self.errors.push(err);
    }

    fn span(&self, start: usize) -> Span {
        Span::new(start as u32, self.previous.span.end as u32)
    }

    fn current_span(&self) -> Span {
        Span::from(self.current.span.clone())
    }

    /// Skip to the next declaration keyword that starts a line.
    fn synchronize(&mut self) {
        self.depth = 0;
        loop {
            self.advance();
            if self.at_end() {
                return;
            }
            if self.line_break && self.current.kind.is_keyword() {
                return;
            }
        }
    }

    // ========================================================================
    // Top-level parsing
    // ========================================================================

    /// Parse a complete source file.
    pub fn parse_source_file(&mut self) -> SourceFile {
        let package = if self.check(&TokenKind::Package) {
            self.advance();
            let name = self.parse_identifier();
            if name.is_none() || self.expect_terminator().is_none() {
                self.synchronize();
            }
            name
        } else {
            None
        };

        let mut decls = Vec::new();
        while !self.at_end() {
            if self.check(&TokenKind::Semicolon) {
                self.advance();
                continue;
            }

            match self.parse_decl() {
                Some(decl) => decls.push(decl),
                None => self.synchronize(),
            }
        }

        SourceFile {
            package,
            decls,
            span: Span::from(0..self.lexer.source().len()),
        }
    }

    fn parse_decl(&mut self) -> Option<Decl> {
        let start = self.current.span.start;

        let kind = match self.current.kind {
            TokenKind::Import => {
                self.advance();
                DeclKind::Import(self.parse_group(Self::parse_import_spec)?)
            }
            TokenKind::Const => {
                self.advance();
                DeclKind::Const(self.parse_group(|p| p.parse_value_spec(SpecKind::Const))?)
            }
            TokenKind::Var => {
                self.advance();
                DeclKind::Var(self.parse_group(|p| p.parse_value_spec(SpecKind::Var))?)
            }
            TokenKind::Type => {
                self.skip_decl()?;
                DeclKind::Type
            }
            TokenKind::Func => {
                self.skip_decl()?;
                DeclKind::Func
            }
            _ => {
                self.error(ParseError::ExpectedDecl {
                    found: self.current.kind.clone(),
                    span: self.current.span.clone(),
                });
                return None;
            }
        };

        self.expect_terminator()?;
        Some(Spanned::new(kind, self.span(start)))
    }

    /// Parse either a single spec or a parenthesised list of specs.
    fn parse_group<T>(
        &mut self,
        mut parse_spec: impl FnMut(&mut Self) -> Option<T>,
    ) -> Option<Group<T>> {
        if !self.check(&TokenKind::LParen) {
            let spec = parse_spec(self)?;
            return Some(Group {
                grouped: false,
                specs: vec![spec],
            });
        }

        self.advance(); // consume (
        let mut specs = Vec::new();
        loop {
            if self.check(&TokenKind::RParen) {
                break;
            }
            if self.at_end() {
                self.unexpected(")");
                return None;
            }
            if self.check(&TokenKind::Semicolon) {
                self.advance();
                continue;
            }

            specs.push(parse_spec(self)?);
            self.expect_terminator()?;
        }
        self.advance(); // consume )

        Some(Group {
            grouped: true,
            specs,
        })
    }

    fn parse_import_spec(&mut self) -> Option<ImportSpec> {
        let alias = match &self.current.kind {
            TokenKind::Ident(name) => {
                let ident = Spanned::new(name.clone(), self.current_span());
                self.advance();
                Some(ident)
            }
            TokenKind::Dot => {
                let ident = Spanned::new(SmolStr::from("."), self.current_span());
                self.advance();
                Some(ident)
            }
            _ => None,
        };

        match &self.current.kind {
            TokenKind::String(path) | TokenKind::RawString(path) => {
                let path = Spanned::new(path.clone(), self.current_span());
                self.advance();
                Some(ImportSpec { alias, path })
            }
            _ => {
                self.unexpected("import path");
                None
            }
        }
    }

    fn parse_value_spec(&mut self, kind: SpecKind) -> Option<ValueSpec> {
        let start = self.current.span.start;

        let mut names = vec![self.parse_identifier()?];
        while self.check(&TokenKind::Comma) {
            self.advance();
            names.push(self.parse_identifier()?);
        }

        let ty = if self.starts_type() {
            Some(self.parse_type()?)
        } else {
            None
        };

        let mut values = Vec::new();
        if !self.line_break && self.check(&TokenKind::Eq) {
            self.advance();
            values.push(self.parse_expr()?);
            while !self.line_break && self.check(&TokenKind::Comma) {
                self.advance();
                values.push(self.parse_expr()?);
            }
        }

        // Only `var` needs a type or a value; a bare constant assigns nothing
        if kind == SpecKind::Var && values.is_empty() && ty.is_none() {
            self.unexpected("type or `=`");
            return None;
        }

        let span = self.span(start);
        Some(ValueSpec {
            names,
            ty,
            values,
            span,
        })
    }

    fn parse_identifier(&mut self) -> Option<Ident> {
        if let TokenKind::Ident(name) = &self.current.kind {
            let ident = Spanned::new(name.clone(), self.current_span());
            self.advance();
            Some(ident)
        } else {
            self.unexpected("identifier");
            None
        }
    }

    // ========================================================================
    // Types
    // ========================================================================

    /// A type annotation must share the line with the names it annotates.
    fn starts_type(&self) -> bool {
        !self.line_break
            && matches!(
                self.current.kind,
                TokenKind::Ident(_) | TokenKind::Star | TokenKind::LBracket
            )
    }

    fn parse_type(&mut self) -> Option<Spanned<TypeExpr>> {
        let start = self.current.span.start;
        let ty = self.parse_type_expr()?;
        Some(Spanned::new(ty, self.span(start)))
    }

    fn parse_type_expr(&mut self) -> Option<TypeExpr> {
        match &self.current.kind {
            TokenKind::Star => {
                self.advance();
                Some(TypeExpr::Pointer(Box::new(self.parse_type_expr()?)))
            }
            TokenKind::LBracket => {
                self.advance();
                self.expect(TokenKind::RBracket, "]")?;
                Some(TypeExpr::Slice(Box::new(self.parse_type_expr()?)))
            }
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                if self.check(&TokenKind::Dot) {
                    self.advance();
                    let selected = self.parse_identifier()?;
                    Some(TypeExpr::Named {
                        package: Some(name),
                        name: selected.node,
                    })
                } else {
                    Some(TypeExpr::Named {
                        package: None,
                        name,
                    })
                }
            }
            _ => {
                self.error(ParseError::ExpectedType {
                    span: self.current.span.clone(),
                });
                None
            }
        }
    }

    // ========================================================================
    // Expressions (Pratt parser)
    // ========================================================================

    fn parse_expr(&mut self) -> Option<Expr> {
        self.parse_expr_precedence(Precedence::Lowest)
    }

    fn parse_expr_precedence(&mut self, min_prec: Precedence) -> Option<Expr> {
        let mut left = self.parse_unary()?;

        while !self.at_end() && !self.ends_line() {
            let Some((op, prec)) = binary_op(&self.current.kind) else {
                break;
            };
            if prec <= min_prec {
                break;
            }

            self.advance();
            let right = self.parse_expr_precedence(prec)?;
            let span = left.span.merge(right.span);
            left = Spanned::new(
                ExprKind::Binary {
                    op,
                    lhs: Box::new(left),
                    rhs: Box::new(right),
                },
                span,
            );
        }

        Some(left)
    }

    fn parse_unary(&mut self) -> Option<Expr> {
        let start = self.current.span.start;

        if let Some(op) = unary_op(&self.current.kind) {
            self.advance();
            let operand = self.parse_unary()?;
            return Some(Spanned::new(
                ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                self.span(start),
            ));
        }

        let primary = self.parse_primary()?;
        self.parse_postfix(primary)
    }

    fn parse_primary(&mut self) -> Option<Expr> {
        let start = self.current.span.start;
        let literal = |kind, raw: &SmolStr| {
            ExprKind::Literal(Literal {
                kind,
                raw: raw.clone(),
            })
        };

        let node = match &self.current.kind {
            TokenKind::Int(raw) => literal(LiteralKind::Int, raw),
            TokenKind::Float(raw) => literal(LiteralKind::Float, raw),
            TokenKind::Imag(raw) => literal(LiteralKind::Imag, raw),
            TokenKind::Char(raw) => literal(LiteralKind::Char, raw),
            TokenKind::String(raw) => literal(LiteralKind::String, raw),
            TokenKind::RawString(raw) => literal(LiteralKind::RawString, raw),
            TokenKind::Ident(name) => ExprKind::Ident(name.clone()),
            TokenKind::LParen => {
                self.advance();
                self.depth += 1;
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen, ")")?;
                self.depth -= 1;
                return Some(Spanned::new(
                    ExprKind::Paren(Box::new(inner)),
                    self.span(start),
                ));
            }
            _ => {
                if self.at_end() {
                    self.unexpected("expression");
                } else {
                    self.error(ParseError::ExpectedExpr {
                        found: self.current.kind.clone(),
                        span: self.current.span.clone(),
                    });
                }
                return None;
            }
        };

        self.advance();
        Some(Spanned::new(node, self.span(start)))
    }

    fn parse_postfix(&mut self, mut expr: Expr) -> Option<Expr> {
        let start = expr.span.start as usize;

        while !self.ends_line() {
            let node = match &self.current.kind {
                TokenKind::Dot => {
                    self.advance();
                    let field = self.parse_identifier()?;
                    ExprKind::Selector {
                        base: Box::new(expr),
                        field,
                    }
                }
                TokenKind::LParen => {
                    self.advance();
                    self.depth += 1;
                    let mut args = Vec::new();
                    while !self.check(&TokenKind::RParen) {
                        args.push(self.parse_expr()?);
                        if !self.check(&TokenKind::Comma) {
                            break;
                        }
                        self.advance();
                    }
                    self.expect(TokenKind::RParen, ")")?;
                    self.depth -= 1;
                    ExprKind::Call {
                        callee: Box::new(expr),
                        args,
                    }
                }
                TokenKind::LBracket => {
                    self.advance();
                    self.depth += 1;
                    let index = self.parse_expr()?;
                    self.expect(TokenKind::RBracket, "]")?;
                    self.depth -= 1;
                    ExprKind::Index {
                        base: Box::new(expr),
                        index: Box::new(index),
                    }
                }
                TokenKind::LBrace
                    if matches!(expr.node, ExprKind::Ident(_) | ExprKind::Selector { .. }) =>
                {
                    self.skip_braces()?;
                    ExprKind::Composite { ty: Box::new(expr) }
                }
                _ => break,
            };
            expr = Spanned::new(node, self.span(start));
        }

        Some(expr)
    }

    /// Skip a `type` or `func` declaration up to the end of its line,
    /// passing over bracketed bodies that span lines.
    fn skip_decl(&mut self) -> Option<()> {
        self.advance(); // consume keyword
        let mut level = 0usize;
        loop {
            if level == 0 && (self.line_break || self.check(&TokenKind::Semicolon)) {
                return Some(());
            }
            match self.current.kind {
                TokenKind::LParen | TokenKind::LBrace | TokenKind::LBracket => level += 1,
                TokenKind::RParen | TokenKind::RBrace | TokenKind::RBracket => {
                    if level == 0 {
                        self.unexpected("newline or `;`");
                        return None;
                    }
                    level -= 1;
                }
                TokenKind::Eof if level == 0 => return Some(()),
                TokenKind::Eof => {
                    self.unexpected("closing bracket");
                    return None;
                }
                _ => {}
            }
            self.advance();
        }
    }

    /// Skip a balanced `{ ... }` group, starting at the opening brace.
    fn skip_braces(&mut self) -> Option<()> {
        let mut level = 0usize;
        loop {
            match self.current.kind {
                TokenKind::LBrace => level += 1,
                TokenKind::RBrace => {
                    level -= 1;
                    if level == 0 {
                        self.advance();
                        return Some(());
                    }
                }
                TokenKind::Eof => {
                    self.unexpected("}");
                    return None;
                }
                _ => {}
            }
            self.advance();
        }
    }
}
