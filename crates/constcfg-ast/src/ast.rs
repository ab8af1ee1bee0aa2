//! Syntax node definitions.

use crate::{Span, Spanned};
use smol_str::SmolStr;

/// A complete constant-declaration file.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceFile {
    /// Name from the `package` clause, if present
    pub package: Option<Ident>,
    /// Top-level declarations in source order
    pub decls: Vec<Decl>,
    /// Full span of the file
    pub span: Span,
}

impl SourceFile {
    /// Iterate over the value specs of every `const` declaration.
    pub fn const_specs(&self) -> impl Iterator<Item = &ValueSpec> {
        self.decls.iter().flat_map(|decl| match &decl.node {
            DeclKind::Const(group) => group.specs.as_slice(),
            _ => &[][..],
        })
    }
}

/// An identifier with its span.
pub type Ident = Spanned<SmolStr>;

/// A top-level declaration.
pub type Decl = Spanned<DeclKind>;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeclKind {
    /// `import "fmt"` or `import ( ... )`
    Import(Group<ImportSpec>),
    /// `const A = 1` or `const ( ... )`
    Const(Group<ValueSpec>),
    /// `var A = 1` or `var ( ... )`
    Var(Group<ValueSpec>),
    /// `type T ...`; the body is not retained
    Type,
    /// `func f() { ... }`; the body is not retained
    Func,
}

impl DeclKind {
    /// The declaration keyword, for diagnostics.
    pub fn keyword(&self) -> &'static str {
        match self {
            DeclKind::Import(_) => "import",
            DeclKind::Const(_) => "const",
            DeclKind::Var(_) => "var",
            DeclKind::Type => "type",
            DeclKind::Func => "func",
        }
    }
}

/// The specs of one declaration, written singly or inside parentheses.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Group<T> {
    /// Whether the specs were wrapped in `( ... )`
    pub grouped: bool,
    pub specs: Vec<T>,
}

/// One import: `name "path"`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImportSpec {
    /// Local name (`.` is recorded as `"."`)
    pub alias: Option<Ident>,
    /// Path literal, quotes included
    pub path: Spanned<SmolStr>,
}

/// `A, B Type = x, y`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueSpec {
    pub names: Vec<Ident>,
    /// Optional type annotation
    pub ty: Option<Spanned<TypeExpr>>,
    /// Initialiser expressions; may be empty inside a const group
    pub values: Vec<Expr>,
    pub span: Span,
}

impl ValueSpec {
    /// Names paired positionally with their values.
    pub fn bindings(&self) -> impl Iterator<Item = (&Ident, &Expr)> {
        self.names.iter().zip(self.values.iter())
    }
}

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeExpr {
    /// `int`, `time.Duration`
    Named {
        package: Option<SmolStr>,
        name: SmolStr,
    },
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// `[]T`
    Slice(Box<TypeExpr>),
}

// ============================================================================
// Expressions
// ============================================================================

/// An expression.
pub type Expr = Spanned<ExprKind>;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind {
    /// Literal token: `42`, `"text"`, `'c'`
    Literal(Literal),
    /// Bare identifier: `true`, `iota`, `Foo`
    Ident(SmolStr),
    /// `-x`, `!x`
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// `a + b`
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// `(x)`
    Paren(Box<Expr>),
    /// `a.b`
    Selector {
        base: Box<Expr>,
        field: Ident,
    },
    /// `f(a, b)`
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    /// `a[i]`
    Index {
        base: Box<Expr>,
        index: Box<Expr>,
    },
    /// `T{...}`; the element list is not retained
    Composite {
        ty: Box<Expr>,
    },
}

/// A literal with its verbatim source text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Literal {
    pub kind: LiteralKind,
    pub raw: SmolStr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LiteralKind {
    Int,
    Float,
    Imag,
    Char,
    /// `"..."` with escapes
    String,
    /// `` `...` ``
    RawString,
}

impl LiteralKind {
    /// Whether the literal must be unquoted before use.
    pub fn is_quoted_string(self) -> bool {
        matches!(self, LiteralKind::String | LiteralKind::RawString)
    }

    /// Whether the literal is numeric.
    pub fn is_numeric(self) -> bool {
        matches!(self, LiteralKind::Int | LiteralKind::Float | LiteralKind::Imag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOp {
    /// `-`
    Neg,
    /// `+`
    Plus,
    /// `!`
    Not,
    /// `^`
    BitNot,
    /// `&`
    Addr,
    /// `*`
    Deref,
}

impl UnaryOp {
    /// Source spelling of the operator.
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "^",
            UnaryOp::Addr => "&",
            UnaryOp::Deref => "*",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    // Bitwise
    And,
    Or,
    Xor,
    Shl,
    Shr,
    AndNot,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    LogicalAnd,
    LogicalOr,
}
