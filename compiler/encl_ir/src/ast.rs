//! Syntax tree for module bodies and scripts.
//!
//! A source unit is a [`Body`]: an ordered list of statements. Directive
//! statements (`import`, `export`) are ordinary [`StmtKind`] variants so the
//! scope builder can intercept them while evaluating everything else through
//! the interpreter.
//!
//! Bodies that outlive parsing (function bodies, module literals, `use`
//! blocks) are held behind `Arc` so closures can share them across threads.

use std::sync::Arc;

use crate::{Name, Span};

/// An ordered sequence of statements.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Body {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl Body {
    pub fn new(stmts: Vec<Stmt>, span: Span) -> Self {
        Body { stmts, span }
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// `name = value`
    Assign { name: Name, value: Expr },
    /// `import(target, "a", "b")`; `names` is `None` when no names are listed.
    Import {
        target: ImportTarget,
        names: Option<Vec<Name>>,
    },
    /// `export("a", "^pattern")`; entries are kept raw until the export
    /// policy is built.
    Export { entries: Vec<Arc<str>> },
    /// Expression evaluated for its value or side effects.
    Expr(Expr),
}

/// What an import directive names.
#[derive(Clone, Debug, PartialEq)]
pub enum ImportTarget {
    /// `import("math")`: always a registry library.
    Library(Name),
    /// `import(math)`: a module value bound under that name in the module's
    /// own scope chain, otherwise a registry library of that name.
    Named(Name),
    /// Any other expression; must evaluate to a module value.
    Expr(Box<Expr>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    Bool(bool),
    None,
    Ident(Name),
    /// `library::name`, resolved against the library registry at the point
    /// of use.
    Qualified { library: Name, name: Name },
    /// `module$name`
    Member { object: Box<Expr>, name: Name },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary { op: UnaryOp, operand: Box<Expr> },
    Call { callee: Box<Expr>, args: Vec<Expr> },
    Function { params: Vec<Name>, body: Arc<Body> },
    If {
        cond: Box<Expr>,
        then_branch: Arc<Body>,
        else_branch: Option<Arc<Body>>,
    },
    /// `module { ... }`
    Module(Arc<Body>),
    /// `use(reference, attach = ..., id = ...)`
    Use {
        reference: UseReference,
        attach: Option<Box<Expr>>,
        id: Option<Box<Expr>>,
    },
}

/// First argument of `use(...)`.
#[derive(Clone, Debug, PartialEq)]
pub enum UseReference {
    /// `use({ ... })`: an in-place code block.
    Block(Arc<Body>),
    /// A path string or an expression yielding a module value.
    Expr(Box<Expr>),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}
