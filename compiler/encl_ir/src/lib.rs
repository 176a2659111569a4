//! Enclave IR - vocabulary shared by every phase.
//!
//! - [`Name`]: identifiers, with the private-name convention
//! - [`Span`]: byte ranges into source text
//! - [`TokenKind`], [`Token`], [`TokenList`]: lexer output
//! - [`ast`]: the statement/expression tree produced by the parser

pub mod ast;
mod name;
mod span;
mod token;

pub use ast::{BinaryOp, Body, Expr, ExprKind, ImportTarget, Stmt, StmtKind, UnaryOp, UseReference};
pub use name::Name;
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
