//! Expression grammar.
//!
//! Precedence, loosest first: `||`, `&&`, equality, comparison, additive,
//! multiplicative, unary, postfix (calls and `$` member access).

use std::sync::Arc;

use encl_ir::{BinaryOp, Body, Expr, ExprKind, Stmt, StmtKind, TokenKind, UnaryOp, UseReference};

use crate::parser::{ParseResult, Parser};
use crate::ParseError;

fn or_op(kind: &TokenKind) -> Option<BinaryOp> {
    matches!(kind, TokenKind::PipePipe).then_some(BinaryOp::Or)
}

fn and_op(kind: &TokenKind) -> Option<BinaryOp> {
    matches!(kind, TokenKind::AmpAmp).then_some(BinaryOp::And)
}

fn equality_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::EqEq => Some(BinaryOp::Eq),
        TokenKind::NotEq => Some(BinaryOp::NotEq),
        _ => None,
    }
}

fn comparison_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::LtEq => Some(BinaryOp::LtEq),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::GtEq => Some(BinaryOp::GtEq),
        _ => None,
    }
}

fn additive_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        _ => None,
    }
}

fn multiplicative_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Percent => Some(BinaryOp::Rem),
        _ => None,
    }
}

impl Parser<'_> {
    pub(crate) fn expression(&mut self) -> ParseResult<Expr> {
        self.nested(Self::or_expr)
    }

    fn left_assoc(
        &mut self,
        operand: fn(&mut Self) -> ParseResult<Expr>,
        operator: fn(&TokenKind) -> Option<BinaryOp>,
    ) -> ParseResult<Expr> {
        let mut left = operand(self)?;
        while let Some(op) = operator(self.current_kind()) {
            self.advance();
            self.skip_newlines();
            let right = operand(self)?;
            let span = left.span.to(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    fn or_expr(&mut self) -> ParseResult<Expr> {
        self.left_assoc(Self::and_expr, or_op)
    }

    fn and_expr(&mut self) -> ParseResult<Expr> {
        self.left_assoc(Self::equality_expr, and_op)
    }

    fn equality_expr(&mut self) -> ParseResult<Expr> {
        self.left_assoc(Self::comparison_expr, equality_op)
    }

    fn comparison_expr(&mut self) -> ParseResult<Expr> {
        self.left_assoc(Self::additive_expr, comparison_op)
    }

    fn additive_expr(&mut self) -> ParseResult<Expr> {
        self.left_assoc(Self::multiplicative_expr, additive_op)
    }

    fn multiplicative_expr(&mut self) -> ParseResult<Expr> {
        self.left_assoc(Self::unary_expr, multiplicative_op)
    }

    fn unary_expr(&mut self) -> ParseResult<Expr> {
        let op = match self.current_kind() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.postfix_expr(),
        };
        let start = self.advance().span;
        let operand = self.nested(Self::unary_expr)?;
        let span = start.to(operand.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn postfix_expr(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary_expr()?;
        loop {
            match self.current_kind() {
                TokenKind::LParen => {
                    let args = self.call_args()?;
                    let span = expr.span.to(self.previous_span());
                    expr = Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        span,
                    );
                }
                TokenKind::Dollar => {
                    self.advance();
                    let name = self.expect_ident()?;
                    let span = expr.span.to(self.previous_span());
                    expr = Expr::new(
                        ExprKind::Member {
                            object: Box::new(expr),
                            name,
                        },
                        span,
                    );
                }
                _ => return Ok(expr),
            }
        }
    }

    /// `( expr, ... )`; newlines are allowed between arguments.
    fn call_args(&mut self) -> ParseResult<Vec<Expr>> {
        self.expect(&TokenKind::LParen)?;
        self.skip_newlines();
        let mut args = Vec::new();
        while !self.check(&TokenKind::RParen) {
            args.push(self.expression()?);
            self.skip_newlines();
            if !self.eat(&TokenKind::Comma) {
                break;
            }
            self.skip_newlines();
        }
        self.expect(&TokenKind::RParen)?;
        Ok(args)
    }

    fn primary_expr(&mut self) -> ParseResult<Expr> {
        let span = self.current_span();
        let kind = match self.current_kind() {
            TokenKind::Int(n) => ExprKind::Int(*n),
            TokenKind::Float(f) => ExprKind::Float(*f),
            TokenKind::Str(s) => ExprKind::Str(Arc::clone(s)),
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::None => ExprKind::None,
            TokenKind::Ident(name) => {
                self.advance();
                if !self.eat(&TokenKind::DoubleColon) {
                    return Ok(Expr::new(ExprKind::Ident(name.clone()), span));
                }
                let member = self.expect_ident()?;
                let kind = ExprKind::Qualified {
                    library: name.clone(),
                    name: member,
                };
                return Ok(Expr::new(kind, span.to(self.previous_span())));
            }
            TokenKind::LParen => {
                self.advance();
                self.skip_newlines();
                let inner = self.expression()?;
                self.skip_newlines();
                self.expect(&TokenKind::RParen)?;
                return Ok(Expr::new(inner.kind, span.to(self.previous_span())));
            }
            TokenKind::Fn => return self.function_expr(),
            TokenKind::If => return self.if_expr(),
            TokenKind::Module => {
                self.advance();
                let body = self.block()?;
                return Ok(Expr::new(ExprKind::Module(body), span.to(self.previous_span())));
            }
            TokenKind::Use => return self.use_expr(),
            TokenKind::Import => {
                return Err(ParseError::DirectiveInExpression {
                    directive: "import",
                    span,
                })
            }
            TokenKind::Export => {
                return Err(ParseError::DirectiveInExpression {
                    directive: "export",
                    span,
                })
            }
            _ => return Err(self.expected("expression")),
        };
        self.advance();
        Ok(Expr::new(kind, span))
    }

    /// `fn(a, b) { ... }`
    fn function_expr(&mut self) -> ParseResult<Expr> {
        let start = self.advance().span;
        self.expect(&TokenKind::LParen)?;
        self.skip_newlines();
        let mut params = Vec::new();
        while !self.check(&TokenKind::RParen) {
            params.push(self.expect_ident()?);
            self.skip_newlines();
            if !self.eat(&TokenKind::Comma) {
                break;
            }
            self.skip_newlines();
        }
        self.expect(&TokenKind::RParen)?;
        let body = self.block()?;
        Ok(Expr::new(
            ExprKind::Function { params, body },
            start.to(self.previous_span()),
        ))
    }

    /// `if cond { ... } else { ... }`; `else` may start the next line and may
    /// be followed directly by another `if`.
    fn if_expr(&mut self) -> ParseResult<Expr> {
        let start = self.advance().span;
        let cond = self.expression()?;
        let then_branch = self.block()?;

        let else_branch = if matches!(self.peek_past_newlines(), TokenKind::Else) {
            self.skip_newlines();
            self.advance();
            if self.check(&TokenKind::If) {
                let nested = self.if_expr()?;
                let span = nested.span;
                Some(Arc::new(Body::new(
                    vec![Stmt::new(StmtKind::Expr(nested), span)],
                    span,
                )))
            } else {
                Some(self.block()?)
            }
        } else {
            None
        };

        Ok(Expr::new(
            ExprKind::If {
                cond: Box::new(cond),
                then_branch,
                else_branch,
            },
            start.to(self.previous_span()),
        ))
    }

    /// `use(reference, attach = expr, id = expr)`
    fn use_expr(&mut self) -> ParseResult<Expr> {
        let start = self.advance().span;
        self.expect(&TokenKind::LParen)?;
        self.skip_newlines();

        let reference = if self.check(&TokenKind::LBrace) {
            UseReference::Block(self.block()?)
        } else {
            UseReference::Expr(Box::new(self.expression()?))
        };

        let mut attach = None;
        let mut id = None;
        self.skip_newlines();
        while self.eat(&TokenKind::Comma) {
            self.skip_newlines();
            let arg_span = self.current_span();
            let name = self.expect_ident()?;
            self.expect(&TokenKind::Eq)?;
            self.skip_newlines();
            let value = Box::new(self.expression()?);
            let slot = match name.as_str() {
                "attach" => &mut attach,
                "id" => &mut id,
                _ => {
                    return Err(ParseError::UnknownUseArgument {
                        name: name.to_string(),
                        span: arg_span,
                    })
                }
            };
            if slot.is_some() {
                return Err(ParseError::DuplicateUseArgument {
                    name: name.to_string(),
                    span: arg_span,
                });
            }
            *slot = Some(value);
            self.skip_newlines();
        }
        self.expect(&TokenKind::RParen)?;

        Ok(Expr::new(
            ExprKind::Use {
                reference,
                attach,
                id,
            },
            start.to(self.previous_span()),
        ))
    }
}
