//! Expression evaluation.

use std::path::PathBuf;
use std::sync::Arc;

use encl_ir::{BinaryOp, Expr, ExprKind, UseReference};

use super::Interpreter;
use crate::errors::{no_such_export, type_mismatch, unbound_name};
use crate::host::{ModuleReference, UseRequest};
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::{EvalError, EvalResult, FunctionValue, ScopeRef, Value};

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

impl Interpreter<'_> {
    pub fn eval_expr(&mut self, expr: &Expr, scope: &ScopeRef) -> EvalResult {
        stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, || {
            self.eval_expr_inner(expr, scope)
        })
    }

    fn eval_expr_inner(&mut self, expr: &Expr, scope: &ScopeRef) -> EvalResult {
        match &expr.kind {
            ExprKind::Int(n) => Ok(Value::Int(*n)),
            ExprKind::Float(x) => Ok(Value::Float(*x)),
            ExprKind::Str(s) => Ok(Value::Str(Arc::clone(s))),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::None => Ok(Value::None),
            ExprKind::Ident(name) => scope
                .lookup(name.as_str())
                .ok_or_else(|| unbound_name(name.as_str())),
            ExprKind::Qualified { library, name } => self.host.qualified(library, name),
            ExprKind::Member { object, name } => {
                let value = self.eval_expr(object, scope)?;
                let Value::Module(module) = &value else {
                    return Err(type_mismatch("module", &value));
                };
                module.get(name.as_str()).cloned().ok_or_else(|| {
                    let label = match &object.kind {
                        ExprKind::Ident(bound) => bound.as_str(),
                        _ => "module",
                    };
                    no_such_export(label, name.as_str())
                })
            }
            ExprKind::Binary {
                op: op @ (BinaryOp::And | BinaryOp::Or),
                left,
                right,
            } => self.eval_logical(*op, left, right, scope),
            ExprKind::Binary { op, left, right } => {
                let left = self.eval_expr(left, scope)?;
                let right = self.eval_expr(right, scope)?;
                evaluate_binary(*op, &left, &right)
            }
            ExprKind::Unary { op, operand } => {
                let operand = self.eval_expr(operand, scope)?;
                evaluate_unary(*op, &operand)
            }
            ExprKind::Call { callee, args } => {
                let callee = self.eval_expr(callee, scope)?;
                let args = args
                    .iter()
                    .map(|arg| self.eval_expr(arg, scope))
                    .collect::<Result<Vec<_>, _>>()?;
                self.call(&callee, &args)
            }
            ExprKind::Function { params, body } => Ok(Value::Function(FunctionValue::new(
                params.clone(),
                Arc::clone(body),
                scope.clone(),
            ))),
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_condition(cond, scope)? {
                    self.eval_block(then_branch, scope)
                } else if let Some(else_branch) = else_branch {
                    self.eval_block(else_branch, scope)
                } else {
                    Ok(Value::None)
                }
            }
            ExprKind::Module(body) => self.host.build_module(body).map(Value::Module),
            ExprKind::Use {
                reference,
                attach,
                id,
            } => self.eval_use(reference, attach.as_deref(), id.as_deref(), scope),
        }
    }

    fn eval_condition(&mut self, cond: &Expr, scope: &ScopeRef) -> Result<bool, EvalError> {
        match self.eval_expr(cond, scope)? {
            Value::Bool(b) => Ok(b),
            other => Err(type_mismatch("bool", &other)),
        }
    }

    fn eval_logical(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        scope: &ScopeRef,
    ) -> EvalResult {
        let left = self.eval_condition(left, scope)?;
        let short_circuit = match op {
            BinaryOp::And => !left,
            _ => left,
        };
        if short_circuit {
            return Ok(Value::Bool(left));
        }
        self.eval_condition(right, scope).map(Value::Bool)
    }

    fn eval_use(
        &mut self,
        reference: &UseReference,
        attach: Option<&Expr>,
        id: Option<&Expr>,
        scope: &ScopeRef,
    ) -> EvalResult {
        let reference = match reference {
            UseReference::Block(body) => ModuleReference::Block(Arc::clone(body)),
            UseReference::Expr(expr) => match self.eval_expr(expr, scope)? {
                Value::Str(path) => ModuleReference::Path(PathBuf::from(&*path)),
                Value::Module(module) => ModuleReference::Value {
                    module,
                    bound_as: match &expr.kind {
                        ExprKind::Ident(name) => Some(name.clone()),
                        _ => None,
                    },
                },
                other => return Err(type_mismatch("path string or module", &other)),
            },
        };

        let mut request = UseRequest::new(reference);
        if let Some(attach) = attach {
            match self.eval_expr(attach, scope)? {
                Value::Bool(flag) => request.attach = flag,
                other => return Err(type_mismatch("bool for `attach`", &other)),
            }
        }
        if let Some(id) = id {
            match self.eval_expr(id, scope)? {
                Value::Str(text) => request.identifier = Some(text.to_string()),
                other => return Err(type_mismatch("str for `id`", &other)),
            }
        }

        self.host.use_module(request).map(Value::Module)
    }
}
