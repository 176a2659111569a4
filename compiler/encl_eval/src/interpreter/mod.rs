//! Tree-walking statement evaluator.
//!
//! The module system sees the interpreter through one operation,
//! [`Interpreter::exec_stmt`]: evaluate a statement in a scope chain and
//! report the top-level binding it produced, if any. Whoever owns the scope
//! decides what to do with that binding. `eval_block` defines it in place;
//! the scope builder defines it in the module scope under construction.
//!
//! `import` and `export` are module-body directives and never reach here
//! from a well-formed module build, so `exec_stmt` rejects them.

mod call;
mod expr;

use encl_ir::{Body, Name, Stmt, StmtKind};

use crate::errors::directive_outside_module;
use crate::host::{DetachedHost, ModuleHost};
use crate::print_handler::SharedPrintHandler;
use crate::{EvalError, EvalResult, ScopeRef, Value};

/// Default limit on nested function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

static DETACHED: DetachedHost = DetachedHost;

/// Result of evaluating one statement.
#[derive(Clone, Debug, PartialEq)]
pub struct StmtOutcome {
    /// Top-level binding produced by an assignment.
    pub binding: Option<(Name, Value)>,
    /// Value of an expression statement; `none` for assignments.
    pub value: Value,
}

pub struct Interpreter<'h> {
    host: &'h dyn ModuleHost,
    print: SharedPrintHandler,
    depth: usize,
    max_depth: usize,
}

impl<'h> Interpreter<'h> {
    pub fn new(host: &'h dyn ModuleHost, print: SharedPrintHandler) -> Self {
        Interpreter {
            host,
            print,
            depth: 0,
            max_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    /// Evaluate `stmt` against `scope` without defining anything.
    pub fn exec_stmt(&mut self, stmt: &Stmt, scope: &ScopeRef) -> Result<StmtOutcome, EvalError> {
        tracing::trace!(span = ?stmt.span, "exec statement");
        match &stmt.kind {
            StmtKind::Assign { name, value } => {
                let value = self.eval_expr(value, scope)?;
                Ok(StmtOutcome {
                    binding: Some((name.clone(), value)),
                    value: Value::None,
                })
            }
            StmtKind::Expr(expr) => Ok(StmtOutcome {
                binding: None,
                value: self.eval_expr(expr, scope)?,
            }),
            StmtKind::Import { .. } => Err(directive_outside_module("import")),
            StmtKind::Export { .. } => Err(directive_outside_module("export")),
        }
    }

    /// Run `body` in `scope`, defining produced bindings there. Returns the
    /// value of the last statement.
    pub fn eval_block(&mut self, body: &Body, scope: &ScopeRef) -> EvalResult {
        let mut last = Value::None;
        for stmt in &body.stmts {
            let outcome = self.exec_stmt(stmt, scope)?;
            if let Some((name, value)) = outcome.binding {
                scope.define(name, value)?;
            }
            last = outcome.value;
        }
        Ok(last)
    }
}

impl Interpreter<'static> {
    /// An interpreter with no session, registry or search path.
    ///
    /// Enough to invoke functions taken from a module value; `module`, `use`
    /// and qualified access fail with `HostUnavailable`.
    pub fn detached(print: SharedPrintHandler) -> Self {
        Interpreter::new(&DETACHED, print)
    }
}
