//! Function calls.

use super::Interpreter;
use crate::errors::{arity_mismatch, not_callable, stack_overflow};
use crate::{Arity, EvalResult, Scope, ScopeRef, Value};

impl Interpreter<'_> {
    /// Invoke a callable value.
    ///
    /// A closure body runs in a fresh scope whose parent is the scope the
    /// closure captured, never the caller's.
    #[tracing::instrument(level = "debug", skip_all, fields(callee = %callee, args = args.len()))]
    pub fn call(&mut self, callee: &Value, args: &[Value]) -> EvalResult {
        match callee {
            Value::Builtin(builtin) => {
                if !builtin.arity.accepts(args.len()) {
                    let expected = match builtin.arity {
                        Arity::Exact(n) => n,
                        Arity::Variadic => args.len(),
                    };
                    return Err(arity_mismatch(builtin.name, expected, args.len()));
                }
                (builtin.func)(args, &self.print)
            }
            Value::Function(function) => {
                let params = function.params();
                if params.len() != args.len() {
                    return Err(arity_mismatch("fn", params.len(), args.len()));
                }
                if self.depth >= self.max_depth {
                    return Err(stack_overflow(self.max_depth));
                }

                let mut frame = Scope::with_parent(function.scope().clone());
                for (param, arg) in params.iter().zip(args) {
                    frame.define(param.clone(), arg.clone())?;
                }
                let frame = ScopeRef::new(frame);

                self.depth += 1;
                let result = self.eval_block(function.body(), &frame);
                self.depth -= 1;
                result
            }
            other => Err(not_callable(other)),
        }
    }
}
