//! Enclave Eval - the statement evaluator.
//!
//! Values, lexical scopes, the root scope and a tree-walking interpreter.
//! Everything that needs the module system (building `module { }` values,
//! `use`, qualified `lib::name` access) goes through the [`ModuleHost`]
//! trait, implemented by `encl_module`.
//!
//! # Re-exports
//!
//! Error constructors live in [`errors`]; the error type and result alias
//! are re-exported at the crate root.

mod builtins;
pub mod errors;
mod host;
mod interpreter;
mod operators;
mod print_handler;
mod root;
mod scope;
mod value;

pub use errors::{EvalError, EvalResult};
pub use host::{DetachedHost, ModuleHost, ModuleReference, UseRequest};
pub use interpreter::{Interpreter, StmtOutcome, DEFAULT_MAX_CALL_DEPTH};
pub use operators::{evaluate_binary, evaluate_unary};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandler, SharedPrintHandler,
};
pub use root::root_scope;
pub use scope::{Fallback, Scope, ScopeRef};
pub use value::{Arity, BuiltinFn, BuiltinFnPtr, FunctionValue, ModuleValue, Value};
