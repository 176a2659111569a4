//! Evaluation errors and their constructors.
//!
//! Errors are built through the `#[cold]` functions below rather than by
//! naming variants at each call site, so message fields are formatted the
//! same way everywhere.

use std::fmt::Display;

use encl_ir::BinaryOp;

use crate::Value;

/// An error raised while building, loading or evaluating a unit.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("unbound name `{name}`")]
    UnboundName { name: String },

    #[error("cannot import `{name}` from `{target}`: no such visible binding")]
    UnresolvedImport { name: String, target: String },

    #[error("failed to load `{reference}`: {cause}")]
    Load { reference: String, cause: String },

    #[error("unknown library `{library}`")]
    UnknownLibrary { library: String },

    #[error("`{module}` has no export named `{name}`")]
    NoSuchExport { module: String, name: String },

    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("value of type `{type_name}` is not callable")]
    NotCallable { type_name: &'static str },

    #[error("`{name}` expects {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: &'static str },

    #[error("`{directive}` is only allowed at the top level of a module body")]
    DirectiveOutsideModule { directive: &'static str },

    #[error("invalid export pattern `{pattern}`: {reason}")]
    InvalidExportPattern { pattern: String, reason: String },

    #[error("maximum call depth of {depth} exceeded")]
    StackOverflow { depth: usize },

    #[error("cannot define `{name}`: scope is frozen")]
    FrozenScope { name: String },

    #[error("`{operation}` needs a module host, but this interpreter is detached")]
    HostUnavailable { operation: &'static str },
}

pub type EvalResult = Result<Value, EvalError>;

// Resolution

#[cold]
pub fn unbound_name(name: &str) -> EvalError {
    EvalError::UnboundName {
        name: name.to_string(),
    }
}

#[cold]
pub fn unresolved_import(name: &str, target: &str) -> EvalError {
    EvalError::UnresolvedImport {
        name: name.to_string(),
        target: target.to_string(),
    }
}

#[cold]
pub fn unknown_library(library: &str) -> EvalError {
    EvalError::UnknownLibrary {
        library: library.to_string(),
    }
}

#[cold]
pub fn no_such_export(module: &str, name: &str) -> EvalError {
    EvalError::NoSuchExport {
        module: module.to_string(),
        name: name.to_string(),
    }
}

// Loading

#[cold]
pub fn load_error(reference: impl Display, cause: impl Display) -> EvalError {
    EvalError::Load {
        reference: reference.to_string(),
        cause: cause.to_string(),
    }
}

#[cold]
pub fn directive_outside_module(directive: &'static str) -> EvalError {
    EvalError::DirectiveOutsideModule { directive }
}

#[cold]
pub fn invalid_export_pattern(pattern: &str, reason: impl Display) -> EvalError {
    EvalError::InvalidExportPattern {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    }
}

#[cold]
pub fn host_unavailable(operation: &'static str) -> EvalError {
    EvalError::HostUnavailable { operation }
}

// Values and calls

#[cold]
pub fn type_mismatch(expected: &str, got: &Value) -> EvalError {
    EvalError::TypeMismatch {
        expected: expected.to_string(),
        got: got.type_name().to_string(),
    }
}

#[cold]
pub fn binary_type_mismatch(op: BinaryOp, left: &Value, right: &Value) -> EvalError {
    EvalError::TypeMismatch {
        expected: format!("operands supported by `{}`", op.symbol()),
        got: format!("{} and {}", left.type_name(), right.type_name()),
    }
}

#[cold]
pub fn not_callable(value: &Value) -> EvalError {
    EvalError::NotCallable {
        type_name: value.type_name(),
    }
}

#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    }
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::DivisionByZero
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::IntegerOverflow { operation }
}

#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::StackOverflow { depth }
}

#[cold]
pub fn frozen_scope(name: &str) -> EvalError {
    EvalError::FrozenScope {
        name: name.to_string(),
    }
}
