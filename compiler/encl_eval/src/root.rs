//! The process-wide root scope.

use std::sync::OnceLock;

use encl_ir::Name;

use crate::builtins::ROOT_BUILTINS;
use crate::{Scope, ScopeRef, Value};

static ROOT: OnceLock<ScopeRef> = OnceLock::new();

/// The single frozen ancestor shared by every module scope.
///
/// Holds only baseline primitives, never session state.
pub fn root_scope() -> ScopeRef {
    ROOT.get_or_init(|| {
        let mut scope = Scope::new();
        for builtin in ROOT_BUILTINS {
            scope.bind(Name::from(builtin.name), Value::Builtin(builtin));
        }
        scope.freeze();
        tracing::debug!(bindings = scope.len(), "root scope initialized");
        ScopeRef::new(scope)
    })
    .clone()
}
