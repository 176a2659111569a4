//! The calling context for `module` and `use`.

use std::sync::Arc;

use encl_eval::errors::unbound_name;
use encl_eval::{
    root_scope, EvalError, EvalResult, Fallback, ModuleReference, ModuleValue, Scope, ScopeRef,
    SharedPrintHandler, Value,
};
use encl_ir::{Body, Name};

use crate::{source, ExportPolicy, ModuleLoader, SearchPathRegistry, SessionConfig};

/// Lookup past the session scope: attached modules, then the root scope.
struct SessionFallback {
    search_path: Arc<SearchPathRegistry>,
    root: ScopeRef,
}

impl Fallback for SessionFallback {
    fn lookup(&self, name: &str) -> Option<Value> {
        self.search_path
            .lookup(name)
            .or_else(|| self.root.lookup(name))
    }
}

/// A script session: its own top-level scope plus a module loader.
///
/// Unqualified names resolve in the session scope first, then in attached
/// modules from most to least recent, then in the root scope. Module bodies
/// built from a session see none of the session's bindings.
pub struct Session {
    scope: ScopeRef,
    loader: ModuleLoader,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        let loader = ModuleLoader::new(&config);
        let fallback = SessionFallback {
            search_path: Arc::clone(loader.search_path()),
            root: root_scope(),
        };
        Session {
            scope: ScopeRef::new(Scope::new().with_fallback(Arc::new(fallback))),
            loader,
        }
    }

    /// Parse and run `source` as top-level session statements.
    pub fn eval_source(&self, source: &str) -> EvalResult {
        let body = source::parse_unit(source, "<input>")?;
        self.eval_body(&body)
    }

    /// Run an already-parsed body. Returns the last statement's value.
    pub fn eval_body(&self, body: &Body) -> EvalResult {
        self.loader.interpreter().eval_block(body, &self.scope)
    }

    pub fn module(&self, body: &Body, policy: ExportPolicy) -> Result<ModuleValue, EvalError> {
        self.loader.module(body, policy)
    }

    pub fn use_module(
        &self,
        reference: ModuleReference,
        attach: bool,
        identifier: Option<String>,
    ) -> Result<ModuleValue, EvalError> {
        self.loader.use_module(reference, attach, identifier)
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.scope.lookup(name)
    }

    /// Like [`lookup`](Self::lookup), failing with `UnboundName`.
    pub fn get(&self, name: &str) -> EvalResult {
        self.lookup(name).ok_or_else(|| unbound_name(name))
    }

    pub fn define(&self, name: impl Into<Name>, value: Value) -> Result<(), EvalError> {
        self.scope.define(name.into(), value)
    }

    pub fn call(&self, callee: &Value, args: &[Value]) -> EvalResult {
        self.loader.interpreter().call(callee, args)
    }

    pub fn search_path(&self) -> &Arc<SearchPathRegistry> {
        self.loader.search_path()
    }

    pub fn loader(&self) -> &ModuleLoader {
        &self.loader
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        self.loader.print_handler()
    }
}
