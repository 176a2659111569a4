//! Lexical scopes.
//!
//! A [`Scope`] keeps its bindings in declaration order with a hash index for
//! lookup. Scopes chain through an optional parent; a scope without a parent
//! may carry a [`Fallback`] consulted after its own bindings. Lookup never
//! holds a lock while descending into the parent.

use std::fmt;
use std::sync::Arc;

use encl_ir::Name;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use rustc_hash::FxHashMap;

use crate::errors::frozen_scope;
use crate::{EvalError, Value};

/// Extra lookup source behind a scope's own bindings and parent chain.
pub trait Fallback: Send + Sync {
    fn lookup(&self, name: &str) -> Option<Value>;
}

/// A single scope containing ordered bindings.
#[derive(Default)]
pub struct Scope {
    bindings: Vec<(Name, Value)>,
    index: FxHashMap<Name, usize>,
    parent: Option<ScopeRef>,
    fallback: Option<Arc<dyn Fallback>>,
    frozen: bool,
}

impl Scope {
    /// Create a new empty scope with no parent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new scope with a parent.
    pub fn with_parent(parent: ScopeRef) -> Self {
        Scope {
            parent: Some(parent),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: Arc<dyn Fallback>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Bind `name`. Redefining keeps the original declaration position.
    pub fn define(&mut self, name: Name, value: Value) -> Result<(), EvalError> {
        if self.frozen {
            return Err(frozen_scope(name.as_str()));
        }
        self.bind(name, value);
        Ok(())
    }

    pub(crate) fn bind(&mut self, name: Name, value: Value) {
        if let Some(&slot) = self.index.get(&name) {
            self.bindings[slot].1 = value;
        } else {
            self.index.insert(name.clone(), self.bindings.len());
            self.bindings.push((name, value));
        }
    }

    /// This scope's own binding for `name`, ignoring parent and fallback.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.index.get(name).map(|&slot| &self.bindings[slot].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Own bindings in declaration order.
    pub fn bindings(&self) -> &[(Name, Value)] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn parent(&self) -> Option<&ScopeRef> {
        self.parent.as_ref()
    }

    /// Reject all further definitions.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("names", &self.bindings.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .field("has_parent", &self.parent.is_some())
            .field("has_fallback", &self.fallback.is_some())
            .field("frozen", &self.frozen)
            .finish()
    }
}

/// Shared handle to a [`Scope`].
///
/// Closures capture a `ScopeRef`, so it must be `Send + Sync`.
#[derive(Clone, Default)]
pub struct ScopeRef(Arc<RwLock<Scope>>);

impl ScopeRef {
    pub fn new(scope: Scope) -> Self {
        ScopeRef(Arc::new(RwLock::new(scope)))
    }

    /// Convenience for `ScopeRef::new(Scope::with_parent(parent))`.
    pub fn child_of(parent: &ScopeRef) -> Self {
        ScopeRef::new(Scope::with_parent(parent.clone()))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Scope> {
        self.0.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Scope> {
        self.0.write()
    }

    /// Resolve `name`: own bindings, then the parent chain, then the fallback.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let (parent, fallback) = {
            let scope = self.0.read();
            if let Some(value) = scope.get(name) {
                return Some(value.clone());
            }
            (scope.parent.clone(), scope.fallback.clone())
        };
        parent
            .and_then(|parent| parent.lookup(name))
            .or_else(|| fallback.and_then(|fallback| fallback.lookup(name)))
    }

    pub fn define(&self, name: Name, value: Value) -> Result<(), EvalError> {
        self.0.write().define(name, value)
    }

    pub fn freeze(&self) {
        self.0.write().freeze();
    }

    /// Snapshot of own bindings in declaration order.
    pub fn bindings(&self) -> Vec<(Name, Value)> {
        self.0.read().bindings.clone()
    }

    pub fn ptr_eq(&self, other: &ScopeRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ScopeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_read() {
            Some(scope) => fmt::Debug::fmt(&*scope, f),
            None => f.write_str("Scope(<locked>)"),
        }
    }
}
