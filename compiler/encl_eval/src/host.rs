//! The seam between the evaluator and the module system.
//!
//! `module { }`, `use(...)` and `lib::name` need the loader, the library
//! registry and the search path. The interpreter reaches them only through
//! [`ModuleHost`], which keeps this crate free of any module-system state.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use encl_ir::{Body, Name};

use crate::errors::host_unavailable;
use crate::{EvalError, EvalResult, ModuleValue};

/// What `use` was asked to load.
#[derive(Clone)]
pub enum ModuleReference {
    /// An in-place code block.
    Block(Arc<Body>),
    /// An existing module value, passed through unchanged. `bound_as` is the
    /// identifier it was referenced by, when known.
    Value {
        module: ModuleValue,
        bound_as: Option<Name>,
    },
    /// A standalone source file.
    Path(PathBuf),
}

impl fmt::Debug for ModuleReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleReference::Block(body) => write!(f, "Block({} stmts)", body.stmts.len()),
            ModuleReference::Value { bound_as, .. } => match bound_as {
                Some(name) => write!(f, "Value({name})"),
                None => f.write_str("Value(<anonymous>)"),
            },
            ModuleReference::Path(path) => write!(f, "Path({})", path.display()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct UseRequest {
    pub reference: ModuleReference,
    pub attach: bool,
    pub identifier: Option<String>,
}

impl UseRequest {
    pub fn new(reference: ModuleReference) -> Self {
        UseRequest {
            reference,
            attach: false,
            identifier: None,
        }
    }

    #[must_use]
    pub fn attach(mut self, identifier: Option<String>) -> Self {
        self.attach = true;
        self.identifier = identifier;
        self
    }
}

pub trait ModuleHost {
    /// `library::name`, resolved against the library registry.
    fn qualified(&self, library: &Name, name: &Name) -> EvalResult;

    /// Build a module value from `module { ... }`.
    fn build_module(&self, body: &Arc<Body>) -> Result<ModuleValue, EvalError>;

    /// Load a module for `use(...)`, attaching it when requested.
    fn use_module(&self, request: UseRequest) -> Result<ModuleValue, EvalError>;
}

/// Host for interpreters that run without a session, such as workers that
/// only invoke functions taken from an already-built module.
#[derive(Copy, Clone, Debug, Default)]
pub struct DetachedHost;

impl ModuleHost for DetachedHost {
    fn qualified(&self, _: &Name, _: &Name) -> EvalResult {
        Err(host_unavailable("qualified access"))
    }

    fn build_module(&self, _: &Arc<Body>) -> Result<ModuleValue, EvalError> {
        Err(host_unavailable("module"))
    }

    fn use_module(&self, _: UseRequest) -> Result<ModuleValue, EvalError> {
        Err(host_unavailable("use"))
    }
}
