//! Library registries.

use encl_eval::errors::unknown_library;
use encl_eval::{EvalError, ModuleValue};
use encl_ir::Name;
use rustc_hash::FxHashMap;

/// Resolves a library name to its exported bindings.
///
/// Used by `import` and by qualified `library::name` access. Loading and
/// caching of libraries are up to the implementation.
pub trait LibraryRegistry: Send + Sync {
    /// Exports of `library`, restricted to `names` when given.
    ///
    /// Requested names the library does not export are left out of the
    /// result; callers decide whether that is an error.
    fn resolve_external(
        &self,
        library: &str,
        names: Option<&[Name]>,
    ) -> Result<ModuleValue, EvalError>;
}

/// In-memory registry of prebuilt libraries.
#[derive(Clone, Debug, Default)]
pub struct StaticRegistry {
    libraries: FxHashMap<Name, ModuleValue>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_library(mut self, name: impl Into<Name>, module: ModuleValue) -> Self {
        self.register(name, module);
        self
    }

    /// Register or replace a library.
    pub fn register(&mut self, name: impl Into<Name>, module: ModuleValue) {
        self.libraries.insert(name.into(), module);
    }

    pub fn contains(&self, library: &str) -> bool {
        self.libraries.contains_key(library)
    }
}

impl LibraryRegistry for StaticRegistry {
    fn resolve_external(
        &self,
        library: &str,
        names: Option<&[Name]>,
    ) -> Result<ModuleValue, EvalError> {
        let module = self
            .libraries
            .get(library)
            .ok_or_else(|| unknown_library(library))?;
        let Some(names) = names else {
            return Ok(module.clone());
        };
        Ok(names
            .iter()
            .filter_map(|name| {
                module
                    .get(name.as_str())
                    .map(|value| (name.clone(), value.clone()))
            })
            .collect())
    }
}
