//! The module loader.
//!
//! Turns a [`ModuleReference`] into a module value: code blocks go through
//! the scope builder, module values pass through untouched, paths are read
//! by the source loader first. With `attach` the result is appended to the
//! search path.
//!
//! The loader is also the interpreter's [`ModuleHost`], so `module { }` and
//! `use(...)` inside evaluated code come back here.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use encl_eval::errors::{load_error, no_such_export};
use encl_eval::{
    EvalError, EvalResult, Interpreter, ModuleHost, ModuleReference, ModuleValue,
    SharedPrintHandler, UseRequest,
};
use encl_ir::{Body, Name};
use parking_lot::Mutex;

use crate::{source, ExportPolicy, LibraryRegistry, ScopeBuilder, SearchPathRegistry, SessionConfig};

/// Identifier for attached modules that have no better name.
const ANONYMOUS_MODULE: &str = "module";

pub struct ModuleLoader {
    registry: Arc<dyn LibraryRegistry>,
    search_path: Arc<SearchPathRegistry>,
    print: SharedPrintHandler,
    max_call_depth: usize,
    base_dir: PathBuf,
    /// Canonical paths of files currently being loaded, outermost first.
    loading: Mutex<Vec<PathBuf>>,
}

impl ModuleLoader {
    pub fn new(config: &SessionConfig) -> Self {
        ModuleLoader {
            registry: Arc::clone(config.library_registry()),
            search_path: Arc::clone(config.search_path_registry()),
            print: Arc::clone(config.printer()),
            max_call_depth: config.max_depth(),
            base_dir: config.base_directory().to_path_buf(),
            loading: Mutex::new(Vec::new()),
        }
    }

    pub fn registry(&self) -> &Arc<dyn LibraryRegistry> {
        &self.registry
    }

    pub fn search_path(&self) -> &Arc<SearchPathRegistry> {
        &self.search_path
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    /// Interpreter that routes module operations back to this loader.
    pub fn interpreter(&self) -> Interpreter<'_> {
        Interpreter::new(self, Arc::clone(&self.print)).with_max_depth(self.max_call_depth)
    }

    /// Build a module value from `body`.
    pub fn module(&self, body: &Body, policy: ExportPolicy) -> Result<ModuleValue, EvalError> {
        ScopeBuilder::new(self.interpreter(), &*self.registry).build(body, policy)
    }

    /// Load `reference`, attaching the result under `identifier` (or a name
    /// derived from the reference) when `attach` is set.
    pub fn use_module(
        &self,
        reference: ModuleReference,
        attach: bool,
        identifier: Option<String>,
    ) -> Result<ModuleValue, EvalError> {
        let derived = derive_identifier(&reference);
        let module = match reference {
            ModuleReference::Block(body) => self.module(&body, ExportPolicy::default())?,
            ModuleReference::Value { module, .. } => module,
            ModuleReference::Path(path) => self.load_path(&path)?,
        };

        if attach {
            let identifier = identifier.map_or(derived, Name::from);
            self.search_path.attach(identifier, module.clone());
        }
        Ok(module)
    }

    /// Relative paths resolve against the directory of the file being loaded,
    /// or the base directory at top level.
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        let base = self
            .loading
            .lock()
            .last()
            .and_then(|current| current.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| self.base_dir.clone());
        base.join(path)
    }

    fn load_path(&self, path: &Path) -> Result<ModuleValue, EvalError> {
        let resolved = self.resolve_path(path);
        let canonical = resolved
            .canonicalize()
            .map_err(|err| load_error(path.display(), err))?;

        self.start_loading(&canonical)?;
        let result = source::load_file(&canonical)
            .and_then(|body| self.module(&body, ExportPolicy::default()));
        self.finish_loading();
        result
    }

    fn start_loading(&self, path: &Path) -> Result<(), EvalError> {
        let mut loading = self.loading.lock();
        if loading.iter().any(|p| p == path) {
            let cycle: Vec<String> = loading
                .iter()
                .map(PathBuf::as_path)
                .chain(std::iter::once(path))
                .map(|p| p.display().to_string())
                .collect();
            return Err(load_error(
                path.display(),
                format!("circular load detected: {}", cycle.join(" -> ")),
            ));
        }
        loading.push(path.to_path_buf());
        Ok(())
    }

    fn finish_loading(&self) {
        self.loading.lock().pop();
    }
}

fn derive_identifier(reference: &ModuleReference) -> Name {
    match reference {
        ModuleReference::Path(path) => path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map_or_else(|| Name::from(ANONYMOUS_MODULE), Name::from),
        ModuleReference::Value {
            bound_as: Some(name),
            ..
        } => name.clone(),
        ModuleReference::Value { bound_as: None, .. } | ModuleReference::Block(_) => {
            Name::from(ANONYMOUS_MODULE)
        }
    }
}

impl ModuleHost for ModuleLoader {
    fn qualified(&self, library: &Name, name: &Name) -> EvalResult {
        self.registry
            .resolve_external(library.as_str(), Some(std::slice::from_ref(name)))?
            .get(name.as_str())
            .cloned()
            .ok_or_else(|| no_such_export(library.as_str(), name.as_str()))
    }

    fn build_module(&self, body: &Arc<Body>) -> Result<ModuleValue, EvalError> {
        self.module(body, ExportPolicy::default())
    }

    fn use_module(&self, request: UseRequest) -> Result<ModuleValue, EvalError> {
        ModuleLoader::use_module(self, request.reference, request.attach, request.identifier)
    }
}
