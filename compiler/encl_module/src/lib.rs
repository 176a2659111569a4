//! Enclave Module - isolated scopes, imports, exports and loading.
//!
//! A module body is evaluated in a fresh scope whose only ancestor is the
//! root scope. `import` directives pull bindings from registry libraries or
//! other module values into that scope; `export` directives decide which
//! bindings the resulting [`ModuleValue`] exposes. The [`ModuleLoader`]
//! builds modules from code blocks, existing module values or source files
//! and can publish them on a [`SearchPathRegistry`] consulted by unqualified
//! lookup in a [`Session`].
//!
//! # Lookup order in a session
//!
//! 1. the session's own scope
//! 2. attached modules, most recent first
//! 3. the root scope
//!
//! Module bodies never see steps 1 and 2.

mod builder;
mod config;
mod export;
mod import;
mod loader;
mod registry;
mod search_path;
mod session;
pub mod source;
mod stdlib;

pub use builder::ScopeBuilder;
pub use config::{SessionConfig, MAX_DEPTH_ENV};
pub use encl_eval::ModuleValue;
pub use export::{ExportEntry, ExportPolicy, PATTERN_SENTINEL};
pub use import::{ImportResolver, ImportSource};
pub use loader::ModuleLoader;
pub use registry::{LibraryRegistry, StaticRegistry};
pub use search_path::{SearchPathEntry, SearchPathRegistry};
pub use session::Session;
pub use stdlib::{standard_registry, MAX_REPEAT_BYTES};
