//! Session configuration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use encl_eval::{stdout_handler, SharedPrintHandler, DEFAULT_MAX_CALL_DEPTH};

use crate::{standard_registry, LibraryRegistry, SearchPathRegistry};

/// Environment variable overriding the call depth limit.
pub const MAX_DEPTH_ENV: &str = "ENCL_MAX_DEPTH";

/// Settings for a [`Session`](crate::Session) and its loader.
///
/// # Example
///
/// ```
/// use encl_module::SessionConfig;
///
/// let config = SessionConfig::default()
///     .base_dir("scripts")
///     .max_call_depth(64);
/// assert_eq!(config.max_depth(), 64);
/// ```
#[derive(Clone)]
pub struct SessionConfig {
    base_dir: PathBuf,
    max_call_depth: usize,
    print_handler: SharedPrintHandler,
    registry: Arc<dyn LibraryRegistry>,
    search_path: Arc<SearchPathRegistry>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            base_dir: PathBuf::from("."),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            print_handler: stdout_handler(),
            registry: Arc::new(standard_registry()),
            search_path: Arc::new(SearchPathRegistry::new()),
        }
    }
}

impl SessionConfig {
    /// Defaults with overrides read from the process environment.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`; invalid values are logged and ignored.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(MAX_DEPTH_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => self.max_call_depth = depth,
                _ => tracing::warn!(value = %raw, "ignoring invalid {MAX_DEPTH_ENV}"),
            }
        }
        self
    }

    /// Directory top-level relative paths are resolved against.
    #[must_use]
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = handler;
        self
    }

    #[must_use]
    pub fn registry(mut self, registry: Arc<dyn LibraryRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Share a search path with other sessions.
    #[must_use]
    pub fn search_path(mut self, search_path: Arc<SearchPathRegistry>) -> Self {
        self.search_path = search_path;
        self
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_dir
    }

    pub fn max_depth(&self) -> usize {
        self.max_call_depth
    }

    pub fn printer(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn library_registry(&self) -> &Arc<dyn LibraryRegistry> {
        &self.registry
    }

    pub fn search_path_registry(&self) -> &Arc<SearchPathRegistry> {
        &self.search_path
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("base_dir", &self.base_dir)
            .field("max_call_depth", &self.max_call_depth)
            .field("search_path_len", &self.search_path.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.base_directory(), Path::new("."));
        assert_eq!(config.max_depth(), DEFAULT_MAX_CALL_DEPTH);
        assert!(config.search_path_registry().is_empty());
    }

    #[test]
    fn env_override_applies() {
        let config = SessionConfig::default()
            .with_env_overrides(|key| (key == MAX_DEPTH_ENV).then(|| " 32 ".to_string()));
        assert_eq!(config.max_depth(), 32);
    }

    #[test]
    fn invalid_env_override_is_ignored() {
        for raw in ["deep", "0", "-4"] {
            let config = SessionConfig::default().with_env_overrides(|_| Some(raw.to_string()));
            assert_eq!(config.max_depth(), DEFAULT_MAX_CALL_DEPTH, "{raw}");
        }
    }
}
