//! Import resolution.
//!
//! Resolves what an `import` directive asks for and copies the bindings into
//! the module scope under construction. Nothing is written anywhere else, so
//! imports never leak into sibling modules or the root scope.

use encl_eval::errors::unresolved_import;
use encl_eval::{EvalError, ModuleValue, ScopeRef, Value};
use encl_ir::Name;

use crate::LibraryRegistry;

/// Resolved target of an `import` directive.
#[derive(Clone, Debug)]
pub enum ImportSource {
    /// A library looked up in the registry.
    Library(Name),
    /// An already-built module value; `label` names it in errors.
    Module { module: ModuleValue, label: String },
}

impl ImportSource {
    pub fn label(&self) -> &str {
        match self {
            ImportSource::Library(name) => name.as_str(),
            ImportSource::Module { label, .. } => label,
        }
    }
}

pub struct ImportResolver<'a> {
    registry: &'a dyn LibraryRegistry,
}

impl<'a> ImportResolver<'a> {
    pub fn new(registry: &'a dyn LibraryRegistry) -> Self {
        ImportResolver { registry }
    }

    /// Bindings selected by `names`, or every visible binding when `names`
    /// is `None`. Each requested name must be visible in the target.
    pub fn resolve(
        &self,
        source: &ImportSource,
        names: Option<&[Name]>,
    ) -> Result<Vec<(Name, Value)>, EvalError> {
        let visible = match source {
            ImportSource::Library(library) => {
                self.registry.resolve_external(library.as_str(), names)?
            }
            ImportSource::Module { module, .. } => module.clone(),
        };

        match names {
            None => Ok(visible
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect()),
            Some(names) => names
                .iter()
                .map(|name| {
                    visible
                        .get(name.as_str())
                        .map(|value| (name.clone(), value.clone()))
                        .ok_or_else(|| unresolved_import(name.as_str(), source.label()))
                })
                .collect(),
        }
    }

    /// Resolve and define the bindings in `scope`. Returns how many were
    /// injected.
    pub fn inject(
        &self,
        source: &ImportSource,
        names: Option<&[Name]>,
        scope: &ScopeRef,
    ) -> Result<usize, EvalError> {
        let bindings = self.resolve(source, names)?;
        let count = bindings.len();
        for (name, value) in bindings {
            scope.define(name, value)?;
        }
        tracing::debug!(source = source.label(), count, "imported bindings");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticRegistry;
    use encl_eval::root_scope;
    use pretty_assertions::assert_eq;

    fn lib() -> ModuleValue {
        ModuleValue::new([
            (Name::from("x"), Value::Int(1)),
            (Name::from("y"), Value::Int(2)),
        ])
    }

    fn names(list: &[&str]) -> Vec<Name> {
        list.iter().map(|n| Name::from(*n)).collect()
    }

    #[test]
    fn selected_names_only() {
        let registry = StaticRegistry::new().with_library("lib", lib());
        let resolver = ImportResolver::new(&registry);
        let scope = ScopeRef::child_of(&root_scope());

        let count = resolver
            .inject(
                &ImportSource::Library(Name::from("lib")),
                Some(&names(&["x"])),
                &scope,
            )
            .unwrap_or_else(|err| panic!("{err}"));

        assert_eq!(count, 1);
        assert_eq!(scope.lookup("x"), Some(Value::Int(1)));
        assert_eq!(scope.lookup("y"), None);
    }

    #[test]
    fn everything_when_unrestricted() {
        let registry = StaticRegistry::new();
        let resolver = ImportResolver::new(&registry);
        let source = ImportSource::Module {
            module: lib(),
            label: "geo".to_string(),
        };
        assert_eq!(
            resolver.resolve(&source, None),
            Ok(vec![
                (Name::from("x"), Value::Int(1)),
                (Name::from("y"), Value::Int(2)),
            ])
        );
    }

    #[test]
    fn missing_name_names_symbol_and_target() {
        let registry = StaticRegistry::new().with_library("lib", lib());
        let resolver = ImportResolver::new(&registry);
        let result = resolver.resolve(
            &ImportSource::Library(Name::from("lib")),
            Some(&names(&["x", "zzz"])),
        );
        assert_eq!(
            result,
            Err(EvalError::UnresolvedImport {
                name: "zzz".to_string(),
                target: "lib".to_string()
            })
        );
    }

    #[test]
    fn unknown_library_propagates() {
        let registry = StaticRegistry::new();
        let resolver = ImportResolver::new(&registry);
        assert!(matches!(
            resolver.resolve(&ImportSource::Library(Name::from("nope")), None),
            Err(EvalError::UnknownLibrary { .. })
        ));
    }
}
