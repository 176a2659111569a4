//! The scope builder.
//!
//! Builds a module value from a body: a fresh scope chained to the root
//! scope, `import` directives resolved into it, every other statement handed
//! to the interpreter, `export` directives unioned into one policy. The scope
//! is frozen before filtering, so closures created in the body only ever see
//! the bindings it ended with.

use encl_eval::errors::type_mismatch;
use encl_eval::{root_scope, EvalError, Interpreter, ModuleValue, ScopeRef, Value};
use encl_ir::{Body, ImportTarget, StmtKind};

use crate::{ExportPolicy, ImportResolver, ImportSource, LibraryRegistry};

pub struct ScopeBuilder<'a> {
    interpreter: Interpreter<'a>,
    resolver: ImportResolver<'a>,
}

impl<'a> ScopeBuilder<'a> {
    pub fn new(interpreter: Interpreter<'a>, registry: &'a dyn LibraryRegistry) -> Self {
        ScopeBuilder {
            interpreter,
            resolver: ImportResolver::new(registry),
        }
    }

    /// Evaluate `body` in isolation and filter its bindings through `policy`
    /// unioned with the body's own `export` directives.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = body.stmts.len()))]
    pub fn build(mut self, body: &Body, policy: ExportPolicy) -> Result<ModuleValue, EvalError> {
        let scope = ScopeRef::child_of(&root_scope());
        let mut policy = policy;

        for stmt in &body.stmts {
            match &stmt.kind {
                StmtKind::Import { target, names } => {
                    let source = self.import_source(target, &scope)?;
                    self.resolver.inject(&source, names.as_deref(), &scope)?;
                }
                StmtKind::Export { entries } => {
                    policy.extend(ExportPolicy::parse(entries)?);
                }
                StmtKind::Assign { .. } | StmtKind::Expr(_) => {
                    let outcome = self.interpreter.exec_stmt(stmt, &scope)?;
                    if let Some((name, value)) = outcome.binding {
                        scope.define(name, value)?;
                    }
                }
            }
        }

        scope.freeze();
        let module = policy.filter(&scope.bindings());
        tracing::debug!(exports = module.len(), "module built");
        Ok(module)
    }

    fn import_source(
        &mut self,
        target: &ImportTarget,
        scope: &ScopeRef,
    ) -> Result<ImportSource, EvalError> {
        match target {
            ImportTarget::Library(library) => Ok(ImportSource::Library(library.clone())),
            ImportTarget::Named(name) => Ok(match scope.lookup(name.as_str()) {
                Some(Value::Module(module)) => ImportSource::Module {
                    module,
                    label: name.to_string(),
                },
                _ => ImportSource::Library(name.clone()),
            }),
            ImportTarget::Expr(expr) => match self.interpreter.eval_expr(expr, scope)? {
                Value::Module(module) => Ok(ImportSource::Module {
                    module,
                    label: "module".to_string(),
                }),
                other => Err(type_mismatch("module to import from", &other)),
            },
        }
    }
}
