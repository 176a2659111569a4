//! `encl` command implementations.
//!
//! Each command returns its result instead of printing or exiting, so the
//! binary decides how to report and the integration tests can inspect it.

use std::path::{Path, PathBuf};

use encl_eval::{EvalError, ModuleReference, Value};
use encl_ir::Body;
use encl_module::{ModuleValue, Session, SessionConfig};
use encl_parse::ParseError;

/// Failure of a driver command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Lex or parse errors, kept with the source text for rendering.
    #[error("{} syntax error(s) in '{}'", errors.len(), path.display())]
    Syntax {
        path: PathBuf,
        source_text: String,
        errors: Vec<ParseError>,
    },

    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Summary printed by `encl check`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckSummary {
    pub tokens: usize,
    pub statements: usize,
}

/// Evaluate `path` as a session script. Relative `use` paths resolve
/// against the script's directory.
pub fn run_file(path: &Path, config: SessionConfig) -> Result<Value, CommandError> {
    let body = read_and_parse(path)?;
    let session = Session::with_config(config.base_dir(parent_dir(path)));
    tracing::debug!(path = %path.display(), statements = body.stmts.len(), "running script");
    Ok(session.eval_body(&body)?)
}

/// Load `path` as a module and return its exports.
pub fn exports_file(path: &Path, config: SessionConfig) -> Result<ModuleValue, CommandError> {
    // Parse up front so syntax errors keep their spans for rendering.
    read_and_parse(path)?;
    let session = Session::with_config(config.base_dir(parent_dir(path)));
    let file = path.file_name().map_or_else(|| path.to_path_buf(), PathBuf::from);
    Ok(session.use_module(ModuleReference::Path(file), false, None)?)
}

/// Lex and parse `path` without evaluating it.
pub fn check_file(path: &Path) -> Result<CheckSummary, CommandError> {
    let source_text = read(path)?;
    let syntax_error = |errors: Vec<ParseError>| CommandError::Syntax {
        path: path.to_path_buf(),
        source_text: source_text.clone(),
        errors,
    };
    let tokens = encl_lexer::lex(&source_text)
        .map_err(|errors| syntax_error(errors.into_iter().map(ParseError::from).collect()))?;
    let body = encl_parse::parse(&tokens).map_err(syntax_error)?;
    Ok(CheckSummary {
        tokens: tokens.len(),
        statements: body.stmts.len(),
    })
}

/// Format exports one per line as `name = value`.
pub fn format_exports(module: &ModuleValue) -> String {
    module
        .iter()
        .map(|(name, value)| format!("{name} = {value}\n"))
        .collect()
}

fn read(path: &Path) -> Result<String, CommandError> {
    std::fs::read_to_string(path).map_err(|source| CommandError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_and_parse(path: &Path) -> Result<Body, CommandError> {
    let source_text = read(path)?;
    encl_parse::parse_source(&source_text).map_err(|errors| CommandError::Syntax {
        path: path.to_path_buf(),
        source_text,
        errors,
    })
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests;
