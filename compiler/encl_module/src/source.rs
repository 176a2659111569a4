//! Reading source files into module bodies.

use std::path::Path;

use encl_eval::errors::load_error;
use encl_eval::EvalError;
use encl_ir::Body;
use encl_parse::ParseError;

/// Read `path` and parse its whole content as an implicit module body.
///
/// Read, lex and parse failures all become [`EvalError::Load`] naming the
/// path.
pub fn load_file(path: &Path) -> Result<Body, EvalError> {
    tracing::debug!(path = %path.display(), "loading source file");
    let source = std::fs::read_to_string(path).map_err(|err| load_error(path.display(), err))?;
    parse_unit(&source, &path.display().to_string())
}

/// Parse `source`, reporting failures as a load error for `reference`.
pub fn parse_unit(source: &str, reference: &str) -> Result<Body, EvalError> {
    encl_parse::parse_source(source).map_err(|errors| load_error(reference, describe(source, &errors)))
}

/// First diagnostic with its position, plus a count of the rest.
fn describe(source: &str, errors: &[ParseError]) -> String {
    let Some(first) = errors.first() else {
        return "parse failed".to_string();
    };
    let (line, col) = first.span().line_col(source);
    match errors.len() {
        1 => format!("{line}:{col}: {first}"),
        n => format!("{line}:{col}: {first} (and {} more)", n - 1),
    }
}
