//! Terminal rendering of syntax errors.

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use encl_parse::ParseError;

/// Render `errors` against `source` as ariadne reports, one per error.
///
/// `file` is the label shown in report headers. Color is only used when
/// `color` is set so the output can be compared in tests.
pub fn render_syntax_errors(file: &str, source: &str, errors: &[ParseError], color: bool) -> String {
    let mut out = Vec::new();
    for error in errors {
        let span = error.span().range();
        let report = Report::build(ReportKind::Error, file.to_string(), span.start)
            .with_config(Config::default().with_color(color))
            .with_message(error.to_string())
            .with_label(
                Label::new((file.to_string(), span))
                    .with_message(label_for(error))
                    .with_color(Color::Red),
            )
            .finish();
        if let Err(err) = report.write((file.to_string(), Source::from(source)), &mut out) {
            tracing::warn!(%err, "failed to render diagnostic");
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn label_for(error: &ParseError) -> &'static str {
    match error {
        ParseError::Lex(_) => "not valid here",
        ParseError::DirectiveInExpression { .. } => "only allowed as a statement",
        ParseError::InvalidAssignmentTarget { .. } => "cannot assign to this",
        ParseError::UnknownUseArgument { .. } | ParseError::DuplicateUseArgument { .. } => {
            "in this `use` argument"
        }
        ParseError::NestingTooDeep { .. } => "nesting limit reached here",
        ParseError::Expected { .. } => "here",
    }
}
