//! Parse errors.

use encl_ir::Span;
use encl_lexer::LexError;

/// An error produced while lexing or parsing a source unit.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found}")]
    Expected {
        expected: &'static str,
        found: &'static str,
        span: Span,
    },

    #[error("`{directive}` is a statement and cannot be used as a value")]
    DirectiveInExpression { directive: &'static str, span: Span },

    #[error("only a plain name can be assigned to")]
    InvalidAssignmentTarget { span: Span },

    #[error("unknown `use` argument `{name}` (expected `attach` or `id`)")]
    UnknownUseArgument { name: String, span: Span },

    #[error("`use` argument `{name}` given twice")]
    DuplicateUseArgument { name: String, span: Span },

    #[error("expression nested more than {limit} levels deep")]
    NestingTooDeep { limit: usize, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(err) => err.span(),
            ParseError::Expected { span, .. }
            | ParseError::DirectiveInExpression { span, .. }
            | ParseError::InvalidAssignmentTarget { span }
            | ParseError::UnknownUseArgument { span, .. }
            | ParseError::DuplicateUseArgument { span, .. }
            | ParseError::NestingTooDeep { span, .. } => *span,
        }
    }
}
