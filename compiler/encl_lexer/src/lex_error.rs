//! Lexer errors.

use encl_ir::Span;

/// An error produced while tokenizing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("unexpected character `{text}`")]
    UnexpectedCharacter { text: String, span: Span },

    #[error("integer literal `{text}` does not fit in 64 bits")]
    IntegerOverflow { text: String, span: Span },

    #[error("invalid float literal `{text}`")]
    InvalidFloat { text: String, span: Span },

    #[error("unterminated string literal")]
    UnterminatedString { span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedCharacter { span, .. }
            | LexError::IntegerOverflow { span, .. }
            | LexError::InvalidFloat { span, .. }
            | LexError::UnterminatedString { span } => *span,
        }
    }
}
