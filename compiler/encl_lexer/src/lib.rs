//! Enclave Lexer - tokenizer for source units.
//!
//! Built on logos. `RawToken` is the logos-derived enum; [`lex`] decodes
//! literal payloads into `TokenKind` and collects every error rather than
//! stopping at the first, so callers can report them together.

mod escape;
mod lex_error;
mod raw_token;

use encl_ir::{Name, Span, Token, TokenKind, TokenList};
use logos::Logos;

pub use lex_error::LexError;
use raw_token::RawToken;

/// Tokenize `source`.
///
/// The returned list always ends with a single `Eof` token.
pub fn lex(source: &str) -> Result<TokenList, Vec<LexError>> {
    let mut tokens = TokenList::new();
    let mut errors = Vec::new();
    let mut logos = RawToken::lexer(source);

    while let Some(result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();
        match result {
            Ok(raw) => tokens.push(Token::new(convert_token(raw, slice), span)),
            Err(()) => {
                let error = classify_error(slice, span);
                let fatal = matches!(error, LexError::UnterminatedString { .. });
                errors.push(error);
                if fatal {
                    // Everything after an open quote would be lexed as noise.
                    break;
                }
            }
        }
    }

    if errors.is_empty() {
        tokens.push(Token::new(TokenKind::Eof, Span::point(source.len())));
        Ok(tokens)
    } else {
        Err(errors)
    }
}

/// Convert a raw token to a `TokenKind`, decoding literal payloads.
fn convert_token(raw: RawToken, slice: &str) -> TokenKind {
    match raw {
        RawToken::Newline => TokenKind::Newline,

        RawToken::Fn => TokenKind::Fn,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::None => TokenKind::None,
        RawToken::Module => TokenKind::Module,
        RawToken::Use => TokenKind::Use,
        RawToken::Import => TokenKind::Import,
        RawToken::Export => TokenKind::Export,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,

        RawToken::EqEq => TokenKind::EqEq,
        RawToken::Eq => TokenKind::Eq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Bang => TokenKind::Bang,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::DoubleColon => TokenKind::DoubleColon,
        RawToken::Dollar => TokenKind::Dollar,

        RawToken::Int(n) => TokenKind::Int(n),
        RawToken::Float(f) => TokenKind::Float(f),
        RawToken::String => {
            let content = &slice[1..slice.len() - 1];
            TokenKind::Str(escape::unescape_string(content).into())
        }
        RawToken::Ident => TokenKind::Ident(Name::from(slice)),
    }
}

/// Work out why logos rejected `slice`.
fn classify_error(slice: &str, span: Span) -> LexError {
    let text = slice.to_string();
    if slice.starts_with('"') {
        LexError::UnterminatedString { span }
    } else if slice.contains('.') && slice.starts_with(|c: char| c.is_ascii_digit()) {
        LexError::InvalidFloat { text, span }
    } else if slice.starts_with(|c: char| c.is_ascii_digit()) {
        LexError::IntegerOverflow { text, span }
    } else {
        LexError::UnexpectedCharacter { text, span }
    }
}
