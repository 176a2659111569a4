//! Enclave Parse - recursive-descent parser for source units.
//!
//! Produces a [`Body`] from a [`TokenList`]. Top-level statements recover
//! from errors by skipping to the next statement boundary, so a single call
//! reports every malformed statement in a file.

mod error;
mod expr;
mod parser;

use encl_ir::{Body, TokenList};

pub use error::ParseError;
pub use parser::MAX_NESTING_DEPTH;
use parser::Parser;

/// Parse a token list into a statement body.
pub fn parse(tokens: &TokenList) -> Result<Body, Vec<ParseError>> {
    Parser::new(tokens).parse_unit()
}

/// Lex and parse `source` in one step.
pub fn parse_source(source: &str) -> Result<Body, Vec<ParseError>> {
    let tokens = encl_lexer::lex(source)
        .map_err(|errors| errors.into_iter().map(ParseError::from).collect::<Vec<_>>())?;
    parse(&tokens)
}

#[cfg(test)]
mod tests;
