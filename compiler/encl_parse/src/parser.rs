//! Parser state, token cursor and statement grammar.

use std::sync::Arc;

use encl_ir::{Body, ExprKind, ImportTarget, Name, Span, Stmt, StmtKind, Token, TokenKind, TokenList};

use crate::ParseError;

pub(crate) type ParseResult<T> = Result<T, ParseError>;

/// Deepest expression nesting accepted before parsing fails.
pub const MAX_NESTING_DEPTH: usize = 512;

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

static EOF: Token = Token {
    kind: TokenKind::Eof,
    span: Span::DUMMY,
};

/// Parser state.
pub(crate) struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(tokens: &'t TokenList) -> Self {
        Parser {
            tokens: &tokens.tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parse a whole source unit, recovering at statement boundaries.
    pub(crate) fn parse_unit(mut self) -> Result<Body, Vec<ParseError>> {
        let mut stmts = Vec::new();
        let mut errors = Vec::new();
        let start = self.current_span();

        loop {
            self.skip_separators();
            if self.at_end() {
                break;
            }
            match self.statement().and_then(|stmt| {
                self.expect_statement_end()?;
                Ok(stmt)
            }) {
                Ok(stmt) => stmts.push(stmt),
                Err(err) => {
                    errors.push(err);
                    self.recover_to_next_statement();
                }
            }
        }

        if errors.is_empty() {
            let span = start.to(self.current_span());
            Ok(Body::new(stmts, span))
        } else {
            Err(errors)
        }
    }

    /// Run one level of recursive expression parsing, growing the stack on
    /// demand and failing once `MAX_NESTING_DEPTH` levels are open.
    pub(crate) fn nested<T>(&mut self, parse: fn(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                span: self.current_span(),
            });
        }
        self.depth += 1;
        let result = stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, || parse(self));
        self.depth -= 1;
        result
    }

    // Token access

    pub(crate) fn current(&self) -> &'t Token {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .unwrap_or(&EOF)
    }

    pub(crate) fn current_kind(&self) -> &'t TokenKind {
        &self.current().kind
    }

    pub(crate) fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the most recently consumed token.
    pub(crate) fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(Span::DUMMY, |t| t.span)
    }

    pub(crate) fn at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    pub(crate) fn advance(&mut self) -> &'t Token {
        let token = self.current();
        if !self.at_end() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind) -> ParseResult<&'t Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.expected(kind.describe()))
        }
    }

    pub(crate) fn expect_ident(&mut self) -> ParseResult<Name> {
        if let TokenKind::Ident(name) = self.current_kind() {
            self.advance();
            Ok(name.clone())
        } else {
            Err(self.expected("identifier"))
        }
    }

    pub(crate) fn expect_string(&mut self) -> ParseResult<Arc<str>> {
        if let TokenKind::Str(text) = self.current_kind() {
            self.advance();
            Ok(Arc::clone(text))
        } else {
            Err(self.expected("string literal"))
        }
    }

    pub(crate) fn expected(&self, expected: &'static str) -> ParseError {
        ParseError::Expected {
            expected,
            found: self.current_kind().describe(),
            span: self.current_span(),
        }
    }

    pub(crate) fn skip_newlines(&mut self) {
        while matches!(self.current_kind(), TokenKind::Newline) {
            self.advance();
        }
    }

    fn skip_separators(&mut self) {
        while matches!(
            self.current_kind(),
            TokenKind::Newline | TokenKind::Semicolon
        ) {
            self.advance();
        }
    }

    /// Kind of the next token that is not a newline, without consuming.
    pub(crate) fn peek_past_newlines(&self) -> &'t TokenKind {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .find(|t| !matches!(t.kind, TokenKind::Newline))
            .map_or(&EOF.kind, |t| &t.kind)
    }

    fn expect_statement_end(&mut self) -> ParseResult<()> {
        match self.current_kind() {
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof => {
                Ok(())
            }
            _ => Err(self.expected("end of statement")),
        }
    }

    fn recover_to_next_statement(&mut self) {
        let mut depth = 0usize;
        while !self.at_end() {
            match self.current_kind() {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => depth = depth.saturating_sub(1),
                TokenKind::Newline | TokenKind::Semicolon if depth == 0 => return,
                _ => {}
            }
            self.advance();
        }
    }

    // Statements

    /// `{ stmt* }`
    pub(crate) fn block(&mut self) -> ParseResult<Arc<Body>> {
        let open = self.expect(&TokenKind::LBrace)?.span;
        let mut stmts = Vec::new();
        loop {
            self.skip_separators();
            if self.check(&TokenKind::RBrace) {
                break;
            }
            if self.at_end() {
                return Err(self.expected("`}`"));
            }
            stmts.push(self.statement()?);
            self.expect_statement_end()?;
        }
        let close = self.advance().span;
        Ok(Arc::new(Body::new(stmts, open.to(close))))
    }

    pub(crate) fn statement(&mut self) -> ParseResult<Stmt> {
        match self.current_kind() {
            TokenKind::Import => self.import_directive(),
            TokenKind::Export => self.export_directive(),
            _ => {
                let expr = self.expression()?;
                if !self.check(&TokenKind::Eq) {
                    let span = expr.span;
                    return Ok(Stmt::new(StmtKind::Expr(expr), span));
                }
                self.advance();
                let target_span = expr.span;
                let ExprKind::Ident(name) = expr.kind else {
                    return Err(ParseError::InvalidAssignmentTarget { span: target_span });
                };
                let value = self.expression()?;
                let span = target_span.to(value.span);
                Ok(Stmt::new(StmtKind::Assign { name, value }, span))
            }
        }
    }

    /// `import(target, "name", ...)`
    fn import_directive(&mut self) -> ParseResult<Stmt> {
        let start = self.advance().span;
        self.expect(&TokenKind::LParen)?;
        self.skip_newlines();

        let target = match self.current_kind() {
            TokenKind::Str(library) => {
                self.advance();
                ImportTarget::Library(Name::from(&**library))
            }
            TokenKind::Ident(name)
                if matches!(
                    self.tokens.get(self.pos + 1).map(|t| &t.kind),
                    Some(TokenKind::Comma | TokenKind::RParen | TokenKind::Newline)
                ) =>
            {
                self.advance();
                ImportTarget::Named(name.clone())
            }
            _ => ImportTarget::Expr(Box::new(self.expression()?)),
        };

        let mut names = Vec::new();
        self.skip_newlines();
        while self.eat(&TokenKind::Comma) {
            self.skip_newlines();
            names.push(Name::from(&*self.expect_string()?));
            self.skip_newlines();
        }
        self.expect(&TokenKind::RParen)?;

        let names = if names.is_empty() { None } else { Some(names) };
        let span = start.to(self.previous_span());
        Ok(Stmt::new(StmtKind::Import { target, names }, span))
    }

    /// `export("name", "^pattern", ...)`
    fn export_directive(&mut self) -> ParseResult<Stmt> {
        let start = self.advance().span;
        self.expect(&TokenKind::LParen)?;
        self.skip_newlines();

        let mut entries = vec![self.expect_string()?];
        self.skip_newlines();
        while self.eat(&TokenKind::Comma) {
            self.skip_newlines();
            entries.push(self.expect_string()?);
            self.skip_newlines();
        }
        self.expect(&TokenKind::RParen)?;

        let span = start.to(self.previous_span());
        Ok(Stmt::new(StmtKind::Export { entries }, span))
    }
}
