//! rulang-par - Parser (syntactic analyzer) for Rulang.
//!
//! A recursive-descent parser with a Pratt-style expression core. The
//! parser consumes the token list produced by `rulang-lex` and builds the
//! [`ast::Program`]. It performs no recovery: the first grammar mismatch
//! halts parsing with a [`ParseError`] carrying the current token's line.
//!
//! Statement parsing lives in `stmt`, expression parsing in `expr`; this
//! module owns the token buffer plus the lookahead and expectation
//! helpers the rules are written against.

pub mod ast;
mod expr;
mod stmt;

pub use expr::bp;

use std::mem;

use rulang_lex::{Token, TokenKind};
use rulang_util::{ParseError, Span};

use crate::ast::Program;

/// Recursive descent parser over a scanned token buffer.
///
/// # Example
///
/// ```
/// use rulang_lex::tokenize;
/// use rulang_par::Parser;
///
/// let tokens = tokenize("let x = 1 + 2").unwrap();
/// let program = Parser::new(tokens).parse().unwrap();
/// assert_eq!(program.body.len(), 1);
/// ```
pub struct Parser {
    /// Token stream from the scanner, always ending in EOF.
    tokens: Vec<Token>,

    /// Current position in the token stream.
    position: usize,
}

impl Parser {
    /// Creates a parser over `tokens`. An EOF token is appended if the
    /// scanner output did not include one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let needs_eof = !matches!(
            tokens.last(),
            Some(Token {
                kind: TokenKind::Eof,
                ..
            })
        );
        if needs_eof {
            tokens.push(Token::new(TokenKind::Eof, Span::DUMMY));
        }
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parses a complete program.
    pub fn parse(mut self) -> Result<Program, ParseError> {
        let mut body = Vec::new();
        while !self.is_at_end() {
            body.push(self.parse_stmt()?);
        }
        Ok(Program { body })
    }

    // =========================================================================
    // Token buffer helpers
    // =========================================================================

    pub(crate) fn current(&self) -> &Token {
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    pub(crate) fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    /// Kind of the token `offset` positions ahead (EOF past the end).
    pub(crate) fn peek_kind(&self, offset: usize) -> &TokenKind {
        let index = (self.position + offset).min(self.tokens.len() - 1);
        &self.tokens[index].kind
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Consumes and returns the current token. Does not move past EOF.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    /// Whether the current token has the same kind as `kind`, ignoring
    /// literal payloads.
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        mem::discriminant(self.current_kind()) == mem::discriminant(kind)
    }

    /// Consumes the current token if it matches `kind`.
    pub(crate) fn match_kind(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a token of kind `kind` or fails with "expected ...".
    pub(crate) fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(format!("expected {}", what)))
        }
    }

    /// Consumes a plain identifier and returns its lexeme.
    pub(crate) fn expect_ident(&mut self, what: &str) -> Result<String, ParseError> {
        match self.current_kind() {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            },
            _ => Err(self.error(format!("expected {}", what))),
        }
    }

    /// Consumes an identifier-like token (identifier or keyword lexeme).
    ///
    /// Property names, object keys, and event path segments accept
    /// keywords, so `order.state` and `req.body` parse.
    pub(crate) fn expect_name(&mut self, what: &str) -> Result<String, ParseError> {
        match self.current_kind().ident_like() {
            Some(name) => {
                let name = name.to_string();
                self.advance();
                Ok(name)
            },
            None => Err(self.error(format!("expected {}", what))),
        }
    }

    /// Consumes a string literal token and returns its content.
    pub(crate) fn expect_string(&mut self, what: &str) -> Result<String, ParseError> {
        match self.current_kind() {
            TokenKind::String(value) => {
                let value = value.clone();
                self.advance();
                Ok(value)
            },
            _ => Err(self.error(format!("expected {}", what))),
        }
    }

    // =========================================================================
    // Errors
    // =========================================================================

    /// Builds a [`ParseError`] at the current token.
    pub(crate) fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(
            self.current().line(),
            message,
            self.current_kind().to_string(),
        )
    }

    /// Builds a [`ParseError`] at an explicit line, for cases where the
    /// offending construct is behind the cursor (e.g. assignment targets).
    pub(crate) fn error_at(&self, line: u32, message: impl Into<String>) -> ParseError {
        ParseError::new(line, message, self.current_kind().to_string())
    }
}
