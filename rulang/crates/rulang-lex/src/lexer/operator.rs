//! Operator lexing.

use rulang_util::LexError;

use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    /// Lexes minus or arrow.
    ///
    /// Handles: `-`, `->`
    pub(crate) fn lex_minus(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('>') {
            self.make_token(TokenKind::Arrow)
        } else {
            self.make_token(TokenKind::Minus)
        }
    }

    /// Lexes equals or equals-equals.
    ///
    /// Handles: `=`, `==`
    pub(crate) fn lex_equals(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.make_token(TokenKind::EqEq)
        } else {
            self.make_token(TokenKind::Eq)
        }
    }

    /// Lexes not-equals.
    ///
    /// `!` exists only as the first half of `!=`; a bare `!` is an error.
    pub(crate) fn lex_bang(&mut self) -> Result<Token, LexError> {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Ok(self.make_token(TokenKind::NotEq))
        } else {
            Err(self.error("expected `=` after `!`"))
        }
    }

    /// Lexes less or less-equals.
    ///
    /// Handles: `<`, `<=`
    pub(crate) fn lex_less(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.make_token(TokenKind::LtEq)
        } else {
            self.make_token(TokenKind::Lt)
        }
    }

    /// Lexes greater or greater-equals.
    ///
    /// Handles: `>`, `>=`
    pub(crate) fn lex_greater(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            self.make_token(TokenKind::GtEq)
        } else {
            self.make_token(TokenKind::Gt)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(source: &str) -> Vec<TokenKind> {
        crate::tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_arrow_is_one_token() {
        assert_eq!(lex_all("->"), vec![TokenKind::Arrow, TokenKind::Eof]);
    }

    #[test]
    fn test_minus_space_greater_is_two_tokens() {
        assert_eq!(
            lex_all("- >"),
            vec![TokenKind::Minus, TokenKind::Gt, TokenKind::Eof]
        );
    }

    #[test]
    fn test_comparison_operators() {
        assert_eq!(
            lex_all("< <= > >= == !="),
            vec![
                TokenKind::Lt,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_eq_vs_eqeq() {
        assert_eq!(
            lex_all("= =="),
            vec![TokenKind::Eq, TokenKind::EqEq, TokenKind::Eof]
        );
    }

    #[test]
    fn test_bare_bang_is_an_error() {
        let err = crate::tokenize("a ! b").unwrap_err();
        assert!(err.message.contains("after `!`"));
        assert_eq!(err.column, 3);
    }

    #[test]
    fn test_arithmetic_operators() {
        assert_eq!(
            lex_all("+ - * / %"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Eof,
            ]
        );
    }
}
