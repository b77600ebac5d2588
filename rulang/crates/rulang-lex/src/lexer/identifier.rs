//! Identifier and keyword lexing.

use crate::lexer::Lexer;
use crate::token::{keyword_from_ident, Token, TokenKind};

/// Whether `c` can start an identifier (`[A-Za-z_]`).
pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Whether `c` can continue an identifier (`[A-Za-z0-9_]`).
pub(crate) fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl<'a> Lexer<'a> {
    /// Lexes an identifier or keyword.
    ///
    /// After reading the lexeme, the fixed keyword table decides whether
    /// this is a keyword token or a plain identifier.
    pub(crate) fn lex_identifier(&mut self) -> Token {
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);
        let kind =
            keyword_from_ident(text).unwrap_or_else(|| TokenKind::Ident(text.to_string()));
        self.make_token(kind)
    }
}
