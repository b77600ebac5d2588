//! Number literal lexing.

use rulang_util::LexError;

use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    /// Lexes a number literal.
    ///
    /// One or more decimal digits, optionally followed by `.` and one or
    /// more digits. A `.` not followed by a digit is left for the member
    /// operator, so `1.` lexes as `1` then `.`.
    pub(crate) fn lex_number(&mut self) -> Result<Token, LexError> {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        if self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit() {
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        let text = self.cursor.slice_from(self.token_start);
        let value = text
            .parse::<f64>()
            .map_err(|_| self.error(format!("invalid number literal `{}`", text)))?;

        Ok(self.make_token(TokenKind::Number(value)))
    }
}
