//! String literal lexing.

use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    /// Lexes a string literal opened by `"` or `'`.
    ///
    /// The literal closes on the same quote character that opened it.
    /// Escape sequences `\n`, `\t`, `\r` decode to control characters;
    /// any other escaped character decodes to itself, which covers `\\`,
    /// `\"`, and `\'`. Raw newlines are permitted inside the literal.
    ///
    /// An unterminated string at end of input still produces a token with
    /// the content accumulated so far.
    pub(crate) fn lex_string(&mut self) -> Token {
        let quote = self.cursor.current_char();
        self.cursor.advance();

        let mut content = String::new();

        loop {
            if self.cursor.is_at_end() {
                // Tolerant tail: emit what we have.
                break;
            }

            let c = self.cursor.current_char();

            if c == quote {
                self.cursor.advance();
                break;
            }

            if c == '\\' {
                self.cursor.advance();
                if self.cursor.is_at_end() {
                    break;
                }
                let escaped = self.cursor.current_char();
                self.cursor.advance();
                content.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    other => other,
                });
            } else {
                content.push(c);
                self.cursor.advance();
            }
        }

        self.make_token(TokenKind::String(content))
    }
}
