//! rulang-lex - Lexical analyzer for Rulang source text.
//!
//! The scanner transforms source text into an ordered token stream ending
//! in [`TokenKind::Eof`]. It is a single-pass, lookahead-based scanner:
//! whitespace and `//` line comments are skipped, every other character
//! starts exactly one token. The first unexpected character aborts with a
//! [`rulang_util::LexError`]; there is no recovery.

pub mod cursor;
pub mod lexer;
pub mod token;

#[cfg(test)]
mod edge_cases;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use token::{keyword_from_ident, Token, TokenKind};

use rulang_util::LexError;

/// Scans `source` into a complete token list ending in an EOF token.
///
/// # Errors
///
/// Returns the first [`LexError`] encountered; no tokens are produced for
/// an invalid program.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_ends_in_eof() {
        let tokens = tokenize("let x = 1").unwrap();
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
        assert_eq!(tokens.len(), 5);
    }

    #[test]
    fn test_tokenize_empty_source() {
        let tokens = tokenize("").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn test_tokenize_reports_first_error() {
        let err = tokenize("let @ = 1").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.message.contains('@'));
    }
}
