//! Edge-case and property tests for the scanner.

use proptest::prelude::*;

use crate::token::TokenKind;
use crate::tokenize;

#[test]
fn test_adjacent_operators_without_spaces() {
    let kinds: Vec<_> = tokenize("a<=b!=c")
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Ident("a".to_string()),
            TokenKind::LtEq,
            TokenKind::Ident("b".to_string()),
            TokenKind::NotEq,
            TokenKind::Ident("c".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_dotted_event_path() {
    let kinds: Vec<_> = tokenize("payment.success")
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Ident("payment".to_string()),
            TokenKind::Dot,
            TokenKind::Ident("success".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_whitespace_only_source() {
    let tokens = tokenize(" \t\r\n  \n").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
}

#[test]
fn test_crlf_line_endings() {
    let tokens = tokenize("let\r\nx").unwrap();
    assert_eq!(tokens[1].span.line, 2);
}

proptest! {
    #[test]
    fn prop_identifiers_lex_to_a_single_token(name in "[a-zA-Z_][a-zA-Z0-9_]{0,20}") {
        let tokens = tokenize(&name).unwrap();
        prop_assert_eq!(tokens.len(), 2);
        match &tokens[0].kind {
            TokenKind::Ident(lexeme) => prop_assert_eq!(lexeme, &name),
            other => prop_assert!(other.ident_like() == Some(name.as_str())),
        }
    }

    #[test]
    fn prop_integers_round_trip(n in 0u32..1_000_000) {
        let tokens = tokenize(&n.to_string()).unwrap();
        prop_assert_eq!(&tokens[0].kind, &TokenKind::Number(n as f64));
    }

    #[test]
    fn prop_scanner_never_panics(source in "[ -~\\n\\t]{0,64}") {
        // Errors are fine; panics and hangs are not.
        let _ = tokenize(&source);
    }

    #[test]
    fn prop_token_stream_ends_in_eof(source in "[a-z0-9 +*/()\\n]{0,40}") {
        let tokens = tokenize(&source).unwrap();
        prop_assert_eq!(&tokens.last().unwrap().kind, &TokenKind::Eof);
    }
}
