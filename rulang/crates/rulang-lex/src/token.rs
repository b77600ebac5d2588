//! Token definitions for the Rulang scanner.

use std::fmt;

use rulang_util::Span;

/// The kind of a lexical unit, including any literal payload.
///
/// Number literals are decoded to `f64` at scan time, string literals have
/// their escape sequences resolved, and identifiers carry their lexeme.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Numeric literal, e.g. `42` or `3.14`.
    Number(f64),
    /// String literal with escapes already decoded.
    String(String),
    /// Identifier (variable, function, state, property name).
    Ident(String),

    // Keywords
    /// "state" - state machine declaration.
    State,
    /// "transition" - transition table declaration.
    Transition,
    /// "when" - event clause inside a transition rule.
    When,
    /// "let" - variable binding.
    Let,
    /// "fn" - named or anonymous function.
    Fn,
    /// "if" - conditional.
    If,
    /// "else" - alternative branch.
    Else,
    /// "true" - boolean literal.
    True,
    /// "false" - boolean literal.
    False,
    /// "null" - null literal.
    Null,
    /// "return" - unwind to the nearest function call.
    Return,
    /// "print" - emit to the host print sink.
    Print,
    /// "endpoint" - HTTP endpoint declaration.
    Endpoint,
    /// "GET" HTTP method.
    Get,
    /// "POST" HTTP method.
    Post,
    /// "PUT" HTTP method.
    Put,
    /// "DELETE" HTTP method.
    Delete,
    /// "PATCH" HTTP method.
    Patch,
    /// "middleware" - named middleware declaration.
    Middleware,
    /// "use" - middleware application.
    Use,
    /// "next" - continue the middleware chain.
    Next,
    /// "validate" - request validation schema.
    Validate,
    /// "optional" - optional validation field marker.
    Optional,
    /// "server" - server port declaration.
    Server,
    /// "and" - short-circuit conjunction.
    And,
    /// "or" - short-circuit disjunction.
    Or,

    // Operators
    /// "+"
    Plus,
    /// "-"
    Minus,
    /// "*"
    Star,
    /// "/"
    Slash,
    /// "%"
    Percent,
    /// "=="
    EqEq,
    /// "!="
    NotEq,
    /// "<"
    Lt,
    /// ">"
    Gt,
    /// "<="
    LtEq,
    /// ">="
    GtEq,
    /// "="
    Eq,
    /// "->"
    Arrow,

    // Delimiters
    /// "("
    LParen,
    /// ")"
    RParen,
    /// "{"
    LBrace,
    /// "}"
    RBrace,
    /// "["
    LBracket,
    /// "]"
    RBracket,
    /// ","
    Comma,
    /// ";"
    Semicolon,
    /// "."
    Dot,
    /// ":"
    Colon,

    /// End of input marker.
    Eof,
}

impl TokenKind {
    /// Returns the lexeme when this token can stand in for a name.
    ///
    /// Identifiers qualify, and so does every keyword: the grammar allows
    /// keyword lexemes as property names and object keys (`order.state`,
    /// `req.body`), so member access and object literals go through this.
    pub fn ident_like(&self) -> Option<&str> {
        match self {
            TokenKind::Ident(name) => Some(name),
            TokenKind::State => Some("state"),
            TokenKind::Transition => Some("transition"),
            TokenKind::When => Some("when"),
            TokenKind::Let => Some("let"),
            TokenKind::Fn => Some("fn"),
            TokenKind::If => Some("if"),
            TokenKind::Else => Some("else"),
            TokenKind::True => Some("true"),
            TokenKind::False => Some("false"),
            TokenKind::Null => Some("null"),
            TokenKind::Return => Some("return"),
            TokenKind::Print => Some("print"),
            TokenKind::Endpoint => Some("endpoint"),
            TokenKind::Get => Some("GET"),
            TokenKind::Post => Some("POST"),
            TokenKind::Put => Some("PUT"),
            TokenKind::Delete => Some("DELETE"),
            TokenKind::Patch => Some("PATCH"),
            TokenKind::Middleware => Some("middleware"),
            TokenKind::Use => Some("use"),
            TokenKind::Next => Some("next"),
            TokenKind::Validate => Some("validate"),
            TokenKind::Optional => Some("optional"),
            TokenKind::Server => Some("server"),
            TokenKind::And => Some("and"),
            TokenKind::Or => Some("or"),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "number `{}`", n),
            TokenKind::String(s) => write!(f, "string \"{}\"", s),
            TokenKind::Ident(name) => write!(f, "`{}`", name),
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::Plus => write!(f, "`+`"),
            TokenKind::Minus => write!(f, "`-`"),
            TokenKind::Star => write!(f, "`*`"),
            TokenKind::Slash => write!(f, "`/`"),
            TokenKind::Percent => write!(f, "`%`"),
            TokenKind::EqEq => write!(f, "`==`"),
            TokenKind::NotEq => write!(f, "`!=`"),
            TokenKind::Lt => write!(f, "`<`"),
            TokenKind::Gt => write!(f, "`>`"),
            TokenKind::LtEq => write!(f, "`<=`"),
            TokenKind::GtEq => write!(f, "`>=`"),
            TokenKind::Eq => write!(f, "`=`"),
            TokenKind::Arrow => write!(f, "`->`"),
            TokenKind::LParen => write!(f, "`(`"),
            TokenKind::RParen => write!(f, "`)`"),
            TokenKind::LBrace => write!(f, "`{{`"),
            TokenKind::RBrace => write!(f, "`}}`"),
            TokenKind::LBracket => write!(f, "`[`"),
            TokenKind::RBracket => write!(f, "`]`"),
            TokenKind::Comma => write!(f, "`,`"),
            TokenKind::Semicolon => write!(f, "`;`"),
            TokenKind::Dot => write!(f, "`.`"),
            TokenKind::Colon => write!(f, "`:`"),
            other => match other.ident_like() {
                Some(lexeme) => write!(f, "`{}`", lexeme),
                None => write!(f, "token"),
            },
        }
    }
}

/// Maps an identifier lexeme to its keyword kind, if reserved.
///
/// The keyword table is fixed; anything not in it is an identifier.
pub fn keyword_from_ident(text: &str) -> Option<TokenKind> {
    let kind = match text {
        "state" => TokenKind::State,
        "transition" => TokenKind::Transition,
        "when" => TokenKind::When,
        "let" => TokenKind::Let,
        "fn" => TokenKind::Fn,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "null" => TokenKind::Null,
        "return" => TokenKind::Return,
        "print" => TokenKind::Print,
        "endpoint" => TokenKind::Endpoint,
        "GET" => TokenKind::Get,
        "POST" => TokenKind::Post,
        "PUT" => TokenKind::Put,
        "DELETE" => TokenKind::Delete,
        "PATCH" => TokenKind::Patch,
        "middleware" => TokenKind::Middleware,
        "use" => TokenKind::Use,
        "next" => TokenKind::Next,
        "validate" => TokenKind::Validate,
        "optional" => TokenKind::Optional,
        "server" => TokenKind::Server,
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        _ => return None,
    };
    Some(kind)
}

/// A token: its kind plus the source span it covers.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Line the token starts on (1-based).
    pub fn line(&self) -> u32 {
        self.span.line
    }
}
