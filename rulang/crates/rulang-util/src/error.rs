//! Error taxonomy shared across the Rulang pipeline.
//!
//! Front-end errors (lex, parse, compile) carry a line number and abort the
//! pipeline at the first occurrence. Runtime errors carry a message and
//! unwind the evaluator call stack; the host decides how to surface them.
//! Control signals (`return`, `next()`) are not errors and never appear
//! here - they live in the evaluator's flow type.

use thiserror::Error;

/// Error produced by the scanner.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("lex error at {line}:{column}: {message}")]
pub struct LexError {
    /// Line where the offending character sits (1-based).
    pub line: u32,
    /// Column of the offending character (1-based).
    pub column: u32,
    /// Human-readable description.
    pub message: String,
}

impl LexError {
    pub fn new(line: u32, column: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

/// Error produced by the parser on a grammar mismatch.
///
/// The parser performs no recovery; the first mismatch halts parsing.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("parse error at line {line}: {message} (found {found})")]
pub struct ParseError {
    /// Line of the token the parser was looking at.
    pub line: u32,
    /// What the parser expected.
    pub message: String,
    /// Rendering of the actual token.
    pub found: String,
}

impl ParseError {
    pub fn new(line: u32, message: impl Into<String>, found: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
            found: found.into(),
        }
    }
}

/// Error produced while materializing state-machine transition tables.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// A `transition` block names a machine no `state` declaration defined.
    #[error("line {line}: unknown state machine `{name}`")]
    UnknownMachine { name: String, line: u32 },

    /// A transition rule names a state the machine does not have.
    #[error("line {line}: unknown state `{state}` in machine `{machine}`")]
    UnknownState {
        machine: String,
        state: String,
        line: u32,
    },
}

impl CompileError {
    /// Line the error was reported at.
    pub fn line(&self) -> u32 {
        match self {
            CompileError::UnknownMachine { line, .. } => *line,
            CompileError::UnknownState { line, .. } => *line,
        }
    }
}

/// Runtime error raised during evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Wrong value tag for an operation.
    #[error("type error: {0}")]
    Type(String),

    /// `get` or `assign` on a name no scope defines.
    #[error("undefined name `{0}`")]
    Name(String),

    /// A `validate` schema rejected its target.
    #[error("validation failed at `{path}`: expected {expected}, got {actual}")]
    Validation {
        /// Dotted path to the failing field.
        path: String,
        /// Declared type name.
        expected: String,
        /// Actual tag, or `missing`.
        actual: String,
    },

    /// Illegal state-machine operation (unregistered event, empty history).
    #[error("{0}")]
    Transition(String),
}

impl RuntimeError {
    pub fn type_error(message: impl Into<String>) -> Self {
        RuntimeError::Type(message.into())
    }

    pub fn transition(message: impl Into<String>) -> Self {
        RuntimeError::Transition(message.into())
    }
}

/// Umbrella over everything that can abort the front-end pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrontendError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Compile(#[from] CompileError),
}

impl FrontendError {
    /// Line number the error points at.
    pub fn line(&self) -> u32 {
        match self {
            FrontendError::Lex(e) => e.line,
            FrontendError::Parse(e) => e.line,
            FrontendError::Compile(e) => e.line(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_display() {
        let err = LexError::new(3, 7, "unexpected character `@`");
        assert_eq!(err.to_string(), "lex error at 3:7: unexpected character `@`");
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new(2, "expected `{`", "`}`");
        assert_eq!(err.to_string(), "parse error at line 2: expected `{` (found `}`)");
    }

    #[test]
    fn test_compile_error_line() {
        let err = CompileError::UnknownMachine {
            name: "Order".to_string(),
            line: 9,
        };
        assert_eq!(err.line(), 9);
        assert!(err.to_string().contains("Order"));
    }

    #[test]
    fn test_runtime_validation_display() {
        let err = RuntimeError::Validation {
            path: "user.name".to_string(),
            expected: "string".to_string(),
            actual: "number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "validation failed at `user.name`: expected string, got number"
        );
    }

    #[test]
    fn test_frontend_error_line() {
        let err: FrontendError = LexError::new(5, 1, "bad").into();
        assert_eq!(err.line(), 5);
        let err: FrontendError = ParseError::new(8, "expected expression", "`}`").into();
        assert_eq!(err.line(), 8);
    }
}
