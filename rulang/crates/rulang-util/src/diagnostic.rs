//! Diagnostic rendering for front-end and runtime errors.
//!
//! The pipeline itself returns typed errors; this module turns them into
//! the `error: message` / `--> line:column` form the CLI and REPL show.

use std::fmt;

use crate::error::FrontendError;
use crate::span::Span;

/// Diagnostic severity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// A failure that aborted the pipeline or a handler.
    Error,
    /// Something worth surfacing that did not abort anything.
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// A renderable message with severity, location, and optional notes.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(level: Level, message: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            message: message.into(),
            span,
            notes: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Error, message, span)
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Warning, message, span)
    }

    /// Appends a secondary note line.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.level, self.message)?;
        write!(f, "  --> line {}, column {}", self.span.line, self.span.column)?;
        for note in &self.notes {
            write!(f, "\n  note: {}", note)?;
        }
        Ok(())
    }
}

impl From<&FrontendError> for Diagnostic {
    fn from(err: &FrontendError) -> Self {
        let span = match err {
            FrontendError::Lex(e) => Span::point(e.line, e.column),
            FrontendError::Parse(e) => Span::point(e.line, 1),
            FrontendError::Compile(e) => Span::point(e.line(), 1),
        };
        let message = match err {
            FrontendError::Lex(e) => e.message.clone(),
            FrontendError::Parse(e) => format!("{} (found {})", e.message, e.found),
            FrontendError::Compile(e) => e.to_string(),
        };
        Diagnostic::error(message, span)
    }
}
