//! rulang-util - Foundation types shared by every Rulang phase.
//!
//! This crate holds the pieces the rest of the workspace is built on:
//! source spans, the error taxonomy, and diagnostic rendering. It has no
//! knowledge of tokens, the AST, or runtime values.

pub mod diagnostic;
pub mod error;
pub mod span;

pub use diagnostic::{Diagnostic, Level};
pub use error::{CompileError, FrontendError, LexError, ParseError, RuntimeError};
pub use span::Span;
