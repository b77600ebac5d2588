//! Control signals and evaluation results.
//!
//! `return` and `next()` unwind the evaluator stack, but they are not
//! failures. [`Flow`] keeps them statically separate from
//! [`RuntimeError`] so every `?` in the evaluator propagates both without
//! conflating them, and the layers that care (function calls, the host's
//! middleware driver) can intercept exactly the signal they handle.

use rulang_util::RuntimeError;

use crate::value::Value;

/// Everything that can interrupt straight-line evaluation.
#[derive(Debug, Clone)]
pub enum Flow {
    /// `return` unwinding to the nearest enclosing function call.
    Return(Value),

    /// `next()` unwinding to the host's middleware driver.
    Next,

    /// A genuine runtime failure.
    Error(RuntimeError),
}

impl From<RuntimeError> for Flow {
    fn from(err: RuntimeError) -> Self {
        Flow::Error(err)
    }
}

/// Result type used throughout the evaluator.
pub type EvalResult<T> = Result<T, Flow>;

/// How a handler or middleware block finished, as seen by the host.
///
/// The host middleware driver continues the chain on [`Outcome::Next`],
/// stops on [`Outcome::Returned`] or [`Outcome::Completed`], and receives
/// runtime errors through the surrounding `Result`.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The block ran to the end without signaling.
    Completed,

    /// The block executed `return`, carrying the (possibly Null) value.
    Returned(Value),

    /// The block called `next()`.
    Next,
}
