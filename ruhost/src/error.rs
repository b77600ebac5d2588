//! Error handling for the host runtime.

use thiserror::Error;

use rulang_util::{FrontendError, RuntimeError};

/// Main error type for the host runtime.
#[derive(Error, Debug)]
pub enum HostError {
    /// The program failed to compile.
    #[error(transparent)]
    Frontend(#[from] FrontendError),

    /// The program failed while executing.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// Configuration file problems.
    #[error("configuration error: {0}")]
    Config(String),

    /// A malformed or unsupported HTTP request.
    #[error("http error: {0}")]
    Http(String),

    /// IO failures (file reading, sockets).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding/decoding failures at the host boundary.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias used throughout the host runtime.
pub type Result<T> = std::result::Result<T, HostError>;
