//! Error types for the parse boundaries of the engine.
//!
//! Edit operations never fail with an error: a rejected edit returns `false`
//! or an empty result and logs a warning. Only decoding external data can
//! produce an [`EngineError`].

use thiserror::Error;

/// Errors raised while decoding or encoding engine data.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Unknown blend mode: {0}")]
    UnknownBlendMode(String),
}

/// Result type for fallible engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
