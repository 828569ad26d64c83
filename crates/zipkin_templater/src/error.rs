//! Error types for template generation.

use thiserror::Error;

/// Result type alias for template operations.
pub type TemplaterResult<T> = Result<T, TemplaterError>;

/// Errors that can occur while generating index templates.
#[derive(Error, Debug)]
pub enum TemplaterError {
    #[error("Elasticsearch versions 5-7.x are supported, was: {0}")]
    UnsupportedVersion(f64),

    #[error("Unknown index template kind: {0}")]
    UnknownKind(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
