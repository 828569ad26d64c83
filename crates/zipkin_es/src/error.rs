//! Error types for cluster access.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cluster operations.
pub type EsResult<T> = Result<T, EsError>;

/// Errors that can occur while talking to Elasticsearch.
#[derive(Error, Debug)]
pub enum EsError {
    #[error("Invalid Elasticsearch host {host}: {message}")]
    InvalidHost { host: String, message: String },

    #[error("Invalid CA bundle {path}: {message}")]
    InvalidCaBundle { path: PathBuf, message: String },

    #[error("Unexpected response {status} from {url}: {body}")]
    Status { status: u16, url: String, body: String },

    #[error("Invalid version number: {0:?}")]
    InvalidVersion(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Templater(#[from] zipkin_templater::TemplaterError),
}
