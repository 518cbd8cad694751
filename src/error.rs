//! Error handling for reqlog

use thiserror::Error;

/// Main error type for reqlog operations
#[derive(Error, Debug)]
pub enum ReqlogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unknown charset: {0}")]
    UnknownCharset(String),

    #[error("Body is not valid {0}")]
    Decode(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed XML document: {0}")]
    MalformedXml(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for reqlog operations
pub type Result<T> = std::result::Result<T, ReqlogError>;
