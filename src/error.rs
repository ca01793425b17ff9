//! Errors raised at the content fetch boundary
//!
//! Normalization and rendering never fail for data-shape reasons, so
//! everything here is a transport, query or setup fault.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Content query failed ({status}): {message}")]
    Query { status: u16, message: String },

    #[error("Failed to decode content response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
