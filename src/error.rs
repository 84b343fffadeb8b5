//! Error handling and custom error types
//!
//! Provides unified error handling across the relay using thiserror.

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Credential missing or still set to a placeholder. Raised before any
    /// network call is made.
    #[error("{0}")]
    Configuration(String),

    /// Upstream answered with a non-success status.
    #[error("Gemini API error: {status} - {body}")]
    Upstream { status: StatusCode, body: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Request body exceeds the {0} byte limit")]
    PayloadTooLarge(usize),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// HTTP status reported to the caller for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Error::Configuration(_)
            | Error::Upstream { .. }
            | Error::Http(_)
            | Error::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
