//! Error types for the library.

use thiserror::Error;

pub use crate::security::claims::DecodeError;
pub use crate::security::session::StoreError;

/// Library error type.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// The session store could not be written.
    #[error("Session store error: {0}")]
    Store(#[from] StoreError),

    /// The backend accepted the login but returned no token.
    #[error("Login response did not contain a session token")]
    MissingToken,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;
