//! Error types for the todo service client.
//!
//! `NotFound` gets a dedicated variant because the sync layer treats a
//! missing user differently from any other failure. All other non-2xx
//! responses land in `HttpError` with the raw status code and body.

use std::fmt;

/// Errors returned by `TodoClient` parse methods and by transports.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404.
    NotFound,

    /// The server returned a status other than the expected one or 404.
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),

    /// The request never produced a response (connect, DNS, timeout).
    TransportError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "resource not found"),
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
            ApiError::TransportError(msg) => {
                write!(f, "transport failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
