//! Error types for the Logo Objects client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers routinely branch on
//! "the record does not exist". Every other unexpected status lands in
//! `HttpError` with the raw status and body. The query compiler and the
//! query-string builder never produce errors.

/// Errors returned by `LogoClient` build and parse methods.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status the operation does not accept.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The configured base URL is not an absolute http(s) URL.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// A custom endpoint template references a parameter the caller did not supply.
    #[error("missing path parameter '{0}'")]
    MissingPathParameter(String),

    /// Configuration could not be loaded from the environment.
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),
}
