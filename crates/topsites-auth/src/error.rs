//! Error types for request signing.

/// Errors that can occur while building or checking a signed request.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The access key is empty.
    #[error("access key must not be empty")]
    MissingAccessKey,

    /// The response group code is not one the service knows.
    #[error("unknown response group: {0}")]
    UnknownResponseGroup(String),

    /// The assembled URI was rejected.
    #[error("invalid request URI: {0}")]
    InvalidUri(String),

    /// A signed query string lacks a required parameter.
    #[error("missing required query parameter: {0}")]
    MissingQueryParam(String),

    /// The signature does not match the query string it was appended to.
    #[error("signature does not match")]
    SignatureDoesNotMatch,
}
