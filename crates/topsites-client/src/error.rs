//! Error types for the Top Sites client.

use bytes::Bytes;
use topsites_auth::AuthError;
use topsites_xml::{AtomError, ErrorResponse};

/// A failure below the XML layer: the request never produced a usable body.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The service answered with a non-success HTTP status.
    #[error("service returned HTTP {status}")]
    Status {
        /// Response status.
        status: http::StatusCode,
        /// Response body, if the service sent one.
        body: Option<Bytes>,
    },

    /// The request could not be sent or its response could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// The request did not finish within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The response body is not a well-formed XML document.
    #[error("invalid response body: {0}")]
    InvalidBody(String),
}

impl TransportError {
    /// The response body carried by the failure, if any.
    #[must_use]
    pub fn body(&self) -> Option<&Bytes> {
        match self {
            Self::Status { body, .. } => body.as_ref().filter(|b| !b.is_empty()),
            _ => None,
        }
    }
}

/// The service rejected the request with a structured error document.
#[derive(Debug, thiserror::Error)]
#[error("service rejected the request: {summary}")]
pub struct ServiceError {
    response: ErrorResponse,
    summary: String,
    #[source]
    transport: TransportError,
}

impl ServiceError {
    /// Pair a decoded error document with the transport failure that carried it.
    #[must_use]
    pub fn new(response: ErrorResponse, transport: TransportError) -> Self {
        let summary = response
            .errors()
            .iter()
            .map(|e| {
                let code = e.code().map_or("<no code>", |c| c.value());
                match e.message() {
                    Some(message) => format!("{code}: {}", message.value()),
                    None => code.to_owned(),
                }
            })
            .collect::<Vec<_>>()
            .join("; ");
        Self {
            response,
            summary,
            transport,
        }
    }

    /// The decoded error document.
    #[must_use]
    pub fn response(&self) -> &ErrorResponse {
        &self.response
    }

    /// The underlying transport failure.
    #[must_use]
    pub fn transport(&self) -> &TransportError {
        &self.transport
    }
}

/// Errors surfaced by the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The service returned an error document.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The transport failed without a usable error document.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The success document did not match the schema.
    #[error("failed to decode response: {0}")]
    Decode(#[source] AtomError),

    /// The request could not be signed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A request is already in flight on this client.
    #[error("a request is already in flight on this client")]
    Busy,

    /// The request was cancelled before it completed.
    #[error("request was cancelled")]
    Cancelled,
}

impl From<AtomError> for ClientError {
    fn from(err: AtomError) -> Self {
        match err {
            AtomError::Malformed(reason) => Self::Transport(TransportError::InvalidBody(reason)),
            other => Self::Decode(other),
        }
    }
}

/// Convenience result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
