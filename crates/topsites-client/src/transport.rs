//! The HTTP transport seam.
//!
//! The lifecycle only needs "GET this URI, give me the body or a failure".
//! [`Transport`] is object-safe via `#[async_trait]` so the client can hold an
//! `Arc<dyn Transport>` and tests can swap in an in-process stub.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::config::TopSitesConfig;
use crate::error::TransportError;

/// Issues one HTTP `GET` and returns the raw response body.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Fetch `uri`.
    ///
    /// A non-success status is reported as [`TransportError::Status`] with the
    /// body attached, so the caller can look for an error document in it.
    async fn get(&self, uri: &http::Uri) -> Result<Bytes, TransportError>;
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with the configured timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Request`] if the HTTP client cannot be built.
    pub fn new(config: &TopSitesConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, uri: &http::Uri) -> Result<Bytes, TransportError> {
        let response = self
            .client
            .get(uri.to_string())
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        let body = response.bytes().await;
        response_outcome(status, body, classify)
    }
}

/// Combine the status line with the result of reading the body.
///
/// A non-success status wins over a failed body read, which then leaves the
/// status error without a body.
fn response_outcome<E>(
    status: http::StatusCode,
    body: Result<Bytes, E>,
    on_error: impl FnOnce(E) -> TransportError,
) -> Result<Bytes, TransportError> {
    match body {
        Ok(body) => {
            debug!(status = %status, body_len = body.len(), "Received response");
            if status.is_success() {
                Ok(body)
            } else {
                Err(TransportError::Status {
                    status,
                    body: Some(body),
                })
            }
        }
        Err(e) if status.is_success() => Err(on_error(e)),
        Err(_) => {
            debug!(status = %status, "Response body could not be read");
            Err(TransportError::Status { status, body: None })
        }
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Request(err.to_string())
    }
}
