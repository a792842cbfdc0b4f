//! HmacSHA256 query signing.
//!
//! The signature covers a three-line prefix plus the canonical query:
//!
//! ```text
//! StringToSign = "GET" + "\n" +
//!                lowercase(Host) + "\n" +
//!                "/" + "\n" +
//!                CanonicalQuery
//! ```
//!
//! `Signature = Base64(HMAC-SHA256(SecretKey, StringToSign))`, percent-encoded
//! and appended as the last query parameter.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use hmac::{Hmac, KeyInit, Mac};
use percent_encoding::percent_decode_str;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::credentials::Credentials;
use crate::error::AuthError;
use crate::query::{canonical_query, format_timestamp, uri_encode};
use crate::request::TopSitesRequest;

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_PARAM: &str = "&Signature=";

/// Default service host.
pub const DEFAULT_HOST: &str = "ats.amazonaws.com";

/// Where signed requests are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// URI scheme, `http` for the public service.
    pub scheme: String,
    /// Host name, optionally with a port.
    pub host: String,
}

impl Endpoint {
    /// Create an endpoint from a scheme and host.
    #[must_use]
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new("http", DEFAULT_HOST)
    }
}

/// A fully signed request, ready to hand to a transport.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// The request URI including the signature parameter.
    pub uri: http::Uri,
    /// The canonical query the signature was computed over.
    pub canonical_query: String,
    /// The exact string that was signed.
    pub string_to_sign: String,
}

/// Build the string to sign for a canonical query.
#[must_use]
pub fn string_to_sign(host: &str, canonical_query: &str) -> String {
    let host = host.to_ascii_lowercase();
    format!("GET\n{host}\n/\n{canonical_query}")
}

/// Compute `Base64(HMAC-SHA256(secret, string_to_sign))`.
#[must_use]
pub fn compute_signature(secret_key: &[u8], string_to_sign: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret_key).expect("HMAC can accept any key length");
    mac.update(string_to_sign.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

/// Canonicalize, sign and assemble the request URI.
///
/// The result depends only on the arguments: the same inputs always yield the
/// same URI.
///
/// # Errors
///
/// Returns [`AuthError::MissingAccessKey`] for an empty access key and
/// [`AuthError::InvalidUri`] if the endpoint does not form a valid URI.
pub fn build_signed_uri(
    credentials: &Credentials<'_>,
    request: &TopSitesRequest,
    endpoint: &Endpoint,
    timestamp: &DateTime<Utc>,
) -> Result<SignedRequest, AuthError> {
    if credentials.access_key().is_empty() {
        return Err(AuthError::MissingAccessKey);
    }

    let canonical_query = canonical_query(credentials.access_key(), request, timestamp);
    let string_to_sign = string_to_sign(&endpoint.host, &canonical_query);
    let signature = compute_signature(credentials.secret_key(), &string_to_sign);

    debug!(
        host = %endpoint.host,
        response_group = %request.response_group,
        timestamp = %format_timestamp(timestamp),
        query_len = canonical_query.len(),
        "Signed TopSites request"
    );

    let uri = format!(
        "{}://{}/?{canonical_query}{SIGNATURE_PARAM}{}",
        endpoint.scheme,
        endpoint.host,
        uri_encode(&signature)
    );
    let uri = uri
        .parse::<http::Uri>()
        .map_err(|e| AuthError::InvalidUri(e.to_string()))?;

    Ok(SignedRequest {
        uri,
        canonical_query,
        string_to_sign,
    })
}

/// Check the trailing `Signature` parameter of a signed query string against
/// the query that precedes it.
///
/// # Errors
///
/// Returns [`AuthError::MissingQueryParam`] if the query has no signature and
/// [`AuthError::SignatureDoesNotMatch`] if the signature does not cover the
/// query as given.
pub fn verify_signed_query(
    secret_key: &[u8],
    host: &str,
    signed_query: &str,
) -> Result<(), AuthError> {
    let (canonical_query, encoded_signature) = signed_query
        .rsplit_once(SIGNATURE_PARAM)
        .ok_or_else(|| AuthError::MissingQueryParam("Signature".to_owned()))?;
    let provided = percent_decode_str(encoded_signature).decode_utf8_lossy();

    let expected = compute_signature(secret_key, &string_to_sign(host, canonical_query));

    if provided.as_bytes().ct_eq(expected.as_bytes()).into() {
        Ok(())
    } else {
        debug!(host = %host, "Query signature mismatch");
        Err(AuthError::SignatureDoesNotMatch)
    }
}

/// Signs requests for one endpoint, stamping them with the current time.
#[derive(Clone)]
pub struct RequestSigner {
    endpoint: Endpoint,
    clock: Arc<dyn Clock>,
}

impl RequestSigner {
    /// Create a signer for `endpoint` that uses the system clock.
    #[must_use]
    pub fn new(endpoint: Endpoint) -> Self {
        Self::with_clock(endpoint, Arc::new(SystemClock))
    }

    /// Create a signer with an explicit clock.
    #[must_use]
    pub fn with_clock(endpoint: Endpoint, clock: Arc<dyn Clock>) -> Self {
        Self { endpoint, clock }
    }

    /// The endpoint requests are signed for.
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Sign `request` at the clock's current time.
    ///
    /// # Errors
    ///
    /// See [`build_signed_uri`].
    pub fn sign(
        &self,
        credentials: &Credentials<'_>,
        request: &TopSitesRequest,
    ) -> Result<SignedRequest, AuthError> {
        build_signed_uri(credentials, request, &self.endpoint, &self.clock.now())
    }
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}
