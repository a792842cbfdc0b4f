//! End-to-end tests for the Top Sites client.
//!
//! Most tests drive the full sign / send / decode path against
//! [`StubTransport`], an in-process transport that replays canned replies.
//! The live test talks to the real service and is marked `#[ignore]`.
//!
//! Run the live test with:
//! ```text
//! AWS_ACCESS_KEY_ID=... AWS_SECRET_ACCESS_KEY=... \
//!     cargo test -p topsites-integration -- --ignored
//! ```

use std::sync::{Arc, Once};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use topsites_auth::{Endpoint, FixedClock, RequestSigner};
use topsites_client::{TopSitesClient, Transport, TransportError};

static INIT: Once = Once::new();

/// Success document for a country ranking.
pub const COUNTRY_DOC: &str = include_str!("../fixtures/top_sites_country.xml");

/// Success document for a city listing.
pub const CITIES_DOC: &str = include_str!("../fixtures/top_sites_cities.xml");

/// Error document with one `InvalidParameterValue` error.
pub const ERROR_DOC: &str = include_str!("../fixtures/error_invalid_parameter.xml");

/// Access key used by stubbed tests.
pub const ACCESS_KEY: &str = "AKIDEXAMPLE";

/// Secret key used by stubbed tests.
pub const SECRET_KEY: &[u8] = b"wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY";

/// Initialize tracing (once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// The instant every stubbed request is signed at.
#[must_use]
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 5)
        .single()
        .unwrap_or_default()
}

/// What [`StubTransport`] answers with.
#[derive(Debug, Clone)]
pub enum StubReply {
    /// A `200 OK` with this body.
    Body(&'static str),
    /// A non-success status, optionally with a body.
    Status(http::StatusCode, Option<&'static str>),
    /// A failure with no response at all.
    Timeout,
    /// Never answer.
    Hang,
}

/// In-process transport that records each URI and replays one reply.
#[derive(Debug)]
pub struct StubTransport {
    reply: StubReply,
    requests: Mutex<Vec<http::Uri>>,
}

impl StubTransport {
    /// Create a stub that always answers with `reply`.
    #[must_use]
    pub fn new(reply: StubReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            requests: Mutex::new(Vec::new()),
        })
    }

    /// URIs requested so far.
    #[must_use]
    pub fn requests(&self) -> Vec<http::Uri> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get(&self, uri: &http::Uri) -> Result<Bytes, TransportError> {
        self.requests.lock().push(uri.clone());
        match &self.reply {
            StubReply::Body(body) => Ok(Bytes::from_static(body.as_bytes())),
            StubReply::Status(status, body) => Err(TransportError::Status {
                status: *status,
                body: body.map(|b| Bytes::from_static(b.as_bytes())),
            }),
            StubReply::Timeout => Err(TransportError::Timeout),
            StubReply::Hang => std::future::pending().await,
        }
    }
}

/// A client for the default endpoint that signs at [`fixed_time`] and sends
/// through `transport`.
#[must_use]
pub fn stub_client(transport: Arc<StubTransport>) -> TopSitesClient {
    init_tracing();
    let signer =
        RequestSigner::with_clock(Endpoint::default(), Arc::new(FixedClock(fixed_time())));
    TopSitesClient::with_transport(signer, transport)
}

mod test_decode;
mod test_lifecycle;
mod test_live;
mod test_service_error;
mod test_signing;
