//! Request signing for the Alexa Top Sites service.
//!
//! Requests are plain `GET`s whose query string carries the parameters, a UTC
//! timestamp and an HmacSHA256 signature over the canonical query.
//!
//! # Key components
//!
//! - [`request`] - the request descriptor and response groups
//! - [`query`] - canonical query string construction
//! - [`signer`] - string-to-sign, signature and signed URI assembly
//! - [`credentials`] - caller-owned key material
//! - [`clock`] - the time source used for timestamps
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use topsites_auth::{Credentials, Endpoint, TopSitesRequest, build_signed_uri};
//!
//! let secret = b"secret".to_vec();
//! let credentials = Credentials::new("AKIDEXAMPLE", &secret);
//! let request = TopSitesRequest::builder().country_code("US").count(10).build();
//! let timestamp = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
//!
//! let signed = build_signed_uri(&credentials, &request, &Endpoint::default(), &timestamp).unwrap();
//! assert!(signed.string_to_sign.starts_with("GET\nats.amazonaws.com\n/\n"));
//! ```

pub mod clock;
pub mod credentials;
pub mod error;
pub mod query;
pub mod request;
pub mod signer;

pub use clock::{Clock, FixedClock, SystemClock};
pub use credentials::{Credentials, zeroize};
pub use error::AuthError;
pub use request::{ResponseGroup, TopSitesRequest};
pub use signer::{
    DEFAULT_HOST, Endpoint, RequestSigner, SignedRequest, build_signed_uri, compute_signature,
    string_to_sign, verify_signed_query,
};
