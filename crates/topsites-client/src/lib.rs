//! Async client for the Alexa Top Sites service.
//!
//! The client signs each request with [`topsites_auth`], sends it through a
//! [`Transport`] and decodes the reply with [`topsites_xml`]. Requests follow
//! a begin / cancel / end lifecycle so callers can start a fetch, keep
//! working, and abandon it if they no longer need the answer.
//!
//! # Key components
//!
//! - [`config`] - [`TopSitesConfig`], loaded from the environment
//! - [`transport`] - the [`Transport`] seam and its `reqwest` implementation
//! - [`client`] - [`TopSitesClient`] and [`RequestHandle`]
//! - [`error`] - client, service and transport errors

pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use client::{RequestHandle, RequestState, TopSitesClient};
pub use config::TopSitesConfig;
pub use error::{ClientError, ClientResult, ServiceError, TransportError};
pub use transport::{ReqwestTransport, Transport};
