//! Schema-validating XML decoders for Alexa Top Sites responses.
//!
//! Responses are decoded in two steps: the body is loaded into an
//! [`XmlDocument`], then an [`Atom`] type is built from the root element. Each
//! atom checks its element's qualified name before reading any content, and
//! composites look their children up by name, so a document either decodes to
//! a fully populated tree or fails with an [`AtomError`] that says why.
//!
//! # Key components
//!
//! - [`element`] - element tree and qualified names
//! - [`atom`] - the [`Atom`] trait and the name validator
//! - [`alexa`] - the `TopSitesResponse` success schema
//! - [`envelope`] - the error schema and whole-document entry points
//!
//! # Example
//!
//! ```
//! use topsites_xml::parse_error_response;
//!
//! let body = b"<Response><Errors><Error><Code>Throttled</Code></Error></Errors></Response>";
//! let response = parse_error_response(body).unwrap();
//! assert_eq!(response.errors()[0].code().unwrap().value(), "Throttled");
//! ```

pub mod alexa;
pub mod atom;
pub mod element;
pub mod envelope;
pub mod error;

pub use alexa::TopSitesResponse;
pub use atom::{Atom, validate};
pub use element::{Element, QualifiedName, XmlDocument};
pub use envelope::{ErrorDetail, ErrorResponse, Errors, parse_error_response, parse_top_sites_response};
pub use error::AtomError;
