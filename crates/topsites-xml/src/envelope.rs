//! Top-level envelopes and the functions that decode whole documents.
//!
//! A request yields exactly one of two documents: the success envelope
//! ([`TopSitesResponse`]) or the error envelope ([`ErrorResponse`]). The error
//! envelope carries no namespace prefix:
//!
//! ```xml
//! <Response>
//!   <Errors>
//!     <Error><Code>InvalidParameterValue</Code><Message>...</Message></Error>
//!   </Errors>
//!   <RequestId>...</RequestId>
//! </Response>
//! ```

use serde::Serialize;
use tracing::debug;

use crate::alexa::TopSitesResponse;
use crate::atom::{Atom, atom_list, text_atom};
use crate::element::{Element, QualifiedName, XmlDocument};
use crate::error::AtomError;

text_atom!(
    /// Machine-readable error code.
    ErrorCode,
    None,
    "Code"
);
text_atom!(
    /// Human-readable error message.
    ErrorMessage,
    None,
    "Message"
);
text_atom!(
    /// Identifier of the failed request.
    ErrorRequestId,
    None,
    "RequestId"
);

atom_list!(
    /// Errors reported for one request, in the order the service listed them.
    Errors,
    None,
    "Errors",
    ErrorDetail
);

/// Root of an error document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorResponse {
    errors: Errors,
    request_id: Option<ErrorRequestId>,
}

impl ErrorResponse {
    /// The reported errors.
    #[must_use]
    pub fn errors(&self) -> &Errors {
        &self.errors
    }

    /// The request identifier.
    #[must_use]
    pub fn request_id(&self) -> Option<&ErrorRequestId> {
        self.request_id.as_ref()
    }
}

impl Atom for ErrorResponse {
    const NAME: QualifiedName<'static> = QualifiedName::new(None, "Response");

    fn decode(element: &Element<'_>) -> Result<Self, AtomError> {
        Ok(Self {
            errors: Errors::parse_required_child(element)?,
            request_id: ErrorRequestId::parse_child(element)?,
        })
    }
}

/// One `(code, message)` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorDetail {
    code: Option<ErrorCode>,
    message: Option<ErrorMessage>,
}

impl ErrorDetail {
    /// The error code.
    #[must_use]
    pub fn code(&self) -> Option<&ErrorCode> {
        self.code.as_ref()
    }

    /// The error message.
    #[must_use]
    pub fn message(&self) -> Option<&ErrorMessage> {
        self.message.as_ref()
    }
}

impl Atom for ErrorDetail {
    const NAME: QualifiedName<'static> = QualifiedName::new(None, "Error");

    fn decode(element: &Element<'_>) -> Result<Self, AtomError> {
        Ok(Self {
            code: ErrorCode::parse_child(element)?,
            message: ErrorMessage::parse_child(element)?,
        })
    }
}

/// Decode a whole success document.
///
/// # Errors
///
/// Returns [`AtomError::Malformed`] for input that is not an XML document, and
/// a schema or numeric error if the document does not match the success schema.
pub fn parse_top_sites_response(body: &[u8]) -> Result<TopSitesResponse, AtomError> {
    parse_document(body)
}

/// Decode a whole error document.
///
/// # Errors
///
/// Returns [`AtomError::Malformed`] for input that is not an XML document, and
/// a schema error if the document does not match the error schema.
pub fn parse_error_response(body: &[u8]) -> Result<ErrorResponse, AtomError> {
    parse_document(body)
}

fn parse_document<T: Atom>(body: &[u8]) -> Result<T, AtomError> {
    let document = XmlDocument::parse(body)?;
    T::from_element(document.root()).inspect_err(|e| {
        debug!(root = %T::NAME, error = %e, "document failed schema validation");
    })
}
