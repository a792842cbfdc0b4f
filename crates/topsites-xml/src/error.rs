//! Decoding errors for the atom layer.
//!
//! Every failure aborts decoding of the whole subtree: no decoder ever
//! returns a partially populated node.

use crate::element::{Element, QualifiedName};

/// Errors that can occur while turning an XML document into atoms.
#[derive(Debug, thiserror::Error)]
pub enum AtomError {
    /// An element did not carry the qualified name its decoder expects, or a
    /// required container element was absent.
    #[error("XML element name mismatch: expected `{expected}`, found {found}")]
    SchemaMismatch {
        /// The qualified name the decoder expected.
        expected: String,
        /// What was found instead.
        found: String,
        /// Serialized source text of the offending element.
        fragment: String,
    },

    /// A child lookup was given no parent element.
    #[error("parent element cannot be absent when looking up `{child}`")]
    MissingParent {
        /// The child that was being looked up.
        child: String,
    },

    /// A numeric leaf held text that is not a valid number.
    #[error("invalid numeric value {text:?} in `{element}`: {reason}")]
    NumericFormat {
        /// The qualified name of the leaf.
        element: String,
        /// The raw element text.
        text: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The input is not a well-formed XML document.
    #[error("malformed XML document: {0}")]
    Malformed(String),
}

impl AtomError {
    pub(crate) fn name_mismatch(expected: QualifiedName<'_>, element: &Element<'_>) -> Self {
        Self::SchemaMismatch {
            expected: expected.to_string(),
            found: format!("`{}`", element.name()),
            fragment: element.fragment().to_owned(),
        }
    }

    pub(crate) fn missing_child(expected: QualifiedName<'_>, parent: &Element<'_>) -> Self {
        Self::SchemaMismatch {
            expected: expected.to_string(),
            found: format!("no such child under `{}`", parent.name()),
            fragment: parent.fragment().to_owned(),
        }
    }

    pub(crate) fn malformed(reason: impl std::fmt::Display) -> Self {
        Self::Malformed(reason.to_string())
    }

    /// The serialized XML fragment attached to a schema mismatch, if any.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        match self {
            Self::SchemaMismatch { fragment, .. } => Some(fragment),
            _ => None,
        }
    }
}
