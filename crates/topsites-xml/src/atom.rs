//! The atom contract shared by every decodable node.
//!
//! An atom is built from exactly one element. Construction always starts with
//! a name check: an element that does not carry the atom's qualified name is a
//! [`AtomError::SchemaMismatch`], never a silent default.
//!
//! Three entry points cover every call site:
//!
//! - [`Atom::parse`] tolerates an absent element and yields `None`.
//! - [`Atom::parse_child`] looks a child up under a parent and fails with
//!   [`AtomError::MissingParent`] if the parent itself is absent.
//! - [`Atom::parse_required_child`] fails with a schema mismatch when the
//!   child is absent.

use rust_decimal::Decimal;

use crate::element::{Element, QualifiedName};
use crate::error::AtomError;

/// A node decoded from one XML element.
pub trait Atom: Sized {
    /// The qualified name the source element must carry.
    const NAME: QualifiedName<'static>;

    /// Build the node from an element whose name has already been checked.
    fn decode(element: &Element<'_>) -> Result<Self, AtomError>;

    /// Check the element's name, then decode it.
    fn from_element(element: &Element<'_>) -> Result<Self, AtomError> {
        validate(element, Self::NAME)?;
        Self::decode(element)
    }

    /// Decode an optional element. An absent element yields `Ok(None)`.
    fn parse(element: Option<&Element<'_>>) -> Result<Option<Self>, AtomError> {
        element.map(Self::from_element).transpose()
    }

    /// Decode the first child of `parent` that carries [`Atom::NAME`].
    ///
    /// A missing child yields `Ok(None)`; a missing parent is a contract
    /// violation reported as [`AtomError::MissingParent`].
    fn parse_child<'d, 'x: 'd>(
        parent: impl Into<Option<&'d Element<'x>>>,
    ) -> Result<Option<Self>, AtomError> {
        let parent = parent.into().ok_or_else(|| AtomError::MissingParent {
            child: Self::NAME.to_string(),
        })?;
        Self::parse(parent.child(Self::NAME))
    }

    /// Decode a child that the parent's schema requires.
    fn parse_required_child(parent: &Element<'_>) -> Result<Self, AtomError> {
        match parent.child(Self::NAME) {
            Some(element) => Self::from_element(element),
            None => Err(AtomError::missing_child(Self::NAME, parent)),
        }
    }
}

/// Check that `element` carries exactly the `expected` qualified name.
///
/// # Errors
///
/// Returns [`AtomError::SchemaMismatch`] with the element's source fragment.
pub fn validate(element: &Element<'_>, expected: QualifiedName<'_>) -> Result<(), AtomError> {
    if element.has_name(expected) {
        Ok(())
    } else {
        Err(AtomError::name_mismatch(expected, element))
    }
}

/// Parse element text as a locale-invariant base-10 decimal.
///
/// Only `[+-]?digits[.digits]` is accepted; `rust_decimal` alone would also
/// take digit separators such as `1_000`.
pub(crate) fn decimal_text(element: &Element<'_>) -> Result<Decimal, AtomError> {
    let text = element.text();
    let trimmed = text.trim();
    if !is_decimal_literal(trimmed) {
        return Err(numeric_error(element, text, &"not a plain decimal number"));
    }
    trimmed
        .parse::<Decimal>()
        .map_err(|e| numeric_error(element, text.clone(), &e))
}

/// Parse element text as an unsigned integer.
pub(crate) fn integer_text(element: &Element<'_>) -> Result<u64, AtomError> {
    let text = element.text();
    text.trim()
        .parse::<u64>()
        .map_err(|e| numeric_error(element, text.clone(), &e))
}

fn is_decimal_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    all_digits(whole) && fraction.is_none_or(all_digits)
}

fn numeric_error(element: &Element<'_>, text: String, reason: &dyn std::fmt::Display) -> AtomError {
    tracing::debug!(element = %element.name(), text = %text, "numeric leaf failed to parse");
    AtomError::NumericFormat {
        element: element.name().to_string(),
        text,
        reason: reason.to_string(),
    }
}

/// Declare a leaf atom holding the element text verbatim.
macro_rules! text_atom {
    ($(#[$meta:meta])* $ty:ident, $prefix:expr, $local:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
        #[serde(transparent)]
        pub struct $ty {
            value: String,
        }

        impl $ty {
            /// The element text.
            #[must_use]
            pub fn value(&self) -> &str {
                &self.value
            }
        }

        impl $crate::atom::Atom for $ty {
            const NAME: $crate::element::QualifiedName<'static> =
                $crate::element::QualifiedName::new($prefix, $local);

            fn decode(
                element: &$crate::element::Element<'_>,
            ) -> Result<Self, $crate::error::AtomError> {
                Ok(Self {
                    value: element.text(),
                })
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.value)
            }
        }
    };
}

/// Declare a leaf atom holding a number parsed by `$parse`.
macro_rules! numeric_atom {
    ($(#[$meta:meta])* $ty:ident, $prefix:expr, $local:literal, $value:ty, $parse:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
        #[serde(transparent)]
        pub struct $ty {
            value: $value,
        }

        impl $ty {
            /// The parsed value.
            #[must_use]
            pub fn value(&self) -> $value {
                self.value
            }
        }

        impl $crate::atom::Atom for $ty {
            const NAME: $crate::element::QualifiedName<'static> =
                $crate::element::QualifiedName::new($prefix, $local);

            fn decode(
                element: &$crate::element::Element<'_>,
            ) -> Result<Self, $crate::error::AtomError> {
                Ok(Self {
                    value: $parse(element)?,
                })
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.value, f)
            }
        }
    };
}

/// Declare an ordered collection of `$item` atoms.
///
/// Only children named `<$item as Atom>::NAME` are collected; other children
/// are ignored. A present container with no matching children decodes to an
/// empty collection.
macro_rules! atom_list {
    ($(#[$meta:meta])* $ty:ident, $prefix:expr, $local:literal, $item:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
        #[serde(transparent)]
        pub struct $ty {
            items: Vec<$item>,
        }

        impl $ty {
            /// Number of items.
            #[must_use]
            pub fn len(&self) -> usize {
                self.items.len()
            }

            /// Whether the container held no items.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.items.is_empty()
            }

            /// The item at `index`, in source order.
            #[must_use]
            pub fn get(&self, index: usize) -> Option<&$item> {
                self.items.get(index)
            }

            /// Iterate over the items in source order.
            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.items.iter()
            }
        }

        impl std::ops::Deref for $ty {
            type Target = [$item];

            fn deref(&self) -> &Self::Target {
                &self.items
            }
        }

        impl<'a> IntoIterator for &'a $ty {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.items.iter()
            }
        }

        impl IntoIterator for $ty {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<$item>;

            fn into_iter(self) -> Self::IntoIter {
                self.items.into_iter()
            }
        }

        impl $crate::atom::Atom for $ty {
            const NAME: $crate::element::QualifiedName<'static> =
                $crate::element::QualifiedName::new($prefix, $local);

            fn decode(
                element: &$crate::element::Element<'_>,
            ) -> Result<Self, $crate::error::AtomError> {
                let items = element
                    .children_named(<$item as $crate::atom::Atom>::NAME)
                    .map(<$item as $crate::atom::Atom>::from_element)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self { items })
            }
        }
    };
}

pub(crate) use {atom_list, numeric_atom, text_atom};
