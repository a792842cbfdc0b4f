//! A read-only XML element tree built in one pass over the whole document.
//!
//! Decoders look children up by qualified name rather than streaming, so the
//! document is loaded fully before any atom is built. Elements borrow their
//! names and source fragments from the input text; nothing is copied except
//! character data.

use std::fmt;

use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};

use crate::error::AtomError;

/// A namespace prefix plus local name, compared exactly and case-sensitively.
///
/// `prefix: None` means the element has no prefix at all. It is a distinct
/// match target from `Some("")`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QualifiedName<'a> {
    /// Namespace prefix, if any.
    pub prefix: Option<&'a str>,
    /// Local element name.
    pub local_name: &'a str,
}

impl<'a> QualifiedName<'a> {
    /// Create a qualified name from an optional prefix and a local name.
    #[must_use]
    pub const fn new(prefix: Option<&'a str>, local_name: &'a str) -> Self {
        Self { prefix, local_name }
    }

    /// Split a raw `prefix:local` tag name.
    fn from_raw(raw: &'a str) -> Self {
        match raw.split_once(':') {
            Some((prefix, local_name)) => Self::new(Some(prefix), local_name),
            None => Self::new(None, raw),
        }
    }
}

impl fmt::Display for QualifiedName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.prefix {
            Some(prefix) => write!(f, "{prefix}:{}", self.local_name),
            None => f.write_str(self.local_name),
        }
    }
}

#[derive(Debug, Clone)]
enum Content<'a> {
    Element(Element<'a>),
    Text(String),
}

/// One element of a parsed document.
#[derive(Debug, Clone)]
pub struct Element<'a> {
    name: QualifiedName<'a>,
    content: Vec<Content<'a>>,
    fragment: &'a str,
}

impl<'a> Element<'a> {
    /// The element's qualified name.
    #[must_use]
    pub fn name(&self) -> QualifiedName<'a> {
        self.name
    }

    /// Whether the element carries exactly the given qualified name.
    #[must_use]
    pub fn has_name(&self, expected: QualifiedName<'_>) -> bool {
        self.name == expected
    }

    /// The element's source text, from its start tag through its end tag.
    #[must_use]
    pub fn fragment(&self) -> &'a str {
        self.fragment
    }

    /// Child elements in document order.
    pub fn children(&self) -> impl Iterator<Item = &Element<'a>> {
        self.content.iter().filter_map(|c| match c {
            Content::Element(e) => Some(e),
            Content::Text(_) => None,
        })
    }

    /// Child elements with the given qualified name, in document order.
    pub fn children_named<'s>(
        &'s self,
        name: QualifiedName<'s>,
    ) -> impl Iterator<Item = &'s Element<'a>> {
        self.children().filter(move |e| e.has_name(name))
    }

    /// The first child element with the given qualified name.
    #[must_use]
    pub fn child(&self, name: QualifiedName<'_>) -> Option<&Element<'a>> {
        self.children().find(|e| e.has_name(name))
    }

    /// Concatenated character data of this element and all its descendants.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for content in &self.content {
            match content {
                Content::Text(t) => out.push_str(t),
                Content::Element(e) => e.collect_text(out),
            }
        }
    }
}

/// A fully loaded XML document.
#[derive(Debug, Clone)]
pub struct XmlDocument<'a> {
    root: Element<'a>,
}

/// An element whose end tag has not been read yet.
struct OpenElement<'a> {
    start: usize,
    name: QualifiedName<'a>,
    content: Vec<Content<'a>>,
    pending_text: String,
}

impl<'a> OpenElement<'a> {
    /// Move buffered character data into the content list.
    ///
    /// Whitespace is kept verbatim; child lookups skip text nodes anyway.
    fn flush_text(&mut self) {
        if !self.pending_text.is_empty() {
            self.content
                .push(Content::Text(std::mem::take(&mut self.pending_text)));
        }
    }
}

impl<'a> XmlDocument<'a> {
    /// Parse a complete document from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`AtomError::Malformed`] if the bytes are not UTF-8, are not
    /// well-formed XML, or contain no root element.
    pub fn parse(input: &'a [u8]) -> Result<Self, AtomError> {
        let source = std::str::from_utf8(input)
            .map_err(|e| AtomError::malformed(format!("document is not valid UTF-8: {e}")))?;
        Self::parse_str(source)
    }

    /// Parse a complete document from text.
    ///
    /// # Errors
    ///
    /// Returns [`AtomError::Malformed`] if the text is not well-formed XML or
    /// contains no root element.
    pub fn parse_str(source: &'a str) -> Result<Self, AtomError> {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        let mut reader = Reader::from_str(source);
        let mut stack: Vec<OpenElement<'a>> = Vec::new();
        let mut root: Option<Element<'a>> = None;

        loop {
            match reader.read_event().map_err(AtomError::malformed)? {
                Event::Start(e) => {
                    // `<` + content + `>`
                    let start = tag_start(position(&reader)?, e.len() + 2)?;
                    let name = raw_name(source, start, &e)?;
                    if let Some(parent) = stack.last_mut() {
                        parent.flush_text();
                    }
                    stack.push(OpenElement {
                        start,
                        name,
                        content: Vec::new(),
                        pending_text: String::new(),
                    });
                }
                Event::Empty(e) => {
                    let end = position(&reader)?;
                    // `<` + content + `/>`
                    let start = tag_start(end, e.len() + 3)?;
                    let name = raw_name(source, start, &e)?;
                    let element = Element {
                        name,
                        content: Vec::new(),
                        fragment: slice(source, start, end)?,
                    };
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let mut open = stack
                        .pop()
                        .ok_or_else(|| AtomError::malformed("unexpected closing tag"))?;
                    open.flush_text();
                    let end = position(&reader)?;
                    let element = Element {
                        name: open.name,
                        content: open.content,
                        fragment: slice(source, open.start, end)?,
                    };
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(e) => {
                    let decoded = e.decode().map_err(AtomError::malformed)?;
                    let text = unescape(&decoded).map_err(AtomError::malformed)?;
                    push_text(&mut stack, &text)?;
                }
                Event::CData(e) => {
                    let text = e.decode().map_err(AtomError::malformed)?;
                    push_text(&mut stack, &text)?;
                }
                Event::GeneralRef(e) => {
                    if let Some(ch) = e.resolve_char_ref().map_err(AtomError::malformed)? {
                        push_text(&mut stack, ch.encode_utf8(&mut [0; 4]))?;
                    } else {
                        let entity = e.decode().map_err(AtomError::malformed)?;
                        let resolved = resolve_predefined_entity(&entity).ok_or_else(|| {
                            AtomError::malformed(format!("unknown entity `&{entity};`"))
                        })?;
                        push_text(&mut stack, resolved)?;
                    }
                }
                Event::Eof => break,
                // Declaration, comments, processing instructions, doctype.
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(AtomError::malformed(format!(
                "unexpected end of document inside `{}`",
                open.name
            )));
        }

        root.map(|root| Self { root })
            .ok_or_else(|| AtomError::malformed("document has no root element"))
    }

    /// The document's root element.
    #[must_use]
    pub fn root(&self) -> &Element<'a> {
        &self.root
    }
}

fn position(reader: &Reader<&[u8]>) -> Result<usize, AtomError> {
    usize::try_from(reader.buffer_position()).map_err(AtomError::malformed)
}

fn tag_start(end: usize, tag_len: usize) -> Result<usize, AtomError> {
    end.checked_sub(tag_len)
        .ok_or_else(|| AtomError::malformed("tag extends before the document start"))
}

fn slice(source: &str, start: usize, end: usize) -> Result<&str, AtomError> {
    source
        .get(start..end)
        .ok_or_else(|| AtomError::malformed("element span outside the document"))
}

/// Borrow the raw tag name straight from the source, right after `<`.
fn raw_name<'a>(
    source: &'a str,
    start: usize,
    tag: &BytesStart<'_>,
) -> Result<QualifiedName<'a>, AtomError> {
    let len = tag.name().as_ref().len();
    let raw = slice(source, start + 1, start + 1 + len)?;
    Ok(QualifiedName::from_raw(raw))
}

fn attach<'a>(
    stack: &mut [OpenElement<'a>],
    root: &mut Option<Element<'a>>,
    element: Element<'a>,
) -> Result<(), AtomError> {
    if let Some(parent) = stack.last_mut() {
        parent.flush_text();
        parent.content.push(Content::Element(element));
        Ok(())
    } else if root.is_some() {
        Err(AtomError::malformed("document has more than one root element"))
    } else {
        *root = Some(element);
        Ok(())
    }
}

fn push_text(stack: &mut [OpenElement<'_>], text: &str) -> Result<(), AtomError> {
    match stack.last_mut() {
        Some(open) => {
            open.pending_text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(AtomError::malformed("character data outside the root element")),
    }
}
