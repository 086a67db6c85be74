//! XML conversion: the element-tree model shared by request building and
//! response decoding.
//!
//! Parsing keeps an element's namespace prefix apart from its local name, so
//! lookups like `get_child("Body")` match `<env:Body>` and `<Body>` alike.
//! Repeated children are never forced into a sequence by the parser itself;
//! callers normalize multiplicity through [`children`].

use std::borrow::Cow;
use std::io::BufReader;

use xmltree::{Element, EmitterConfig, XMLNode};

/// Serialize an element without an XML declaration, for embedding into the
/// envelope skeleton.
pub fn to_xml(element: &Element) -> Result<String, xmltree::Error> {
    let mut buf = Vec::new();
    let config = EmitterConfig::new().write_document_declaration(false);
    element.write_with_config(&mut buf, config)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Parse an XML document into its element tree.
pub fn parse(xml: &str) -> Result<Element, xmltree::ParseError> {
    Element::parse(BufReader::new(xml.as_bytes()))
}

/// Build an element holding only text content.
pub fn text_element(name: &str, text: impl Into<String>) -> Element {
    let mut element = Element::new(name);
    element.children.push(XMLNode::Text(text.into()));
    element
}

/// Append a child element.
pub fn push_child(parent: &mut Element, child: Element) {
    parent.children.push(XMLNode::Element(child));
}

/// All child elements with the given local name, in document order.
///
/// A single child and a repeated child normalize to the same shape here;
/// multiplicity is decided by the caller, never by the parse.
pub fn children<'a>(parent: &'a Element, name: &str) -> Vec<&'a Element> {
    parent
        .children
        .iter()
        .filter_map(XMLNode::as_element)
        .filter(|element| element.name == name)
        .collect()
}

/// Text content of an element, empty when it has none.
pub fn text_of(element: &Element) -> String {
    element.get_text().map(Cow::into_owned).unwrap_or_default()
}
