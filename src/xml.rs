// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generic XML element tree.
//!
//! The base station exposes one fixed document, but its schema varies with
//! firmware versions. The document is therefore first read into a loose tree
//! of [`XmlElement`]s, a nested mapping from element name to text or
//! sub-elements, and typed views are derived from that tree afterwards.
//!
//! # Examples
//!
//! ```
//! use alpha2_lib::xml::XmlElement;
//!
//! let doc = XmlElement::parse(
//!     "<Devices><Device><ID>EZR1</ID><HEATAREA nr=\"1\"/></Device></Devices>",
//! )
//! .unwrap();
//!
//! assert_eq!(doc.name(), "Devices");
//! let device = doc.child("Device").unwrap();
//! assert_eq!(device.child_text("ID"), Some("EZR1"));
//! assert_eq!(device.child("HEATAREA").unwrap().attribute("nr"), Some("1"));
//! ```

use std::borrow::Cow;
use std::collections::BTreeMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// A single XML element with its attributes, text and child elements.
///
/// Children keep document order; repeated element names are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlElement {
    name: String,
    attributes: BTreeMap<String, String>,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlElement {
    /// Creates an empty element with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parses a complete document and returns its root element.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Xml` for malformed markup,
    /// `ParseError::Truncated` if the document ends inside an element and
    /// `ParseError::MissingElement` if there is no root element at all.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    stack.push(Self::from_start(&start)?);
                }
                Event::Empty(start) => {
                    let element = Self::from_start(&start)?;
                    Self::attach(&mut stack, &mut root, element);
                }
                Event::End(_) => {
                    // Mismatched end tags are rejected by the reader itself.
                    if let Some(element) = stack.pop() {
                        Self::attach(&mut stack, &mut root, element);
                    }
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        current
                            .text
                            .push_str(&text.unescape().map_err(quick_xml::Error::from)?);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        current
                            .text
                            .push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(ParseError::Truncated(open.name.clone()));
        }

        root.ok_or_else(|| ParseError::MissingElement("document root".to_string()))
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, ParseError> {
        let mut element = Self::new(String::from_utf8_lossy(start.name().as_ref()));
        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute
                .unescape_value()
                .map_err(quick_xml::Error::from)?
                .into_owned();
            element.attributes.insert(key, value);
        }
        Ok(element)
    }

    fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            // Only the first top-level element counts as the document root.
            None => {
                if root.is_none() {
                    *root = Some(element);
                }
            }
        }
    }

    /// Returns the element name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the text content, trimmed of surrounding whitespace.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns an attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns all attributes.
    #[must_use]
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Returns all child elements in document order.
    #[must_use]
    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// Returns the first child element with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Returns all child elements with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Returns the text of the first child element with the given name.
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(XmlElement::text)
    }

    /// Returns `true` if the element has no child elements.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Adds a child element, returning `self` for chaining.
    #[must_use]
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    /// Sets the text content, returning `self` for chaining.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets an attribute, returning `self` for chaining.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// Escapes text for use as element content or attribute value.
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

/// Returns `true` if `name` can be used as a vendor element name.
///
/// The base station only uses ASCII names made of letters, digits and
/// underscores, starting with a letter or underscore.
#[must_use]
pub fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_nested_document() {
        let doc = XmlElement::parse(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <Devices>
              <Device>
                <ID>EZR012345</ID>
                <HEATAREA nr="1"><T_ACTUAL>21.3</T_ACTUAL></HEATAREA>
                <HEATAREA nr="2"><T_ACTUAL>19.0</T_ACTUAL></HEATAREA>
              </Device>
            </Devices>"#,
        )
        .unwrap();

        let device = doc.child("Device").unwrap();
        assert_eq!(device.child_text("ID"), Some("EZR012345"));

        let areas: Vec<_> = device.children_named("HEATAREA").collect();
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[1].attribute("nr"), Some("2"));
        assert_eq!(areas[1].child_text("T_ACTUAL"), Some("19.0"));
    }

    #[test]
    fn parse_unescapes_text_and_attributes() {
        let doc = XmlElement::parse(r#"<A b="x &amp; y"><C>K&#252;che &lt;1&gt;</C></A>"#).unwrap();
        assert_eq!(doc.attribute("b"), Some("x & y"));
        assert_eq!(doc.child_text("C"), Some("Küche <1>"));
    }

    #[test]
    fn parse_empty_element_has_empty_text() {
        let doc = XmlElement::parse("<A><B/><C></C></A>").unwrap();
        assert_eq!(doc.child_text("B"), Some(""));
        assert_eq!(doc.child_text("C"), Some(""));
        assert!(doc.child("B").unwrap().is_leaf());
    }

    #[test]
    fn parse_truncated_document_fails() {
        let err = XmlElement::parse("<Devices><Device><ID>EZR").unwrap_err();
        assert!(matches!(err, ParseError::Truncated(_) | ParseError::Xml(_)));
    }

    #[test]
    fn parse_mismatched_tags_fails() {
        let err = XmlElement::parse("<Devices><Device></Devices>").unwrap_err();
        assert!(matches!(err, ParseError::Xml(_)));
    }

    #[test]
    fn parse_empty_input_fails() {
        let err = XmlElement::parse("").unwrap_err();
        assert!(matches!(err, ParseError::MissingElement(_)));
    }

    #[test]
    fn escape_special_characters() {
        assert_eq!(escape("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn element_name_validation() {
        assert!(is_valid_element_name("T_TARGET"));
        assert!(is_valid_element_name("_X1"));
        assert!(!is_valid_element_name(""));
        assert!(!is_valid_element_name("1ABC"));
        assert!(!is_valid_element_name("T TARGET"));
        assert!(!is_valid_element_name("A></B><C"));
    }
}
