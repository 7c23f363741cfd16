//! The attributed-element document backend.
//!
//! The tree codec works against a minimal element-tree interface: create a
//! named node, get/set string attributes, append children, and walk children
//! in document order. [`Element`] provides that interface and persists to
//! XML by writing and reading `quick-xml` events directly; no intermediate
//! DOM library sits in between.
//!
//! Attribute order is kept stable with an insertion-ordered map so that
//! re-rendering a document is deterministic.
//!
//! ## Examples
//!
//! ```rust
//! use biform::Element;
//!
//! let mut root = Element::new("serialization");
//! let mut child = Element::new("count");
//! child.set_attribute("val", "3");
//! root.append_child(child);
//!
//! let xml = root.to_xml().unwrap();
//! let back = Element::parse(&xml).unwrap();
//! assert_eq!(back.child("count").and_then(|c| c.attribute("val")), Some("3"));
//! ```

use crate::error::{Error, Result};
use indexmap::IndexMap;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::fmt;
use std::io;
use std::path::Path;

/// One node of an attributed-element tree.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Element {
    name: String,
    attributes: IndexMap<String, String>,
    children: Vec<Element>,
}

impl Element {
    /// Creates an element with the given tag name and no attributes or
    /// children.
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// The element's tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets (or replaces) an attribute.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Returns an attribute value, if present.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Appends a child element, preserving document order.
    pub fn append_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// The children in document order.
    #[must_use]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// The first child, if any.
    #[must_use]
    pub fn first_child(&self) -> Option<&Element> {
        self.children.first()
    }

    /// The first child with the given tag name, if any.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Parses a document from XML text. The document must contain exactly
    /// one root element; text content is ignored (values live in
    /// attributes).
    ///
    /// # Errors
    ///
    /// [`Error::BackingFile`] for any well-formedness or encoding problem.
    pub fn parse(xml: &str) -> Result<Element> {
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;
        loop {
            let event = reader.read_event().map_err(|e| {
                Error::backing_file(format!(
                    "XML parse error at byte {}: {}",
                    reader.buffer_position(),
                    e
                ))
            })?;
            match event {
                Event::Start(start) => stack.push(Self::from_start(&start)?),
                Event::Empty(start) => {
                    let element = Self::from_start(&start)?;
                    Self::attach(element, &mut stack, &mut root)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| Error::backing_file("unmatched closing tag"))?;
                    Self::attach(element, &mut stack, &mut root)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }
        if !stack.is_empty() {
            return Err(Error::backing_file("document ended inside an open element"));
        }
        root.ok_or_else(|| Error::backing_file("document has no root element"))
    }

    /// Renders the element and its subtree as compact XML.
    pub fn to_xml(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut writer = Writer::new(&mut buf);
        self.write_into(&mut writer)?;
        String::from_utf8(buf).map_err(|e| Error::io(e.to_string()))
    }

    /// Loads a document from a file.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] when the file cannot be read, [`Error::BackingFile`]
    /// when its contents do not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Element> {
        let xml = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::io(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::parse(&xml)
    }

    /// Saves the element as an indented XML document with a declaration.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut buf = Vec::new();
        let mut writer = Writer::new_with_indent(&mut buf, b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(write_error)?;
        self.write_into(&mut writer)?;
        drop(writer);
        buf.push(b'\n');
        std::fs::write(path.as_ref(), buf)
            .map_err(|e| Error::io(format!("{}: {}", path.as_ref().display(), e)))
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Element> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(parse_error)?
            .to_string();
        let mut element = Element::new(name);
        for attr in start.attributes() {
            let attr = attr.map_err(parse_error)?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(parse_error)?
                .to_string();
            let value = attr.unescape_value().map_err(parse_error)?.into_owned();
            element.attributes.insert(key, value);
        }
        Ok(element)
    }

    fn attach(
        element: Element,
        stack: &mut Vec<Element>,
        root: &mut Option<Element>,
    ) -> Result<()> {
        match stack.last_mut() {
            Some(parent) => {
                parent.children.push(element);
                Ok(())
            }
            None if root.is_none() => {
                *root = Some(element);
                Ok(())
            }
            None => Err(Error::backing_file("document has more than one root element")),
        }
    }

    fn write_into<W: io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        if self.children.is_empty() {
            writer.write_event(Event::Empty(start)).map_err(write_error)?;
        } else {
            writer.write_event(Event::Start(start)).map_err(write_error)?;
            for child in &self.children {
                child.write_into(writer)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(self.name.as_str())))
                .map_err(write_error)?;
        }
        Ok(())
    }
}

fn parse_error(e: impl fmt::Display) -> Error {
    Error::backing_file(e.to_string())
}

fn write_error(e: impl fmt::Display) -> Error {
    Error::io(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_round_trip() {
        let mut el = Element::new("node");
        el.set_attribute("val", "he said \"hi\" & left");
        let xml = el.to_xml().unwrap();
        let back = Element::parse(&xml).unwrap();
        assert_eq!(back.attribute("val"), Some("he said \"hi\" & left"));
    }

    #[test]
    fn nested_children_keep_document_order() {
        let mut root = Element::new("root");
        for i in 0..3 {
            root.append_child(Element::new(format!("child_{}", i)));
        }
        let back = Element::parse(&root.to_xml().unwrap()).unwrap();
        let names: Vec<_> = back.children().iter().map(Element::name).collect();
        assert_eq!(names, vec!["child_0", "child_1", "child_2"]);
    }

    #[test]
    fn malformed_xml_is_a_backing_file_error() {
        let err = Element::parse("<a><b></a>").unwrap_err();
        assert!(matches!(err, Error::BackingFile(_)));
    }

    #[test]
    fn multiple_roots_rejected() {
        let err = Element::parse("<a/><b/>").unwrap_err();
        assert!(matches!(err, Error::BackingFile(_)));
    }
}
