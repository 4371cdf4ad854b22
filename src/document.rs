//! Manifest document tree and its XML rendering.

use crate::errors::Result;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use std::io::Cursor;
use std::path::Path;

/// One element in the manifest tree. Attributes keep insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Element {
            tag: tag.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Set or replace an attribute. An existing key keeps its position.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.attributes.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.attributes.push((name, value));
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Append a child and return a mutable handle to it.
    pub fn append_child(&mut self, child: Element) -> &mut Element {
        self.children.push(child);
        let index = self.children.len() - 1;
        &mut self.children[index]
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Direct children with the given tag, in document order.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.tag == tag)
    }
}

/// The manifest document: a single root element, created once per builder
/// instance and handed to the writer when the build is done.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new(root_tag: impl Into<String>) -> Self {
        Document {
            root: Element::new(root_tag),
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Render the tree as indented XML. SDK-style manifests carry no XML
    /// declaration, so none is emitted. Elements without text or children
    /// render self-closed.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        write_element(&mut writer, &self.root)?;
        let bytes = writer.into_inner().into_inner();
        Ok(String::from_utf8(bytes)?)
    }

    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let mut content = self.to_xml_string()?;
        content.push('\n');
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn write_element<W: std::io::Write>(writer: &mut Writer<W>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.tag());
    for (name, value) in element.attributes() {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    if element.text().is_none() && element.children().is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = element.text() {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in element.children() {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.tag())))?;
    Ok(())
}
