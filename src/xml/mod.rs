//! A small XML element tree for JSS request and response bodies.
//!
//! JSS documents are element-only trees: every value lives either in the
//! text of a leaf element or in an attribute. [`Element`] models exactly
//! that, parsed with `quick-xml`'s pull reader and written back with its
//! writer. Mixed content (text interleaved with child elements) is folded
//! into the element's text.
//!
//! # Paths
//!
//! Lookups take slash-separated child names relative to the element, e.g.
//! `general/category/name`. The first child with a matching name is used at
//! each step. An empty path denotes the element itself.
//!
//! # Example
//!
//! ```rust
//! use jss_api::xml::Element;
//!
//! let mut policy = Element::parse(
//!     "<policy><general><id>7</id><name>Install Firefox</name></general></policy>",
//! ).unwrap();
//!
//! assert_eq!(policy.name(), "policy");
//! assert_eq!(policy.text_at("general/name"), Some("Install Firefox"));
//!
//! policy.set_text_at("general/enabled", "true");
//! assert!(policy.to_xml().unwrap().contains("<enabled>true</enabled>"));
//! ```

mod errors;

pub use errors::XmlError;

use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

/// Number of spaces per level in [`Element::to_pretty_xml`].
const PRETTY_INDENT: usize = 2;

/// One XML element with its attributes, text and child elements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    /// Creates an empty element.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a leaf element holding `text`.
    #[must_use]
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        element.text = Some(text.into());
        element
    }

    /// Parses a document and returns its root element.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError`] if the input is not well-formed, has no root
    /// element, or has more than one.
    pub fn parse(input: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(input);

        let mut stack: Vec<Self> = Vec::new();
        let mut root: Option<Self> = None;

        loop {
            let position = reader.buffer_position();
            let event = reader.read_event().map_err(|e| XmlError::Parse {
                position: position.to_string(),
                message: e.to_string(),
            })?;

            match event {
                Event::Start(ref start) => {
                    if root.is_some() {
                        return Err(XmlError::MultipleRoots);
                    }
                    stack.push(Self::from_start(start)?);
                }
                Event::Empty(ref start) => {
                    let element = Self::from_start(start)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None if root.is_none() => root = Some(element),
                        None => return Err(XmlError::MultipleRoots),
                    }
                }
                Event::End(_) => {
                    let mut element = stack.pop().ok_or_else(|| XmlError::Parse {
                        position: position.to_string(),
                        message: "unexpected closing tag".to_string(),
                    })?;
                    element.drop_layout_text();
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => root = Some(element),
                    }
                }
                Event::Text(ref text) => {
                    let value = text.unescape().map_err(|e| XmlError::Parse {
                        position: position.to_string(),
                        message: e.to_string(),
                    })?;
                    Self::append_text(stack.last_mut(), &value);
                }
                Event::CData(cdata) => {
                    let value = String::from_utf8(cdata.into_inner().into_owned())
                        .map_err(|e| XmlError::Parse {
                            position: position.to_string(),
                            message: e.to_string(),
                        })?;
                    Self::append_text(stack.last_mut(), &value);
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions, doctypes
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(XmlError::Parse {
                position: reader.buffer_position().to_string(),
                message: "unclosed element at end of input".to_string(),
            });
        }

        root.ok_or(XmlError::Empty)
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| XmlError::Attribute(e.to_string()))?
            .to_string();

        let mut element = Self::new(name);
        for attr in start.attributes() {
            let attr = attr.map_err(|e| XmlError::Attribute(e.to_string()))?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| XmlError::Attribute(e.to_string()))?
                .to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| XmlError::Attribute(e.to_string()))?
                .into_owned();
            element.attributes.push((key, value));
        }
        Ok(element)
    }

    /// Clears text that is only indentation between child elements.
    /// Leaf text is kept byte for byte.
    fn drop_layout_text(&mut self) {
        let blank = self.text.as_deref().is_some_and(|t| t.trim().is_empty());
        if blank && !self.children.is_empty() {
            self.text = None;
        }
    }

    fn append_text(target: Option<&mut Self>, value: &str) {
        // Text outside the root element is ignored
        if let Some(element) = target {
            element
                .text
                .get_or_insert_with(String::new)
                .push_str(value);
        }
    }

    /// Returns the element's tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the element's own text, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Replaces the element's own text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Returns the value of an attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Sets an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Returns all attributes in document order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Returns the child elements in document order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Returns the first child with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Appends a child element and returns a mutable reference to it.
    pub fn push_child(&mut self, child: Self) -> &mut Self {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Removes every child with the given name, returning how many were removed.
    pub fn remove_children(&mut self, name: &str) -> usize {
        let before = self.children.len();
        self.children.retain(|c| c.name != name);
        before - self.children.len()
    }

    /// Finds a descendant by slash-separated path.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&Self> {
        path_segments(path).try_fold(self, |element, segment| element.child(segment))
    }

    /// Finds a descendant by slash-separated path, mutably.
    pub fn find_mut(&mut self, path: &str) -> Option<&mut Self> {
        path_segments(path).try_fold(self, |element, segment| {
            element.children.iter_mut().find(|c| c.name == segment)
        })
    }

    /// Finds a descendant by path, creating missing elements along the way.
    pub fn find_or_create(&mut self, path: &str) -> &mut Self {
        path_segments(path).fold(self, |element, segment| {
            match element.children.iter().position(|c| c.name == segment) {
                Some(index) => &mut element.children[index],
                None => element.push_child(Self::new(segment)),
            }
        })
    }

    /// Returns the trimmed text of the descendant at `path`.
    #[must_use]
    pub fn text_at(&self, path: &str) -> Option<&str> {
        self.find(path).and_then(Self::text).map(str::trim)
    }

    /// Sets the text of the descendant at `path`, creating it if needed.
    pub fn set_text_at(&mut self, path: &str, text: impl Into<String>) {
        self.find_or_create(path).set_text(text);
    }

    /// Serialises the element as a compact document.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::Write`] if serialisation fails.
    pub fn to_xml(&self) -> Result<String, XmlError> {
        self.render(Writer::new(Cursor::new(Vec::new())))
    }

    /// Serialises the element as an indented document, for diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::Write`] if serialisation fails.
    pub fn to_pretty_xml(&self) -> Result<String, XmlError> {
        self.render(Writer::new_with_indent(
            Cursor::new(Vec::new()),
            b' ',
            PRETTY_INDENT,
        ))
    }

    fn render(&self, mut writer: Writer<Cursor<Vec<u8>>>) -> Result<String, XmlError> {
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(|e| XmlError::Write(e.to_string()))?;
        self.write_to(&mut writer)?;

        let bytes = writer.into_inner().into_inner();
        String::from_utf8(bytes).map_err(|e| XmlError::Write(e.to_string()))
    }

    fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<(), XmlError> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        let text = self.text.as_deref().filter(|t| !t.is_empty());
        if text.is_none() && self.children.is_empty() {
            return writer
                .write_event(Event::Empty(start))
                .map_err(|e| XmlError::Write(e.to_string()));
        }

        writer
            .write_event(Event::Start(start))
            .map_err(|e| XmlError::Write(e.to_string()))?;
        if let Some(text) = text {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(|e| XmlError::Write(e.to_string()))?;
        }
        for child in &self.children {
            child.write_to(writer)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.name.as_str())))
            .map_err(|e| XmlError::Write(e.to_string()))
    }
}

fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPUTER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<computer>
  <general>
    <id>12</id>
    <name>lab-imac-04</name>
    <serial_number>C02XK1ABJG5H</serial_number>
    <remote_management>
      <managed>true</managed>
    </remote_management>
  </general>
  <extension_attributes>
    <extension_attribute type="String"><id>1</id><value>blue</value></extension_attribute>
    <extension_attribute type="Integer"><id>2</id><value>4</value></extension_attribute>
  </extension_attributes>
  <purchasing/>
</computer>"#;

    #[test]
    fn test_parse_builds_nested_tree() {
        let root = Element::parse(COMPUTER).unwrap();

        assert_eq!(root.name(), "computer");
        assert_eq!(root.children().len(), 3);
        assert_eq!(root.text_at("general/id"), Some("12"));
        assert_eq!(root.text_at("general/remote_management/managed"), Some("true"));
        assert!(root.find("purchasing").is_some());
        assert!(root.find("purchasing").unwrap().children().is_empty());
    }

    #[test]
    fn test_parse_reads_attributes() {
        let root = Element::parse(COMPUTER).unwrap();
        let attrs = root.find("extension_attributes").unwrap().children();

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0].attribute("type"), Some("String"));
        assert_eq!(attrs[1].attribute("type"), Some("Integer"));
        assert_eq!(attrs[1].text_at("value"), Some("4"));
    }

    #[test]
    fn test_parse_unescapes_entities_and_cdata() {
        let root =
            Element::parse("<script><name>A &amp; B</name><script_contents><![CDATA[echo <hi>]]></script_contents></script>")
                .unwrap();
        assert_eq!(root.text_at("name"), Some("A & B"));
        assert_eq!(root.text_at("script_contents"), Some("echo <hi>"));
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        assert!(matches!(Element::parse(""), Err(XmlError::Empty)));
        assert!(matches!(
            Element::parse("<?xml version=\"1.0\"?>"),
            Err(XmlError::Empty)
        ));
    }

    #[test]
    fn test_parse_rejects_multiple_roots() {
        assert!(matches!(
            Element::parse("<a/><b/>"),
            Err(XmlError::MultipleRoots)
        ));
        assert!(matches!(
            Element::parse("<a></a><b></b>"),
            Err(XmlError::MultipleRoots)
        ));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(Element::parse("<a><b></a>").is_err());
        assert!(Element::parse("<a><b>").is_err());
    }

    #[test]
    fn test_find_or_create_builds_missing_path() {
        let mut root = Element::new("policy");
        root.set_text_at("general/category/name", "Browsers");

        assert_eq!(root.text_at("general/category/name"), Some("Browsers"));
        assert_eq!(root.children().len(), 1);

        // Existing elements are reused rather than duplicated
        root.set_text_at("general/name", "Firefox");
        assert_eq!(root.find("general").unwrap().children().len(), 2);
    }

    #[test]
    fn test_set_attribute_replaces_existing() {
        let mut element = Element::new("extension_attribute");
        element.set_attribute("type", "String");
        element.set_attribute("type", "Integer");

        assert_eq!(element.attributes().len(), 1);
        assert_eq!(element.attribute("type"), Some("Integer"));
    }

    #[test]
    fn test_to_xml_escapes_and_round_trips() {
        let mut root = Element::new("category");
        root.push_child(Element::with_text("name", "Dev & <Test>"));
        root.push_child(Element::new("priority"));

        let xml = root.to_xml().unwrap();
        assert!(xml.contains("Dev &amp; &lt;Test&gt;"));
        assert!(xml.contains("<priority/>"));

        let parsed = Element::parse(&xml).unwrap();
        assert_eq!(parsed.text_at("name"), Some("Dev & <Test>"));
    }

    #[test]
    fn test_to_pretty_xml_indents_children() {
        let root = Element::parse(COMPUTER).unwrap();
        let pretty = root.to_pretty_xml().unwrap();

        assert!(pretty.lines().count() > 5);
        assert!(pretty.contains("\n  <general>"));
        assert!(pretty.contains("<name>lab-imac-04</name>"));
    }

    #[test]
    fn test_leaf_text_whitespace_survives_round_trip() {
        let input = "<script>\n  <name>cleanup.sh</name>\n  \
                     <script_contents>  indented\necho hi\n</script_contents>\n</script>";
        let root = Element::parse(input).unwrap();

        let contents = root.find("script_contents").and_then(Element::text);
        assert_eq!(contents, Some("  indented\necho hi\n"));
        assert!(root.text().is_none());

        let xml = root.to_xml().unwrap();
        assert!(xml.contains("<script_contents>  indented\necho hi\n</script_contents>"));
        assert!(xml.contains("<script><name>"));

        let reparsed = Element::parse(&xml).unwrap();
        assert_eq!(reparsed, root);
        assert_eq!(reparsed.text_at("script_contents"), Some("indented\necho hi"));
    }

    #[test]
    fn test_indented_document_has_no_layout_text() {
        let root = Element::parse(COMPUTER).unwrap();
        assert!(root.text().is_none());
        assert!(root.find("general/remote_management").unwrap().text().is_none());
        assert_eq!(root.find("general/id").and_then(Element::text), Some("12"));
    }

    #[test]
    fn test_remove_children() {
        let mut root = Element::parse(COMPUTER).unwrap();
        let attrs = root.find_mut("extension_attributes").unwrap();
        assert_eq!(attrs.remove_children("extension_attribute"), 2);
        assert!(attrs.children().is_empty());
    }
}
