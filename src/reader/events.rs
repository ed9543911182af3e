//! HTML Event Types
//!
//! Event types for pull-parser style HTML processing.

use crate::core::attributes::Attribute;

/// HTML parsing event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlEvent<'a> {
    /// Start of an element: `<name attrs...>` or `<name attrs.../>`
    StartTag(StartTag<'a>),
    /// End of an element: `</name>`
    EndTag(&'a [u8]),
    /// Text content between tags (raw, entities untouched)
    Text(&'a [u8]),
    /// Comment content, without the `<!--` / `-->` delimiters
    Comment(&'a [u8]),
    /// Markup kept verbatim: doctype, CDATA, processing instructions
    Raw(&'a [u8]),
    /// End of document
    EndDocument,
}

/// Start tag event data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag<'a> {
    /// Tag name as written
    pub name: &'a [u8],
    /// Element attributes
    pub attributes: Vec<Attribute<'a>>,
    /// Written as `<name/>`
    pub self_closing: bool,
}

impl<'a> StartTag<'a> {
    /// Get the name as a string
    pub fn name_str(&self) -> Option<&str> {
        std::str::from_utf8(self.name).ok()
    }

    /// Get an attribute value by name (ASCII case-insensitive) as string
    pub fn get_attribute_value(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name.as_bytes()))
            .and_then(|a| a.value_str())
    }
}
