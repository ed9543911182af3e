//! HTML Attribute Parsing
//!
//! Parses attributes from the inside of a start tag. Lenient: quoted,
//! unquoted and valueless attributes are all accepted, and values are kept
//! raw (no entity decoding) so the document serialises back unchanged.

use super::scanner::is_whitespace;

/// A parsed HTML attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    /// Attribute name as written
    pub name: &'a [u8],
    /// Raw attribute value, `None` for valueless (boolean) attributes
    pub value: Option<&'a [u8]>,
}

impl<'a> Attribute<'a> {
    /// Get the name as a string
    pub fn name_str(&self) -> Option<&str> {
        std::str::from_utf8(self.name).ok()
    }

    /// Get the value as a string (empty for valueless attributes)
    pub fn value_str(&self) -> Option<&str> {
        std::str::from_utf8(self.value.unwrap_or(b"")).ok()
    }
}

/// Parse all attributes from the bytes between the tag name and the closing '>'
///
/// A trailing '/' (self-closing marker) is skipped, not reported as an attribute.
pub fn parse_attributes(input: &[u8]) -> Vec<Attribute<'_>> {
    let mut attrs = Vec::new();
    let mut pos = 0;
    let len = input.len();

    while pos < len {
        while pos < len && (is_whitespace(input[pos]) || input[pos] == b'/') {
            pos += 1;
        }
        if pos >= len {
            break;
        }

        let name_start = pos;
        // The first byte is always part of the name, even a stray '='
        pos += 1;
        while pos < len && !is_whitespace(input[pos]) && !matches!(input[pos], b'=' | b'/') {
            pos += 1;
        }
        let name = &input[name_start..pos];

        let mut look = pos;
        while look < len && is_whitespace(input[look]) {
            look += 1;
        }
        if look >= len || input[look] != b'=' {
            attrs.push(Attribute { name, value: None });
            continue;
        }

        pos = look + 1;
        while pos < len && is_whitespace(input[pos]) {
            pos += 1;
        }

        let value = match input.get(pos) {
            Some(&q @ (b'"' | b'\'')) => {
                let value_start = pos + 1;
                let value_end = memchr::memchr(q, &input[value_start..])
                    .map(|i| value_start + i)
                    .unwrap_or(len);
                pos = (value_end + 1).min(len);
                &input[value_start..value_end]
            }
            Some(_) => {
                let value_start = pos;
                while pos < len && !is_whitespace(input[pos]) {
                    pos += 1;
                }
                &input[value_start..pos]
            }
            None => b"",
        };
        attrs.push(Attribute { name, value: Some(value) });
    }

    attrs
}
