//! Zero-Copy Slice Reader
//!
//! Pulls HTML events from a byte slice. Every event borrows from the input.
//! Lenient: never fails, anything that does not look like markup is text.

use super::events::{HtmlEvent, StartTag};
use crate::core::attributes::parse_attributes;
use crate::core::scanner::Scanner;

/// Elements whose content is not markup and runs until the matching end tag
const RAW_TEXT_ELEMENTS: [&[u8]; 4] = [b"script", b"style", b"textarea", b"title"];

/// Zero-copy HTML reader from a byte slice
pub struct SliceReader<'a> {
    scanner: Scanner<'a>,
    /// Name of a raw-text element whose content comes next
    raw_text: Option<&'a [u8]>,
    done: bool,
}

impl<'a> SliceReader<'a> {
    /// Create a new slice reader
    pub fn new(input: &'a [u8]) -> Self {
        SliceReader {
            scanner: Scanner::new(input),
            raw_text: None,
            done: false,
        }
    }

    /// Get the next HTML event
    pub fn next_event(&mut self) -> Option<HtmlEvent<'a>> {
        if self.done {
            return None;
        }

        if let Some(name) = self.raw_text.take() {
            let start = self.scanner.position();
            let end = self
                .scanner
                .find_raw_text_end(name)
                .unwrap_or(self.scanner.len());
            self.scanner.set_position(end);
            if end > start {
                return Some(HtmlEvent::Text(self.scanner.slice(start, end)));
            }
        }

        if self.scanner.is_eof() {
            self.done = true;
            return Some(HtmlEvent::EndDocument);
        }

        let start = self.scanner.position();
        if self.scanner.peek() == Some(b'<') {
            if let Some(event) = self.read_markup() {
                return Some(event);
            }
            // A '<' that opens nothing is plain text
            self.scanner.set_position(start + 1);
        }

        let end = self.scanner.find_tag_start().unwrap_or(self.scanner.len());
        self.scanner.set_position(end);
        Some(HtmlEvent::Text(self.scanner.slice(start, end)))
    }

    /// Read markup at the current '<'. Returns None (position unspecified)
    /// when the '<' does not open a tag, comment or declaration.
    fn read_markup(&mut self) -> Option<HtmlEvent<'a>> {
        let start = self.scanner.position();

        if self.scanner.starts_with(b"<!--") {
            self.scanner.advance(4);
            let content_start = self.scanner.position();
            let (content_end, next) = match self.scanner.find_seq(b"-->") {
                Some(end) => (end, end + 3),
                None => (self.scanner.len(), self.scanner.len()),
            };
            self.scanner.set_position(next);
            return Some(HtmlEvent::Comment(self.scanner.slice(content_start, content_end)));
        }

        if self.scanner.starts_with(b"<![CDATA[") {
            let end = self
                .scanner
                .find_seq(b"]]>")
                .map_or(self.scanner.len(), |end| end + 3);
            self.scanner.set_position(end);
            return Some(HtmlEvent::Raw(self.scanner.slice(start, end)));
        }

        if self.scanner.starts_with(b"<!") || self.scanner.starts_with(b"<?") {
            let end = self
                .scanner
                .find_tag_end()
                .map_or(self.scanner.len(), |end| end + 1);
            self.scanner.set_position(end);
            return Some(HtmlEvent::Raw(self.scanner.slice(start, end)));
        }

        if self.scanner.starts_with(b"</") {
            self.scanner.advance(2);
            let name = self.scanner.read_tag_name()?;
            let end = self
                .scanner
                .find_tag_end()
                .map_or(self.scanner.len(), |end| end + 1);
            self.scanner.set_position(end);
            return Some(HtmlEvent::EndTag(name));
        }

        self.scanner.advance(1);
        let name = self.scanner.read_tag_name()?;
        let attrs_start = self.scanner.position();
        let (attrs_end, next) = match self.scanner.find_tag_end_quoted() {
            Some(end) => (end, end + 1),
            None => (self.scanner.len(), self.scanner.len()),
        };
        self.scanner.set_position(next);

        let inner = self.scanner.slice(attrs_start, attrs_end);
        let self_closing = inner.last() == Some(&b'/');

        if !self_closing
            && RAW_TEXT_ELEMENTS
                .iter()
                .any(|raw| raw.eq_ignore_ascii_case(name))
        {
            self.raw_text = Some(name);
        }

        Some(HtmlEvent::StartTag(StartTag {
            name,
            attributes: parse_attributes(inner),
            self_closing,
        }))
    }
}

impl<'a> Iterator for SliceReader<'a> {
    type Item = HtmlEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(input: &str) -> Vec<HtmlEvent<'_>> {
        SliceReader::new(input.as_bytes()).collect()
    }

    #[test]
    fn test_simple_elements() {
        let evs = events("<h1 id=\"section-1\">Intro</h1>");
        assert_eq!(evs.len(), 4);
        match &evs[0] {
            HtmlEvent::StartTag(tag) => {
                assert_eq!(tag.name, b"h1");
                assert_eq!(tag.get_attribute_value("id"), Some("section-1"));
                assert!(!tag.self_closing);
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(evs[1], HtmlEvent::Text(b"Intro"));
        assert_eq!(evs[2], HtmlEvent::EndTag(b"h1"));
        assert_eq!(evs[3], HtmlEvent::EndDocument);
    }

    #[test]
    fn test_self_closing() {
        let evs = events("<input type=\"range\" />");
        match &evs[0] {
            HtmlEvent::StartTag(tag) => {
                assert!(tag.self_closing);
                assert_eq!(tag.attributes.len(), 1);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_comment_and_doctype() {
        let evs = events("<!DOCTYPE html><!-- note --><p>x</p>");
        assert_eq!(evs[0], HtmlEvent::Raw(b"<!DOCTYPE html>"));
        assert_eq!(evs[1], HtmlEvent::Comment(b" note "));
    }

    #[test]
    fn test_raw_text_element() {
        let evs = events("<script>if (a<b) { x = '</p>'; }</script><p>y</p>");
        assert_eq!(evs[1], HtmlEvent::Text(b"if (a<b) { x = '</p>'; }"));
        assert_eq!(evs[2], HtmlEvent::EndTag(b"script"));
    }

    #[test]
    fn test_lone_angle_bracket_is_text() {
        let evs = events("3 < 4 <b>ok</b>");
        assert_eq!(evs[0], HtmlEvent::Text(b"3 "));
        assert_eq!(evs[1], HtmlEvent::Text(b"< 4 "));
        assert!(matches!(evs[2], HtmlEvent::StartTag(_)));
    }

    #[test]
    fn test_unterminated_comment_runs_to_end() {
        let evs = events("<p>a</p><!-- open");
        assert_eq!(evs[3], HtmlEvent::Comment(b" open"));
        assert_eq!(evs[4], HtmlEvent::EndDocument);
    }
}
