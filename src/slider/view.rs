//! Level view controller
//!
//! Owns the document, the content index and one control per section.
//! `initialize` is the page-ready step; `change` is what a range input's
//! change event does. Both act on the view passed in, never on shared state.

use super::control::{Control, LevelChange};
use super::index::ContentIndex;
use crate::dom::{HtmlDocument, NodeId};
use crate::error::{Error, Result};
use crate::options::ViewOptions;

/// Merged, slider-controlled view over a multi-level document
#[derive(Debug, Clone)]
pub struct LevelView {
    doc: HtmlDocument,
    index: ContentIndex,
    controls: Vec<Control>,
}

impl LevelView {
    /// Parse `html` and initialize a view over it
    pub fn parse(html: &str, options: &ViewOptions) -> Result<Self> {
        Self::initialize(HtmlDocument::parse(html), options)
    }

    /// Merge the levels of `doc`, insert one range control per section, show
    /// each section's initial chunk and hide every section heading.
    ///
    /// A document without any first-section heading comes back untouched
    /// (an error in strict mode).
    pub fn initialize(mut doc: HtmlDocument, options: &ViewOptions) -> Result<Self> {
        let index = ContentIndex::build(&mut doc, options)?;
        let levels = index.levels();

        let controls = index
            .sections()
            .iter()
            .enumerate()
            .map(|(k, section)| {
                let control = Control::new(k + 1, doc.create_element("input"), levels);
                write_control(&mut doc, &control);
                doc.insert_before(section.headings[0], control.node);
                control
            })
            .collect();

        let mut view = LevelView {
            doc,
            index,
            controls,
        };

        // Synthetic change on every control so the first render is consistent
        for section in 0..view.controls.len() {
            view.fire_section(section);
        }
        if levels > 0 {
            for &heading in view.index.headings() {
                view.doc.hide(heading);
            }
        }

        log::debug!(
            "level view ready: {} levels, {} controls at level {}",
            levels,
            view.controls.len(),
            Control::initial_value(levels)
        );
        Ok(view)
    }

    /// Move control `control_id` (1-based) to `value`.
    ///
    /// The value is clamped into the control's range. Shows the matching
    /// chunk of that section and hides its other chunks.
    pub fn change(&mut self, control_id: usize, value: usize) -> Result<LevelChange> {
        let section = self.section_for(control_id)?;
        Ok(self.change_section(section, value))
    }

    /// Re-dispatch a change at the control's current value
    pub fn fire(&mut self, control_id: usize) -> Result<LevelChange> {
        let section = self.section_for(control_id)?;
        Ok(self.fire_section(section))
    }

    /// Move every control to `value`
    pub fn set_all(&mut self, value: usize) {
        for section in 0..self.controls.len() {
            self.change_section(section, value);
        }
    }

    fn section_for(&self, control_id: usize) -> Result<usize> {
        if control_id == 0 || control_id > self.controls.len() {
            return Err(Error::UnknownControl(control_id));
        }
        Ok(control_id - 1)
    }

    fn fire_section(&mut self, section: usize) -> LevelChange {
        let value = self.controls[section].value();
        self.change_section(section, value)
    }

    fn change_section(&mut self, section: usize, value: usize) -> LevelChange {
        let control = &mut self.controls[section];
        let change = control.set_value(value);
        self.doc
            .set_attribute(control.node, "value", &control.value().to_string());

        self.apply(section, change.current);
        log::trace!(
            "control {}: level {} -> {}",
            section + 1,
            change.previous + 1,
            change.current + 1
        );
        change
    }

    /// Show chunk `level` of `section`, hide the rest
    fn apply(&mut self, section: usize, level: usize) {
        let Some(section) = self.index.section(section) else {
            return;
        };
        for (n, chunk) in section.chunks.iter().enumerate() {
            for &node in &section.content[chunk.range()] {
                if n == level {
                    self.doc.show(node);
                } else {
                    self.doc.hide(node);
                }
            }
        }
    }

    /// Chunks of `section` whose nodes are all visible
    pub fn visible_chunks(&self, section: usize) -> Vec<usize> {
        let Some(section) = self.index.section(section) else {
            return Vec::new();
        };
        section
            .chunks
            .iter()
            .enumerate()
            .filter(|(_, chunk)| {
                !chunk.is_empty()
                    && section.content[chunk.range()]
                        .iter()
                        .all(|&node| !self.doc.is_hidden(node))
            })
            .map(|(n, _)| n)
            .collect()
    }

    /// The single visible chunk of `section`, if exactly one is visible
    pub fn visible_chunk(&self, section: usize) -> Option<usize> {
        match self.visible_chunks(section).as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Control by 1-based id
    pub fn control(&self, control_id: usize) -> Option<&Control> {
        control_id
            .checked_sub(1)
            .and_then(|section| self.controls.get(section))
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Number of merged levels
    pub fn levels(&self) -> usize {
        self.index.levels()
    }

    /// Number of merged sections (= controls)
    pub fn segments(&self) -> usize {
        self.index.segments()
    }

    pub fn index(&self) -> &ContentIndex {
        &self.index
    }

    pub fn document(&self) -> &HtmlDocument {
        &self.doc
    }

    pub fn into_document(self) -> HtmlDocument {
        self.doc
    }

    /// Serialize the current state of the page
    pub fn to_html(&self) -> String {
        self.doc.to_html()
    }
}

fn write_control(doc: &mut HtmlDocument, control: &Control) {
    let node: NodeId = control.node;
    doc.set_attribute(node, "id", &control.id.to_string());
    doc.set_attribute(node, "type", "range");
    doc.set_attribute(node, "min", &control.min.to_string());
    doc.set_attribute(node, "max", &control.max.to_string());
    doc.set_attribute(node, "value", &control.value().to_string());
    doc.set_self_closing(node, true);
}

/// Parse, initialize and serialize in one step
pub fn render(html: &str, options: &ViewOptions) -> Result<String> {
    Ok(LevelView::parse(html, options)?.to_html())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ChunkBy;

    /// `levels` documents, `sections` sections each, one secondary heading per
    /// section run plus `extra` paragraphs behind it
    fn fixture(levels: usize, sections: usize, extra: usize) -> String {
        let mut html = String::from("<!DOCTYPE html><html><body>\n");
        for level in 1..=levels {
            for section in 1..=sections {
                html.push_str(&format!(
                    "<h1 id=\"section-{section}\">Section {section}</h1>\n<h2>L{level}S{section}</h2>\n"
                ));
                for p in 0..extra {
                    html.push_str(&format!("<p>L{level}S{section}P{p}</p>\n"));
                }
            }
        }
        html.push_str("</body></html>");
        html
    }

    fn chunk_text(view: &LevelView, section: usize, chunk: usize) -> String {
        let section = view.index().section(section).unwrap();
        let doc = view.document();
        doc.text_content(section.chunk_nodes(chunk)[0])
    }

    #[test]
    fn test_initial_view_shows_one_chunk_per_section() {
        let view = LevelView::parse(&fixture(3, 4, 2), &ViewOptions::default()).unwrap();
        assert_eq!(view.levels(), 3);
        assert_eq!(view.segments(), 4);
        for section in 0..4 {
            assert_eq!(view.visible_chunks(section), vec![1]);
        }
        let doc = view.document();
        assert_eq!(view.index().headings().len(), 12);
        assert!(view.index().headings().iter().all(|&h| doc.is_hidden(h)));
    }

    #[test]
    fn test_two_by_two_scenario() {
        let mut view = LevelView::parse(&fixture(2, 2, 0), &ViewOptions::default()).unwrap();

        // floor(2 / 2) + 1 = 2, the second level
        for section in 0..2 {
            assert_eq!(view.visible_chunk(section), Some(1));
            assert_eq!(chunk_text(&view, section, 1), format!("L2S{}", section + 1));
        }

        let change = view.change(1, 1).unwrap();
        assert_eq!(
            change,
            LevelChange {
                section: 0,
                previous: 1,
                current: 0
            }
        );
        assert_eq!(view.visible_chunk(0), Some(0));
        assert_eq!(chunk_text(&view, 0, 0), "L1S1");
        // Other sections are unaffected
        assert_eq!(view.visible_chunk(1), Some(1));
    }

    #[test]
    fn test_controls_inserted_before_headings() {
        let view = LevelView::parse(&fixture(3, 2, 1), &ViewOptions::default()).unwrap();
        let doc = view.document();
        for (k, section) in view.index().sections().iter().enumerate() {
            let control = view.control(k + 1).unwrap();
            assert_eq!(doc.next_element_sibling(control.node), Some(section.headings[0]));
            assert_eq!(doc.tag_name(control.node), Some("input"));
            assert_eq!(doc.attribute(control.node, "id"), Some((k + 1).to_string().as_str()));
            assert_eq!(doc.attribute(control.node, "type"), Some("range"));
            assert_eq!(doc.attribute(control.node, "min"), Some("1"));
            assert_eq!(doc.attribute(control.node, "max"), Some("3"));
            assert_eq!(doc.attribute(control.node, "value"), Some("2"));
        }
    }

    #[test]
    fn test_change_is_idempotent() {
        let mut view = LevelView::parse(&fixture(3, 1, 1), &ViewOptions::default()).unwrap();
        view.change(1, 3).unwrap();
        let html = view.to_html();
        let change = view.change(1, 3).unwrap();
        assert_eq!(change.previous, 2);
        assert_eq!(change.current, 2);
        assert_eq!(view.visible_chunk(0), Some(2));
        assert_eq!(view.to_html(), html);

        view.fire(1).unwrap();
        assert_eq!(view.to_html(), html);
    }

    #[test]
    fn test_last_chunk_of_last_section_is_selectable() {
        let mut view = LevelView::parse(&fixture(3, 2, 2), &ViewOptions::default()).unwrap();
        view.change(2, 3).unwrap();
        assert_eq!(view.visible_chunk(1), Some(2));

        let section = view.index().section(1).unwrap();
        let last = *section.content.last().unwrap();
        assert!(section.chunk_nodes(2).contains(&last));
        assert_eq!(view.document().text_content(last), "L3S2P1");
        assert!(!view.document().is_hidden(last));
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let mut view = LevelView::parse(&fixture(2, 1, 0), &ViewOptions::default()).unwrap();
        assert_eq!(view.change(1, 0).unwrap().current, 0);
        assert_eq!(view.change(1, 7).unwrap().current, 1);
        assert_eq!(view.control(1).unwrap().value(), 2);
        let node = view.control(1).unwrap().node;
        assert_eq!(view.document().attribute(node, "value"), Some("2"));
    }

    #[test]
    fn test_unknown_control() {
        let mut view = LevelView::parse(&fixture(2, 2, 0), &ViewOptions::default()).unwrap();
        assert_eq!(view.change(0, 1), Err(Error::UnknownControl(0)));
        assert_eq!(view.change(3, 1), Err(Error::UnknownControl(3)));
        assert_eq!(view.fire(3), Err(Error::UnknownControl(3)));
        assert!(view.control(0).is_none());
    }

    #[test]
    fn test_serialized_output() {
        let html = "<body><h1 id=\"section-1\">S</h1><h2>a</h2><h1 id=\"section-1\">S</h1><h2>b</h2></body>";
        let out = render(html, &ViewOptions::default()).unwrap();
        assert_eq!(
            out,
            "<body><input id=\"1\" type=\"range\" min=\"1\" max=\"2\" value=\"2\" />\
             <h1 id=\"section-1\" style=\"display: none;\">S</h1>\
             <h2 style=\"display: none;\">a</h2><h2>b</h2>\
             <h1 id=\"section-1\" style=\"display: none;\">S</h1></body>"
        );
    }

    #[test]
    fn test_preamble_is_never_toggled() {
        let html = "<body><h1 id=\"section-1\">S</h1><p>lead</p><h2>a</h2>\
                    <h1 id=\"section-1\">S</h1><h2>b</h2></body>";
        let mut view = LevelView::parse(html, &ViewOptions::default()).unwrap();
        let section = view.index().section(0).unwrap();
        let lead = section.content[0];
        assert!(!view.document().is_hidden(lead));
        view.change(1, 1).unwrap();
        assert!(!view.document().is_hidden(lead));
        assert_eq!(view.visible_chunk(0), Some(0));
    }

    #[test]
    fn test_missing_chunk_hides_everything() {
        // Level 2 has no secondary heading, so only one chunk exists
        let html = "<body><h1 id=\"section-1\">S</h1><h2>a</h2>\
                    <h1 id=\"section-1\">S</h1><p>b</p></body>";
        let view = LevelView::parse(html, &ViewOptions::default()).unwrap();
        assert!(view.visible_chunks(0).is_empty());
    }

    #[test]
    fn test_chunk_by_level() {
        let html = "<body><h1 id=\"section-1\">S</h1><p>one</p>\
                    <h1 id=\"section-1\">S</h1><p>two</p><p>two more</p>\
                    <h1 id=\"section-1\">S</h1><p>three</p></body>";
        let opts = ViewOptions::default().with_chunk_by(ChunkBy::Level);
        let mut view = LevelView::parse(html, &opts).unwrap();
        assert_eq!(view.visible_chunk(0), Some(1));
        view.change(1, 3).unwrap();
        assert_eq!(view.visible_chunk(0), Some(2));
        assert_eq!(chunk_text(&view, 0, 2), "three");
    }

    #[test]
    fn test_document_without_sections_is_untouched() {
        let html = "<body><h1>Plain</h1><p>x</p></body>";
        let view = LevelView::parse(html, &ViewOptions::default()).unwrap();
        assert_eq!(view.segments(), 0);
        assert!(view.controls().is_empty());
        assert_eq!(view.to_html(), html);
    }

    #[test]
    fn test_strict_mode_errors_propagate() {
        let opts = ViewOptions::default().with_strict(true);
        assert!(matches!(
            LevelView::parse("<p>x</p>", &opts),
            Err(Error::NoSections { .. })
        ));
    }

    #[test]
    fn test_unclosed_paragraphs_keep_sections_apart() {
        let html = "<body>\
            <h1 id=section-1>A</h1><h2>a</h2><p>x\
            <h1 id=section-2>B</h1><h2>b</h2><p>y\
            <h1 id=section-1>A</h1><h2>c</h2><p>z\
            <h1 id=section-2>B</h1><h2>d</h2><p>w\
            </body>";
        let view = LevelView::parse(html, &ViewOptions::default()).unwrap();
        assert_eq!(view.levels(), 2);
        assert_eq!(view.segments(), 2);

        let doc = view.document();
        let body = doc.parent(view.index().headings()[0]).unwrap();
        for control in view.controls() {
            assert_eq!(doc.parent(control.node), Some(body));
        }
        for section in view.index().sections() {
            assert_eq!(section.content.len(), 4);
            assert!(section.content.iter().all(|&n| doc.parent(n) == Some(body)));
        }

        let second = view.index().section(1).unwrap();
        let texts: Vec<_> = second.content.iter().map(|&n| doc.text_content(n)).collect();
        assert_eq!(texts, vec!["b", "y", "d", "w"]);
        assert_eq!(view.visible_chunk(0), Some(1));
        assert_eq!(view.visible_chunk(1), Some(1));
        assert!(view.to_html().contains("<p style=\"display: none;\">x</p>"));
    }

    #[test]
    fn test_author_display_survives_toggling() {
        let html = "<body>\
            <h1 id=\"section-1\">S</h1><h2>a</h2><div style=\"display: flex\">one</div>\
            <h1 id=\"section-1\">S</h1><h2>b</h2><div style=\"display: flex\">grid</div>\
            </body>";
        let mut view = LevelView::parse(html, &ViewOptions::default()).unwrap();
        let out = view.to_html();
        assert!(out.contains("<div style=\"display: flex\">grid</div>"));
        assert!(out.contains("<div style=\"display: none;\">one</div>"));

        view.change(1, 1).unwrap();
        let out = view.to_html();
        assert!(out.contains("<div style=\"display: flex;\">one</div>"));
        assert!(out.contains("<div style=\"display: none;\">grid</div>"));

        view.change(1, 2).unwrap();
        assert!(view
            .to_html()
            .contains("<div style=\"display: flex;\">grid</div>"));
    }

    #[test]
    fn test_set_all() {
        let mut view = LevelView::parse(&fixture(3, 3, 1), &ViewOptions::default()).unwrap();
        view.set_all(1);
        for section in 0..3 {
            assert_eq!(view.visible_chunk(section), Some(0));
            assert_eq!(view.control(section + 1).unwrap().value(), 1);
        }
    }
}
