//! View configuration

/// How a merged section is cut into chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChunkBy {
    /// A chunk starts at every secondary heading and runs to the next one
    #[default]
    SecondaryHeading,
    /// One chunk per level: each document's own content run
    Level,
}

/// Markup conventions the level view relies on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    /// Prefix matched against element ids to find section headings
    pub section_prefix: String,
    /// Id whose occurrence count is the number of levels
    pub first_section_id: String,
    /// Top-level heading tag; bounds each section's content
    pub heading_tag: String,
    /// Secondary heading tag; bounds chunks
    pub chunk_heading_tag: String,
    pub chunk_by: ChunkBy,
    /// Reject documents whose sections do not line up instead of laying them out anyway
    pub strict: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        ViewOptions {
            section_prefix: "section".to_string(),
            first_section_id: "section-1".to_string(),
            heading_tag: "h1".to_string(),
            chunk_heading_tag: "h2".to_string(),
            chunk_by: ChunkBy::SecondaryHeading,
            strict: false,
        }
    }
}

impl ViewOptions {
    pub fn with_section_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.section_prefix = prefix.into();
        self
    }

    pub fn with_first_section_id(mut self, id: impl Into<String>) -> Self {
        self.first_section_id = id.into();
        self
    }

    /// Tag names are matched lowercase, like the parsed document stores them
    pub fn with_heading_tag(mut self, tag: &str) -> Self {
        self.heading_tag = tag.to_ascii_lowercase();
        self
    }

    pub fn with_chunk_heading_tag(mut self, tag: &str) -> Self {
        self.chunk_heading_tag = tag.to_ascii_lowercase();
        self
    }

    pub fn with_chunk_by(mut self, chunk_by: ChunkBy) -> Self {
        self.chunk_by = chunk_by;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ViewOptions::default();
        assert_eq!(opts.section_prefix, "section");
        assert_eq!(opts.first_section_id, "section-1");
        assert_eq!(opts.heading_tag, "h1");
        assert_eq!(opts.chunk_heading_tag, "h2");
        assert_eq!(opts.chunk_by, ChunkBy::SecondaryHeading);
        assert!(!opts.strict);
    }

    #[test]
    fn test_builder_lowercases_tags() {
        let opts = ViewOptions::default()
            .with_heading_tag("H2")
            .with_chunk_heading_tag("H3")
            .with_strict(true);
        assert_eq!(opts.heading_tag, "h2");
        assert_eq!(opts.chunk_heading_tag, "h3");
        assert!(opts.strict);
    }
}
