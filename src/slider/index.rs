//! Content index - section discovery and merge
//!
//! Finds the section headings of every level, splices each level's section
//! content into the first level's occurrence of that section, and records the
//! merged content as explicit ordered lists. Built once; read-only afterwards.

use super::chunk::{partition_by_heading, partition_by_level, Chunk};
use crate::dom::{HtmlDocument, NodeId};
use crate::error::{Error, Result};
use crate::options::{ChunkBy, ViewOptions};

/// One merged section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Id shared by the section's heading in every level (`section-3`)
    pub id: String,
    /// Heading of each level in document order; the first anchors the merge
    pub headings: Vec<NodeId>,
    /// Merged content: level 1's run, then level 2's, ... each in document order
    pub content: Vec<NodeId>,
    /// Offset in `content` where each level's run starts
    pub level_starts: Vec<usize>,
    pub chunks: Vec<Chunk>,
}

impl Section {
    /// Content nodes of one chunk
    pub fn chunk_nodes(&self, chunk: usize) -> &[NodeId] {
        match self.chunks.get(chunk) {
            Some(chunk) => &self.content[chunk.range()],
            None => &[],
        }
    }

    /// Content nodes contributed by one level
    pub fn level_nodes(&self, level: usize) -> &[NodeId] {
        let Some(&start) = self.level_starts.get(level) else {
            return &[];
        };
        let end = self
            .level_starts
            .get(level + 1)
            .copied()
            .unwrap_or(self.content.len());
        &self.content[start..end]
    }
}

/// Section id -> merged content, indexed by segment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentIndex {
    levels: usize,
    sections: Vec<Section>,
    /// Every discovered section heading, all levels, document order
    headings: Vec<NodeId>,
}

impl ContentIndex {
    /// Discover, group and merge the sections of `doc` in place
    pub fn build(doc: &mut HtmlDocument, options: &ViewOptions) -> Result<Self> {
        let headings = doc.elements_with_id_prefix(&options.section_prefix);
        let levels = headings
            .iter()
            .filter(|&&id| doc.attribute(id, "id") == Some(options.first_section_id.as_str()))
            .count();

        if levels == 0 {
            if options.strict {
                return Err(Error::NoSections {
                    id: options.first_section_id.clone(),
                });
            }
            log::debug!(
                "no element with id `{}`, leaving document untouched",
                options.first_section_id
            );
            return Ok(ContentIndex::default());
        }

        if headings.len() % levels != 0 {
            if options.strict {
                return Err(Error::UnevenSections {
                    found: headings.len(),
                    levels,
                });
            }
            log::debug!(
                "{} section headings do not split evenly across {} levels",
                headings.len(),
                levels
            );
        }
        let segments = headings.len() / levels;

        let groups = group_sections(doc, &headings, segments);

        // Runs are read before anything moves
        let runs = collect_runs(doc, &groups, &options.heading_tag);

        let sections = groups
            .into_iter()
            .zip(runs)
            .map(|((id, members), runs)| {
                let (content, level_starts) = merge_runs(doc, members[0], &runs);
                let chunks = match options.chunk_by {
                    ChunkBy::SecondaryHeading => {
                        partition_by_heading(doc, &content, &options.chunk_heading_tag)
                    }
                    ChunkBy::Level => partition_by_level(&level_starts, content.len()),
                };
                Section {
                    id,
                    headings: members,
                    content,
                    level_starts,
                    chunks,
                }
            })
            .collect::<Vec<_>>();

        log::debug!(
            "merged {} levels into {} sections ({} content nodes)",
            levels,
            sections.len(),
            sections.iter().map(|s| s.content.len()).sum::<usize>()
        );

        Ok(ContentIndex {
            levels,
            sections,
            headings,
        })
    }

    /// Number of merged levels (0 for an untouched document)
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Number of merged sections
    pub fn segments(&self) -> usize {
        self.sections.len()
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Every section heading of every level
    pub fn headings(&self) -> &[NodeId] {
        &self.headings
    }
}

/// For each segment k, the id of the k-th heading and every heading sharing it
fn group_sections(
    doc: &HtmlDocument,
    headings: &[NodeId],
    segments: usize,
) -> Vec<(String, Vec<NodeId>)> {
    headings
        .iter()
        .take(segments)
        .map(|&first| {
            let id = doc.attribute(first, "id").unwrap_or_default().to_string();
            let members = headings
                .iter()
                .copied()
                .filter(|&heading| doc.attribute(heading, "id") == Some(id.as_str()))
                .collect();
            (id, members)
        })
        .collect()
}

/// Content run of every heading of every group
fn collect_runs(
    doc: &HtmlDocument,
    groups: &[(String, Vec<NodeId>)],
    heading_tag: &str,
) -> Vec<Vec<Vec<NodeId>>> {
    groups
        .iter()
        .map(|(_, members)| {
            members
                .iter()
                .map(|&heading| content_run(doc, heading, heading_tag))
                .collect()
        })
        .collect()
}

/// Element siblings after `heading` up to the next top-level heading
pub fn content_run(doc: &HtmlDocument, heading: NodeId, heading_tag: &str) -> Vec<NodeId> {
    doc.following_siblings(heading)
        .filter(|&id| doc.tag_name(id).is_some())
        .take_while(|&id| !doc.is_element_named(id, heading_tag))
        .collect()
}

/// Move every run after the first behind the first one.
/// Returns the merged content and where each run starts in it.
fn merge_runs(
    doc: &mut HtmlDocument,
    anchor_heading: NodeId,
    runs: &[Vec<NodeId>],
) -> (Vec<NodeId>, Vec<usize>) {
    let mut content = Vec::with_capacity(runs.iter().map(Vec::len).sum());
    let mut level_starts = Vec::with_capacity(runs.len());
    let Some((first, rest)) = runs.split_first() else {
        return (content, level_starts);
    };

    level_starts.push(0);
    content.extend_from_slice(first);
    let mut anchor = first.last().copied().unwrap_or(anchor_heading);

    for run in rest {
        level_starts.push(content.len());
        for &node in run {
            doc.insert_after(anchor, node);
            anchor = node;
        }
        content.extend_from_slice(run);
    }

    (content, level_starts)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_LEVELS: &str = "<body>\
        <h1 id=\"section-1\">Intro</h1><h2>a</h2><p>a1</p>\
        <h1 id=\"section-2\">Body</h1><h2>b</h2><p>b1</p>\
        <h1 id=\"section-1\">Intro</h1><h2>A</h2><p>A1</p><p>A2</p>\
        <h1 id=\"section-2\">Body</h1><h2>B</h2><p>B1</p>\
        </body>";

    fn texts(doc: &HtmlDocument, nodes: &[NodeId]) -> Vec<String> {
        nodes.iter().map(|&id| doc.text_content(id)).collect()
    }

    #[test]
    fn test_discovery_counts() {
        let mut doc = HtmlDocument::parse(TWO_LEVELS);
        let index = ContentIndex::build(&mut doc, &ViewOptions::default()).unwrap();
        assert_eq!(index.levels(), 2);
        assert_eq!(index.segments(), 2);
        assert_eq!(index.headings().len(), 4);
        assert_eq!(index.section(0).unwrap().id, "section-1");
        assert_eq!(index.section(1).unwrap().headings.len(), 2);
    }

    #[test]
    fn test_merge_is_order_preserving() {
        let mut doc = HtmlDocument::parse(TWO_LEVELS);
        let index = ContentIndex::build(&mut doc, &ViewOptions::default()).unwrap();

        let first = index.section(0).unwrap();
        assert_eq!(texts(&doc, &first.content), vec!["a", "a1", "A", "A1", "A2"]);
        assert_eq!(first.level_starts, vec![0, 2]);
        assert_eq!(texts(&doc, first.level_nodes(1)), vec!["A", "A1", "A2"]);

        // The merged run now sits directly behind the first heading
        let heading = first.headings[0];
        let run = content_run(&doc, heading, "h1");
        assert_eq!(run, first.content);

        let second = index.section(1).unwrap();
        assert_eq!(texts(&doc, &second.content), vec!["b", "b1", "B", "B1"]);
    }

    #[test]
    fn test_later_headings_are_left_empty() {
        let mut doc = HtmlDocument::parse(TWO_LEVELS);
        let index = ContentIndex::build(&mut doc, &ViewOptions::default()).unwrap();
        for section in index.sections() {
            for &heading in &section.headings[1..] {
                assert!(content_run(&doc, heading, "h1").is_empty());
            }
        }
    }

    #[test]
    fn test_chunks_by_secondary_heading() {
        let mut doc = HtmlDocument::parse(TWO_LEVELS);
        let index = ContentIndex::build(&mut doc, &ViewOptions::default()).unwrap();
        let first = index.section(0).unwrap();
        assert_eq!(first.chunks.len(), 2);
        assert_eq!(texts(&doc, first.chunk_nodes(0)), vec!["a", "a1"]);
        assert_eq!(texts(&doc, first.chunk_nodes(1)), vec!["A", "A1", "A2"]);
        assert!(first.chunk_nodes(2).is_empty());
    }

    #[test]
    fn test_chunks_by_level() {
        let mut doc = HtmlDocument::parse(
            "<body><h1 id=\"section-1\">x</h1><p>one</p><h1 id=\"section-1\">x</h1><p>two</p><p>2b</p></body>",
        );
        let opts = ViewOptions::default().with_chunk_by(ChunkBy::Level);
        let index = ContentIndex::build(&mut doc, &opts).unwrap();
        let section = index.section(0).unwrap();
        assert_eq!(section.chunks.len(), 2);
        assert_eq!(texts(&doc, section.chunk_nodes(1)), vec!["two", "2b"]);
    }

    #[test]
    fn test_empty_first_run_anchors_on_heading() {
        let mut doc = HtmlDocument::parse(
            "<body><h1 id=\"section-1\">x</h1><h1 id=\"section-1\">x</h1><p>late</p></body>",
        );
        let index = ContentIndex::build(&mut doc, &ViewOptions::default()).unwrap();
        let section = index.section(0).unwrap();
        assert_eq!(section.level_starts, vec![0, 0]);
        let heading = section.headings[0];
        assert_eq!(
            doc.next_element_sibling(heading),
            Some(section.content[0])
        );
    }

    #[test]
    fn test_levels_in_separate_containers() {
        let mut doc = HtmlDocument::parse(
            "<article><h1 id=\"section-1\">x</h1><p>a</p></article>\
             <article><h1 id=\"section-1\">x</h1><p>b</p></article>",
        );
        let index = ContentIndex::build(&mut doc, &ViewOptions::default()).unwrap();
        let section = index.section(0).unwrap();
        let first_article = doc.parent(section.headings[0]);
        assert!(section
            .content
            .iter()
            .all(|&node| doc.parent(node) == first_article));
    }

    #[test]
    fn test_no_sections_is_inert() {
        let mut doc = HtmlDocument::parse("<body><h1>plain</h1><p>x</p></body>");
        let before = doc.to_html();
        let index = ContentIndex::build(&mut doc, &ViewOptions::default()).unwrap();
        assert_eq!(index.levels(), 0);
        assert_eq!(index.segments(), 0);
        assert_eq!(doc.to_html(), before);
    }

    #[test]
    fn test_strict_rejects_missing_sections() {
        let mut doc = HtmlDocument::parse("<h1 id=\"section-2\">x</h1>");
        let opts = ViewOptions::default().with_strict(true);
        assert_eq!(
            ContentIndex::build(&mut doc, &opts),
            Err(Error::NoSections {
                id: "section-1".to_string()
            })
        );
    }

    #[test]
    fn test_uneven_sections() {
        let html = "<body><h1 id=\"section-1\">a</h1><h1 id=\"section-2\">b</h1>\
                    <h1 id=\"section-1\">c</h1></body>";

        let mut doc = HtmlDocument::parse(html);
        let strict = ViewOptions::default().with_strict(true);
        assert_eq!(
            ContentIndex::build(&mut doc, &strict),
            Err(Error::UnevenSections { found: 3, levels: 2 })
        );

        // Lenient mode lays it out anyway
        let mut doc = HtmlDocument::parse(html);
        let index = ContentIndex::build(&mut doc, &ViewOptions::default()).unwrap();
        assert_eq!(index.segments(), 1);
    }
}
