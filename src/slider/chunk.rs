//! Chunk partitioning of a merged section
//!
//! A chunk is a half-open range into the section's ordered content list.

use std::ops::Range;

use crate::dom::{HtmlDocument, NodeId};

/// One show/hide unit of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    /// Offset of the first node in the section content
    pub start: usize,
    /// Offset one past the last node
    pub end: usize,
}

impl Chunk {
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Cut `content` at every secondary heading.
///
/// Each chunk runs from one heading to the next; the last one runs to the end
/// of the content. Nodes before the first heading belong to no chunk. Content
/// without any heading yields no chunks.
pub fn partition_by_heading(doc: &HtmlDocument, content: &[NodeId], tag: &str) -> Vec<Chunk> {
    let positions: Vec<usize> = content
        .iter()
        .enumerate()
        .filter(|&(_, &id)| doc.is_element_named(id, tag))
        .map(|(pos, _)| pos)
        .collect();

    positions
        .iter()
        .enumerate()
        .map(|(n, &start)| Chunk {
            start,
            end: positions.get(n + 1).copied().unwrap_or(content.len()),
        })
        .collect()
}

/// One chunk per level, from the offsets where each level's run starts
pub fn partition_by_level(level_starts: &[usize], len: usize) -> Vec<Chunk> {
    level_starts
        .iter()
        .enumerate()
        .map(|(n, &start)| Chunk {
            start,
            end: level_starts.get(n + 1).copied().unwrap_or(len),
        })
        .collect()
}
