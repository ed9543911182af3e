//! Range-input controls
//!
//! One control per merged section. The value is 1-based (the level the reader
//! sees on the slider); everything handed to the content index is zero-based.

use crate::dom::NodeId;

/// Transition produced by one control change (zero-based levels)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChange {
    /// Zero-based section index
    pub section: usize,
    /// Level shown before the change
    pub previous: usize,
    /// Level shown after the change
    pub current: usize,
}

/// State of one `<input type="range">`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    /// 1-based segment index, also the element's `id`
    pub id: usize,
    /// The inserted input element
    pub node: NodeId,
    pub min: usize,
    pub max: usize,
    value: usize,
    previous: usize,
}

impl Control {
    /// New control over `levels` levels, starting at the middle one
    pub fn new(id: usize, node: NodeId, levels: usize) -> Self {
        let value = Self::initial_value(levels);
        Control {
            id,
            node,
            min: 1,
            max: levels.max(1),
            value,
            previous: value,
        }
    }

    /// `floor(levels / 2) + 1`
    #[inline]
    pub fn initial_value(levels: usize) -> usize {
        levels / 2 + 1
    }

    #[inline]
    pub fn value(&self) -> usize {
        self.value
    }

    /// Value before the last change (the initial value until the first one)
    #[inline]
    pub fn previous(&self) -> usize {
        self.previous
    }

    /// Zero-based section this control drives
    #[inline]
    pub fn section_index(&self) -> usize {
        self.id - 1
    }

    /// Clamp a requested value into `min..=max`, as a browser range input does
    #[inline]
    pub fn sanitize(&self, requested: usize) -> usize {
        requested.clamp(self.min, self.max)
    }

    /// Move to `requested` (sanitized) and report the transition
    pub fn set_value(&mut self, requested: usize) -> LevelChange {
        self.previous = self.value;
        self.value = self.sanitize(requested);
        LevelChange {
            section: self.section_index(),
            previous: self.previous - 1,
            current: self.value - 1,
        }
    }
}
