//! Error type for the level view

use thiserror::Error;

/// Errors surfaced by [`LevelView`](crate::slider::LevelView).
///
/// The default (lenient) initialization never fails; the section checks
/// only run with [`ViewOptions::strict`](crate::ViewOptions::strict).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A control id that no section owns
    #[error("no control with id {0}")]
    UnknownControl(usize),

    /// Strict mode: nothing carries the first section id
    #[error("no element with id `{id}`")]
    NoSections { id: String },

    /// Strict mode: section headings do not split evenly across the levels
    #[error("{found} section headings cannot be split evenly across {levels} levels")]
    UnevenSections { found: usize, levels: usize },

    /// The shared view state was poisoned by a panicking holder
    #[error("view state is poisoned")]
    StatePoisoned,
}

pub type Result<T> = std::result::Result<T, Error>;
