//! Level slider
//!
//! - `index`: section discovery and the in-place merge of every level
//! - `chunk`: partitioning of a merged section into show/hide units
//! - `control`: range-input state per section
//! - `view`: the controller tying them to one document

pub mod chunk;
pub mod control;
pub mod index;
pub mod view;

pub use chunk::Chunk;
pub use control::{Control, LevelChange};
pub use index::{ContentIndex, Section};
pub use view::{render, LevelView};
