//! HTML Reader Module
//!
//! - SliceReader: Zero-copy pull reader over a byte slice
//! - Events: HTML event types for pull parsing

pub mod events;
pub mod slice;

pub use events::{HtmlEvent, StartTag};
pub use slice::SliceReader;
