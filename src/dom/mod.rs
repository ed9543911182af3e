//! DOM Module - Arena-based HTML Document
//!
//! Implements a mutable DOM representation using:
//! - Arena allocation for nodes
//! - NodeId (u32) indices for cache-friendly traversal
//! - Sibling links so nodes can be detached and re-inserted in O(1)
//! - Inline-style visibility (`display: none`)

pub mod document;
pub mod node;
pub mod serialize;
pub mod style;

pub use document::{ChildIter, DescendantIter, HtmlDocument, DOCUMENT_NODE};
pub use node::{is_void_element, HtmlAttribute, HtmlNode, NodeId, NodeKind};
