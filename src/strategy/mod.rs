//! Rendering strategies
//!
//! A view is normally driven one change at a time. `parallel` renders
//! whole-page snapshots, one per level, on the rayon pool.

pub mod parallel;

pub use parallel::{render_level, render_levels};
