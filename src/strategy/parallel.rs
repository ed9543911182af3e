//! Parallel snapshot rendering
//!
//! Uses Rayon to render the page once per level. Each worker clones the
//! view, so the caller's state is never touched.

use rayon::prelude::*;

use crate::slider::LevelView;

/// Page HTML with every control moved to `level` (1-based, clamped)
pub fn render_level(view: &LevelView, level: usize) -> String {
    let mut snapshot = view.clone();
    snapshot.set_all(level);
    snapshot.to_html()
}

/// One snapshot per level, in level order.
/// An inert view (no levels) yields nothing.
pub fn render_levels(view: &LevelView) -> Vec<String> {
    (1..=view.levels())
        .into_par_iter()
        .map(|level| render_level(view, level))
        .collect()
}
