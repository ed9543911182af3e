//! LevelView - merge multi-level documents behind per-section sliders
//!
//! A page holding the same document at several levels of detail, each level
//! split into sections whose headings share ids across levels, is merged into
//! one copy per section. A range control in front of each section picks which
//! level's chunk is shown.
//!
//! Layers:
//! - `reader`: lenient HTML pull reader (never fails)
//! - `dom`: arena document with the mutations the view needs
//! - `slider`: content index, controls and the `LevelView` controller
//! - `strategy`: parallel per-level snapshot rendering
//!
//! With the `nif` feature the crate also builds the `Elixir.LevelView.Native`
//! NIF library.

pub mod core;
pub mod dom;
pub mod error;
pub mod options;
pub mod reader;
pub mod slider;
pub mod strategy;

#[cfg(feature = "nif")]
mod resource;
#[cfg(feature = "nif")]
mod term;

pub use dom::{HtmlDocument, NodeId};
pub use error::{Error, Result};
pub use options::{ChunkBy, ViewOptions};
pub use slider::{render, Control, LevelChange, LevelView};

// ============================================================================
// Allocator Configuration
// ============================================================================

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

// ============================================================================
// NIF Surface
// ============================================================================

#[cfg(feature = "nif")]
mod nif {
    use rustler::{Env, NifResult, ResourceArc, Term};

    use crate::resource::{LevelViewRef, LevelViewResource};
    use crate::slider::LevelView;
    use crate::strategy::parallel;
    use crate::term::{change_to_term, decode_options, error_tuple, ok_tuple, str_to_binary};

    /// Parse, merge and serialize in one call.
    /// Returns `{:ok, html}` or `{:error, {reason, message}}`
    #[rustler::nif(name = "render")]
    fn render_html<'a>(env: Env<'a>, html: &str, options: Term<'a>) -> NifResult<Term<'a>> {
        let options = decode_options(options)?;
        Ok(match crate::render(html, &options) {
            Ok(out) => ok_tuple(env, str_to_binary(env, &out)),
            Err(e) => error_tuple(env, &e),
        })
    }

    /// Initialize a view and keep it on the Rust side
    #[rustler::nif]
    fn new_view<'a>(env: Env<'a>, html: &str, options: Term<'a>) -> NifResult<Term<'a>> {
        let options = decode_options(options)?;
        Ok(match LevelView::parse(html, &options) {
            Ok(view) => ok_tuple(env, ResourceArc::new(LevelViewResource::new(view))),
            Err(e) => error_tuple(env, &e),
        })
    }

    /// Move one control. Returns `{:ok, {section, previous, current}}`
    #[rustler::nif]
    fn change<'a>(
        env: Env<'a>,
        view_ref: LevelViewRef,
        control_id: usize,
        value: usize,
    ) -> NifResult<Term<'a>> {
        let result = view_ref
            .with_view(|view| view.change(control_id, value))
            .and_then(|changed| changed);
        Ok(match result {
            Ok(change) => ok_tuple(env, change_to_term(env, change)),
            Err(e) => error_tuple(env, &e),
        })
    }

    /// Current page HTML
    #[rustler::nif]
    fn to_html<'a>(env: Env<'a>, view_ref: LevelViewRef) -> NifResult<Term<'a>> {
        Ok(match view_ref.with_view(|view| view.to_html()) {
            Ok(out) => ok_tuple(env, str_to_binary(env, &out)),
            Err(e) => error_tuple(env, &e),
        })
    }

    /// `{:ok, [{control_id, value}, ...]}`
    #[rustler::nif]
    fn levels<'a>(env: Env<'a>, view_ref: LevelViewRef) -> NifResult<Term<'a>> {
        let values = view_ref.with_view(|view| {
            view.controls()
                .iter()
                .map(|control| (control.id, control.value()))
                .collect::<Vec<_>>()
        });
        Ok(match values {
            Ok(values) => ok_tuple(env, values),
            Err(e) => error_tuple(env, &e),
        })
    }

    /// One page snapshot per level, rendered in parallel.
    /// The view is cloned under the lock, so rendering does not block changes.
    #[rustler::nif(schedule = "DirtyCpu")]
    fn render_levels<'a>(env: Env<'a>, view_ref: LevelViewRef) -> NifResult<Term<'a>> {
        let snapshot = match view_ref.with_view(|view| view.clone()) {
            Ok(view) => view,
            Err(e) => return Ok(error_tuple(env, &e)),
        };

        let pages = parallel::render_levels(&snapshot);
        let mut list = Term::list_new_empty(env);
        for page in pages.iter().rev() {
            list = list.list_prepend(str_to_binary(env, page));
        }
        Ok(ok_tuple(env, list))
    }

    fn load(_env: Env, _info: Term) -> bool {
        log::debug!("levelview NIF loaded");
        true
    }

    rustler::init!("Elixir.LevelView.Native", load = load);
}
