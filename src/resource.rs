//! ResourceArc wrapper
//!
//! Persistent view state handed to the BEAM between change events.

use std::sync::Mutex;

use rustler::ResourceArc;

use crate::error::{Error, Result};
use crate::slider::LevelView;

/// A `LevelView` that can be stored in a ResourceArc
pub struct LevelViewResource {
    pub view: Mutex<LevelView>,
}

impl LevelViewResource {
    pub fn new(view: LevelView) -> Self {
        LevelViewResource {
            view: Mutex::new(view),
        }
    }

    /// Run `f` against the locked view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StatePoisoned`] if a previous holder panicked.
    pub fn with_view<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut LevelView) -> R,
    {
        let mut guard = self.view.lock().map_err(|_| Error::StatePoisoned)?;
        Ok(f(&mut guard))
    }
}

#[rustler::resource_impl]
impl rustler::Resource for LevelViewResource {}

pub type LevelViewRef = ResourceArc<LevelViewResource>;
