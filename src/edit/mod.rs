//! Boundary to the external image-editing service.
//!
//! Callers hand an [`ImageEditor`] the current creative and a free-form instruction and get new
//! image bytes back. Implementations report progress through a [`ProgressReporter`], which owns
//! the callback contract so that every backend observes it the same way.

use crate::foundation::error::BrandframeResult;

pub mod placeholder;

pub use placeholder::PlaceholderEditor;

/// Highest percentage reported before an edit has succeeded.
const MAX_IN_FLIGHT: u8 = 99;

/// One edit call.
pub struct EditRequest<'a> {
    /// Encoded source image. Never modified.
    pub image_bytes: &'a [u8],
    /// What the user asked for.
    pub instruction_text: &'a str,
    /// Receives percentages in `0..=100`.
    pub on_progress: &'a mut dyn FnMut(u8),
}

impl std::fmt::Debug for EditRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditRequest")
            .field("image_bytes", &self.image_bytes.len())
            .field("instruction_text", &self.instruction_text)
            .finish_non_exhaustive()
    }
}

/// An image-editing backend.
pub trait ImageEditor: Send + Sync {
    /// Apply `req.instruction_text` to `req.image_bytes`, returning the encoded result.
    ///
    /// Errors are [`crate::BrandframeError::EditService`]; the input image stays usable.
    fn edit(&self, req: EditRequest<'_>) -> BrandframeResult<Vec<u8>>;
}

/// Wraps a progress callback and enforces its contract:
/// values never decrease, 100 is delivered exactly once and only on success, and nothing is
/// delivered after the edit has finished either way.
pub struct ProgressReporter<'a> {
    callback: &'a mut dyn FnMut(u8),
    last: Option<u8>,
    finished: bool,
}

impl<'a> ProgressReporter<'a> {
    pub fn new(callback: &'a mut dyn FnMut(u8)) -> Self {
        Self {
            callback,
            last: None,
            finished: false,
        }
    }

    /// Report an intermediate percentage. Values are held below 100 and never go backwards;
    /// repeats of the last value are dropped.
    pub fn report(&mut self, percent: u8) {
        if self.finished {
            return;
        }
        let percent = percent.min(MAX_IN_FLIGHT).max(self.last.unwrap_or(0));
        if self.last == Some(percent) {
            return;
        }
        self.last = Some(percent);
        (self.callback)(percent);
    }

    /// Last percentage delivered, if any.
    pub fn last(&self) -> Option<u8> {
        self.last
    }

    /// Run `work`, then deliver 100 if it succeeded. After this returns the reporter is silent.
    pub fn run<T>(
        mut self,
        work: impl FnOnce(&mut Self) -> BrandframeResult<T>,
    ) -> BrandframeResult<T> {
        let out = work(&mut self);
        if out.is_ok() {
            self.last = Some(100);
            (self.callback)(100);
        }
        self.finished = true;
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/edit/mod.rs"]
mod tests;
