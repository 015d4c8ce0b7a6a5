use std::time::Duration;

use crate::assets::decode::{AssetDecoder, ImageDecoder};
use crate::assets::fonts::{FontSet, TextLayoutEngine, TextWeight};
use crate::edit::{EditRequest, ImageEditor, ProgressReporter};
use crate::foundation::core::{Affine, Point, Rect, Rgb8};
use crate::foundation::error::{BrandframeError, BrandframeResult};
use crate::render::paint::rect;
use crate::render::surface::Surface;

const STEPS: u8 = 10;
const WASH: Rgb8 = Rgb8::new(0, 255, 0);
const WASH_ALPHA: f64 = 0.05;
const MARK_TEXT: &str = "EDITED";
const MARK_SIZE: f32 = 24.0;
const MARK_ALPHA: f64 = 0.3;
const MARK_MARGIN: f64 = 20.0;

/// Local stand-in for a remote editing service.
///
/// Ignores the instruction. Steps progress through 0, 10, .., 100, tints the image with a faint
/// green wash and stamps an "EDITED" watermark in the bottom-right corner.
#[derive(Debug, Default)]
pub struct PlaceholderEditor {
    step_delay: Duration,
    fonts: Option<FontSet>,
}

impl PlaceholderEditor {
    pub fn new(fonts: Option<FontSet>) -> Self {
        Self {
            step_delay: Duration::ZERO,
            fonts,
        }
    }

    /// Sleep this long between progress steps.
    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    fn apply(&self, bytes: &[u8]) -> BrandframeResult<Vec<u8>> {
        let image = ImageDecoder.decode(bytes)?;
        let mut surface = Surface::from_decoded(&image)?;
        let w = f64::from(surface.width());
        let h = f64::from(surface.height());

        let mark = match &self.fonts {
            Some(fonts) => {
                let mut engine = TextLayoutEngine::new(fonts)?;
                let shaped = engine.layout(MARK_TEXT, MARK_SIZE, TextWeight::Bold, Default::default())?;
                // right-aligned, bottom of the descender on the margin
                let (baseline, _, descent) = shaped.first_line_metrics();
                let origin = Point::new(
                    w - MARK_MARGIN - f64::from(shaped.width()),
                    h - MARK_MARGIN - f64::from(descent) - f64::from(baseline),
                );
                Some((shaped, origin))
            }
            None => {
                tracing::debug!("no font for watermark");
                None
            }
        };

        surface.paint(|p| {
            p.fill(&rect(Rect::new(0.0, 0.0, w, h)), Affine::IDENTITY, WASH, WASH_ALPHA);
            if let Some((shaped, origin)) = &mark {
                p.fill_text(shaped, *origin, Rgb8::WHITE, MARK_ALPHA);
            }
            Ok(())
        })?;
        surface.into_frame().encode_png()
    }
}

impl ImageEditor for PlaceholderEditor {
    #[tracing::instrument(level = "info", skip_all, fields(bytes = req.image_bytes.len()))]
    fn edit(&self, req: EditRequest<'_>) -> BrandframeResult<Vec<u8>> {
        tracing::debug!(instruction = req.instruction_text, "placeholder edit");
        let progress = ProgressReporter::new(req.on_progress);
        progress
            .run(|progress| {
                for step in 0..STEPS {
                    progress.report(step * (100 / STEPS));
                    if !self.step_delay.is_zero() {
                        std::thread::sleep(self.step_delay);
                    }
                }
                self.apply(req.image_bytes)
            })
            .map_err(|e| match e {
                BrandframeError::EditService(_) => e,
                other => BrandframeError::edit_service(other.to_string()),
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/edit/placeholder.rs"]
mod tests;
