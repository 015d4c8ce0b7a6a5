use std::fmt;

use crate::assets::decode::{AssetDecoder, DecodedImage, ImageDecoder};
use crate::assets::fonts::{FontSet, FontSource, TextLayoutEngine};
use crate::foundation::core::{Rect, Rgb8};
use crate::foundation::error::{BrandframeError, BrandframeResult};
use crate::generate::{background, flash, logo, text};
use crate::render::surface::{FrameRGBA, ImagePaint, Surface};
use crate::scene::request::CreativeRequest;
use crate::scene::settings::FlashLayerPosition;

/// Environment variable naming a font file used for all copy.
pub const FONT_PATH_ENV: &str = "BRANDFRAME_FONT_PATH";

const REFERENCE_OPACITY: f64 = 0.25;
/// Largest image side `vello_cpu` pixmaps can hold.
const MAX_ASSET_SIDE: u32 = u16::MAX as u32;

/// Options used to construct a [`CreativePipeline`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipelineOpts {
    /// Font faces for headline, body and call to action.
    pub font_source: FontSource,
}

impl PipelineOpts {
    /// Defaults, with the font taken from `BRANDFRAME_FONT_PATH` when set.
    pub fn from_env() -> Self {
        let font_source = match std::env::var_os(FONT_PATH_ENV) {
            Some(path) if !path.is_empty() => FontSource::File(path.into()),
            _ => FontSource::System,
        };
        Self { font_source }
    }
}

/// A stage that was skipped without failing the render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationWarning {
    /// Reference image bytes did not decode.
    ReferenceImageSkipped { reason: String },
    /// Logo bytes did not decode.
    LogoSkipped { reason: String },
    /// Copy was requested but no usable font exists.
    TextSkipped { reason: String },
}

impl fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReferenceImageSkipped { reason } => {
                write!(f, "reference image skipped: {reason}")
            }
            Self::LogoSkipped { reason } => write!(f, "logo skipped: {reason}"),
            Self::TextSkipped { reason } => write!(f, "text skipped: {reason}"),
        }
    }
}

/// Raw pixels of one render.
#[derive(Clone, Debug)]
pub struct RenderedCreative {
    pub frame: FrameRGBA,
    pub warnings: Vec<GenerationWarning>,
}

/// PNG-encoded creative.
#[derive(Clone, Debug)]
pub struct Creative {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
    pub warnings: Vec<GenerationWarning>,
}

/// Orchestrates the generation stages in their fixed order:
/// background, reference image, flashes behind the logo, logo, flashes above the logo, copy.
///
/// The pipeline holds no per-render state. Each call allocates its own surface and random
/// generators, so one pipeline can serve concurrent calls.
pub struct CreativePipeline {
    decoder: Box<dyn AssetDecoder>,
    fonts: Option<FontSet>,
}

impl fmt::Debug for CreativePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreativePipeline")
            .field("fonts", &self.fonts.is_some())
            .finish_non_exhaustive()
    }
}

impl CreativePipeline {
    /// Build a pipeline, resolving fonts up front.
    pub fn new(opts: PipelineOpts) -> BrandframeResult<Self> {
        let fonts = FontSet::resolve(&opts.font_source)?;
        if fonts.is_none() {
            tracing::debug!(source = ?opts.font_source, "no fonts available; copy will not be drawn");
        }
        Ok(Self {
            decoder: Box::new(ImageDecoder),
            fonts,
        })
    }

    /// Replace the asset decoder.
    pub fn with_decoder(mut self, decoder: impl AssetDecoder + 'static) -> Self {
        self.decoder = Box::new(decoder);
        self
    }

    /// Render and PNG-encode a creative.
    #[tracing::instrument(level = "info", skip_all, fields(width = req.width, height = req.height, seed = req.settings.seed))]
    pub fn generate(&self, req: &CreativeRequest) -> BrandframeResult<Creative> {
        let rendered = self.render(req)?;
        let png = rendered.frame.encode_png()?;
        Ok(Creative {
            width: rendered.frame.width,
            height: rendered.frame.height,
            png,
            warnings: rendered.warnings,
        })
    }

    /// Render a creative to premultiplied pixels.
    #[tracing::instrument(level = "debug", skip_all, fields(preset = %req.settings.style_preset))]
    pub fn render(&self, req: &CreativeRequest) -> BrandframeResult<RenderedCreative> {
        req.validate()?;
        let settings = &req.settings;
        let colors = req
            .brand_colors
            .iter()
            .map(|c| c.rgb())
            .collect::<BrandframeResult<Vec<Rgb8>>>()?;
        let mut warnings = Vec::new();

        let mut surface = Surface::new(req.width, req.height)?;

        background::render(&mut surface, &colors, settings.style_preset, settings.seed)?;
        tracing::debug!("background done");

        if let Some(bytes) = &req.reference_image_bytes {
            match self.decode(bytes) {
                Ok(img) => {
                    draw_reference(&mut surface, &img)?;
                    tracing::debug!(w = img.width, h = img.height, "reference image drawn");
                }
                Err(e) => warn(&mut warnings, GenerationWarning::ReferenceImageSkipped {
                    reason: e.to_string(),
                }),
            }
        }

        let flashes = &settings.flash_overlay_settings;
        if flashes.layer_position == FlashLayerPosition::BehindLogo {
            flash::render(&mut surface, flashes, settings.seed)?;
        }

        if let Some(bytes) = &req.logo_image_bytes {
            match self.decode(bytes) {
                Ok(img) => {
                    logo::render(&mut surface, &img, &settings.logo_settings)?;
                    tracing::debug!("logo drawn");
                }
                Err(e) => warn(&mut warnings, GenerationWarning::LogoSkipped {
                    reason: e.to_string(),
                }),
            }
        }

        if flashes.layer_position == FlashLayerPosition::AboveLogo {
            flash::render(&mut surface, flashes, settings.seed)?;
        }

        if let Some(copy) = &req.copy {
            let mut engine = match &self.fonts {
                Some(fonts) => match TextLayoutEngine::new(fonts) {
                    Ok(engine) => Some(engine),
                    Err(e) => {
                        warn(&mut warnings, GenerationWarning::TextSkipped {
                            reason: e.to_string(),
                        });
                        None
                    }
                },
                None => {
                    warn(&mut warnings, GenerationWarning::TextSkipped {
                        reason: "no font available".to_owned(),
                    });
                    None
                }
            };
            text::render(&mut surface, copy, &colors, engine.as_mut())?;
            tracing::debug!("copy drawn");
        }

        Ok(RenderedCreative {
            frame: surface.into_frame(),
            warnings,
        })
    }

    /// Decode an asset into something the renderer can draw.
    fn decode(&self, bytes: &[u8]) -> BrandframeResult<DecodedImage> {
        let img = self.decoder.decode(bytes).map_err(|e| match e {
            BrandframeError::AssetDecode(_) => e,
            other => BrandframeError::asset_decode(other.to_string()),
        })?;
        if img.width > MAX_ASSET_SIDE || img.height > MAX_ASSET_SIDE {
            return Err(BrandframeError::asset_decode(format!(
                "image {}x{} exceeds the {MAX_ASSET_SIDE}px renderer limit",
                img.width, img.height
            )));
        }
        Ok(img)
    }
}

fn warn(warnings: &mut Vec<GenerationWarning>, w: GenerationWarning) {
    tracing::warn!("{w}");
    warnings.push(w);
}

/// Aspect-fit destination for the reference image: 40% of frame height for images wider than the
/// frame, otherwise 60% of frame width. Centered horizontally, top at 10% of frame height.
pub fn reference_rect(frame_width: u32, frame_height: u32, image_aspect: f64) -> Rect {
    let w = f64::from(frame_width);
    let h = f64::from(frame_height);
    let (dw, dh) = if image_aspect > w / h {
        let dh = h * 0.4;
        (dh * image_aspect, dh)
    } else {
        let dw = w * 0.6;
        (dw, dw / image_aspect)
    };
    let x = (w - dw) / 2.0;
    let y = h * 0.1;
    Rect::new(x, y, x + dw, y + dh)
}

fn draw_reference(surface: &mut Surface, img: &DecodedImage) -> BrandframeResult<()> {
    let dest = reference_rect(surface.width(), surface.height(), img.aspect());
    let paint = ImagePaint::new(img)?;
    surface.paint(|p| {
        p.draw_image(&paint, dest, REFERENCE_OPACITY);
        Ok(())
    })
}

#[cfg(test)]
#[path = "../../tests/unit/generate/pipeline.rs"]
mod tests;
