//! Brandframe turns a brand kit, marketing copy and a compact settings object into a finished,
//! reproducible social-media creative.
//!
//! Generation is deterministic: the same [`CreativeRequest`] always yields the same pixels.
//!
//! - Describe the creative with a [`CreativeRequest`] (or load a [`CreativeRequestDef`] from JSON)
//! - Build a [`CreativePipeline`]
//! - Call [`CreativePipeline::generate`] for PNG bytes, or [`CreativePipeline::render`] for pixels
//!
//! Image edits go through the [`ImageEditor`] boundary; [`PlaceholderEditor`] is a local stand-in.
#![forbid(unsafe_code)]

pub mod assets;
pub mod edit;
pub mod foundation;
pub mod generate;
pub mod render;
pub mod scene;

pub use crate::assets::decode::{AssetDecoder, DecodedImage, ImageDecoder};
pub use crate::assets::fonts::{FontFace, FontSet, FontSource};
pub use crate::edit::{EditRequest, ImageEditor, PlaceholderEditor, ProgressReporter};
pub use crate::foundation::core::{CanvasFormat, Rgb8};
pub use crate::foundation::error::{BrandframeError, BrandframeResult};
pub use crate::foundation::rng::{RandomSource, SeededRandom};
pub use crate::generate::pipeline::{
    Creative, CreativePipeline, GenerationWarning, PipelineOpts, RenderedCreative,
};
pub use crate::render::surface::FrameRGBA;
pub use crate::scene::copy::CopyVariant;
pub use crate::scene::request::{Color, CreativeRequest, CreativeRequestDef};
pub use crate::scene::settings::{
    CreativeSettings, FlashLayerPosition, FlashOverlaySettings, LogoPosition, LogoSettings,
    StylePreset, VisibilityTreatment,
};
