use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{BrandframeError, BrandframeResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Decoded raster in premultiplied RGBA8 form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl DecodedImage {
    /// Wrap premultiplied bytes, checking the buffer length.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> BrandframeResult<Self> {
        if width == 0 || height == 0 {
            return Err(BrandframeError::asset_decode("image has zero width or height"));
        }
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if rgba8_premul.len() != expected {
            return Err(BrandframeError::asset_decode(format!(
                "image byte len {} does not match {width}x{height}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Width divided by height.
    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Turns encoded asset bytes into a pixel surface.
pub trait AssetDecoder: Send + Sync {
    /// Decode `bytes`; failures are [`BrandframeError::AssetDecode`].
    fn decode(&self, bytes: &[u8]) -> BrandframeResult<DecodedImage>;
}

/// Default decoder: SVG documents via `usvg`/`resvg`, everything else via `image`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageDecoder;

impl AssetDecoder for ImageDecoder {
    fn decode(&self, bytes: &[u8]) -> BrandframeResult<DecodedImage> {
        if looks_like_svg(bytes) {
            decode_svg(bytes)
        } else {
            decode_raster(bytes)
        }
    }
}

/// Decode PNG/JPEG/WebP/GIF/... bytes with the `image` crate.
pub fn decode_raster(bytes: &[u8]) -> BrandframeResult<DecodedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(decode_error)?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);
    DecodedImage::from_premul(width, height, rgba8_premul)
}

/// Small SVG logos are rasterized at least this large on their longest side.
const SVG_MIN_RASTER_SIDE: f32 = 512.0;
const SVG_MAX_RASTER_SIDE: f32 = 4096.0;

/// Parse and rasterize an SVG document.
pub fn decode_svg(bytes: &[u8]) -> BrandframeResult<DecodedImage> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts)
        .context("parse svg tree")
        .map_err(decode_error)?;

    let size = tree.size();
    let (sw, sh) = (size.width(), size.height());
    if !sw.is_finite() || !sh.is_finite() || sw <= 0.0 || sh <= 0.0 {
        return Err(BrandframeError::asset_decode("svg has invalid width/height"));
    }
    let longest = sw.max(sh);
    let scale = if longest < SVG_MIN_RASTER_SIDE {
        SVG_MIN_RASTER_SIDE / longest
    } else {
        (SVG_MAX_RASTER_SIDE / longest).min(1.0)
    };
    let width = ((sw * scale).ceil() as u32).max(1);
    let height = ((sh * scale).ceil() as u32).max(1);

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| BrandframeError::resource("failed to allocate svg pixmap"))?;
    let xform = resvg::tiny_skia::Transform::from_scale(
        width as f32 / sw,
        height as f32 / sh,
    );
    resvg::render(&tree, xform, &mut pixmap.as_mut());
    // tiny-skia pixmaps are already premultiplied RGBA8.
    DecodedImage::from_premul(width, height, pixmap.data().to_vec())
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(1024)];
    let Ok(text) = std::str::from_utf8(head) else {
        // A multi-byte sequence may be cut at the window edge.
        return String::from_utf8_lossy(head).contains("<svg");
    };
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with('<') && text.contains("<svg"))
}

fn decode_error(e: anyhow::Error) -> BrandframeError {
    BrandframeError::asset_decode(format!("{e:#}"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
