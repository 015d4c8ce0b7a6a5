use std::io::Cursor;

use crate::assets::decode::DecodedImage;
use crate::assets::fonts::ShapedText;
use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgb8, Vec2, alpha_to_u8};
use crate::foundation::error::{BrandframeError, BrandframeResult};
use crate::foundation::math::{
    premul_over_in_place, premul_under_in_place, unpremultiply_rgba8_in_place,
};
use crate::render::blur::{blur_rgba8_premul_in_place, gaussian_kernel_q16};
use crate::render::paint::{Gradient, affine_to_cpu, bezpath_to_cpu, rgba_premul_to_image};

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha** unless `premultiplied` says otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixel data.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut data = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut data);
        }
        data
    }

    /// Encode as PNG at exactly `width`×`height`.
    pub fn encode_png(&self) -> BrandframeResult<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.to_straight_rgba8())
            .ok_or_else(|| BrandframeError::resource("frame buffer does not match dimensions"))?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .map_err(|e| BrandframeError::resource(format!("encode png: {e}")))?;
        Ok(buf)
    }
}

/// Decoded image prepared as a `vello_cpu` paint.
#[derive(Clone)]
pub(crate) struct ImagePaint {
    paint: vello_cpu::Image,
    w: u32,
    h: u32,
}

impl ImagePaint {
    pub(crate) fn new(image: &DecodedImage) -> BrandframeResult<Self> {
        Self::from_premul(&image.rgba8_premul, image.width, image.height)
    }

    pub(crate) fn from_premul(bytes: &[u8], w: u32, h: u32) -> BrandframeResult<Self> {
        Ok(Self {
            paint: rgba_premul_to_image(bytes, w, h)?,
            w,
            h,
        })
    }
}

/// Draw calls recorded into one `vello_cpu` render pass.
pub struct Painter<'a> {
    ctx: &'a mut vello_cpu::RenderContext,
}

impl Painter<'_> {
    /// Fill `path` with a solid color.
    pub fn fill(&mut self, path: &BezPath, transform: Affine, color: Rgb8, alpha: f64) {
        let a = alpha_to_u8(alpha);
        if a == 0 || path.elements().is_empty() {
            return;
        }
        self.ctx.set_transform(affine_to_cpu(transform));
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, a,
        ));
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    /// Fill `path` with a gradient defined in the same user space as the path.
    pub fn fill_gradient(
        &mut self,
        path: &BezPath,
        transform: Affine,
        gradient: &Gradient,
        alpha: f64,
    ) -> BrandframeResult<()> {
        use kurbo::Shape;

        if path.elements().is_empty() {
            return Ok(());
        }
        let (img, covered) = gradient.rasterize(path.bounding_box())?;
        let origin = Vec2::new(covered.x0, covered.y0);
        let mut local = path.clone();
        local.apply_affine(Affine::translate(-origin));
        self.with_opacity(alpha, |ctx| {
            ctx.set_transform(affine_to_cpu(transform * Affine::translate(origin)));
            ctx.set_paint(img);
            ctx.fill_path(&bezpath_to_cpu(&local));
        });
        Ok(())
    }

    /// Draw `image` stretched into `dest`.
    pub(crate) fn draw_image(&mut self, image: &ImagePaint, dest: Rect, alpha: f64) {
        if image.w == 0 || image.h == 0 {
            return;
        }
        let sx = dest.width() / f64::from(image.w);
        let sy = dest.height() / f64::from(image.h);
        let transform =
            Affine::translate(Vec2::new(dest.x0, dest.y0)) * Affine::scale_non_uniform(sx, sy);
        let paint = image.paint.clone();
        let (w, h) = (f64::from(image.w), f64::from(image.h));
        self.with_opacity(alpha, |ctx| {
            ctx.set_transform(affine_to_cpu(transform));
            ctx.set_paint(paint);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        });
    }

    /// Fill shaped text with its layout origin at `origin`.
    pub(crate) fn fill_text(&mut self, text: &ShapedText, origin: Point, color: Rgb8, alpha: f64) {
        let a = alpha_to_u8(alpha);
        if a == 0 {
            return;
        }
        self.ctx
            .set_transform(affine_to_cpu(Affine::translate(origin.to_vec2())));
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, a,
        ));
        for line in text.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&text.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    fn with_opacity(&mut self, alpha: f64, f: impl FnOnce(&mut vello_cpu::RenderContext)) {
        let opacity = alpha.clamp(0.0, 1.0) as f32;
        if opacity <= 0.0 {
            return;
        }
        if opacity < 1.0 {
            self.ctx.push_opacity_layer(opacity);
        }
        f(self.ctx);
        if opacity < 1.0 {
            self.ctx.pop_layer();
        }
    }
}

/// Full-frame premultiplied RGBA8 buffer produced by one render pass.
#[derive(Clone, Debug)]
pub(crate) struct Layer {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) data: Vec<u8>,
}

impl Layer {
    /// Pixel bounds `(x0, y0, x1, y1)` of everything non-transparent.
    pub(crate) fn opaque_bounds(&self) -> Option<(u32, u32, u32, u32)> {
        let mut b: Option<(u32, u32, u32, u32)> = None;
        for (i, px) in self.data.chunks_exact(4).enumerate() {
            if px[3] == 0 {
                continue;
            }
            let x = (i % self.width as usize) as u32;
            let y = (i / self.width as usize) as u32;
            b = Some(match b {
                None => (x, y, x + 1, y + 1),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x + 1), y1.max(y + 1)),
            });
        }
        b
    }

    /// Blurred, tinted, offset copy of this layer's alpha, like a canvas drop shadow.
    ///
    /// `blur` follows the canvas convention: Gaussian sigma is `blur / 2`.
    pub(crate) fn drop_shadow(
        &self,
        color: Rgb8,
        alpha: f64,
        blur: f64,
        offset: (i32, i32),
    ) -> BrandframeResult<Layer> {
        let mut out = Layer {
            width: self.width,
            height: self.height,
            data: vec![0u8; self.data.len()],
        };
        let Some((bx0, by0, bx1, by1)) = self.opaque_bounds() else {
            return Ok(out);
        };
        let sigma = (blur / 2.0).max(0.0);
        let radius = (sigma * 3.0).ceil() as u32;
        let pad = radius as i64;

        // Working region: bounds grown by the kernel radius, unclipped.
        let rx0 = i64::from(bx0) - pad;
        let ry0 = i64::from(by0) - pad;
        let rw = (i64::from(bx1 - bx0) + 2 * pad) as u32;
        let rh = (i64::from(by1 - by0) + 2 * pad) as u32;
        let mut region = vec![0u8; (rw as usize) * (rh as usize) * 4];

        let sa = u32::from(alpha_to_u8(alpha));
        let tint = |c: u8, a: u32| -> u8 { ((u32::from(c) * a + 127) / 255) as u8 };
        for y in by0..by1 {
            for x in bx0..bx1 {
                let src = ((y * self.width + x) * 4) as usize;
                let a = (u32::from(self.data[src + 3]) * sa + 127) / 255;
                let dx = (i64::from(x) - rx0) as usize;
                let dy = (i64::from(y) - ry0) as usize;
                let dst = (dy * rw as usize + dx) * 4;
                region[dst..dst + 4].copy_from_slice(&[
                    tint(color.r, a),
                    tint(color.g, a),
                    tint(color.b, a),
                    a as u8,
                ]);
            }
        }

        if radius > 0 {
            let k = gaussian_kernel_q16(radius, sigma as f32)?;
            blur_rgba8_premul_in_place(&mut region, rw, rh, &k)?;
        }

        for ry in 0..rh {
            let ty = ry0 + i64::from(ry) + i64::from(offset.1);
            if ty < 0 || ty >= i64::from(self.height) {
                continue;
            }
            for rx in 0..rw {
                let tx = rx0 + i64::from(rx) + i64::from(offset.0);
                if tx < 0 || tx >= i64::from(self.width) {
                    continue;
                }
                let src = ((ry * rw + rx) * 4) as usize;
                let dst = ((ty as u64 * u64::from(self.width) + tx as u64) * 4) as usize;
                out.data[dst..dst + 4].copy_from_slice(&region[src..src + 4]);
            }
        }
        Ok(out)
    }
}

/// Premultiplied RGBA8 drawing target of a fixed size.
///
/// `vello_cpu` renders each pass into a fresh buffer, so every pass is rendered into a
/// transparent layer and then composited onto the surface.
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
    ctx: Option<vello_cpu::RenderContext>,
}

impl Surface {
    /// Allocate a transparent surface.
    pub fn new(width: u32, height: u32) -> BrandframeResult<Self> {
        let (_, _) = dims_u16(width, height)?;
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| BrandframeError::resource("surface size overflows"))?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len],
            ctx: None,
        })
    }

    /// Wrap existing premultiplied pixels.
    pub fn from_decoded(image: &DecodedImage) -> BrandframeResult<Self> {
        let mut s = Self::new(image.width, image.height)?;
        s.data.copy_from_slice(&image.rgba8_premul);
        Ok(s)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA8 pixels.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Overwrite every pixel with an opaque color.
    pub fn clear(&mut self, color: Rgb8) {
        let fill = color.with_alpha(1.0).to_array();
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&fill);
        }
    }

    /// Draw over the current content.
    pub fn paint<F>(&mut self, draw: F) -> BrandframeResult<()>
    where
        F: FnOnce(&mut Painter<'_>) -> BrandframeResult<()>,
    {
        let layer = self.render_layer(draw)?;
        self.composite(&layer, 1.0)
    }

    /// Draw beneath the current content (destination-over).
    pub fn paint_behind<F>(&mut self, draw: F) -> BrandframeResult<()>
    where
        F: FnOnce(&mut Painter<'_>) -> BrandframeResult<()>,
    {
        let layer = self.render_layer(draw)?;
        premul_under_in_place(&mut self.data, &layer.data)
    }

    /// Render one pass into a transparent full-frame layer without touching the surface.
    pub(crate) fn render_layer<F>(&mut self, draw: F) -> BrandframeResult<Layer>
    where
        F: FnOnce(&mut Painter<'_>) -> BrandframeResult<()>,
    {
        let (w, h) = dims_u16(self.width, self.height)?;
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        draw(&mut Painter { ctx: &mut ctx })?;
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);
        Ok(Layer {
            width: self.width,
            height: self.height,
            data: pixmap.data_as_u8_slice().to_vec(),
        })
    }

    /// `layer` over the surface, attenuated by `opacity`.
    pub(crate) fn composite(&mut self, layer: &Layer, opacity: f32) -> BrandframeResult<()> {
        premul_over_in_place(&mut self.data, &layer.data, opacity)
    }

    /// Snapshot the pixels.
    pub fn to_frame(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.width,
            height: self.height,
            data: self.data.clone(),
            premultiplied: true,
        }
    }

    /// Consume the surface into a frame.
    pub fn into_frame(self) -> FrameRGBA {
        FrameRGBA {
            width: self.width,
            height: self.height,
            data: self.data,
            premultiplied: true,
        }
    }
}

fn dims_u16(width: u32, height: u32) -> BrandframeResult<(u16, u16)> {
    if width == 0 || height == 0 {
        return Err(BrandframeError::resource("surface dimensions must be > 0"));
    }
    let w: u16 = width
        .try_into()
        .map_err(|_| BrandframeError::resource("surface width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| BrandframeError::resource("surface height exceeds u16"))?;
    Ok((w, h))
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
