use std::sync::Arc;

use kurbo::Shape;

use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgb8, Vec2, alpha_to_u8};
use crate::foundation::error::{BrandframeError, BrandframeResult};

const PATH_TOLERANCE: f64 = 0.1;

/// One gradient stop: `offset` in `[0, 1]`, straight color and alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgb8,
    pub alpha: f64,
}

impl ColorStop {
    pub fn new(offset: f64, color: Rgb8, alpha: f64) -> Self {
        Self {
            offset,
            color,
            alpha,
        }
    }

    fn premul(&self) -> [f64; 4] {
        let a = f64::from(alpha_to_u8(self.alpha)) / 255.0;
        [
            f64::from(self.color.r) * a,
            f64::from(self.color.g) * a,
            f64::from(self.color.b) * a,
            a * 255.0,
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GradientKind {
    /// Color varies along `start -> end`; padded beyond the ends.
    Linear { start: Point, end: Point },
    /// Color varies with distance from `center`, reaching the last stop at `radius`.
    Radial { center: Point, radius: f64 },
}

/// Linear or radial gradient in user space, interpolated in premultiplied RGBA.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    pub kind: GradientKind,
    pub stops: Vec<ColorStop>,
}

impl Gradient {
    pub fn linear(start: Point, end: Point, stops: Vec<ColorStop>) -> Self {
        Self {
            kind: GradientKind::Linear { start, end },
            stops,
        }
    }

    pub fn radial(center: Point, radius: f64, stops: Vec<ColorStop>) -> Self {
        Self {
            kind: GradientKind::Radial { center, radius },
            stops,
        }
    }

    fn param(&self, p: Point) -> f64 {
        let t = match self.kind {
            GradientKind::Linear { start, end } => {
                let d = end - start;
                let len2 = d.hypot2();
                if len2 <= f64::EPSILON {
                    0.0
                } else {
                    (p - start).dot(d) / len2
                }
            }
            GradientKind::Radial { center, radius } => {
                if radius <= f64::EPSILON {
                    1.0
                } else {
                    (p - center).hypot() / radius
                }
            }
        };
        t.clamp(0.0, 1.0)
    }

    /// Premultiplied RGBA8 color at `p`.
    pub fn sample(&self, p: Point) -> [u8; 4] {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return [0; 4];
        };
        let t = self.param(p);
        let c = if t <= first.offset {
            first.premul()
        } else if t >= last.offset {
            last.premul()
        } else {
            let mut out = last.premul();
            for pair in self.stops.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                if t >= a.offset && t <= b.offset {
                    let span = b.offset - a.offset;
                    let f = if span <= f64::EPSILON {
                        1.0
                    } else {
                        (t - a.offset) / span
                    };
                    let (ca, cb) = (a.premul(), b.premul());
                    out = std::array::from_fn(|i| ca[i] + (cb[i] - ca[i]) * f);
                    break;
                }
            }
            out
        };
        let a = c[3].round().clamp(0.0, 255.0) as u8;
        let ch = |v: f64| -> u8 { (v.round().clamp(0.0, 255.0) as u8).min(a) };
        [ch(c[0]), ch(c[1]), ch(c[2]), a]
    }

    /// Rasterize the gradient over the pixel-aligned hull of `bounds`.
    ///
    /// Returns the image paint and the user-space rectangle it covers.
    pub(crate) fn rasterize(&self, bounds: Rect) -> BrandframeResult<(vello_cpu::Image, Rect)> {
        let x0 = bounds.x0.floor();
        let y0 = bounds.y0.floor();
        let w = ((bounds.x1.ceil() - x0).max(1.0)) as u32;
        let h = ((bounds.y1.ceil() - y0).max(1.0)) as u32;
        let mut bytes = vec![0u8; (w as usize).saturating_mul(h as usize).saturating_mul(4)];
        for (i, px) in bytes.chunks_exact_mut(4).enumerate() {
            let x = (i % w as usize) as f64;
            let y = (i / w as usize) as f64;
            px.copy_from_slice(&self.sample(Point::new(x0 + x + 0.5, y0 + y + 0.5)));
        }
        let img = rgba_premul_to_image(&bytes, w, h)?;
        Ok((img, Rect::new(x0, y0, x0 + f64::from(w), y0 + f64::from(h))))
    }
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

pub(crate) fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> BrandframeResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| BrandframeError::resource("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| BrandframeError::resource("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(BrandframeError::resource("pixmap byte len mismatch"));
    }
    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in bytes.chunks_exact(4) {
        may_have_opacities |= px[3] != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        });
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

pub(crate) fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> BrandframeResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

pub fn circle(center: Point, radius: f64) -> BezPath {
    kurbo::Circle::new(center, radius).to_path(PATH_TOLERANCE)
}

pub fn ellipse(center: Point, rx: f64, ry: f64) -> BezPath {
    kurbo::Ellipse::new(center, Vec2::new(rx, ry), 0.0).to_path(PATH_TOLERANCE)
}

pub fn rect(r: Rect) -> BezPath {
    r.to_path(PATH_TOLERANCE)
}

pub fn rounded_rect(r: Rect, radius: f64) -> BezPath {
    kurbo::RoundedRect::from_rect(r, radius).to_path(PATH_TOLERANCE)
}

/// Closed polygon through `points`.
pub fn polygon(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut it = points.iter();
    if let Some(&first) = it.next() {
        path.move_to(first);
        for &p in it {
            path.line_to(p);
        }
        path.close_path();
    }
    path
}

/// Straight stroke with butt caps, as a filled quad.
pub fn line(p0: Point, p1: Point, width: f64) -> BezPath {
    let d = p1 - p0;
    let len = d.hypot();
    if len <= f64::EPSILON {
        return BezPath::new();
    }
    let n = Vec2::new(-d.y, d.x) * (width * 0.5 / len);
    polygon(&[p0 + n, p1 + n, p1 - n, p0 - n])
}

#[cfg(test)]
#[path = "../../tests/unit/render/paint.rs"]
mod tests;
