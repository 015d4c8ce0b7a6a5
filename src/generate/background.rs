//! Procedural base layer, one fixed draw program per [`StylePreset`].
//!
//! Every program consumes the RNG in the order its shapes are enumerated. Reordering draws changes
//! the output for a given seed.

use crate::foundation::core::{Affine, Point, Rect, Rgb8};
use crate::foundation::error::BrandframeResult;
use crate::foundation::rng::{RandomSource, SeededRandom};
use crate::render::paint::{ColorStop, Gradient, circle, line, polygon, rect};
use crate::render::surface::{Painter, Surface};
use crate::scene::settings::StylePreset;

/// Substituted when the brand kit has no colors.
pub const DEFAULT_BRAND_COLOR: Rgb8 = Rgb8::new(0x63, 0x66, 0xF1);

/// Brand colors with positional fallback chains.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Palette {
    colors: Vec<Rgb8>,
}

impl Palette {
    pub(crate) fn new(brand_colors: &[Rgb8]) -> Self {
        let colors = if brand_colors.is_empty() {
            vec![DEFAULT_BRAND_COLOR]
        } else {
            brand_colors.to_vec()
        };
        Self { colors }
    }

    /// First present index of `chain`, else `fallback`.
    pub(crate) fn pick(&self, chain: &[usize], fallback: Rgb8) -> Rgb8 {
        chain
            .iter()
            .find_map(|&i| self.colors.get(i).copied())
            .unwrap_or(fallback)
    }

    /// `colors[i % len]`.
    pub(crate) fn cycle(&self, i: usize) -> Rgb8 {
        self.colors[i % self.colors.len()]
    }

    pub(crate) fn base(&self) -> Rgb8 {
        self.colors[0]
    }
}

/// Render the preset selected by `preset` with a fresh generator seeded by `seed`.
#[tracing::instrument(level = "debug", skip(surface, brand_colors), fields(colors = brand_colors.len()))]
pub fn render(
    surface: &mut Surface,
    brand_colors: &[Rgb8],
    preset: StylePreset,
    seed: u32,
) -> BrandframeResult<()> {
    let mut rng = SeededRandom::new(seed);
    render_with(surface, brand_colors, preset, &mut rng)
}

/// Same as [`render`] with a caller-provided random source.
pub fn render_with<R: RandomSource>(
    surface: &mut Surface,
    brand_colors: &[Rgb8],
    preset: StylePreset,
    rng: &mut R,
) -> BrandframeResult<()> {
    let palette = Palette::new(brand_colors);
    let w = f64::from(surface.width());
    let h = f64::from(surface.height());
    surface.clear(palette.base());
    surface.paint(|p| match preset {
        StylePreset::MinimalGeometric => minimal_geometric(p, w, h, &palette),
        StylePreset::BoldPoster => bold_poster(p, w, h, &palette),
        StylePreset::ModernGradient => modern_gradient(p, w, h, &palette, rng),
        StylePreset::AbstractPattern => abstract_pattern(p, w, h, &palette, rng),
        StylePreset::DynamicShapes => dynamic_shapes(p, w, h, &palette, rng),
    })
}

fn frame(w: f64, h: f64) -> crate::foundation::core::BezPath {
    rect(Rect::new(0.0, 0.0, w, h))
}

fn opaque_stop(offset: f64, color: Rgb8) -> ColorStop {
    ColorStop::new(offset, color, 1.0)
}

fn minimal_geometric(p: &mut Painter<'_>, w: f64, h: f64, c: &Palette) -> BrandframeResult<()> {
    let gradient = Gradient::linear(
        Point::ZERO,
        Point::new(w, h),
        vec![
            opaque_stop(0.0, c.base()),
            opaque_stop(1.0, c.pick(&[1, 0], Rgb8::new(0xF3, 0xF4, 0xF6))),
        ],
    );
    p.fill_gradient(&frame(w, h), Affine::IDENTITY, &gradient, 1.0)?;

    let alpha = 0.15;
    p.fill(
        &circle(Point::new(w * 0.8, h * 0.3), 300.0),
        Affine::IDENTITY,
        c.pick(&[2, 1], Rgb8::BLACK),
        alpha,
    );
    p.fill(
        &polygon(&[
            Point::new(w * 0.1, h * 0.8),
            Point::new(w * 0.4, h * 0.8),
            Point::new(w * 0.25, h * 0.5),
        ]),
        Affine::IDENTITY,
        c.pick(&[1, 0], Rgb8::BLACK),
        alpha,
    );
    Ok(())
}

fn bold_poster(p: &mut Painter<'_>, w: f64, h: f64, c: &Palette) -> BrandframeResult<()> {
    p.fill(&frame(w, h), Affine::IDENTITY, c.base(), 1.0);

    let alpha = 0.3;
    p.fill(
        &rect(Rect::new(w * 0.6, 0.0, w, h * 0.5)),
        Affine::IDENTITY,
        c.pick(&[1], Rgb8::new(0xFF, 0, 0)),
        alpha,
    );
    p.fill(
        &rect(Rect::new(0.0, h * 0.5, w * 0.5, h)),
        Affine::IDENTITY,
        c.pick(&[2, 1], Rgb8::new(0, 0xFF, 0)),
        alpha,
    );
    p.fill(
        &circle(Point::new(w * 0.3, h * 0.3), 250.0),
        Affine::IDENTITY,
        c.pick(&[3, 2], Rgb8::new(0, 0, 0xFF)),
        alpha,
    );

    p.fill(
        &line(Point::new(0.0, h * 0.7), Point::new(w, h * 0.7), 8.0),
        Affine::IDENTITY,
        c.pick(&[1], Rgb8::WHITE),
        1.0,
    );
    Ok(())
}

fn modern_gradient<R: RandomSource>(
    p: &mut Painter<'_>,
    w: f64,
    h: f64,
    c: &Palette,
    rng: &mut R,
) -> BrandframeResult<()> {
    let gradient = Gradient::linear(
        Point::ZERO,
        Point::new(w, h),
        vec![
            opaque_stop(0.0, c.base()),
            opaque_stop(0.5, c.pick(&[1, 0], Rgb8::new(0x8B, 0x5C, 0xF6))),
            opaque_stop(1.0, c.pick(&[2, 1], Rgb8::new(0xEC, 0x48, 0x99))),
        ],
    );
    p.fill_gradient(&frame(w, h), Affine::IDENTITY, &gradient, 1.0)?;

    // Transparent beyond the radius, so only the disc needs filling.
    let center = Point::new(w * 0.7, h * 0.3);
    let highlight = Gradient::radial(
        center,
        600.0,
        vec![
            ColorStop::new(0.0, Rgb8::WHITE, 0.2),
            ColorStop::new(1.0, Rgb8::WHITE, 0.0),
        ],
    );
    p.fill_gradient(&circle(center, 600.0), Affine::IDENTITY, &highlight, 1.0)?;

    for _ in 0..5 {
        let x = rng.next() * w;
        let y = rng.next() * h;
        let radius = 100.0 + rng.next() * 200.0;
        p.fill(&circle(Point::new(x, y), radius), Affine::IDENTITY, Rgb8::WHITE, 0.1);
    }
    Ok(())
}

fn abstract_pattern<R: RandomSource>(
    p: &mut Painter<'_>,
    w: f64,
    h: f64,
    c: &Palette,
    rng: &mut R,
) -> BrandframeResult<()> {
    let gradient = Gradient::linear(
        Point::ZERO,
        Point::new(0.0, h),
        vec![
            opaque_stop(0.0, c.base()),
            opaque_stop(1.0, c.pick(&[1, 0], Rgb8::new(0x11, 0x18, 0x27))),
        ],
    );
    p.fill_gradient(&frame(w, h), Affine::IDENTITY, &gradient, 1.0)?;

    for i in 0..8 {
        let color = c.cycle(i);
        let start = Point::new(rng.next() * w, rng.next() * h);
        let mut blob = crate::foundation::core::BezPath::new();
        blob.move_to(start);
        for _ in 0..6 {
            let cp = Point::new(
                start.x + (rng.next() - 0.5) * 400.0,
                start.y + (rng.next() - 0.5) * 400.0,
            );
            let end = Point::new(
                start.x + (rng.next() - 0.5) * 300.0,
                start.y + (rng.next() - 0.5) * 300.0,
            );
            blob.quad_to(cp, end);
        }
        blob.close_path();
        p.fill(&blob, Affine::IDENTITY, color, 0.2);
    }

    for _ in 0..1000 {
        let color = if rng.next() > 0.5 {
            Rgb8::WHITE
        } else {
            Rgb8::BLACK
        };
        let x = rng.next() * w;
        let y = rng.next() * h;
        p.fill(
            &rect(Rect::new(x, y, x + 2.0, y + 2.0)),
            Affine::IDENTITY,
            color,
            0.05,
        );
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ShapeKind {
    Circle,
    Square,
    Triangle,
}

impl ShapeKind {
    fn from_draw(v: f64) -> Self {
        match (v * 3.0).floor() as i64 {
            0 => Self::Circle,
            1 => Self::Square,
            _ => Self::Triangle,
        }
    }
}

fn dynamic_shapes<R: RandomSource>(
    p: &mut Painter<'_>,
    w: f64,
    h: f64,
    c: &Palette,
    rng: &mut R,
) -> BrandframeResult<()> {
    for i in 0..12 {
        let color = c.cycle(i);
        let alpha = 0.15 + rng.next() * 0.15;
        let kind = ShapeKind::from_draw(rng.next());
        let x = rng.next() * w;
        let y = rng.next() * h;
        let size = 100.0 + rng.next() * 300.0;
        let half = size / 2.0;
        let path = match kind {
            ShapeKind::Circle => circle(Point::new(x, y), half),
            ShapeKind::Square => rect(Rect::new(x - half, y - half, x + half, y + half)),
            ShapeKind::Triangle => polygon(&[
                Point::new(x, y - half),
                Point::new(x + half, y + half),
                Point::new(x - half, y + half),
            ]),
        };
        p.fill(&path, Affine::IDENTITY, color, alpha);
    }

    let stroke = c.pick(&[1], Rgb8::WHITE);
    for _ in 0..6 {
        let from = Point::new(rng.next() * w, rng.next() * h);
        let to = Point::new(rng.next() * w, rng.next() * h);
        p.fill(&line(from, to, 4.0), Affine::IDENTITY, stroke, 0.3);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/generate/background.rs"]
mod tests;
