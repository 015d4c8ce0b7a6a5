//! Light-accent overlays ("flashes"): burst, glare, lens flare and streak.

use std::f64::consts::TAU;

use crate::foundation::core::{Affine, Point, Rgb8, Vec2};
use crate::foundation::error::BrandframeResult;
use crate::foundation::rng::{RandomSource, SeededRandom};
use crate::render::paint::{ColorStop, Gradient, circle, ellipse, polygon};
use crate::render::surface::{Painter, Surface};
use crate::scene::settings::FlashOverlaySettings;

/// Added to the creative seed so flash placement is independent of background placement.
pub const FLASH_SEED_SALT: u32 = 999;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlashType {
    Burst,
    Glare,
    Flare,
    Streak,
}

impl FlashType {
    const ALL: [Self; 4] = [Self::Burst, Self::Glare, Self::Flare, Self::Streak];

    fn from_index(i: i32) -> Self {
        Self::ALL[i.clamp(0, 3) as usize]
    }
}

/// One generated accent, positioned in frame pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlashInstance {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    /// Radians.
    pub rotation: f64,
    pub kind: FlashType,
    pub opacity: f64,
}

impl FlashInstance {
    fn transform(&self) -> Affine {
        Affine::translate(Vec2::new(self.x, self.y)) * Affine::rotate(self.rotation)
    }
}

/// Generate exactly `settings.amount` instances, drawing from `rng` in a fixed per-instance order:
/// type, x, y, size, rotation, opacity.
pub fn generate_instances<R: RandomSource>(
    width: u32,
    height: u32,
    settings: &FlashOverlaySettings,
    rng: &mut R,
) -> Vec<FlashInstance> {
    let w = f64::from(width);
    let h = f64::from(height);
    let offset_x = settings.position_x * w;
    let offset_y = settings.position_y * h;

    (0..settings.amount)
        .map(|_| {
            let kind = FlashType::from_index(rng.next_int(0, 3));
            FlashInstance {
                x: rng.next_float(0.1, 0.9) * w + offset_x,
                y: rng.next_float(0.1, 0.9) * h + offset_y,
                size: rng.next_float(80.0, 300.0)
                    * (settings.intensity * 0.5 + 0.5)
                    * settings.size,
                rotation: rng.next_float(0.0, TAU) * settings.animation_speed,
                kind,
                opacity: rng.next_float(0.3, 0.8) * settings.intensity,
            }
        })
        .collect()
}

/// Draw the configured flashes over `surface`. No-op when disabled or when `amount` is zero.
#[tracing::instrument(level = "debug", skip(surface, settings), fields(amount = settings.amount))]
pub fn render(surface: &mut Surface, settings: &FlashOverlaySettings, seed: u32) -> BrandframeResult<()> {
    if !settings.enabled || settings.amount == 0 {
        return Ok(());
    }
    let mut rng = SeededRandom::new(seed.wrapping_add(FLASH_SEED_SALT));
    let instances = generate_instances(surface.width(), surface.height(), settings, &mut rng);
    let tint = settings.tint().unwrap_or(Rgb8::WHITE);
    render_instances(surface, &instances, tint)
}

/// Draw pre-generated instances with the given tint.
pub fn render_instances(
    surface: &mut Surface,
    instances: &[FlashInstance],
    tint: Rgb8,
) -> BrandframeResult<()> {
    if instances.is_empty() {
        return Ok(());
    }
    surface.paint(|p| {
        for flash in instances {
            let xf = flash.transform();
            match flash.kind {
                FlashType::Burst => burst(p, xf, flash, tint)?,
                FlashType::Glare => glare(p, xf, flash, tint)?,
                FlashType::Flare => flare(p, xf, flash, tint)?,
                FlashType::Streak => streak(p, xf, flash, tint)?,
            }
        }
        Ok(())
    })
}

/// Stop whose color is averaged with `tint` and whose alpha is scaled by itself.
fn tinted(offset: f64, base: Rgb8, alpha: f64, tint: Rgb8) -> ColorStop {
    ColorStop::new(offset, base.average(tint), alpha * alpha)
}

fn burst(p: &mut Painter<'_>, xf: Affine, f: &FlashInstance, tint: Rgb8) -> BrandframeResult<()> {
    const RAYS: usize = 12;
    let outer = f.size;
    let inner = f.size * 0.1;
    let mut points = Vec::with_capacity(RAYS * 2);
    for i in 0..RAYS {
        let angle = i as f64 / RAYS as f64 * TAU;
        let next = (i + 1) as f64 / RAYS as f64 * TAU;
        let mid = (angle + next) / 2.0;
        points.push(Point::new(angle.cos() * outer, angle.sin() * outer));
        points.push(Point::new(mid.cos() * inner, mid.sin() * inner));
    }
    let gradient = Gradient::radial(
        Point::ZERO,
        outer,
        vec![
            tinted(0.0, Rgb8::new(255, 255, 255), 0.9, tint),
            tinted(0.3, Rgb8::new(255, 255, 200), 0.6, tint),
            tinted(0.7, Rgb8::new(255, 255, 150), 0.2, tint),
            tinted(1.0, Rgb8::new(255, 255, 100), 0.0, tint),
        ],
    );
    p.fill_gradient(&polygon(&points), xf, &gradient, f.opacity)
}

fn glare(p: &mut Painter<'_>, xf: Affine, f: &FlashInstance, tint: Rgb8) -> BrandframeResult<()> {
    let halo = Gradient::radial(
        Point::ZERO,
        f.size,
        vec![
            tinted(0.0, Rgb8::new(255, 255, 255), 1.0, tint),
            tinted(0.2, Rgb8::new(255, 255, 240), 0.8, tint),
            tinted(0.5, Rgb8::new(255, 255, 200), 0.4, tint),
            tinted(1.0, Rgb8::new(255, 255, 150), 0.0, tint),
        ],
    );
    p.fill_gradient(&circle(Point::ZERO, f.size), xf, &halo, f.opacity)?;

    let core_radius = f.size * 0.3;
    let core = Gradient::radial(
        Point::ZERO,
        core_radius,
        vec![
            tinted(0.0, Rgb8::WHITE, 1.0, tint),
            tinted(1.0, Rgb8::WHITE, 0.0, tint),
        ],
    );
    p.fill_gradient(&circle(Point::ZERO, core_radius), xf, &core, f.opacity)
}

struct FlareCircle {
    offset: f64,
    size: f64,
    opacity: f64,
}

const FLARE_CHAIN: [FlareCircle; 4] = [
    FlareCircle {
        offset: 0.0,
        size: 1.0,
        opacity: 1.0,
    },
    FlareCircle {
        offset: 0.3,
        size: 0.6,
        opacity: 0.7,
    },
    FlareCircle {
        offset: 0.6,
        size: 0.4,
        opacity: 0.5,
    },
    FlareCircle {
        offset: 0.9,
        size: 0.3,
        opacity: 0.4,
    },
];

fn flare(p: &mut Painter<'_>, xf: Affine, f: &FlashInstance, tint: Rgb8) -> BrandframeResult<()> {
    for c in &FLARE_CHAIN {
        let center = Point::new(c.offset * f.size * 0.5, 0.0);
        let radius = f.size * c.size;
        let gradient = Gradient::radial(
            center,
            radius,
            vec![
                tinted(0.0, Rgb8::WHITE, c.opacity, tint),
                tinted(0.4, Rgb8::new(255, 240, 200), c.opacity * 0.6, tint),
                tinted(1.0, Rgb8::new(255, 220, 150), 0.0, tint),
            ],
        );
        p.fill_gradient(&circle(center, radius), xf, &gradient, f.opacity)?;
    }
    Ok(())
}

fn streak(p: &mut Painter<'_>, xf: Affine, f: &FlashInstance, tint: Rgb8) -> BrandframeResult<()> {
    let half_len = f.size;
    let start = Point::new(-half_len, 0.0);
    let end = Point::new(half_len, 0.0);
    let warm = Rgb8::new(255, 255, 240);

    let body = Gradient::linear(
        start,
        end,
        vec![
            tinted(0.0, Rgb8::WHITE, 0.0, tint),
            tinted(0.3, warm, 0.8, tint),
            tinted(0.5, Rgb8::WHITE, 1.0, tint),
            tinted(0.7, warm, 0.8, tint),
            tinted(1.0, Rgb8::WHITE, 0.0, tint),
        ],
    );
    p.fill_gradient(&ellipse(Point::ZERO, half_len, f.size * 0.15), xf, &body, f.opacity)?;

    let line = Gradient::linear(
        start,
        end,
        vec![
            tinted(0.0, Rgb8::WHITE, 0.0, tint),
            tinted(0.5, Rgb8::WHITE, 1.0, tint),
            tinted(1.0, Rgb8::WHITE, 0.0, tint),
        ],
    );
    p.fill_gradient(&ellipse(Point::ZERO, half_len, f.size * 0.075), xf, &line, f.opacity)
}

#[cfg(test)]
#[path = "../../tests/unit/generate/flash.rs"]
mod tests;
