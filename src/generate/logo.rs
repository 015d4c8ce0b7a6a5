use std::f64::consts::FRAC_PI_4;

use crate::assets::decode::DecodedImage;
use crate::foundation::core::{Affine, Rect, Rgb8, Vec2};
use crate::foundation::error::BrandframeResult;
use crate::render::paint::rounded_rect;
use crate::render::surface::{ImagePaint, Surface};
use crate::scene::settings::{LogoPosition, LogoSettings, VisibilityTreatment};

/// Logo width in pixels at `scale == 1.0`.
pub const LOGO_BASE_SIZE: f64 = 120.0;

const SHADOW_ALPHA: f64 = 0.5;
const SHADOW_BLUR: f64 = 20.0;
const SHADOW_OFFSET_Y: i32 = 4;
const OUTLINE_OFFSET: f64 = 4.0;
const BADGE_PADDING: f64 = 20.0;
const BADGE_RADIUS: f64 = 12.0;
const BADGE_ALPHA: f64 = 0.9;

/// Where the logo lands: width is `120 * scale`, height follows the logo's aspect ratio.
pub fn placement(frame_width: u32, frame_height: u32, logo_aspect: f64, settings: &LogoSettings) -> Rect {
    let w = LOGO_BASE_SIZE * settings.scale;
    let h = w / logo_aspect;
    let fw = f64::from(frame_width);
    let fh = f64::from(frame_height);
    let pad = f64::from(settings.padding);
    let (x, y) = match settings.position {
        LogoPosition::TopLeft => (pad, pad),
        LogoPosition::TopRight => (fw - w - pad, pad),
        LogoPosition::BottomLeft => (pad, fh - h - pad),
        LogoPosition::BottomRight => (fw - w - pad, fh - h - pad),
        LogoPosition::Center => ((fw - w) / 2.0, (fh - h) / 2.0),
    };
    Rect::new(x, y, x + w, y + h)
}

/// Composite `logo` onto `surface` with the configured anchor and visibility treatment.
#[tracing::instrument(level = "debug", skip_all, fields(position = ?settings.position, treatment = ?settings.visibility_treatment))]
pub fn render(surface: &mut Surface, logo: &DecodedImage, settings: &LogoSettings) -> BrandframeResult<()> {
    let dest = placement(surface.width(), surface.height(), logo.aspect(), settings);
    let paint = ImagePaint::new(logo)?;

    match settings.visibility_treatment {
        VisibilityTreatment::Shadow => {
            let layer = surface.render_layer(|p| {
                p.draw_image(&paint, dest, 1.0);
                Ok(())
            })?;
            let shadow =
                layer.drop_shadow(Rgb8::BLACK, SHADOW_ALPHA, SHADOW_BLUR, (0, SHADOW_OFFSET_Y))?;
            surface.composite(&shadow, 1.0)?;
            surface.composite(&layer, 1.0)
        }
        VisibilityTreatment::Outline => {
            surface.paint_behind(|p| {
                p.draw_image(&paint, dest, 1.0);
                Ok(())
            })?;
            let halo = silhouette(logo)?;
            surface.paint(|p| {
                for k in 0..8 {
                    let angle = f64::from(k) * FRAC_PI_4;
                    let offset = Vec2::new(angle.cos(), angle.sin()) * OUTLINE_OFFSET;
                    p.draw_image(&halo, dest + offset, 1.0);
                }
                p.draw_image(&paint, dest, 1.0);
                Ok(())
            })
        }
        VisibilityTreatment::Badge => surface.paint(|p| {
            let plate = dest.inflate(BADGE_PADDING, BADGE_PADDING);
            p.fill(
                &rounded_rect(plate, BADGE_RADIUS),
                Affine::IDENTITY,
                Rgb8::WHITE,
                BADGE_ALPHA,
            );
            p.draw_image(&paint, dest, 1.0);
            Ok(())
        }),
        VisibilityTreatment::Plain => surface.paint(|p| {
            p.draw_image(&paint, dest, 1.0);
            Ok(())
        }),
    }
}

/// White copy of the logo's coverage.
fn silhouette(logo: &DecodedImage) -> BrandframeResult<ImagePaint> {
    let bytes: Vec<u8> = logo
        .rgba8_premul
        .chunks_exact(4)
        .flat_map(|px| [px[3]; 4])
        .collect();
    ImagePaint::from_premul(&bytes, logo.width, logo.height)
}

#[cfg(test)]
#[path = "../../tests/unit/generate/logo.rs"]
mod tests;
