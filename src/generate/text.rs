use crate::assets::fonts::{ShapedText, TextBrushRgba8, TextLayoutEngine, TextWeight};
use crate::foundation::core::{Affine, Point, Rect, Rgb8};
use crate::foundation::error::BrandframeResult;
use crate::render::paint::rounded_rect;
use crate::render::surface::Surface;
use crate::scene::copy::CopyVariant;

struct BlockStyle {
    size_px: f32,
    weight: TextWeight,
    /// Baseline of the first line as a fraction of frame height.
    top: f64,
    /// Frame width minus this is the wrap width.
    inset: f64,
    line_height: f64,
}

const HEADLINE: BlockStyle = BlockStyle {
    size_px: 72.0,
    weight: TextWeight::Bold,
    top: 0.45,
    inset: 120.0,
    line_height: 90.0,
};

const BODY: BlockStyle = BlockStyle {
    size_px: 36.0,
    weight: TextWeight::Regular,
    top: 0.6,
    inset: 160.0,
    line_height: 50.0,
};

const CTA_WIDTH: f64 = 400.0;
const CTA_HEIGHT: f64 = 80.0;
const CTA_RADIUS: f64 = 40.0;
/// Pill top edge sits this far above the bottom of the frame.
const CTA_BOTTOM_OFFSET: f64 = 180.0;
const CTA_LABEL_SIZE: f32 = 32.0;

/// Black or white, whichever reads better on `background`.
///
/// Luminance above 0.5 gives black; exactly 0.5 and below gives white. The comparison is done
/// in integers so the midpoint is exact.
pub fn contrast_color(background: Rgb8) -> Rgb8 {
    if background.luminance_scaled() > LUMINANCE_MIDPOINT {
        Rgb8::BLACK
    } else {
        Rgb8::WHITE
    }
}

/// Half of the largest [`Rgb8::luminance_scaled`].
const LUMINANCE_MIDPOINT: u32 = 127_500;

/// Greedy word wrap.
///
/// Words are added to the current line while `measure(line + " ")` stays within `max_width`;
/// the trailing space counts toward the width but is not kept in the returned line. The first
/// word always starts a line even if it is wider than `max_width`, and the last partial line is
/// always emitted.
pub fn wrap_words<F>(text: &str, max_width: f64, mut measure: F) -> BrandframeResult<Vec<String>>
where
    F: FnMut(&str) -> BrandframeResult<f64>,
{
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{line} {word}");
        if measure(&format!("{candidate} "))? > max_width {
            lines.push(std::mem::replace(&mut line, word.to_owned()));
        } else {
            line = candidate;
        }
    }
    lines.push(line);
    Ok(lines)
}

/// Text and accent colors derived from the raw brand colors.
pub fn copy_colors(brand_colors: &[Rgb8]) -> (Rgb8, Rgb8) {
    let text = contrast_color(brand_colors.first().copied().unwrap_or(Rgb8::WHITE));
    let accent = brand_colors
        .get(2)
        .or_else(|| brand_colors.get(1))
        .copied()
        .unwrap_or(text);
    (text, accent)
}

/// The pill behind the call to action.
pub fn cta_rect(frame_width: u32, frame_height: u32) -> Rect {
    let x = (f64::from(frame_width) - CTA_WIDTH) / 2.0;
    let y = f64::from(frame_height) - CTA_BOTTOM_OFFSET;
    Rect::new(x, y, x + CTA_WIDTH, y + CTA_HEIGHT)
}

/// Lay out headline, body and call to action.
///
/// Without a text engine only the call-to-action pill is drawn. Returns whether glyphs were drawn.
#[tracing::instrument(level = "debug", skip_all)]
pub fn render(
    surface: &mut Surface,
    copy: &CopyVariant,
    brand_colors: &[Rgb8],
    engine: Option<&mut TextLayoutEngine>,
) -> BrandframeResult<bool> {
    let w = f64::from(surface.width());
    let h = f64::from(surface.height());
    let (text_color, accent) = copy_colors(brand_colors);
    let pill = cta_rect(surface.width(), surface.height());

    let mut runs: Vec<(ShapedText, Point, Rgb8)> = Vec::new();
    let drew_glyphs = engine.is_some();
    if let Some(engine) = engine {
        for (block, text) in [(&HEADLINE, &copy.headline), (&BODY, &copy.body)] {
            let lines = wrap_words(text, w - block.inset, |s| {
                Ok(f64::from(engine.measure(s, block.size_px, block.weight)?))
            })?;
            let mut baseline = h * block.top;
            for line in lines {
                if !line.is_empty() {
                    let shaped = engine.layout(&line, block.size_px, block.weight, brush(text_color))?;
                    let origin = centered_on_baseline(&shaped, w / 2.0, baseline);
                    runs.push((shaped, origin, text_color));
                }
                baseline += block.line_height;
            }
        }

        if !copy.cta.trim().is_empty() {
            let label_color = contrast_color(accent);
            let shaped = engine.layout(copy.cta.trim(), CTA_LABEL_SIZE, TextWeight::Bold, brush(label_color))?;
            let (_, ascent, descent) = shaped.first_line_metrics();
            let middle = pill.center().y;
            let baseline = middle + f64::from(ascent - descent) / 2.0;
            let origin = centered_on_baseline(&shaped, w / 2.0, baseline);
            runs.push((shaped, origin, label_color));
        }
    }

    surface.paint(|p| {
        p.fill(&rounded_rect(pill, CTA_RADIUS), Affine::IDENTITY, accent, 1.0);
        for (shaped, origin, color) in &runs {
            p.fill_text(shaped, *origin, *color, 1.0);
        }
        Ok(())
    })?;
    Ok(drew_glyphs)
}

/// Layout origin that puts the first baseline at `baseline`, horizontally centered on `center_x`.
fn centered_on_baseline(shaped: &ShapedText, center_x: f64, baseline: f64) -> Point {
    let (first_baseline, _, _) = shaped.first_line_metrics();
    Point::new(
        center_x - f64::from(shaped.width()) / 2.0,
        baseline - f64::from(first_baseline),
    )
}

fn brush(c: Rgb8) -> TextBrushRgba8 {
    TextBrushRgba8 {
        r: c.r,
        g: c.g,
        b: c.b,
        a: 255,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/text.rs"]
mod tests;
