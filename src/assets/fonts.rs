use std::path::PathBuf;
use std::sync::Arc;

use crate::foundation::error::{BrandframeError, BrandframeResult};

/// Where text rendering gets its font faces from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FontSource {
    /// Sans-serif regular/bold faces from the system font database.
    #[default]
    System,
    /// A single font file used for every weight.
    File(PathBuf),
    /// Skip text entirely.
    Disabled,
}

/// Raw font bytes plus the face index inside a collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontFace {
    pub bytes: Arc<Vec<u8>>,
    pub index: u32,
}

/// Regular and bold faces used for copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontSet {
    pub regular: FontFace,
    pub bold: FontFace,
}

impl FontSet {
    /// Use one face for both weights.
    pub fn single(face: FontFace) -> Self {
        Self {
            regular: face.clone(),
            bold: face,
        }
    }

    /// Resolve a [`FontSource`]. `Ok(None)` means no usable font exists and text is skipped.
    pub fn resolve(source: &FontSource) -> BrandframeResult<Option<Self>> {
        match source {
            FontSource::Disabled => Ok(None),
            FontSource::File(path) => {
                let bytes = std::fs::read(path).map_err(|e| {
                    BrandframeError::configuration(format!(
                        "read font file '{}': {e}",
                        path.display()
                    ))
                })?;
                Ok(Some(Self::single(FontFace {
                    bytes: Arc::new(bytes),
                    index: 0,
                })))
            }
            FontSource::System => Ok(system_font_set()),
        }
    }
}

fn system_font_set() -> Option<FontSet> {
    use usvg::fontdb;

    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let families = [
        fontdb::Family::SansSerif,
        fontdb::Family::Name("DejaVu Sans"),
        fontdb::Family::Name("Liberation Sans"),
        fontdb::Family::Name("Helvetica"),
    ];
    let face_for = |weight: fontdb::Weight| -> Option<FontFace> {
        let query = fontdb::Query {
            families: &families,
            weight,
            ..fontdb::Query::default()
        };
        let id = db.query(&query).or_else(|| db.faces().next().map(|f| f.id))?;
        db.with_face_data(id, |data, index| FontFace {
            bytes: Arc::new(data.to_vec()),
            index,
        })
    };

    let regular = face_for(fontdb::Weight::NORMAL)?;
    let bold = face_for(fontdb::Weight::BOLD).unwrap_or_else(|| regular.clone());
    Some(FontSet { regular, bold })
}

/// Text weight used by the copy layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextWeight {
    Regular,
    Bold,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// A shaped single-line text run ready to fill.
pub(crate) struct ShapedText {
    pub(crate) layout: parley::Layout<TextBrushRgba8>,
    pub(crate) font: vello_cpu::peniko::FontData,
}

impl ShapedText {
    /// Advance width of the laid out text.
    pub(crate) fn width(&self) -> f32 {
        self.layout.width()
    }

    /// `(baseline, ascent, descent)` of the first line, in layout coordinates.
    pub(crate) fn first_line_metrics(&self) -> (f32, f32, f32) {
        self.layout
            .lines()
            .next()
            .map(|line| {
                let m = line.metrics();
                (m.baseline, m.ascent, m.descent)
            })
            .unwrap_or((0.0, 0.0, 0.0))
    }
}

struct RegisteredFace {
    family: String,
    font: vello_cpu::peniko::FontData,
}

/// Stateful helper for building Parley text layouts from a [`FontSet`].
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    regular: RegisteredFace,
    bold: RegisteredFace,
}

impl TextLayoutEngine {
    /// Register both faces with fresh Parley contexts.
    pub(crate) fn new(fonts: &FontSet) -> BrandframeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let regular = register(&mut font_ctx, &fonts.regular)?;
        let bold = register(&mut font_ctx, &fonts.bold)?;
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            regular,
            bold,
        })
    }

    /// Shape `text` on a single unbroken line.
    pub(crate) fn layout(
        &mut self,
        text: &str,
        size_px: f32,
        weight: TextWeight,
        brush: TextBrushRgba8,
    ) -> BrandframeResult<ShapedText> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(BrandframeError::configuration(
                "text size_px must be finite and > 0",
            ));
        }
        let face = match weight {
            TextWeight::Regular => &self.regular,
            TextWeight::Bold => &self.bold,
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(face.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));
        if weight == TextWeight::Bold {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(ShapedText {
            layout,
            font: face.font.clone(),
        })
    }

    /// Advance width of `text`.
    pub(crate) fn measure(
        &mut self,
        text: &str,
        size_px: f32,
        weight: TextWeight,
    ) -> BrandframeResult<f32> {
        Ok(self
            .layout(text, size_px, weight, TextBrushRgba8::default())?
            .width())
    }
}

fn register(font_ctx: &mut parley::FontContext, face: &FontFace) -> BrandframeResult<RegisteredFace> {
    let families = font_ctx.collection.register_fonts(
        parley::fontique::Blob::from(face.bytes.as_ref().clone()),
        None,
    );
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| BrandframeError::configuration("no font families registered from font bytes"))?;
    let family = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| BrandframeError::configuration("registered font family has no name"))?
        .to_string();
    let font = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(face.bytes.as_ref().clone()),
        face.index,
    );
    Ok(RegisteredFace { family, font })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
