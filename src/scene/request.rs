use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{CanvasFormat, Rgb8};
use crate::foundation::error::{BrandframeError, BrandframeResult};
use crate::scene::copy::CopyVariant;
use crate::scene::settings::CreativeSettings;

/// Named brand color. Immutable value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    #[serde(default)]
    pub name: String,
    /// `#RRGGBB`.
    pub hex: String,
}

impl Color {
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
        }
    }

    pub fn rgb(&self) -> BrandframeResult<Rgb8> {
        Rgb8::from_hex(&self.hex)
    }
}

/// Everything a single generation call needs, with assets already loaded as bytes.
#[derive(Clone, Debug, Default)]
pub struct CreativeRequest {
    pub width: u32,
    pub height: u32,
    pub brand_colors: Vec<Color>,
    pub logo_image_bytes: Option<Vec<u8>>,
    pub reference_image_bytes: Option<Vec<u8>>,
    pub copy: Option<CopyVariant>,
    pub settings: CreativeSettings,
}

impl CreativeRequest {
    /// Empty request for one of the supported frames.
    pub fn new(format: CanvasFormat) -> Self {
        let (width, height) = format.dimensions();
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Reject anything that would prevent a correctly-sized render.
    ///
    /// Dimensions, settings ranges and every brand color are checked; nothing is rendered.
    pub fn validate(&self) -> BrandframeResult<CanvasFormat> {
        let format = CanvasFormat::from_dimensions(self.width, self.height)?;
        self.settings.validate()?;
        for (i, c) in self.brand_colors.iter().enumerate() {
            c.rgb().map_err(|e| {
                BrandframeError::configuration(format!("$.brandColors[{i}].hex: {e}"))
            })?;
        }
        Ok(format)
    }
}

/// File-facing request: JSON with asset references relative to the document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeRequestDef {
    #[serde(default)]
    pub format: CanvasFormat,
    #[serde(default)]
    pub brand_colors: Vec<Color>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub reference_image: Option<String>,
    #[serde(default)]
    pub copy: Option<CopyVariant>,
    #[serde(default)]
    pub settings: CreativeSettings,
}

impl CreativeRequestDef {
    /// Parse a request from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> BrandframeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| BrandframeError::serde(format!("parse creative request JSON: {e}")))
    }

    /// Parse a request from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> BrandframeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BrandframeError::configuration(format!(
                "open creative request JSON '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Read referenced assets below `assets_root` and produce a byte-carrying request.
    ///
    /// A referenced file that cannot be read is an error here; bytes that later fail to decode
    /// only skip their stage during generation.
    pub fn load(&self, assets_root: impl AsRef<Path>) -> BrandframeResult<CreativeRequest> {
        let root = assets_root.as_ref();
        let read = |rel: &Option<String>| -> BrandframeResult<Option<Vec<u8>>> {
            let Some(rel) = rel else {
                return Ok(None);
            };
            let norm = normalize_rel_path(rel)?;
            let path = root.join(&norm);
            std::fs::read(&path).map(Some).map_err(|e| {
                BrandframeError::configuration(format!("read asset '{}': {e}", path.display()))
            })
        };
        let (width, height) = self.format.dimensions();
        Ok(CreativeRequest {
            width,
            height,
            brand_colors: self.brand_colors.clone(),
            logo_image_bytes: read(&self.logo)?,
            reference_image_bytes: read(&self.reference_image)?,
            copy: self.copy.clone(),
            settings: self.settings.clone(),
        })
    }
}

/// Normalize and validate document-relative asset paths.
///
/// The result uses `/` separators with `.` segments removed. Absolute paths and parent traversals
/// (`..`) are rejected.
pub(crate) fn normalize_rel_path(source: &str) -> BrandframeResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(BrandframeError::configuration("asset paths must be relative"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(BrandframeError::configuration(
                "asset paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(BrandframeError::configuration(
            "asset path must contain a file name",
        ));
    }
    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/request.rs"]
mod tests;
