use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{BrandframeError, BrandframeResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Opaque sRGB color with 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Build a color from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (case-insensitive, leading `#` optional).
    pub fn from_hex(s: &str) -> BrandframeResult<Self> {
        let raw = s.trim();
        let hex = raw.strip_prefix('#').unwrap_or(raw);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(BrandframeError::configuration(format!(
                "hex color must be #RRGGBB, got \"{raw}\""
            )));
        }
        let byte = |pair: &str| -> BrandframeResult<u8> {
            u8::from_str_radix(pair, 16).map_err(|_| {
                BrandframeError::configuration(format!("invalid hex byte \"{pair}\" in \"{raw}\""))
            })
        };
        Ok(Self::new(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?))
    }

    /// Format as uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// `299R + 587G + 114B`: luminance scaled by `255_000`, exact in integers.
    pub fn luminance_scaled(self) -> u32 {
        299 * u32::from(self.r) + 587 * u32::from(self.g) + 114 * u32::from(self.b)
    }

    /// Relative luminance `0.299R + 0.587G + 0.114B`, normalized to `[0, 1]`.
    pub fn luminance(self) -> f64 {
        (0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b))
            / 255.0
    }

    /// Equal-weight per-channel average, rounded half up.
    pub fn average(self, other: Self) -> Self {
        let avg = |a: u8, b: u8| -> u8 { ((u16::from(a) + u16::from(b) + 1) / 2) as u8 };
        Self::new(avg(self.r, other.r), avg(self.g, other.g), avg(self.b, other.b))
    }

    /// Attach a straight alpha in `[0, 1]`.
    pub fn with_alpha(self, alpha: f64) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, alpha_to_u8(alpha))
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Channel array in `[r, g, b, a]` order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Map a `[0, 1]` opacity onto an 8-bit alpha.
pub fn alpha_to_u8(alpha: f64) -> u8 {
    (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// The two supported output frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CanvasFormat {
    /// 1080×1080 feed post.
    #[default]
    Square,
    /// 1080×1350 portrait post.
    Portrait,
}

impl CanvasFormat {
    /// `(width, height)` in pixels.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Square => (1080, 1080),
            Self::Portrait => (1080, 1350),
        }
    }

    /// Resolve a width/height pair, rejecting anything but the two presets.
    pub fn from_dimensions(width: u32, height: u32) -> BrandframeResult<Self> {
        match (width, height) {
            (1080, 1080) => Ok(Self::Square),
            (1080, 1350) => Ok(Self::Portrait),
            _ => Err(BrandframeError::configuration(format!(
                "unsupported canvas {width}x{height} (expected 1080x1080 or 1080x1350)"
            ))),
        }
    }
}

impl fmt::Display for CanvasFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = self.dimensions();
        write!(f, "{w}x{h}")
    }
}

impl FromStr for CanvasFormat {
    type Err = BrandframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| BrandframeError::configuration(format!("invalid format \"{s}\"")))?;
        let parse = |v: &str| -> BrandframeResult<u32> {
            v.trim()
                .parse::<u32>()
                .map_err(|e| BrandframeError::configuration(format!("invalid format \"{s}\": {e}")))
        };
        Self::from_dimensions(parse(w)?, parse(h)?)
    }
}

impl serde::Serialize for CanvasFormat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for CanvasFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
