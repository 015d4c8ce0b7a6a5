use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgb8;
use crate::foundation::error::{BrandframeError, BrandframeResult};

/// Named procedural background recipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StylePreset {
    /// Soft gradient with one circle and one triangle.
    MinimalGeometric,
    /// Solid base, overlapping blocks and a separator line.
    BoldPoster,
    /// Three-stop gradient, radial highlight, seeded circles.
    #[default]
    ModernGradient,
    /// Vertical gradient, seeded organic blobs, speckle texture.
    AbstractPattern,
    /// Vibrant base, seeded mixed shapes and connecting lines.
    DynamicShapes,
}

impl StylePreset {
    /// Every preset, in catalogue order.
    pub const ALL: [Self; 5] = [
        Self::MinimalGeometric,
        Self::BoldPoster,
        Self::ModernGradient,
        Self::AbstractPattern,
        Self::DynamicShapes,
    ];

    /// Wire identifier, e.g. `"modern-gradient"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MinimalGeometric => "minimal-geometric",
            Self::BoldPoster => "bold-poster",
            Self::ModernGradient => "modern-gradient",
            Self::AbstractPattern => "abstract-pattern",
            Self::DynamicShapes => "dynamic-shapes",
        }
    }
}

impl fmt::Display for StylePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StylePreset {
    type Err = BrandframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| BrandframeError::configuration(format!("unknown style preset \"{s}\"")))
    }
}

/// Logo anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogoPosition {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

/// Presentation applied to the logo to keep it legible over busy backgrounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisibilityTreatment {
    #[default]
    Shadow,
    Outline,
    Badge,
    /// Draw the logo as-is.
    #[serde(rename = "none")]
    Plain,
}

/// Whether flash accents are drawn before or after the logo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlashLayerPosition {
    #[default]
    BehindLogo,
    AboveLogo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogoSettings {
    pub position: LogoPosition,
    /// Multiplier on the 120px base size, `[0.5, 2.0]`.
    pub scale: f64,
    /// Distance from the frame edge in pixels, `[20, 120]`.
    pub padding: u32,
    pub visibility_treatment: VisibilityTreatment,
}

impl Default for LogoSettings {
    fn default() -> Self {
        Self {
            position: LogoPosition::TopLeft,
            scale: 1.0,
            padding: 60,
            visibility_treatment: VisibilityTreatment::Shadow,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlashOverlaySettings {
    pub enabled: bool,
    /// `[0, 1]`; scales instance size and opacity.
    pub intensity: f64,
    /// Number of instances, `[1, 10]`.
    pub amount: u32,
    pub layer_position: FlashLayerPosition,
    /// Tint as `#RRGGBB`.
    pub color: String,
    /// Size multiplier, `[0.5, 2.0]`.
    pub size: f64,
    /// Horizontal offset as a fraction of width, `[-0.5, 0.5]`.
    pub position_x: f64,
    /// Vertical offset as a fraction of height, `[-0.5, 0.5]`.
    pub position_y: f64,
    /// Rotation multiplier, `[0.5, 2.0]`.
    pub animation_speed: f64,
}

impl Default for FlashOverlaySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            intensity: 0.6,
            amount: 3,
            layer_position: FlashLayerPosition::BehindLogo,
            color: "#FFFFFF".to_owned(),
            size: 1.0,
            position_x: 0.0,
            position_y: 0.0,
            animation_speed: 1.0,
        }
    }
}

impl FlashOverlaySettings {
    /// Parsed tint color.
    pub fn tint(&self) -> BrandframeResult<Rgb8> {
        Rgb8::from_hex(&self.color)
    }
}

/// Everything that drives one procedural render besides the brand kit and copy.
///
/// Passed by reference into generation and never mutated there. Missing JSON fields fall back to
/// [`CreativeSettings::default`].
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreativeSettings {
    pub style_preset: StylePreset,
    pub seed: u32,
    pub logo_settings: LogoSettings,
    pub flash_overlay_settings: FlashOverlaySettings,
}

impl CreativeSettings {
    /// Check every numeric range and the tint color.
    ///
    /// All violations are reported together, one per line, each prefixed with its JSON path.
    pub fn validate(&self) -> BrandframeResult<()> {
        let mut errors = Vec::new();
        let logo = &self.logo_settings;
        check_range(&mut errors, "logoSettings.scale", logo.scale, 0.5, 2.0);
        if !(20..=120).contains(&logo.padding) {
            errors.push(format!(
                "$.logoSettings.padding: must be within [20, 120], got {}",
                logo.padding
            ));
        }

        let flash = &self.flash_overlay_settings;
        check_range(&mut errors, "flashOverlaySettings.intensity", flash.intensity, 0.0, 1.0);
        if !(1..=10).contains(&flash.amount) {
            errors.push(format!(
                "$.flashOverlaySettings.amount: must be within [1, 10], got {}",
                flash.amount
            ));
        }
        check_range(&mut errors, "flashOverlaySettings.size", flash.size, 0.5, 2.0);
        check_range(&mut errors, "flashOverlaySettings.positionX", flash.position_x, -0.5, 0.5);
        check_range(&mut errors, "flashOverlaySettings.positionY", flash.position_y, -0.5, 0.5);
        check_range(
            &mut errors,
            "flashOverlaySettings.animationSpeed",
            flash.animation_speed,
            0.5,
            2.0,
        );
        if let Err(e) = flash.tint() {
            errors.push(format!("$.flashOverlaySettings.color: {e}"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(BrandframeError::configuration(errors.join("\n")))
        }
    }

    /// Return a copy with every field present in `patch` replaced.
    pub fn apply(&self, patch: &CreativeSettingsPatch) -> Self {
        let mut out = self.clone();
        if let Some(v) = patch.style_preset {
            out.style_preset = v;
        }
        if let Some(v) = patch.seed {
            out.seed = v;
        }
        if let Some(p) = &patch.logo_settings {
            out.logo_settings = out.logo_settings.apply(p);
        }
        if let Some(p) = &patch.flash_overlay_settings {
            out.flash_overlay_settings = out.flash_overlay_settings.apply(p);
        }
        out
    }
}

fn check_range(errors: &mut Vec<String>, path: &str, v: f64, lo: f64, hi: f64) {
    if !(lo..=hi).contains(&v) {
        errors.push(format!("$.{path}: must be within [{lo}, {hi}], got {v}"));
    }
}

/// Partial update of [`CreativeSettings`]; absent fields keep their current value.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreativeSettingsPatch {
    pub style_preset: Option<StylePreset>,
    pub seed: Option<u32>,
    pub logo_settings: Option<LogoSettingsPatch>,
    pub flash_overlay_settings: Option<FlashOverlaySettingsPatch>,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogoSettingsPatch {
    pub position: Option<LogoPosition>,
    pub scale: Option<f64>,
    pub padding: Option<u32>,
    pub visibility_treatment: Option<VisibilityTreatment>,
}

impl LogoSettings {
    fn apply(&self, p: &LogoSettingsPatch) -> Self {
        Self {
            position: p.position.unwrap_or(self.position),
            scale: p.scale.unwrap_or(self.scale),
            padding: p.padding.unwrap_or(self.padding),
            visibility_treatment: p.visibility_treatment.unwrap_or(self.visibility_treatment),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlashOverlaySettingsPatch {
    pub enabled: Option<bool>,
    pub intensity: Option<f64>,
    pub amount: Option<u32>,
    pub layer_position: Option<FlashLayerPosition>,
    pub color: Option<String>,
    pub size: Option<f64>,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
    pub animation_speed: Option<f64>,
}

impl FlashOverlaySettings {
    fn apply(&self, p: &FlashOverlaySettingsPatch) -> Self {
        Self {
            enabled: p.enabled.unwrap_or(self.enabled),
            intensity: p.intensity.unwrap_or(self.intensity),
            amount: p.amount.unwrap_or(self.amount),
            layer_position: p.layer_position.unwrap_or(self.layer_position),
            color: p.color.clone().unwrap_or_else(|| self.color.clone()),
            size: p.size.unwrap_or(self.size),
            position_x: p.position_x.unwrap_or(self.position_x),
            position_y: p.position_y.unwrap_or(self.position_y),
            animation_speed: p.animation_speed.unwrap_or(self.animation_speed),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/settings.rs"]
mod tests;
