use serde::Serialize;

use crate::scene::settings::StylePreset;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorUsage {
    Minimal,
    Balanced,
    Vibrant,
}

/// Human-facing description of a [`StylePreset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetInfo {
    pub id: StylePreset,
    pub name: &'static str,
    pub description: &'static str,
    pub layer_count: u32,
    pub complexity: Complexity,
    pub color_usage: ColorUsage,
}

impl StylePreset {
    pub fn info(self) -> PresetInfo {
        let (name, description, layer_count, complexity, color_usage) = match self {
            Self::MinimalGeometric => (
                "Minimal Geometric",
                "Clean, simple geometric shapes with subtle transparency",
                3,
                Complexity::Low,
                ColorUsage::Minimal,
            ),
            Self::BoldPoster => (
                "Bold Poster",
                "High-contrast, bold shapes inspired by vintage posters",
                4,
                Complexity::Medium,
                ColorUsage::Vibrant,
            ),
            Self::ModernGradient => (
                "Modern Gradient",
                "Smooth gradients with soft geometric accents",
                5,
                Complexity::Medium,
                ColorUsage::Balanced,
            ),
            Self::AbstractPattern => (
                "Abstract Pattern",
                "Organic shapes and textures for artistic compositions",
                8,
                Complexity::High,
                ColorUsage::Balanced,
            ),
            Self::DynamicShapes => (
                "Dynamic Shapes",
                "Energetic overlapping shapes with dynamic lines",
                12,
                Complexity::High,
                ColorUsage::Vibrant,
            ),
        };
        PresetInfo {
            id: self,
            name,
            description,
            layer_count,
            complexity,
            color_usage,
        }
    }
}

/// Every preset's description, in catalogue order.
pub fn catalogue() -> Vec<PresetInfo> {
    StylePreset::ALL.into_iter().map(StylePreset::info).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/presets.rs"]
mod tests;
