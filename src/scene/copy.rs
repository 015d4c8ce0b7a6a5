use serde::{Deserialize, Serialize};

use crate::foundation::error::BrandframeResult;

/// One piece of marketing copy laid over a creative.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CopyVariant {
    pub headline: String,
    pub body: String,
    pub cta: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<String>,
}

impl CopyVariant {
    pub fn new(headline: impl Into<String>, body: impl Into<String>, cta: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            body: body.into(),
            cta: cta.into(),
            hashtags: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Bold,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CopyLength {
    Short,
    #[default]
    Medium,
    Long,
}

/// Source of copy variants for a campaign brief.
///
/// Implementations live outside this crate; generation only consumes the resulting
/// [`CopyVariant`].
pub trait CopyGenerator {
    fn generate(&self, brief: &str, tone: Tone, length: CopyLength)
    -> BrandframeResult<Vec<CopyVariant>>;
}

#[cfg(test)]
#[path = "../../tests/unit/scene/copy.rs"]
mod tests;
