/// Convenience result alias used across the crate.
pub type BrandframeResult<T> = Result<T, BrandframeError>;

/// Errors surfaced by creative generation and editing.
///
/// Stage-local problems that generation can recover from (an undecodable logo, a reference image
/// that fails to load) are not errors; they are reported as
/// [`crate::generate::pipeline::GenerationWarning`] values instead.
#[derive(thiserror::Error, Debug)]
pub enum BrandframeError {
    /// Unsupported dimensions or an out-of-range settings value. Raised before rendering.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Surface or render context allocation failed.
    #[error("resource error: {0}")]
    Resource(String),

    /// Asset bytes could not be decoded into a pixel surface.
    #[error("asset decode error: {0}")]
    AssetDecode(String),

    /// The image editing backend failed.
    #[error("edit service error: {0}")]
    EditService(String),

    /// Encoding or parsing of a serialized form failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BrandframeError {
    /// Build a [`BrandframeError::Configuration`].
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`BrandframeError::Resource`].
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build a [`BrandframeError::AssetDecode`].
    pub fn asset_decode(msg: impl Into<String>) -> Self {
        Self::AssetDecode(msg.into())
    }

    /// Build a [`BrandframeError::EditService`].
    pub fn edit_service(msg: impl Into<String>) -> Self {
        Self::EditService(msg.into())
    }

    /// Build a [`BrandframeError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for errors a generation stage may skip over instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::AssetDecode(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
