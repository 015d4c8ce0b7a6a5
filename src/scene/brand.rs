use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::foundation::core::CanvasFormat;
use crate::foundation::error::{BrandframeError, BrandframeResult};
use crate::scene::request::{Color, CreativeRequest};

/// Named binary asset owned by a brand kit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedAsset {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// A caller's stored brand identity.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BrandKit {
    pub name: String,
    pub colors: Vec<Color>,
    #[serde(default)]
    pub logo: Option<NamedAsset>,
    #[serde(default)]
    pub references: Vec<NamedAsset>,
}

impl BrandKit {
    /// Seed a request with this kit's colors, logo and first reference image.
    pub fn to_request(&self, format: CanvasFormat) -> CreativeRequest {
        let mut req = CreativeRequest::new(format);
        req.brand_colors = self.colors.clone();
        req.logo_image_bytes = self.logo.as_ref().map(|l| l.bytes.clone());
        req.reference_image_bytes = self.references.first().map(|r| r.bytes.clone());
        req
    }
}

/// Brand kit persistence keyed by caller identity.
pub trait BrandKitStore: Send + Sync {
    fn get(&self, caller: &str) -> BrandframeResult<Option<BrandKit>>;
    fn save(&self, caller: &str, kit: BrandKit) -> BrandframeResult<()>;
}

/// Process-local [`BrandKitStore`].
#[derive(Debug, Default)]
pub struct InMemoryBrandKitStore {
    kits: RwLock<HashMap<String, BrandKit>>,
}

impl BrandKitStore for InMemoryBrandKitStore {
    fn get(&self, caller: &str) -> BrandframeResult<Option<BrandKit>> {
        let kits = self
            .kits
            .read()
            .map_err(|_| BrandframeError::resource("brand kit store lock poisoned"))?;
        Ok(kits.get(caller).cloned())
    }

    fn save(&self, caller: &str, kit: BrandKit) -> BrandframeResult<()> {
        let mut kits = self
            .kits
            .write()
            .map_err(|_| BrandframeError::resource("brand kit store lock poisoned"))?;
        kits.insert(caller.to_owned(), kit);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/brand.rs"]
mod tests;
