//! CPU rasterization: surfaces, paints and blur.

pub(crate) mod blur;
pub mod paint;
pub mod surface;
