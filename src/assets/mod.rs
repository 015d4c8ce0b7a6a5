//! Asset decoding and font handling.

pub mod decode;
pub mod fonts;
