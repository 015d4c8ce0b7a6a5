//! Creative generation: the synthesizers, compositors and the pipeline that orders them.

pub mod background;
pub mod flash;
pub mod logo;
pub mod pipeline;
pub mod text;
