//! JSON-facing boundary model: settings, requests, brand kits and copy.

pub mod brand;
pub mod copy;
pub mod presets;
pub mod request;
pub mod settings;
