//! CLI command implementations.

pub mod common;
pub mod gates;
pub mod presets;
pub mod run;
pub mod version;
