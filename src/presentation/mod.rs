pub mod config;
mod manifest;

pub use config::{Environment, Settings};
pub use manifest::{BatchManifest, ManifestError, ManifestItem};
