// src/io/mod.rs
pub mod manifest;

pub use manifest::{scan, Manifest, ManifestError};
