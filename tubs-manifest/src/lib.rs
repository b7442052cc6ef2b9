//! tubs-manifest library - content catalog generation
//!
//! Indexes the content tree under the data root into `manifest.json` and
//! derives `bata_metadata.json` for the Batà tradition. Every run is a full,
//! stateless rebuild from the current filesystem.

pub mod bata;
pub mod manifest;
pub mod run;
pub mod scanner;

pub use bata::{BataMetadata, BataReport, Toque};
pub use manifest::{Manifest, ManifestCounts};
pub use run::{generate, GenerateOptions, RunReport};
pub use scanner::ContentEntry;
