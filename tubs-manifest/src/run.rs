//! Generation run: manifest first, then Batà metadata

use crate::bata::{self, BataReport};
use crate::manifest::{self, Manifest, ManifestCounts};
use std::path::PathBuf;
use tubs_common::{GeneratorConfig, Result};

/// Optional steps of a run
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Only write the manifest
    pub skip_bata: bool,
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub manifest_path: PathBuf,
    pub counts: ManifestCounts,
    /// `None` when the Batà step was skipped on request
    pub bata: Option<BataReport>,
}

/// Regenerate every artifact from the current content tree
///
/// Per-file parse problems are logged and skipped. Errors returned here are
/// configuration or output write failures.
pub fn generate(config: &GeneratorConfig, options: GenerateOptions) -> Result<RunReport> {
    config.validate()?;

    let manifest = Manifest::scan(config);
    let manifest_path = manifest::write_manifest(&manifest, config)?;

    let bata = if options.skip_bata {
        None
    } else {
        Some(bata::generate_bata_metadata(&manifest.rhythms, config)?)
    };

    Ok(RunReport {
        manifest_path,
        counts: ManifestCounts::from(&manifest),
        bata,
    })
}
