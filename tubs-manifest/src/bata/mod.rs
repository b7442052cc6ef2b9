//! Batà metadata generation
//!
//! Produces `bata_metadata.json` from three sources:
//! - one folder metadata document per sub-folder of `rhythms/Batà/`
//! - the rhythm files the rhythm scan found in those folders
//! - the orisha registry `rhythms/Batà/orishas.yaml`
//!
//! Field precedence for each toque: folder metadata, then the rhythm's own
//! field, then the default. Any single unreadable input is logged and
//! skipped; only writing the output can fail the run.

pub mod documents;

use crate::scanner::{self, ContentEntry};
use documents::{FolderMetadata, OrishaList, RhythmDocument};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tubs_common::paths::{self, is_metadata_id};
use tubs_common::{artifact, GeneratorConfig, Result};

/// Legacy folder metadata file name, tried after `<folder>_metadata.yaml`
pub const LEGACY_METADATA_FILE: &str = "metadata.yaml";

/// Display data for one toque (Batà rhythm)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toque {
    pub display_name: String,
    pub classification: String,
    pub associated_orishas: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The `bata_metadata.json` document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BataMetadata {
    pub version: String,
    pub orishas: Vec<String>,
    pub orisha_colors: IndexMap<String, String>,
    pub classifications: Vec<String>,
    pub toques: IndexMap<String, Toque>,
}

/// What a generator run did, for operator output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BataReport {
    /// Output file, or `None` when there is no Batà directory
    pub output: Option<PathBuf>,
    pub toques: usize,
    pub folders_scanned: usize,
    /// Folders with neither `<folder>_metadata.yaml` nor `metadata.yaml`
    pub folders_without_metadata: usize,
    /// Folders whose metadata failed to parse
    pub folders_failed: usize,
    /// Rhythm files that failed to parse
    pub rhythms_failed: usize,
    pub registry_found: bool,
}

/// Build and write the Batà metadata document
///
/// Skipped entirely (nothing written) when the Batà directory does not exist.
pub fn generate_bata_metadata(
    rhythms: &IndexMap<String, ContentEntry>,
    config: &GeneratorConfig,
) -> Result<BataReport> {
    let bata_path = config.bata_path();
    if !bata_path.is_dir() {
        info!(
            "No Batà directory at {}, skipping Batà metadata",
            bata_path.display()
        );
        return Ok(BataReport::default());
    }

    let (metadata, mut report) = build_bata_metadata(rhythms, config);

    let output = config.bata_metadata_path();
    artifact::write_json(&metadata, &output)?;

    info!("✓ Generated {}", output.display());
    info!("   - Batà Rhythms Found: {}", report.toques);
    if report.rhythms_failed > 0 || report.folders_failed > 0 {
        warn!(
            "   - Skipped: {} folder(s), {} rhythm(s) (see warnings above)",
            report.folders_failed, report.rhythms_failed
        );
    }

    report.output = Some(output);
    Ok(report)
}

/// Assemble the metadata document without writing it
pub fn build_bata_metadata(
    rhythms: &IndexMap<String, ContentEntry>,
    config: &GeneratorConfig,
) -> (BataMetadata, BataReport) {
    let mut report = BataReport::default();
    let toques = collect_toques(rhythms, config, &mut report);
    let (orishas, orisha_colors) = load_orishas(config, &mut report);

    let metadata = BataMetadata {
        version: config.metadata_version.clone(),
        orishas,
        orisha_colors,
        classifications: config.classifications.clone(),
        toques,
    };
    report.toques = metadata.toques.len();

    (metadata, report)
}

fn collect_toques(
    rhythms: &IndexMap<String, ContentEntry>,
    config: &GeneratorConfig,
    report: &mut BataReport,
) -> IndexMap<String, Toque> {
    let mut toques = IndexMap::new();
    let bata_id = paths::to_forward_slashes(&config.bata_dir);

    for folder in scanner::walk(&config.bata_path(), Some(1)) {
        if !folder.file_type().is_dir() {
            continue;
        }
        report.folders_scanned += 1;

        let folder_name = folder.file_name().to_string_lossy().into_owned();
        let meta_path = match locate_folder_metadata(folder.path(), &folder_name) {
            Some(path) => path,
            None => {
                debug!("No metadata for Batà folder {}, skipping", folder_name);
                report.folders_without_metadata += 1;
                continue;
            }
        };

        let folder_meta = match documents::load_folder_metadata(&meta_path) {
            Ok(meta) => meta,
            Err(e) => {
                warn!("⚠ Error parsing {}: {}", meta_path.display(), e);
                report.folders_failed += 1;
                continue;
            }
        };

        let prefix = format!("{}/{}/", bata_id, folder_name);
        for (id, entry) in rhythms.iter() {
            if !id.starts_with(&prefix) || is_metadata_id(id) {
                continue;
            }
            match documents::load_rhythm(&entry.fs_path) {
                Ok(rhythm) => {
                    let toque = merge_toque(id, &folder_meta, rhythm, config);
                    toques.insert(id.clone(), toque);
                }
                Err(e) => {
                    warn!("⚠ Error parsing rhythm {}: {}", entry.manifest_path, e);
                    report.rhythms_failed += 1;
                }
            }
        }
    }

    toques
}

/// `<folder>_metadata.yaml`, else legacy `metadata.yaml`, else nothing
pub fn locate_folder_metadata(folder: &Path, folder_name: &str) -> Option<PathBuf> {
    let conventional = folder.join(format!("{}{}.yaml", folder_name, paths::METADATA_SUFFIX));
    if conventional.is_file() {
        return Some(conventional);
    }

    let legacy = folder.join(LEGACY_METADATA_FILE);
    if legacy.is_file() {
        debug!("Using legacy {}", legacy.display());
        return Some(legacy);
    }

    None
}

/// Combine folder metadata with one rhythm's own fields
pub fn merge_toque(
    id: &str,
    folder: &FolderMetadata,
    rhythm: RhythmDocument,
    config: &GeneratorConfig,
) -> Toque {
    if let (Some(outer), Some(inner)) = (&folder.classification, &rhythm.classification) {
        if outer != inner {
            debug!(
                "{}: folder classification {} overrides inline {}",
                id, outer, inner
            );
        }
    }

    let classification = folder
        .classification
        .clone()
        .or(rhythm.classification)
        .unwrap_or_else(|| config.default_classification.clone());

    let associated_orishas = folder
        .orisha
        .clone()
        .or(rhythm.orisha)
        .map(OrishaList::into_vec)
        .unwrap_or_default();

    let display_name = rhythm
        .name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| id.to_string());

    Toque {
        display_name,
        classification,
        associated_orishas,
        description: rhythm.description.filter(|d| !d.trim().is_empty()),
    }
}

/// Ordered orisha names plus the colours of those that have one
fn load_orishas(
    config: &GeneratorConfig,
    report: &mut BataReport,
) -> (Vec<String>, IndexMap<String, String>) {
    let mut names = Vec::new();
    let mut colors = IndexMap::new();

    let path = config.orishas_path();
    if !path.is_file() {
        warn!(
            "⚠ Warning: {} not found. Orisha list will be empty.",
            path.display()
        );
        return (names, colors);
    }
    report.registry_found = true;

    let registry = match documents::load_registry(&path) {
        Ok(registry) => registry,
        Err(e) => {
            warn!("⚠ Error parsing {}: {}", path.display(), e);
            return (names, colors);
        }
    };

    for record in registry.orishas {
        let Some(name) = record.name.filter(|n| !n.trim().is_empty()) else {
            continue;
        };
        if let Some(color) = record.color {
            colors.insert(name.clone(), color);
        }
        names.push(name);
    }

    (names, colors)
}
