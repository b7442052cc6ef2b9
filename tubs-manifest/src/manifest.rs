//! Manifest assembly
//!
//! Runs the three scanners and writes `manifest.json`. The manifest is rebuilt
//! from scratch every run; nothing from a previous manifest is merged in.

use crate::scanner::{self, ContentEntry};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tubs_common::{artifact, GeneratorConfig, Result};

/// The catalog consumed by the front-end
///
/// Each mapping serializes as `{ content_id: manifest_path }`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Manifest {
    pub instruments: IndexMap<String, ContentEntry>,
    pub sound_packs: IndexMap<String, ContentEntry>,
    pub rhythms: IndexMap<String, ContentEntry>,
}

impl Manifest {
    /// Scan every category below the configured data root
    pub fn scan(config: &GeneratorConfig) -> Self {
        Self {
            instruments: scanner::scan_instruments(config),
            sound_packs: scanner::scan_sound_packs(config),
            rhythms: scanner::scan_rhythms(config),
        }
    }
}

/// Category sizes reported to the operator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManifestCounts {
    pub instruments: usize,
    pub sound_packs: usize,
    pub rhythms: usize,
}

impl From<&Manifest> for ManifestCounts {
    fn from(manifest: &Manifest) -> Self {
        Self {
            instruments: manifest.instruments.len(),
            sound_packs: manifest.sound_packs.len(),
            rhythms: manifest.rhythms.len(),
        }
    }
}

/// Write the manifest, replacing any existing file
///
/// Returns the path written. Only an I/O failure on the output is an error.
pub fn write_manifest(manifest: &Manifest, config: &GeneratorConfig) -> Result<PathBuf> {
    let path = config.manifest_path();
    artifact::write_json(manifest, &path)?;

    let counts = ManifestCounts::from(manifest);
    info!("✓ Generated {}", path.display());
    info!("   - Instruments: {}", counts.instruments);
    info!("   - Sound Packs: {}", counts.sound_packs);
    info!("   - Rhythms:     {}", counts.rhythms);

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_empty_data_root_writes_empty_mappings() {
        let temp_dir = TempDir::new().unwrap();
        let config = GeneratorConfig::with_project_root(temp_dir.path());

        let manifest = Manifest::scan(&config);
        let path = write_manifest(&manifest, &config).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(
            written,
            serde_json::json!({"instruments": {}, "sound_packs": {}, "rhythms": {}})
        );
    }

    #[test]
    fn test_counts() {
        let temp_dir = TempDir::new().unwrap();
        let config = GeneratorConfig::with_project_root(temp_dir.path());
        fs::create_dir_all(config.sounds_path().join("pack1")).unwrap();
        fs::create_dir_all(config.instruments_path()).unwrap();
        fs::write(config.instruments_path().join("conga.yaml"), "name: Conga\n").unwrap();

        let counts = ManifestCounts::from(&Manifest::scan(&config));
        assert_eq!(
            counts,
            ManifestCounts {
                instruments: 1,
                sound_packs: 1,
                rhythms: 0
            }
        );
    }

    #[test]
    fn test_key_order_follows_struct_order() {
        let json = serde_json::to_string(&Manifest::default()).unwrap();
        assert_eq!(json, r#"{"instruments":{},"sound_packs":{},"rhythms":{}}"#);
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let entry = |id: &str| ContentEntry {
            id: id.to_string(),
            manifest_path: format!("data/rhythms/{}.yaml", id),
            fs_path: PathBuf::from(format!("/tmp/data/rhythms/{}.yaml", id)),
        };
        let mut manifest = Manifest::default();
        for id in ["zeta", "alpha", "mid"] {
            manifest.rhythms.insert(id.to_string(), entry(id));
        }
        // Replacing an ID keeps its original slot
        manifest.rhythms.insert("zeta".to_string(), entry("zeta"));

        let json = serde_json::to_string(&manifest.rhythms).unwrap();
        assert_eq!(
            json,
            r#"{"zeta":"data/rhythms/zeta.yaml","alpha":"data/rhythms/alpha.yaml","mid":"data/rhythms/mid.yaml"}"#
        );
    }
}
