//! Configuration loading and resolution
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument (or its environment variable, via clap)
//! 2. TOML bootstrap file
//! 3. Compiled default
//!
//! The TOML file is optional. A missing file means defaults; a file that
//! exists but does not parse is an error.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Bootstrap file looked up in the project root
pub const CONFIG_FILE_NAME: &str = "tubs-manifest.toml";

/// Classification vocabulary published in the Batà metadata
pub const DEFAULT_CLASSIFICATIONS: [&str; 3] = ["Specific", "Shared", "Generic"];

/// Fully resolved generator settings
///
/// Every category path is relative: the data root is relative to
/// `project_root`, categories are relative to the data root, and the Batà
/// directory is relative to the rhythms directory.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Directory the consumer serves; manifest paths are relative to it
    pub project_root: PathBuf,
    /// Data root below the project root (prefixes every manifest path)
    pub data_dir: PathBuf,
    /// Manifest output file below the project root
    pub manifest_file: PathBuf,
    pub instruments_dir: PathBuf,
    pub sounds_dir: PathBuf,
    pub rhythms_dir: PathBuf,
    /// Batà tradition folder inside the rhythms directory
    pub bata_dir: PathBuf,
    /// Batà metadata output file name, written inside the Batà folder
    pub bata_metadata_file: String,
    /// Orisha registry file name inside the Batà folder
    pub orishas_file: String,
    /// Recognized content file extensions, without the dot
    pub content_extensions: Vec<String>,
    pub classifications: Vec<String>,
    /// Classification used when neither folder nor rhythm supplies one
    pub default_classification: String,
    /// Version tag written into the Batà metadata
    pub metadata_version: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            data_dir: PathBuf::from("data"),
            manifest_file: PathBuf::from("manifest.json"),
            instruments_dir: PathBuf::from("instruments"),
            sounds_dir: PathBuf::from("sounds"),
            rhythms_dir: PathBuf::from("rhythms"),
            bata_dir: PathBuf::from("Batà"),
            bata_metadata_file: "bata_metadata.json".to_string(),
            orishas_file: "orishas.yaml".to_string(),
            content_extensions: vec!["yaml".to_string(), "yml".to_string()],
            classifications: DEFAULT_CLASSIFICATIONS.iter().map(|c| c.to_string()).collect(),
            default_classification: "Generic".to_string(),
            metadata_version: "1.0".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Defaults rooted at `project_root`
    pub fn with_project_root(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            ..Self::default()
        }
    }

    /// Data root on disk
    pub fn data_root(&self) -> PathBuf {
        self.project_root.join(&self.data_dir)
    }

    pub fn instruments_path(&self) -> PathBuf {
        self.data_root().join(&self.instruments_dir)
    }

    pub fn sounds_path(&self) -> PathBuf {
        self.data_root().join(&self.sounds_dir)
    }

    pub fn rhythms_path(&self) -> PathBuf {
        self.data_root().join(&self.rhythms_dir)
    }

    pub fn bata_path(&self) -> PathBuf {
        self.rhythms_path().join(&self.bata_dir)
    }

    pub fn bata_metadata_path(&self) -> PathBuf {
        self.bata_path().join(&self.bata_metadata_file)
    }

    pub fn orishas_path(&self) -> PathBuf {
        self.bata_path().join(&self.orishas_file)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.project_root.join(&self.manifest_file)
    }

    /// Reject settings the generator cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.content_extensions.is_empty() {
            return Err(Error::Config(
                "content_extensions must list at least one extension".to_string(),
            ));
        }
        if let Some(ext) = self.content_extensions.iter().find(|e| e.is_empty() || e.starts_with('.')) {
            return Err(Error::Config(format!(
                "content extension {:?} must be non-empty and given without a leading dot",
                ext
            )));
        }
        if !self.classifications.contains(&self.default_classification) {
            return Err(Error::Config(format!(
                "default_classification {:?} is not one of {:?}",
                self.default_classification, self.classifications
            )));
        }
        if self.bata_metadata_file.is_empty() || self.orishas_file.is_empty() {
            return Err(Error::Config(
                "bata_metadata_file and orishas_file must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Overlay every value present in the TOML file
    pub fn apply_toml(&mut self, toml: &TomlConfig) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(value) = value {
                *target = value.clone();
            }
        }

        set(&mut self.project_root, &toml.project_root);
        set(&mut self.data_dir, &toml.data_dir);
        set(&mut self.manifest_file, &toml.manifest_file);
        set(&mut self.instruments_dir, &toml.instruments_dir);
        set(&mut self.sounds_dir, &toml.sounds_dir);
        set(&mut self.rhythms_dir, &toml.rhythms_dir);
        set(&mut self.bata_dir, &toml.bata_dir);
        set(&mut self.bata_metadata_file, &toml.bata_metadata_file);
        set(&mut self.orishas_file, &toml.orishas_file);
        set(&mut self.content_extensions, &toml.content_extensions);
        set(&mut self.classifications, &toml.classifications);
        set(&mut self.default_classification, &toml.default_classification);
        set(&mut self.metadata_version, &toml.metadata_version);
    }
}

/// Bootstrap configuration loaded from TOML file
///
/// Every field is optional; absent fields keep the compiled default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TomlConfig {
    pub project_root: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub manifest_file: Option<PathBuf>,
    pub instruments_dir: Option<PathBuf>,
    pub sounds_dir: Option<PathBuf>,
    pub rhythms_dir: Option<PathBuf>,
    pub bata_dir: Option<PathBuf>,
    pub bata_metadata_file: Option<String>,
    pub orishas_file: Option<String>,
    pub content_extensions: Option<Vec<String>>,
    pub classifications: Option<Vec<String>>,
    pub default_classification: Option<String>,
    pub metadata_version: Option<String>,
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Values supplied on the command line (or through their environment variables)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub project_root: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub manifest_file: Option<PathBuf>,
    /// Explicit bootstrap file; must exist when given
    pub config_file: Option<PathBuf>,
}

/// Parse a TOML bootstrap file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;
    let config = toml::from_str(&content)?;
    Ok(config)
}

/// Find the bootstrap file to use, if any
///
/// Lookup order: explicit path, `<project_root>/tubs-manifest.toml`,
/// then `<user config dir>/tubs/manifest.toml`.
pub fn locate_config_file(explicit: Option<&Path>, project_root: &Path) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(Some(path.to_path_buf()));
        }
        return Err(Error::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let project_config = project_root.join(CONFIG_FILE_NAME);
    if project_config.is_file() {
        return Ok(Some(project_config));
    }

    let user_config = dirs::config_dir().map(|d| d.join("tubs").join("manifest.toml"));
    Ok(user_config.filter(|path| path.is_file()))
}

/// Load whichever bootstrap file applies, or defaults when there is none
pub fn load_bootstrap(explicit: Option<&Path>, project_root: &Path) -> Result<TomlConfig> {
    match locate_config_file(explicit, project_root)? {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            load_toml_config(&path)
        }
        None => {
            debug!("No configuration file found, using defaults");
            Ok(TomlConfig::default())
        }
    }
}

/// Merge command-line overrides over the TOML file over compiled defaults
pub fn resolve(overrides: &ConfigOverrides, toml: &TomlConfig) -> Result<GeneratorConfig> {
    let mut config = GeneratorConfig::default();
    config.apply_toml(toml);

    if let Some(root) = &overrides.project_root {
        config.project_root = root.clone();
    }
    if let Some(data_dir) = &overrides.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(manifest_file) = &overrides.manifest_file {
        config.manifest_file = manifest_file.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Load the bootstrap file and resolve the final configuration in one step
pub fn load(overrides: &ConfigOverrides) -> Result<(GeneratorConfig, LoggingConfig)> {
    let search_root = overrides
        .project_root
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let toml = load_bootstrap(overrides.config_file.as_deref(), &search_root)?;
    let config = resolve(overrides, &toml)?;
    Ok((config, toml.logging))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = GeneratorConfig::with_project_root("/site");
        assert_eq!(config.data_root(), PathBuf::from("/site/data"));
        assert_eq!(config.manifest_path(), PathBuf::from("/site/manifest.json"));
        assert_eq!(
            config.bata_metadata_path(),
            PathBuf::from("/site/data/rhythms/Batà/bata_metadata.json")
        );
        assert_eq!(
            config.orishas_path(),
            PathBuf::from("/site/data/rhythms/Batà/orishas.yaml")
        );
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_unknown_default_classification_rejected() {
        let config = GeneratorConfig {
            default_classification: "Unknown".to_string(),
            ..GeneratorConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_extensions_rejected() {
        let config = GeneratorConfig {
            content_extensions: Vec::new(),
            ..GeneratorConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_dotted_extension_rejected() {
        let config = GeneratorConfig {
            content_extensions: vec![".yaml".to_string()],
            ..GeneratorConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
