//! Shared test helpers: throwaway content trees

#![allow(dead_code)]

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tubs_common::GeneratorConfig;

/// A project root in a temp directory with the default data layout
pub struct ContentTree {
    pub temp_dir: TempDir,
    pub config: GeneratorConfig,
}

impl ContentTree {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config = GeneratorConfig::with_project_root(temp_dir.path());
        Self { temp_dir, config }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file below the data root, creating parent directories
    pub fn file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.config.data_root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    /// Create a directory below the data root
    pub fn dir(&self, relative: &str) -> PathBuf {
        let path = self.config.data_root().join(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }

    pub fn manifest(&self) -> Value {
        read_json(&self.config.manifest_path())
    }

    pub fn bata_metadata(&self) -> Value {
        read_json(&self.config.bata_metadata_path())
    }
}

pub fn read_json(path: &Path) -> Value {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Cannot read {}: {}", path.display(), e));
    serde_json::from_str(&content).unwrap()
}
