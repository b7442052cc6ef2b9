//! Content directory scanners
//!
//! Instruments and sound packs are scanned one level deep; rhythms are
//! walked recursively so sub-traditions get namespaced IDs such as
//! `Batà/Iyesa/saludo`.
//!
//! A missing category directory is an empty category. Entries that cannot be
//! read are logged and skipped; scanning never fails as a whole.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tubs_common::paths::{self, has_content_extension, is_reserved_name};
use tubs_common::{GeneratorConfig, Result};
use walkdir::{DirEntry, WalkDir};

/// One scanned file or directory
#[derive(Debug, Clone, PartialEq)]
pub struct ContentEntry {
    /// Content ID (relative path, extension stripped, `/` separators)
    pub id: String,
    /// Path written to the manifest, prefixed by the data root name
    pub manifest_path: String,
    /// Where the entry lives on disk
    pub fs_path: PathBuf,
}

/// Manifest mappings only carry the manifest path
impl Serialize for ContentEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.manifest_path)
    }
}

/// Scan `instruments/` for content files (non-recursive)
pub fn scan_instruments(config: &GeneratorConfig) -> IndexMap<String, ContentEntry> {
    let category = config.instruments_path();
    let mut instruments = IndexMap::new();

    for entry in walk(&category, Some(1)) {
        if !entry.file_type().is_file()
            || !has_content_extension(entry.path(), &config.content_extensions)
        {
            continue;
        }
        insert_file(&mut instruments, config, &category, entry.path());
    }

    instruments
}

/// Scan `sounds/`: every immediate sub-directory is a sound pack
///
/// No pack definition file is required inside the directory.
pub fn scan_sound_packs(config: &GeneratorConfig) -> IndexMap<String, ContentEntry> {
    let category = config.sounds_path();
    let mut packs = IndexMap::new();

    for entry in walk(&category, Some(1)) {
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        match relative_to_data_root(config, entry.path()) {
            Ok(relative) => {
                let manifest_path = paths::manifest_dir_path(&config.data_dir, relative);
                debug!("Sound pack {} -> {}", name, manifest_path);
                packs.insert(
                    name.clone(),
                    ContentEntry {
                        id: name,
                        manifest_path,
                        fs_path: entry.path().to_path_buf(),
                    },
                );
            }
            Err(e) => warn!("Skipping sound pack {}: {}", entry.path().display(), e),
        }
    }

    packs
}

/// Scan `rhythms/` recursively for rhythm files
///
/// The orisha registry and folder metadata documents live in the same tree
/// but are configuration, so they are left out.
pub fn scan_rhythms(config: &GeneratorConfig) -> IndexMap<String, ContentEntry> {
    let category = config.rhythms_path();
    let mut rhythms = IndexMap::new();

    for entry in walk(&category, None) {
        if !entry.file_type().is_file()
            || !has_content_extension(entry.path(), &config.content_extensions)
        {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if is_reserved_name(&file_name, &config.orishas_file) {
            debug!("Excluding reserved file {}", entry.path().display());
            continue;
        }
        insert_file(&mut rhythms, config, &category, entry.path());
    }

    rhythms
}

/// Entries below `dir` in file-name order, following symlinks
///
/// Unreadable entries (permissions, symlink loops) are logged and dropped.
pub(crate) fn walk(dir: &Path, max_depth: Option<usize>) -> Vec<DirEntry> {
    if !dir.is_dir() {
        debug!("Category directory {} not found, treating as empty", dir.display());
        return Vec::new();
    }

    let mut walker = WalkDir::new(dir)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    if let Some(depth) = max_depth {
        walker = walker.max_depth(depth);
    }

    walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Error accessing entry: {}", e);
                None
            }
        })
        .collect()
}

fn insert_file(
    map: &mut IndexMap<String, ContentEntry>,
    config: &GeneratorConfig,
    category: &Path,
    path: &Path,
) {
    match file_entry(config, category, path) {
        Ok(entry) => {
            debug!("{} -> {}", entry.id, entry.manifest_path);
            if let Some(previous) = map.insert(entry.id.clone(), entry) {
                // Same stem with two extensions (e.g. x.yaml and x.yml)
                warn!(
                    "Duplicate content ID {}, replacing {}",
                    previous.id, previous.manifest_path
                );
            }
        }
        Err(e) => warn!("Skipping {}: {}", path.display(), e),
    }
}

fn file_entry(config: &GeneratorConfig, category: &Path, path: &Path) -> Result<ContentEntry> {
    let id = paths::content_id(path, category)?;
    let relative = relative_to_data_root(config, path)?;
    Ok(ContentEntry {
        id,
        manifest_path: paths::manifest_path(&config.data_dir, relative),
        fs_path: path.to_path_buf(),
    })
}

fn relative_to_data_root<'a>(config: &GeneratorConfig, path: &'a Path) -> Result<&'a Path> {
    let data_root = config.data_root();
    path.strip_prefix(&data_root).map_err(|_| {
        tubs_common::Error::InvalidInput(format!(
            "{} is not under {}",
            path.display(),
            data_root.display()
        ))
    })
}
