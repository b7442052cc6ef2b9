//! Path and content ID normalization
//!
//! Every path that leaves the generator (manifest values, content IDs) uses
//! forward slashes, whatever the host separator is. IDs are the path of a file
//! relative to its category directory with the extension removed.

use crate::{Error, Result};
use std::path::{Component, Path};

/// Suffix marking a folder-level metadata document (`<folder>_metadata.yaml`)
pub const METADATA_SUFFIX: &str = "_metadata";

/// Stem of the legacy folder metadata document (`metadata.yaml`)
pub const LEGACY_METADATA_STEM: &str = "metadata";

/// Render a path with `/` separators
///
/// Built component by component, then any literal backslash is folded to `/`
/// so a Windows-style relative path stored in config renders the same on Unix.
pub fn to_forward_slashes(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push_str(&prefix.as_os_str().to_string_lossy()),
            Component::RootDir => out.push('/'),
            Component::CurDir => {}
            Component::ParentDir => push_segment(&mut out, ".."),
            Component::Normal(segment) => push_segment(&mut out, &segment.to_string_lossy()),
        }
    }
    out.replace('\\', "/")
}

fn push_segment(out: &mut String, segment: &str) {
    if !out.is_empty() && !out.ends_with('/') {
        out.push('/');
    }
    out.push_str(segment);
}

/// Derive the content ID of `path` relative to `base`
///
/// `instruments/conga.yaml` under `instruments` gives `conga`;
/// `rhythms/Batà/Iyesa/saludo.yaml` under `rhythms` gives `Batà/Iyesa/saludo`.
/// Only the final extension is removed.
pub fn content_id(path: &Path, base: &Path) -> Result<String> {
    let relative = path.strip_prefix(base).map_err(|_| {
        Error::InvalidInput(format!(
            "{} is not under {}",
            path.display(),
            base.display()
        ))
    })?;

    if relative.as_os_str().is_empty() {
        return Err(Error::InvalidInput(format!(
            "{} has no path relative to its base",
            path.display()
        )));
    }

    Ok(to_forward_slashes(&relative.with_extension("")))
}

/// Build the manifest path for a file or directory below the data root
///
/// The data root is rendered as configured (normally the relative name
/// `data`), so the result is usable as a URL path from the project root.
pub fn manifest_path(data_root: &Path, relative: &Path) -> String {
    to_forward_slashes(&data_root.join(relative))
}

/// Same as [`manifest_path`] but with a trailing slash, for directory entries
pub fn manifest_dir_path(data_root: &Path, relative: &Path) -> String {
    let mut path = manifest_path(data_root, relative);
    if !path.ends_with('/') {
        path.push('/');
    }
    path
}

/// True when the file extension is one of `extensions` (case-sensitive)
pub fn has_content_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|allowed| allowed == ext))
        .unwrap_or(false)
}

/// True when a stem names a folder metadata document (`*_metadata` or `metadata`)
pub fn is_metadata_stem(stem: &str) -> bool {
    let stem = stem.to_lowercase();
    stem == LEGACY_METADATA_STEM || stem.ends_with(METADATA_SUFFIX)
}

/// True when a file inside the rhythms tree is configuration, not rhythm content
///
/// Reserved files are the orisha registry (matched on `registry_file`'s stem)
/// and folder metadata documents. Comparison ignores case.
pub fn is_reserved_name(file_name: &str, registry_file: &str) -> bool {
    let stem = stem_of(file_name).to_lowercase();
    let registry_stem = stem_of(registry_file).to_lowercase();
    stem == registry_stem || is_metadata_stem(&stem)
}

/// True when the last segment of a content ID is a metadata document stem
pub fn is_metadata_id(id: &str) -> bool {
    id.rsplit('/').next().map(is_metadata_stem).unwrap_or(false)
}

fn stem_of(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name)
}
