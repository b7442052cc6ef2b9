//! JSON artifact writing
//!
//! Artifacts are written to `<name>.tmp` beside the target and renamed over
//! it, so a consumer never reads a half-written file.

use crate::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Serialize `value` as 2-space indented JSON and write it to `path`
///
/// Missing parent directories are created. Any existing file is replaced.
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let mut body = serde_json::to_string_pretty(value)?;
    body.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::write(path, e))?;
    }

    let temp_path = temp_path_for(path);
    std::fs::write(&temp_path, body).map_err(|e| Error::write(path, e))?;

    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(Error::write(path, e));
    }

    debug!("Wrote {}", path.display());
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
