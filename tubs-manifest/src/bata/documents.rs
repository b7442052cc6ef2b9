//! YAML documents read by the Batà metadata generator
//!
//! Only the fields the generator needs are modelled; everything else in a
//! document is ignored.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::path::Path;
use tracing::debug;
use tubs_common::{Error, Result};

/// Folder-level metadata (`<folder>_metadata.yaml` or legacy `metadata.yaml`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FolderMetadata {
    #[serde(default)]
    pub classification: Option<String>,
    #[serde(default)]
    pub orisha: Option<OrishaList>,
}

/// The subset of a rhythm definition used for display
///
/// Read field by field: a field with an unexpected shape is treated as
/// absent rather than rejecting the whole rhythm.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RhythmDocument {
    pub name: Option<String>,
    pub description: Option<String>,
    pub classification: Option<String>,
    pub orisha: Option<OrishaList>,
}

impl RhythmDocument {
    pub fn from_mapping(path: &Path, mapping: &Mapping) -> Self {
        // Scalars render as text, so `name: 1` displays as "1"
        let name = present(mapping, "name").and_then(|value| match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => {
                debug!("{}: ignoring non-scalar name", path.display());
                None
            }
        });

        let text = |key: &str| {
            present(mapping, key).and_then(|value| match value.as_str() {
                Some(s) => Some(s.to_string()),
                None => {
                    debug!("{}: ignoring non-string {}", path.display(), key);
                    None
                }
            })
        };

        let orisha = present(mapping, "orisha").and_then(|value| {
            match serde_yaml::from_value::<OrishaList>(value.clone()) {
                Ok(list) => Some(list),
                Err(e) => {
                    debug!("{}: ignoring orisha: {}", path.display(), e);
                    None
                }
            }
        });

        Self {
            name,
            description: text("description"),
            classification: text("classification"),
            orisha,
        }
    }
}

/// A key with a non-null value
fn present<'a>(mapping: &'a Mapping, key: &str) -> Option<&'a Value> {
    mapping.get(key).filter(|value| !value.is_null())
}

/// `orisha:` may be written as one name or as a list
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OrishaList {
    One(String),
    Many(Vec<String>),
}

impl OrishaList {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OrishaList::One(name) => vec![name],
            OrishaList::Many(names) => names,
        }
    }
}

/// `orishas.yaml`: the authoritative orisha list and colours
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OrishaRegistry {
    #[serde(default)]
    pub orishas: Vec<OrishaRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OrishaRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Parse a YAML document, returning `None` for an empty document
///
/// Read and parse failures carry the offending path.
pub fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::document(path, e))?;
    if content.trim().is_empty() {
        return Ok(None);
    }

    let value: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|e| Error::document(path, e))?;
    if value.is_null() {
        return Ok(None);
    }

    serde_yaml::from_value(value)
        .map(Some)
        .map_err(|e| Error::document(path, e))
}

/// Folder metadata; an empty document means no classification and no orishas
pub fn load_folder_metadata(path: &Path) -> Result<FolderMetadata> {
    Ok(read_yaml(path)?.unwrap_or_default())
}

/// A rhythm definition; an empty or non-mapping document is a parse failure
pub fn load_rhythm(path: &Path) -> Result<RhythmDocument> {
    match read_yaml::<Value>(path)? {
        Some(Value::Mapping(mapping)) => Ok(RhythmDocument::from_mapping(path, &mapping)),
        Some(_) => Err(Error::document(path, "rhythm document is not a mapping")),
        None => Err(Error::document(path, "empty rhythm document")),
    }
}

/// The orisha registry; an empty document is an empty registry
pub fn load_registry(path: &Path) -> Result<OrishaRegistry> {
    Ok(read_yaml(path)?.unwrap_or_default())
}
