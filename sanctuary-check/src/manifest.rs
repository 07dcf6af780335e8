//! Manifest loading
//!
//! A manifest is either a JSON array of objects:
//!
//! ```json
//! [{"name": "Rain", "source_type": "natural", "file_path": "natural/rain.wav", "duration_ms": 60000}]
//! ```
//!
//! or a TOML document with an `[[asset]]` array of tables:
//!
//! ```toml
//! [[asset]]
//! name = "Rain"
//! source_type = "natural"
//! file_path = "natural/rain.wav"
//! duration_ms = 60000
//! ```
//!
//! Entries come back as raw JSON values; nothing is validated here.

use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Key holding the entry list in a TOML manifest
pub const TOML_ASSET_KEY: &str = "asset";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Toml,
}

impl ManifestFormat {
    /// Pick the format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(ManifestFormat::Json),
            "toml" => Some(ManifestFormat::Toml),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported manifest extension for {} (expected .json or .toml)", .0.display())]
    UnknownFormat(PathBuf),

    #[error("Invalid JSON manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML manifest: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Manifest must be {expected}")]
    Shape { expected: &'static str },
}

/// Read a manifest file, choosing the format by extension
pub fn load_manifest(path: &Path) -> Result<Vec<Value>, ManifestError> {
    let format =
        ManifestFormat::from_path(path).ok_or_else(|| ManifestError::UnknownFormat(path.to_path_buf()))?;

    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = parse_manifest(&content, format)?;
    debug!("Loaded {} manifest entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Parse manifest text in the given format
pub fn parse_manifest(content: &str, format: ManifestFormat) -> Result<Vec<Value>, ManifestError> {
    match format {
        ManifestFormat::Json => match serde_json::from_str::<Value>(content)? {
            Value::Array(entries) => Ok(entries),
            _ => Err(ManifestError::Shape {
                expected: "a JSON array of objects",
            }),
        },
        ManifestFormat::Toml => {
            let mut document: toml::Table = toml::from_str(content)?;
            match document.remove(TOML_ASSET_KEY) {
                None => Ok(Vec::new()),
                Some(toml::Value::Array(entries)) => Ok(entries.iter().map(toml_to_json).collect()),
                Some(_) => Err(ManifestError::Shape {
                    expected: "a TOML document with an [[asset]] array",
                }),
            }
        }
    }
}

/// TOML values map onto JSON one to one, except datetimes which become text
fn toml_to_json(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::from(*i),
        toml::Value::Float(f) => Value::from(*f),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .iter()
                .map(|(k, v)| (k.clone(), toml_to_json(v)))
                .collect(),
        ),
    }
}
