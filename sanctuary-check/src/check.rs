//! Per-entry validation of manifest contents

use sanctuary_common::asset::fields::type_name;
use sanctuary_common::config::resolve_asset_path;
use sanctuary_common::{SoundAsset, ValidationError};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

/// Why a manifest entry was rejected
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("expected an object, got {0}")]
    NotAnObject(&'static str),

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("id {id} already used by entry {first}")]
    DuplicateId { id: Uuid, first: usize },

    #[error(transparent)]
    Path(sanctuary_common::Error),

    #[error("file not found: {}", .0.display())]
    MissingFile(PathBuf),
}

#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Root that record file paths are resolved against
    pub asset_root: PathBuf,
    /// Require every resolved file to exist
    pub verify_files: bool,
}

/// Result for one manifest entry; `index` is 1-based
#[derive(Debug)]
pub struct EntryOutcome {
    pub index: usize,
    pub result: Result<SoundAsset, EntryError>,
}

/// Validate every entry in manifest order
pub fn check_entries(entries: &[Value], options: &CheckOptions) -> Vec<EntryOutcome> {
    let mut seen: HashMap<Uuid, usize> = HashMap::new();

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let index = i + 1;
            let result = check_entry(entry, options).and_then(|asset| {
                match seen.get(&asset.id()) {
                    Some(&first) => Err(EntryError::DuplicateId { id: asset.id(), first }),
                    None => {
                        seen.insert(asset.id(), index);
                        Ok(asset)
                    }
                }
            });

            match &result {
                Ok(asset) => debug!("Entry {} valid: {} ({})", index, asset.name(), asset.id()),
                Err(e) => warn!("Entry {} rejected: {}", index, e),
            }
            EntryOutcome { index, result }
        })
        .collect()
}

/// Validate a single entry
pub fn check_entry(entry: &Value, options: &CheckOptions) -> Result<SoundAsset, EntryError> {
    let fields = entry
        .as_object()
        .ok_or_else(|| EntryError::NotAnObject(type_name(entry)))?;
    let asset = SoundAsset::from_fields(fields)?;

    let path = resolve_asset_path(&options.asset_root, &asset).map_err(EntryError::Path)?;
    if options.verify_files && !path.is_file() {
        return Err(EntryError::MissingFile(path));
    }

    Ok(asset)
}

/// Totals over a set of outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

impl Summary {
    pub fn from_outcomes(outcomes: &[EntryOutcome]) -> Self {
        let valid = outcomes.iter().filter(|o| o.result.is_ok()).count();
        Self {
            total: outcomes.len(),
            valid,
            invalid: outcomes.len() - valid,
        }
    }

    pub fn all_valid(&self) -> bool {
        self.invalid == 0
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} entries: {} valid, {} invalid",
            self.total, self.valid, self.invalid
        )
    }
}
