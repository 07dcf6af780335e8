//! Persisted representation of a sound asset
//!
//! [`SoundAssetRow`] is the flat, storage-friendly shape used only at the
//! storage boundary. Identifier, source type and path are plain strings and
//! tags are a JSON array. The mapping to and from [`SoundAsset`] is pure.

use super::{fields, SoundAsset};
use crate::db::table_schemas::{
    DESCRIPTION_MAX_LEN, FILE_PATH_MAX_LEN, ID_LEN, NAME_MAX_LEN, SOURCE_TYPE_MAX_LEN,
};
use crate::error::{DeserializationError, Error, Result, ValidationError};
use crate::source_type::SourceType;
use crate::tags::normalize_tag_values;
use crate::uuid_utils;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

/// A row from the `sound_assets` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SoundAssetRow {
    pub id: String,
    pub name: String,
    pub source_type: String,
    pub file_path: String,
    pub duration_ms: Option<i64>,
    pub description: Option<String>,
    /// JSON array; NULL reads as no tags
    pub tags: Option<Value>,
    #[serde(default)]
    pub loopable: bool,
    #[serde(default = "default_volume")]
    pub default_volume: f64,
    /// Free-form JSON owned by storage; never populated or checked here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

fn default_volume() -> f64 {
    fields::DEFAULT_VOLUME
}

impl SoundAssetRow {
    /// Check every bounded text column against its declared length
    ///
    /// Lets a storage collaborator reject a row before writing it. Lengths
    /// are counted in characters.
    pub fn check_column_bounds(&self) -> Result<()> {
        let bounded: [(&str, Option<&str>, usize); 5] = [
            ("id", Some(self.id.as_str()), ID_LEN),
            ("name", Some(self.name.as_str()), NAME_MAX_LEN),
            ("source_type", Some(self.source_type.as_str()), SOURCE_TYPE_MAX_LEN),
            ("file_path", Some(self.file_path.as_str()), FILE_PATH_MAX_LEN),
            ("description", self.description.as_deref(), DESCRIPTION_MAX_LEN),
        ];

        for (column, value, max_len) in bounded {
            if let Some(value) = value {
                let len = value.chars().count();
                if len > max_len {
                    return Err(Error::InvalidInput(format!(
                        "{} is {} characters, column allows {}",
                        column, len, max_len
                    )));
                }
            }
        }
        Ok(())
    }
}

impl SoundAsset {
    /// Flatten into the persisted representation
    pub fn to_row(&self) -> SoundAssetRow {
        SoundAssetRow {
            id: uuid_utils::to_db_string(&self.id),
            name: self.name.clone(),
            source_type: self.source_type.as_str().to_string(),
            file_path: self.file_path.clone(),
            duration_ms: Some(self.duration_ms),
            description: self.description.clone(),
            tags: Some(Value::Array(
                self.tags.iter().cloned().map(Value::String).collect(),
            )),
            loopable: self.loopable,
            default_volume: self.default_volume,
            metadata: None,
        }
    }

    /// Load a stored row, applying the same rules as construction
    ///
    /// Any failure is a [`DeserializationError`]: the fault lies with data
    /// that was trusted once, not with fresh input.
    pub fn from_row(row: SoundAssetRow) -> std::result::Result<Self, DeserializationError> {
        let row_id = row.id.clone();
        load_row(row).map_err(|e| {
            error!("Failed to load sound asset row '{}': {}", row_id, e);
            e
        })
    }
}

fn load_row(row: SoundAssetRow) -> std::result::Result<SoundAsset, DeserializationError> {
    let id = uuid_utils::parse_db_string(&row.id)
        .ok_or_else(|| DeserializationError::InvalidId { value: row.id.clone() })?;
    let source_type = SourceType::parse(&row.source_type).ok_or_else(|| {
        DeserializationError::InvalidSourceType {
            value: row.source_type.clone(),
        }
    })?;
    let duration_ms = row
        .duration_ms
        .ok_or(DeserializationError::MissingField { field: "duration_ms" })?;
    let tags = stored_tags(row.tags)?;

    validate_stored(
        id,
        &row.name,
        source_type,
        &row.file_path,
        duration_ms,
        row.description,
        tags,
        row.loopable,
        row.default_volume,
    )
    .map_err(DeserializationError::Invalid)
}

#[allow(clippy::too_many_arguments)]
fn validate_stored(
    id: uuid::Uuid,
    name: &str,
    source_type: SourceType,
    file_path: &str,
    duration_ms: i64,
    description: Option<String>,
    tags: Vec<String>,
    loopable: bool,
    default_volume: f64,
) -> std::result::Result<SoundAsset, ValidationError> {
    Ok(SoundAsset {
        id,
        name: fields::validate_name(name)?,
        source_type,
        file_path: fields::validate_file_path(file_path)?,
        duration_ms: fields::validate_duration_ms(duration_ms)?,
        description,
        tags,
        loopable,
        default_volume: fields::validate_default_volume(default_volume)?,
    })
}

/// Decode the tags column
///
/// Some drivers hand JSON columns back as text, so a string holding a JSON
/// array is accepted too.
fn stored_tags(tags: Option<Value>) -> std::result::Result<Vec<String>, DeserializationError> {
    match tags {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(normalize_tag_values(&items)),
        Some(Value::String(text)) => serde_json::from_str::<Vec<Value>>(&text)
            .map(|items| normalize_tag_values(&items))
            .map_err(|e| DeserializationError::InvalidTags {
                reason: format!("text is not a JSON array: {}", e),
            }),
        Some(other) => Err(DeserializationError::InvalidTags {
            reason: format!("expected a JSON array, got {}", fields::type_name(&other)),
        }),
    }
}

impl From<&SoundAsset> for SoundAssetRow {
    fn from(asset: &SoundAsset) -> Self {
        asset.to_row()
    }
}

impl TryFrom<SoundAssetRow> for SoundAsset {
    type Error = DeserializationError;

    fn try_from(row: SoundAssetRow) -> std::result::Result<Self, Self::Error> {
        SoundAsset::from_row(row)
    }
}
