//! Sound asset record
//!
//! A [`SoundAsset`] describes one reusable audio clip. Every field is private
//! and every write goes through the same per-field rule that applies at
//! construction (see [`fields`]), so no instance ever violates:
//!
//! - `duration_ms > 0`
//! - `0.0 <= default_volume <= 1.0`
//! - `tags` unique, lowercase, non-blank and sorted
//! - `source_type` one of the [`SourceType`] variants
//! - `name` never blank
//!
//! # Usage
//!
//! ```rust
//! use sanctuary_common::asset::{NewSoundAsset, SoundAsset};
//! use sanctuary_common::SourceType;
//!
//! let mut asset = SoundAsset::new(
//!     NewSoundAsset::new("Gentle Stream Loop", "natural", "natural/streams/loop.wav", 45000)
//!         .with_tags(["Nature", "Water", "nature"])
//!         .with_default_volume(0.85),
//! )?;
//! assert_eq!(asset.source_type(), SourceType::Natural);
//! assert_eq!(asset.tags(), ["nature", "water"]);
//!
//! // Invalid assignment fails and leaves the record untouched
//! assert!(asset.set_duration_ms(0).is_err());
//! assert_eq!(asset.duration_ms(), 45000);
//! # Ok::<(), sanctuary_common::ValidationError>(())
//! ```

pub mod fields;
mod input;
mod row;

pub use input::{NewSoundAsset, UpdateSoundAsset};
pub use row::SoundAssetRow;

use crate::error::ValidationError;
use crate::source_type::SourceType;
use crate::tags::normalize_tags;
use crate::uuid_utils;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use uuid::Uuid;

/// A validated sound asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SoundAssetRow")]
pub struct SoundAsset {
    id: Uuid,
    name: String,
    source_type: SourceType,
    file_path: String,
    duration_ms: i64,
    description: Option<String>,
    tags: Vec<String>,
    loopable: bool,
    default_volume: f64,
}

impl SoundAsset {
    /// Validate a proposal and build the record
    ///
    /// Fields are checked in declaration order and the first violation is
    /// returned. The identifier is generated when the proposal has none.
    pub fn new(input: NewSoundAsset) -> Result<Self, ValidationError> {
        let id = input.id.unwrap_or_else(uuid_utils::generate);

        let name = fields::validate_name(require("name", input.name.as_deref())?)?;
        let source_type =
            fields::validate_source_type(require("source_type", input.source_type.as_deref())?)?;
        let file_path = fields::validate_file_path(require("file_path", input.file_path.as_deref())?)?;
        let duration_ms = fields::validate_duration_ms(
            input
                .duration_ms
                .ok_or_else(|| ValidationError::new("duration_ms", "is required"))?,
        )?;
        let tags = normalize_tags(&input.tags);
        let default_volume = fields::validate_default_volume(
            input.default_volume.unwrap_or(fields::DEFAULT_VOLUME),
        )?;

        Ok(Self {
            id,
            name,
            source_type,
            file_path,
            duration_ms,
            description: input.description,
            tags,
            loopable: input.loopable.unwrap_or(false),
            default_volume,
        })
    }

    /// Validate a raw field mapping and build the record
    ///
    /// Accepts the loosely typed input of form handlers and import scripts.
    /// A value of the wrong JSON type fails for its field, except `tags`,
    /// whose non-text entries are dropped. Unknown keys are ignored.
    pub fn from_fields(raw: &serde_json::Map<String, Value>) -> Result<Self, ValidationError> {
        let id = match fields::optional(raw, "id") {
            Some(value) => fields::id_from_value(value)?,
            None => uuid_utils::generate(),
        };
        let name = fields::name_from_value(fields::required(raw, "name")?)?;
        let source_type = fields::source_type_from_value(fields::required(raw, "source_type")?)?;
        let file_path = fields::file_path_from_value(fields::required(raw, "file_path")?)?;
        let duration_ms = fields::duration_ms_from_value(fields::required(raw, "duration_ms")?)?;
        let description = match fields::optional(raw, "description") {
            Some(value) => fields::description_from_value(value)?,
            None => None,
        };
        let tags = fields::optional(raw, "tags")
            .map(fields::tags_from_value)
            .unwrap_or_default();
        let loopable = match fields::optional(raw, "loopable") {
            Some(value) => fields::loopable_from_value(value)?,
            None => false,
        };
        let default_volume = match fields::optional(raw, "default_volume") {
            Some(value) => fields::default_volume_from_value(value)?,
            None => fields::DEFAULT_VOLUME,
        };

        Ok(Self {
            id,
            name,
            source_type,
            file_path,
            duration_ms,
            description,
            tags,
            loopable,
            default_volume,
        })
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_type(&self) -> SourceType {
        self.source_type
    }

    /// Path relative to the asset root; never resolved by the record
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn duration_ms(&self) -> i64 {
        self.duration_ms
    }

    /// Duration as a [`Duration`]
    pub fn duration(&self) -> Duration {
        // duration_ms is always positive
        Duration::from_millis(self.duration_ms.unsigned_abs())
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Normalized tags (unique, lowercase, sorted)
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn loopable(&self) -> bool {
        self.loopable
    }

    pub fn default_volume(&self) -> f64 {
        self.default_volume
    }

    // -----------------------------------------------------------------------
    // Validated assignment
    // -----------------------------------------------------------------------

    pub fn set_name(&mut self, name: impl AsRef<str>) -> Result<(), ValidationError> {
        self.name = fields::validate_name(name.as_ref())?;
        Ok(())
    }

    pub fn set_source_type(&mut self, source_type: SourceType) {
        self.source_type = source_type;
    }

    /// Parse and assign a source type given as text (any casing)
    pub fn set_source_type_str(&mut self, source_type: &str) -> Result<(), ValidationError> {
        self.source_type = fields::validate_source_type(source_type)?;
        Ok(())
    }

    pub fn set_file_path(&mut self, file_path: impl AsRef<str>) -> Result<(), ValidationError> {
        self.file_path = fields::validate_file_path(file_path.as_ref())?;
        Ok(())
    }

    pub fn set_duration_ms(&mut self, duration_ms: i64) -> Result<(), ValidationError> {
        self.duration_ms = fields::validate_duration_ms(duration_ms)?;
        Ok(())
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Replace the tag list; the new tags are normalized
    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = normalize_tags(tags);
    }

    pub fn set_loopable(&mut self, loopable: bool) {
        self.loopable = loopable;
    }

    pub fn set_default_volume(&mut self, volume: f64) -> Result<(), ValidationError> {
        self.default_volume = fields::validate_default_volume(volume)?;
        Ok(())
    }

    /// Assign a raw value to a field by name
    ///
    /// Runs the same rule as [`SoundAsset::from_fields`] for that field.
    /// The identifier is immutable and unknown field names are rejected.
    pub fn assign(&mut self, field: &str, value: &Value) -> Result<(), ValidationError> {
        match field {
            "id" => return Err(ValidationError::new("id", "is immutable after creation")),
            "name" => self.name = fields::name_from_value(present("name", value)?)?,
            "source_type" => {
                self.source_type = fields::source_type_from_value(present("source_type", value)?)?
            }
            "file_path" => self.file_path = fields::file_path_from_value(present("file_path", value)?)?,
            "duration_ms" => {
                self.duration_ms = fields::duration_ms_from_value(present("duration_ms", value)?)?
            }
            "description" => self.description = fields::description_from_value(value)?,
            "tags" => self.tags = fields::tags_from_value(value),
            "loopable" => self.loopable = fields::loopable_from_value(present("loopable", value)?)?,
            "default_volume" => {
                self.default_volume = fields::default_volume_from_value(present("default_volume", value)?)?
            }
            other => {
                return Err(ValidationError::new(
                    "field",
                    format!("unknown field {:?}, expected one of {}", other, fields::FIELD_NAMES.join(", ")),
                ))
            }
        }
        Ok(())
    }

    /// Apply a patch, all-or-nothing
    ///
    /// Every provided field is validated first; the record changes only if
    /// all of them pass.
    pub fn apply_update(&mut self, update: UpdateSoundAsset) -> Result<(), ValidationError> {
        let mut next = self.clone();

        if let Some(name) = update.name {
            next.set_name(name)?;
        }
        if let Some(source_type) = update.source_type {
            next.set_source_type_str(&source_type)?;
        }
        if let Some(file_path) = update.file_path {
            next.set_file_path(file_path)?;
        }
        if let Some(duration_ms) = update.duration_ms {
            next.set_duration_ms(duration_ms)?;
        }
        if let Some(description) = update.description {
            next.set_description(Some(description));
        }
        if let Some(tags) = update.tags {
            next.set_tags(tags);
        }
        if let Some(loopable) = update.loopable {
            next.set_loopable(loopable);
        }
        if let Some(volume) = update.default_volume {
            next.set_default_volume(volume)?;
        }

        *self = next;
        Ok(())
    }

    /// Indented JSON dump of the record
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn present<'a>(field: &'static str, value: &'a Value) -> Result<&'a Value, ValidationError> {
    if value.is_null() {
        return Err(ValidationError::new(field, "is required"));
    }
    Ok(value)
}

fn require<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, ValidationError> {
    value.ok_or_else(|| ValidationError::new(field, "is required"))
}
