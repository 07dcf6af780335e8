//! Request payloads for creating and patching sound assets

use crate::tags::text_entries;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

/// Proposed field values for a new sound asset
///
/// Nothing here is trusted; [`SoundAsset::new`](super::SoundAsset::new)
/// validates every field. Required fields are still `Option` so that absence
/// is reported as a validation failure instead of a decode error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewSoundAsset {
    /// Generated when absent
    pub id: Option<Uuid>,
    pub name: Option<String>,
    /// Variant name in any casing
    pub source_type: Option<String>,
    pub file_path: Option<String>,
    pub duration_ms: Option<i64>,
    pub description: Option<String>,
    /// Non-text entries in a decoded payload are dropped
    #[serde(deserialize_with = "tag_list")]
    pub tags: Vec<String>,
    pub loopable: Option<bool>,
    pub default_volume: Option<f64>,
}

impl NewSoundAsset {
    /// Proposal carrying the four required fields
    pub fn new(
        name: impl Into<String>,
        source_type: impl Into<String>,
        file_path: impl Into<String>,
        duration_ms: i64,
    ) -> Self {
        Self {
            name: Some(name.into()),
            source_type: Some(source_type.into()),
            file_path: Some(file_path.into()),
            duration_ms: Some(duration_ms),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_loopable(mut self, loopable: bool) -> Self {
        self.loopable = Some(loopable);
        self
    }

    pub fn with_default_volume(mut self, volume: f64) -> Self {
        self.default_volume = Some(volume);
        self
    }
}

/// Patch for an existing sound asset (all fields optional)
///
/// Applied all-or-nothing by
/// [`SoundAsset::apply_update`](super::SoundAsset::apply_update).
/// The identifier is not patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateSoundAsset {
    pub name: Option<String>,
    pub source_type: Option<String>,
    pub file_path: Option<String>,
    pub duration_ms: Option<i64>,
    pub description: Option<String>,
    #[serde(deserialize_with = "optional_tag_list")]
    pub tags: Option<Vec<String>>,
    pub loopable: Option<bool>,
    pub default_volume: Option<f64>,
}

impl UpdateSoundAsset {
    /// True when the patch would change nothing
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Decode tags the way raw field input treats them: a list keeps its text
/// entries, a lone string is one tag, anything else contributes nothing
fn tags_from_raw(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => text_entries(&items),
        Value::String(tag) => vec![tag],
        Value::Null => Vec::new(),
        other => {
            debug!("Ignoring tags value {}", other);
            Vec::new()
        }
    }
}

fn tag_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Value::deserialize(deserializer).map(tags_from_raw)
}

/// `null` leaves the tags untouched
fn optional_tag_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => Ok(Some(tags_from_raw(value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::SoundAsset;
    use serde_json::json;

    #[test]
    fn test_decoded_tags_drop_non_text_entries() {
        let input: NewSoundAsset = serde_json::from_value(json!({
            "name": "Rain",
            "source_type": "natural",
            "file_path": "natural/rain.wav",
            "duration_ms": 1000,
            "tags": ["Rain", 5, null, "calm"]
        }))
        .unwrap();
        assert_eq!(input.tags, vec!["Rain", "calm"]);

        let asset = SoundAsset::new(input).unwrap();
        assert_eq!(asset.tags(), ["calm", "rain"]);
    }

    #[test]
    fn test_decoded_tags_other_shapes() {
        let input: NewSoundAsset = serde_json::from_value(json!({"tags": "Wind"})).unwrap();
        assert_eq!(input.tags, vec!["Wind"]);

        let input: NewSoundAsset = serde_json::from_value(json!({"tags": 7})).unwrap();
        assert!(input.tags.is_empty());

        let input: NewSoundAsset = serde_json::from_value(json!({"name": "Rain"})).unwrap();
        assert!(input.tags.is_empty());
    }

    #[test]
    fn test_update_tags_decoding() {
        let update: UpdateSoundAsset =
            serde_json::from_value(json!({"tags": ["Birds", {"x": 1}]})).unwrap();
        assert_eq!(update.tags, Some(vec!["Birds".to_string()]));

        let update: UpdateSoundAsset = serde_json::from_value(json!({"tags": null})).unwrap();
        assert_eq!(update.tags, None);
        assert!(update.is_empty());

        let update: UpdateSoundAsset = serde_json::from_value(json!({"name": "x"})).unwrap();
        assert_eq!(update.tags, None);
    }
}
