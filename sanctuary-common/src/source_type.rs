//! Sound source categories
//!
//! Every sound asset belongs to exactly one of four high-level origins.
//! Text input is mapped onto the closed variant set once, at the boundary;
//! records only ever hold the variant.

use crate::error::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// High-level category or origin of a sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceType {
    /// Recorded sounds from nature (rain, streams, birds)
    Natural,

    /// Recorded sounds from man-made environments or objects
    Concrete,

    /// Electronically generated waveforms and tones
    Synth,

    /// Melodic or harmonic musical elements
    Music,
}

impl SourceType {
    /// Parse a source type from text
    ///
    /// Matching ignores case and surrounding whitespace:
    /// `"NATURAL"`, `"natural"` and `" Natural "` all map to [`SourceType::Natural`].
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "natural" => Some(SourceType::Natural),
            "concrete" => Some(SourceType::Concrete),
            "synth" => Some(SourceType::Synth),
            "music" => Some(SourceType::Music),
            _ => None,
        }
    }

    /// Canonical storage value
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Natural => "Natural",
            SourceType::Concrete => "Concrete",
            SourceType::Synth => "Synth",
            SourceType::Music => "Music",
        }
    }

    /// Get human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SourceType::Natural => "Natural recording",
            SourceType::Concrete => "Concrete recording",
            SourceType::Synth => "Synthesized",
            SourceType::Music => "Musical",
        }
    }

    /// Get all source type variants
    ///
    /// Useful for UI dropdowns and validation messages
    pub fn all_variants() -> &'static [SourceType] {
        &[
            SourceType::Natural,
            SourceType::Concrete,
            SourceType::Synth,
            SourceType::Music,
        ]
    }

    fn expected_names() -> String {
        Self::all_variants()
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for SourceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            ValidationError::new(
                "source_type",
                format!("{:?} is not one of {}", s, Self::expected_names()),
            )
        })
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SourceType> for String {
    fn from(value: SourceType) -> Self {
        value.as_str().to_string()
    }
}

impl Serialize for SourceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SourceType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
