//! # Sound Sanctuary Common Library
//!
//! Shared code for Sound Sanctuary tools including:
//! - The sound asset record and its validation rules
//! - Tag normalization and source type parsing
//! - The persisted row representation and table column contract
//! - Configuration loading and logging setup
//! - Utility functions

pub mod asset;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod source_type;
pub mod tags;
pub mod uuid_utils;

pub use asset::{NewSoundAsset, SoundAsset, SoundAssetRow, UpdateSoundAsset};
pub use error::{DeserializationError, Error, Result, ValidationError};
pub use source_type::SourceType;
