//! sanctuary-check - Sound asset manifest checker
//!
//! Loads sound asset definitions from a JSON or TOML manifest and runs every
//! entry through the same validation a live record gets.

pub mod check;
pub mod manifest;

pub use check::{check_entries, CheckOptions, EntryError, EntryOutcome, Summary};
pub use manifest::{load_manifest, parse_manifest, ManifestError, ManifestFormat};
