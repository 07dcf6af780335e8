//! Storage-side contract for sound assets

pub mod table_schemas;

pub use table_schemas::*;
