//! Table Schema Definitions
//!
//! Single source of truth for the storage-side column contract of sound
//! assets. Each struct declares the expected schema for one table; the
//! declarations are plain data and never touch a connection.
//!
//! # Usage
//!
//! ```rust
//! use sanctuary_common::db::{create_table_sql, SoundAssetsTableSchema};
//!
//! let ddl = create_table_sql::<SoundAssetsTableSchema>();
//! assert!(ddl.starts_with("CREATE TABLE IF NOT EXISTS sound_assets"));
//! ```

/// Length of a hyphenated UUID key
pub const ID_LEN: usize = 36;
/// Display-name bound
pub const NAME_MAX_LEN: usize = 150;
/// Source type column bound
pub const SOURCE_TYPE_MAX_LEN: usize = 50;
/// Relative path bound
pub const FILE_PATH_MAX_LEN: usize = 512;
/// Description bound
pub const DESCRIPTION_MAX_LEN: usize = 1024;

/// Column definition with SQL constraints
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    /// Column name
    pub name: String,
    /// SQL type (e.g., "TEXT", "INTEGER", "REAL", "JSON")
    pub sql_type: String,
    /// NOT NULL constraint
    pub not_null: bool,
    /// PRIMARY KEY constraint
    pub primary_key: bool,
    /// UNIQUE constraint
    pub unique: bool,
    /// DEFAULT value (SQL literal)
    pub default_value: Option<String>,
    /// Maximum length in characters, for bounded text columns
    pub max_len: Option<usize>,
}

impl ColumnDefinition {
    /// Create new column definition
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            not_null: false,
            primary_key: false,
            unique: false,
            default_value: None,
            max_len: None,
        }
    }

    /// Bounded text column rendered as `VARCHAR(len)`
    pub fn varchar(name: impl Into<String>, max_len: usize) -> Self {
        let mut column = Self::new(name, format!("VARCHAR({})", max_len));
        column.max_len = Some(max_len);
        column
    }

    /// Fixed-length text column rendered as `CHAR(len)`
    pub fn fixed_char(name: impl Into<String>, len: usize) -> Self {
        let mut column = Self::new(name, format!("CHAR({})", len));
        column.max_len = Some(len);
        column
    }

    /// Mark column as PRIMARY KEY
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Mark column as NOT NULL
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Mark column as UNIQUE
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Set DEFAULT value
    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Render the column clause of a CREATE TABLE statement
    pub fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.sql_type);
        if self.primary_key {
            sql.push_str(" PRIMARY KEY");
        }
        if self.not_null {
            sql.push_str(" NOT NULL");
        }
        if self.unique {
            sql.push_str(" UNIQUE");
        }
        if let Some(default) = &self.default_value {
            sql.push_str(" DEFAULT ");
            sql.push_str(default);
        }
        sql
    }
}

/// Defines expected schema for a database table
pub trait TableSchema {
    /// Table name in database
    fn table_name() -> &'static str;

    /// Expected column definitions (order matters for new table creation)
    fn expected_columns() -> Vec<ColumnDefinition>;

    /// Look up one column by name
    fn column(name: &str) -> Option<ColumnDefinition> {
        Self::expected_columns().into_iter().find(|c| c.name == name)
    }
}

/// Render `CREATE TABLE IF NOT EXISTS` for a schema
pub fn create_table_sql<T: TableSchema>() -> String {
    let columns: Vec<String> = T::expected_columns()
        .iter()
        .map(|c| format!("    {}", c.to_sql()))
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
        T::table_name(),
        columns.join(",\n")
    )
}

/// Sound assets table schema
///
/// Mirrors [`SoundAssetRow`](crate::asset::SoundAssetRow) column for column.
pub struct SoundAssetsTableSchema;

impl TableSchema for SoundAssetsTableSchema {
    fn table_name() -> &'static str {
        "sound_assets"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::fixed_char("id", ID_LEN)
                .primary_key(),

            ColumnDefinition::varchar("name", NAME_MAX_LEN)
                .not_null(),

            // Canonical variant name, e.g. 'Natural'
            ColumnDefinition::varchar("source_type", SOURCE_TYPE_MAX_LEN)
                .not_null(),

            ColumnDefinition::varchar("file_path", FILE_PATH_MAX_LEN)
                .not_null(),

            // Nullable in storage; a NULL fails on load
            ColumnDefinition::new("duration_ms", "INTEGER"),

            ColumnDefinition::varchar("description", DESCRIPTION_MAX_LEN),

            // JSON array of normalized tags
            ColumnDefinition::new("tags", "JSON")
                .default("'[]'"),

            ColumnDefinition::new("loopable", "BOOLEAN")
                .not_null()
                .default("0"),

            ColumnDefinition::new("default_volume", "REAL")
                .not_null()
                .default("1.0"),

            // Free-form, owned by storage collaborators
            ColumnDefinition::new("metadata", "JSON"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_assets_table_schema_definition() {
        let columns = SoundAssetsTableSchema::expected_columns();

        assert!(columns.iter().any(|c| c.name == "id" && c.primary_key && c.max_len == Some(36)));
        assert!(columns.iter().any(|c| c.name == "name" && c.not_null && c.max_len == Some(150)));
        assert!(columns.iter().any(|c| c.name == "source_type" && c.not_null));
        assert!(columns.iter().any(|c| c.name == "file_path" && c.not_null && c.max_len == Some(512)));
        assert!(columns.iter().any(|c| c.name == "duration_ms" && !c.not_null));
        assert!(columns.iter().any(|c| c.name == "tags" && !c.not_null));
        assert!(columns.iter().any(|c| c.name == "metadata" && !c.not_null));
        assert_eq!(columns.len(), 10);
    }

    #[test]
    fn test_defaults_match_record_defaults() {
        let volume = SoundAssetsTableSchema::column("default_volume").unwrap();
        assert!(volume.not_null);
        assert_eq!(volume.default_value.as_deref(), Some("1.0"));

        let tags = SoundAssetsTableSchema::column("tags").unwrap();
        assert_eq!(tags.default_value.as_deref(), Some("'[]'"));

        let loopable = SoundAssetsTableSchema::column("loopable").unwrap();
        assert_eq!(loopable.default_value.as_deref(), Some("0"));
    }

    #[test]
    fn test_column_to_sql() {
        let column = ColumnDefinition::varchar("name", 150).not_null().unique();
        assert_eq!(column.to_sql(), "name VARCHAR(150) NOT NULL UNIQUE");

        let column = ColumnDefinition::new("default_volume", "REAL").not_null().default("1.0");
        assert_eq!(column.to_sql(), "default_volume REAL NOT NULL DEFAULT 1.0");
    }

    #[test]
    fn test_create_table_sql() {
        let sql = create_table_sql::<SoundAssetsTableSchema>();
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS sound_assets (\n"));
        assert!(sql.contains("    id CHAR(36) PRIMARY KEY,\n"));
        assert!(sql.contains("    tags JSON DEFAULT '[]',\n"));
        assert!(sql.ends_with("    metadata JSON\n)"));
    }

    #[test]
    fn test_unknown_column() {
        assert!(SoundAssetsTableSchema::column("nope").is_none());
    }
}
