//! Configuration loading and asset root resolution
//!
//! The asset root is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`SANCTUARY_ASSET_ROOT`)
//! 3. TOML config file (`asset_root`)
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing or unreadable config file is never fatal: it is logged and the
//! next source is used.

use crate::asset::SoundAsset;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable overriding the asset root
pub const ASSET_ROOT_ENV_VAR: &str = "SANCTUARY_ASSET_ROOT";

/// Logging section of the TOML config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Append logs to this file instead of stderr
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// TOML configuration file contents
///
/// Every key is optional; an empty file is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Folder that sound asset `file_path`s are relative to
    #[serde(default)]
    pub asset_root: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Parse TOML config text
pub fn parse_toml_config(content: &str) -> Result<TomlConfig> {
    toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML config: {}", e)))
}

/// Read and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_toml_config(&content).map_err(|e| match e {
        Error::Config(msg) => Error::Config(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

/// Per-user config file location (`<config dir>/sanctuary/config.toml`)
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sanctuary").join("config.toml"))
}

/// Compiled-in fallbacks used when no other source provides a value
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub asset_root: PathBuf,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl CompiledDefaults {
    /// Defaults for the platform this binary was built for
    ///
    /// - Linux: `~/.local/share/sanctuary/sounds`
    /// - macOS: `~/Library/Application Support/sanctuary/sounds`
    /// - Windows: `%APPDATA%\sanctuary\sounds`
    pub fn for_current_platform() -> Self {
        let asset_root = dirs::data_dir()
            .map(|d| d.join("sanctuary").join("sounds"))
            .unwrap_or_else(|| PathBuf::from("./sanctuary_data/sounds"));

        Self {
            asset_root,
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

/// How reading the config file went
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigLoad {
    /// Parsed from this file
    Loaded(PathBuf),
    /// No config directory on this platform
    NoLocation,
    /// File does not exist; defaults used
    Missing(PathBuf),
    /// File exists but could not be read or parsed; defaults used
    Failed { path: PathBuf, reason: String },
}

impl ConfigLoad {
    /// True when a config file was expected but defaults were used instead
    pub fn is_degraded(&self) -> bool {
        matches!(self, ConfigLoad::Missing(_) | ConfigLoad::Failed { .. })
    }

    /// Report the outcome: `warn!` when degraded, `debug!` otherwise
    pub fn log(&self) {
        if self.is_degraded() {
            warn!("{}", self);
        } else {
            debug!("{}", self);
        }
    }
}

impl std::fmt::Display for ConfigLoad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigLoad::Loaded(path) => write!(f, "Loaded config from {}", path.display()),
            ConfigLoad::NoLocation => {
                write!(f, "No config file location available, using defaults")
            }
            ConfigLoad::Missing(path) => {
                write!(f, "Config file not found: {} (using defaults)", path.display())
            }
            ConfigLoad::Failed { path, reason } => write!(
                f,
                "Failed to load config file {}: {} (using defaults)",
                path.display(),
                reason
            ),
        }
    }
}

/// Resolves the asset root from CLI, environment, config file and defaults
#[derive(Debug, Clone)]
pub struct AssetRootResolver {
    cli_arg: Option<PathBuf>,
    env_var_name: String,
    config_file: Option<PathBuf>,
}

impl Default for AssetRootResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetRootResolver {
    /// Resolver reading `SANCTUARY_ASSET_ROOT` and the per-user config file
    pub fn new() -> Self {
        Self {
            cli_arg: None,
            env_var_name: ASSET_ROOT_ENV_VAR.to_string(),
            config_file: default_config_file(),
        }
    }

    pub fn with_cli_arg(mut self, path: Option<PathBuf>) -> Self {
        self.cli_arg = path;
        self
    }

    /// Replace the default config file location
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn with_env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var_name = name.into();
        self
    }

    /// Load the config file, degrading to defaults if it is missing or bad
    ///
    /// The outcome is logged immediately. Binaries that install their
    /// subscriber from the loaded config use [`read_config`](Self::read_config)
    /// and log the outcome afterwards.
    pub fn load_config(&self) -> TomlConfig {
        let (config, outcome) = self.read_config();
        outcome.log();
        config
    }

    /// Load the config file without logging, returning what happened
    pub fn read_config(&self) -> (TomlConfig, ConfigLoad) {
        let Some(path) = &self.config_file else {
            return (TomlConfig::default(), ConfigLoad::NoLocation);
        };

        if !path.exists() {
            return (TomlConfig::default(), ConfigLoad::Missing(path.clone()));
        }

        match load_toml_config(path) {
            Ok(config) => (config, ConfigLoad::Loaded(path.clone())),
            Err(e) => (
                TomlConfig::default(),
                ConfigLoad::Failed {
                    path: path.clone(),
                    reason: e.to_string(),
                },
            ),
        }
    }

    /// Resolve the asset root; always yields a path
    pub fn resolve(&self) -> PathBuf {
        self.resolve_with(&self.load_config())
    }

    /// Resolve against an already loaded config
    pub fn resolve_with(&self, config: &TomlConfig) -> PathBuf {
        // Priority 1: Command-line argument
        if let Some(path) = &self.cli_arg {
            info!("Asset root from command line: {}", path.display());
            return path.clone();
        }

        // Priority 2: Environment variable
        if let Ok(path) = std::env::var(&self.env_var_name) {
            if !path.trim().is_empty() {
                info!("Asset root from {}: {}", self.env_var_name, path);
                return PathBuf::from(path);
            }
        }

        // Priority 3: TOML config file
        if let Some(path) = &config.asset_root {
            info!("Asset root from config file: {}", path.display());
            return path.clone();
        }

        // Priority 4: OS-dependent compiled default
        let path = CompiledDefaults::for_current_platform().asset_root;
        info!("Asset root from compiled default: {}", path.display());
        path
    }
}

/// Join a record's relative file path under the asset root
///
/// Absolute paths and `..` components are rejected so a record can never
/// point outside the root.
pub fn resolve_asset_path(root: &Path, asset: &SoundAsset) -> Result<PathBuf> {
    resolve_relative(root, asset.file_path())
}

/// Join a relative path under `root`, rejecting escapes
pub fn resolve_relative(root: &Path, relative: &str) -> Result<PathBuf> {
    let relative = Path::new(relative);
    let mut resolved = root.to_path_buf();

    for component in relative.components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                return Err(Error::InvalidInput(format!(
                    "file path {} escapes the asset root",
                    relative.display()
                )))
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(Error::InvalidInput(format!(
                    "file path {} must be relative to the asset root",
                    relative.display()
                )))
            }
        }
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_toml_config(
            r#"
            asset_root = "/srv/sanctuary/sounds"

            [logging]
            level = "debug"
            file = "/var/log/sanctuary.log"
            "#,
        )
        .unwrap();

        assert_eq!(config.asset_root, Some(PathBuf::from("/srv/sanctuary/sounds")));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("/var/log/sanctuary.log")));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_toml_config("").unwrap();
        assert_eq!(config, TomlConfig::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let err = parse_toml_config("asset_root = [1, 2").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_resolve_relative_joins_under_root() {
        let root = Path::new("/srv/sounds");
        assert_eq!(
            resolve_relative(root, "natural/streams/loop.wav").unwrap(),
            PathBuf::from("/srv/sounds/natural/streams/loop.wav")
        );
        assert_eq!(
            resolve_relative(root, "./synth/drone.ogg").unwrap(),
            PathBuf::from("/srv/sounds/synth/drone.ogg")
        );
    }

    #[test]
    fn test_resolve_relative_rejects_escapes() {
        let root = Path::new("/srv/sounds");
        assert!(matches!(
            resolve_relative(root, "../etc/passwd"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            resolve_relative(root, "natural/../../x.wav"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            resolve_relative(root, "/etc/passwd"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_cli_arg_wins_over_config() {
        let config = TomlConfig {
            asset_root: Some(PathBuf::from("/from/toml")),
            ..TomlConfig::default()
        };
        let resolver = AssetRootResolver::new()
            .with_env_var("SANCTUARY_TEST_UNSET_VAR")
            .with_cli_arg(Some(PathBuf::from("/from/cli")));

        assert_eq!(resolver.resolve_with(&config), PathBuf::from("/from/cli"));
    }
}
