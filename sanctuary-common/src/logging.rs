//! Tracing subscriber setup shared by the binaries
//!
//! `RUST_LOG` always wins; otherwise the configured level applies to the
//! listed crates and everything else logs at `warn`.

use crate::config::LoggingConfig;
use crate::{Error, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build filter directives giving `level` to each crate, `warn` elsewhere
///
/// Crate names may be given with hyphens; they are converted to the
/// underscore form used as tracing targets.
pub fn default_directives(crates: &[&str], level: &str) -> String {
    let mut directives = vec!["warn".to_string()];
    directives.extend(
        crates
            .iter()
            .map(|name| format!("{}={}", name.replace('-', "_"), level)),
    );
    directives.join(",")
}

/// Install the global subscriber
///
/// Logs go to stderr, or are appended to `config.file` (without ANSI colors)
/// when one is set. Fails if a subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig, crates: &[&str]) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directives(crates, &config.level))
            .map_err(|e| Error::Config(format!("Invalid log level {:?}: {}", config.level, e)))?,
    };

    let file_layer = match &config.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };
    let stderr_layer = if file_layer.is_none() {
        Some(fmt::layer().with_writer(std::io::stderr))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to install tracing subscriber: {}", e)))
}
