//! Configuration loading and resolution
//!
//! Config file resolution follows this priority order:
//! 1. Command-line `--config` path (highest priority)
//! 2. `STATLINE_CONFIG` environment variable
//! 3. Platform config directory (`~/.config/statline/config.toml` on Linux)
//! 4. Compiled defaults (fallback)
//!
//! A missing or malformed file never stops startup: it is logged and the
//! compiled defaults are used instead. Individual values in the file can
//! still be overridden by command-line arguments in the server binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{Error, Result};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "STATLINE_CONFIG";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Interface the HTTP server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(config)
}

/// Platform default config file location, if the platform has one
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("statline").join("config.toml"))
}

/// Find the config file to use, without reading it
///
/// Explicit sources (CLI, environment) are returned even if the file does
/// not exist, so the caller can report it; the platform default is only
/// returned when present.
pub fn locate_config_file(cli_path: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_path {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: Platform config directory
    default_config_path().filter(|p| p.exists())
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// No config file was found
    Defaults,
    /// Values were read from this file
    File(PathBuf),
    /// This file was found but could not be used
    Fallback { path: PathBuf, reason: String },
}

/// Effective configuration plus its provenance, for startup logging
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: TomlConfig,
    pub source: ConfigSource,
}

/// Resolve the effective bootstrap configuration
///
/// Never fails: problems with the file degrade to compiled defaults and are
/// reported through [`ConfigSource::Fallback`]. Nothing is logged here since
/// this normally runs before the tracing subscriber exists.
pub fn resolve_config(cli_path: Option<&Path>) -> ResolvedConfig {
    let Some(path) = locate_config_file(cli_path) else {
        return ResolvedConfig {
            config: TomlConfig::default(),
            source: ConfigSource::Defaults,
        };
    };

    match load_toml_config(&path) {
        Ok(config) => ResolvedConfig {
            config,
            source: ConfigSource::File(path),
        },
        Err(e) => ResolvedConfig {
            config: TomlConfig::default(),
            source: ConfigSource::Fallback {
                path,
                reason: e.to_string(),
            },
        },
    }
}

impl ResolvedConfig {
    /// Report where the configuration came from
    pub fn log_source(&self) {
        match &self.source {
            ConfigSource::Defaults => info!("No config file found, using compiled defaults"),
            ConfigSource::File(path) => info!("Loaded config from {}", path.display()),
            ConfigSource::Fallback { path, reason } => {
                warn!("Ignoring config file {}: {}; using compiled defaults", path.display(), reason)
            }
        }
    }
}

/// Reject configurations the server cannot start with
pub fn validate_config(config: &TomlConfig) -> Result<()> {
    if config.bind_addr.trim().is_empty() {
        return Err(Error::Config("bind_addr cannot be empty".to_string()));
    }
    if config.port == 0 {
        return Err(Error::Config("port must be non-zero".to_string()));
    }
    Ok(())
}
