//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.fruitpunch/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! Everything is resolved once at startup; the service URL stays fixed for
//! the rest of the session.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StudioConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServiceConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub discard_stale_responses: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ExportConfig {
    pub directory: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_SERVICE_URL: &str = crate::transport::http::DEFAULT_SERVICE_URL;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_EXPORT_DIR: &str = ".";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub service_url: String,
    /// `None` when configured as 0 (no client-side timeout).
    pub request_timeout: Option<Duration>,
    pub discard_stale_responses: bool,
    pub export_dir: PathBuf,
    pub log_level: LevelFilter,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub service_url: Option<String>,
    pub export_dir: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.fruitpunch/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".fruitpunch").join("config.toml"))
}

/// Load config from `~/.fruitpunch/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `StudioConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<StudioConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(StudioConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<StudioConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(StudioConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: StudioConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# FruitPunch Studio Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_level = "debug"                 # "error", "warn", "info", "debug", "trace", "off"

# [service]
# base_url = "http://localhost:5000"  # Or set FRUITPUNCH_SERVICE_URL
# request_timeout_secs = 30           # 0 disables the client-side timeout
# discard_stale_responses = false     # true: ignore replies to superseded executions

# [export]
# directory = "."                     # Where Ctrl+S writes file.smia. Or FRUITPUNCH_EXPORT_DIR
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &StudioConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Service URL: CLI → env → config → default
    let service_url = cli
        .service_url
        .clone()
        .or_else(|| std::env::var("FRUITPUNCH_SERVICE_URL").ok())
        .or_else(|| config.service.base_url.clone())
        .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());

    // Export directory: CLI → env → config → default
    let export_dir = cli
        .export_dir
        .clone()
        .or_else(|| std::env::var("FRUITPUNCH_EXPORT_DIR").ok().map(PathBuf::from))
        .or_else(|| config.export.directory.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_DIR));

    let timeout_secs = config
        .service
        .request_timeout_secs
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

    ResolvedConfig {
        service_url,
        request_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        discard_stale_responses: config.service.discard_stale_responses.unwrap_or(false),
        export_dir,
        log_level: parse_log_level(config.general.log_level.as_deref()),
    }
}

fn parse_log_level(level: Option<&str>) -> LevelFilter {
    match level {
        None => DEFAULT_LOG_LEVEL,
        Some(s) => s.parse().unwrap_or_else(|_| {
            warn!("Unknown log level {:?}, using {}", s, DEFAULT_LOG_LEVEL);
            DEFAULT_LOG_LEVEL
        }),
    }
}
