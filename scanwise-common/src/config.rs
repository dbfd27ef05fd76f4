//! Configuration loading for Scanwise services
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (applied by the binary, highest priority)
//! 2. Environment variable (`SCANWISE_*`)
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Default listen port for the scan-resolution service
pub const DEFAULT_PORT: u16 = 5780;

/// Default Open Food Facts API base URL
pub const DEFAULT_OFF_BASE_URL: &str = "https://world.openfoodfacts.org";

/// Default outbound HTTP timeout in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Optional settings as written in the TOML config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub database_path: Option<PathBuf>,
    pub port: Option<u16>,
    pub off_base_url: Option<String>,
    pub http_timeout_secs: Option<u64>,
    pub cache_capacity: Option<usize>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ScanwiseConfig {
    /// Path to the SQLite product store
    pub database_path: PathBuf,
    /// HTTP listen port
    pub port: u16,
    /// Open Food Facts base URL (overridable for testing)
    pub off_base_url: String,
    /// Timeout applied to outbound API lookups
    pub http_timeout_secs: u64,
    /// Cache capacity; `None` means unbounded (the default)
    pub cache_capacity: Option<usize>,
}

impl Default for ScanwiseConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            port: DEFAULT_PORT,
            off_base_url: DEFAULT_OFF_BASE_URL.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            cache_capacity: None,
        }
    }
}

impl ScanwiseConfig {
    /// Load configuration from the given TOML file (or the default location
    /// when `None`), then apply environment-variable overrides.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let path = match config_path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };

        if let Some(path) = path {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
            let toml_config: TomlConfig = toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
            config.apply_toml(toml_config);
            info!("Loaded configuration from {}", path.display());
        }

        config.apply_env()?;
        Ok(config)
    }

    fn apply_toml(&mut self, toml_config: TomlConfig) {
        if let Some(path) = toml_config.database_path {
            self.database_path = path;
        }
        if let Some(port) = toml_config.port {
            self.port = port;
        }
        if let Some(url) = toml_config.off_base_url {
            self.off_base_url = url;
        }
        if let Some(secs) = toml_config.http_timeout_secs {
            self.http_timeout_secs = secs;
        }
        if let Some(capacity) = toml_config.cache_capacity {
            self.cache_capacity = Some(capacity);
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(path) = std::env::var("SCANWISE_DATABASE") {
            self.database_path = PathBuf::from(path);
        }
        if let Ok(port) = std::env::var("SCANWISE_PORT") {
            self.port = port
                .parse()
                .map_err(|_| Error::Config(format!("Invalid SCANWISE_PORT: {}", port)))?;
        }
        if let Ok(url) = std::env::var("SCANWISE_OFF_BASE_URL") {
            self.off_base_url = url;
        }
        if let Ok(secs) = std::env::var("SCANWISE_HTTP_TIMEOUT_SECS") {
            self.http_timeout_secs = secs
                .parse()
                .map_err(|_| Error::Config(format!("Invalid SCANWISE_HTTP_TIMEOUT_SECS: {}", secs)))?;
        }
        if let Ok(capacity) = std::env::var("SCANWISE_CACHE_CAPACITY") {
            self.cache_capacity = Some(capacity.parse().map_err(|_| {
                Error::Config(format!("Invalid SCANWISE_CACHE_CAPACITY: {}", capacity))
            })?);
        }
        Ok(())
    }
}

/// Default config file path: `<config-dir>/scanwise/scanwise.toml`
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("scanwise").join("scanwise.toml"))
}

/// OS-dependent default database path: `<data-dir>/scanwise/scanwise.db`
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("scanwise").join("scanwise.db"))
        .unwrap_or_else(|| PathBuf::from("./scanwise.db"))
}
