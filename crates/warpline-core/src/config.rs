//! Configuration resolution for Warpline.
//!
//! Implements hierarchical config resolution:
//! 1. Built-in defaults
//! 2. Global config (`<config dir>/warpline/settings.json`)
//! 3. Explicit config file (`--config`)
//! 4. Environment variables
//! 5. CLI arguments (applied by the binary, highest priority)
//!
//! Files are merged key by key, so an overlay only needs the keys it changes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Complete Warpline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub registration: RegistrationConfig,
    pub endpoints: EndpointConfig,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            registration: RegistrationConfig::default(),
            endpoints: EndpointConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

/// Local account database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `None` resolves to [`database_path`].
    pub path: Option<PathBuf>,
    pub max_connections: u32,
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_connections: 5,
            busy_timeout_ms: 5_000,
        }
    }
}

/// Remote registration service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    pub base_url: String,
    pub api_version: String,
    /// Sent as the `CF-Client-Version` header.
    pub client_version: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Honour `HTTP(S)_PROXY` from the environment.
    pub use_system_proxy: bool,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.cloudflareclient.com".to_string(),
            api_version: "v0a2158".to_string(),
            client_version: "a-6.11-2223".to_string(),
            user_agent: "okhttp/3.12.1".to_string(),
            timeout_secs: 30,
            use_system_proxy: true,
        }
    }
}

/// Default quality thresholds for endpoint selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Maximum packet loss, in percent.
    pub max_loss: f64,
    /// Maximum delay, in milliseconds.
    pub max_delay: i64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            max_loss: 10.0,
            max_delay: 500,
        }
    }
}

/// Load configuration with hierarchical resolution.
///
/// `explicit` must exist when given; the global file is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut layers = Vec::new();
    if let Some(global) = global_config_path().filter(|p| p.exists()) {
        layers.push(global);
    }
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file {} does not exist",
                path.display()
            )));
        }
        layers.push(path.to_path_buf());
    }

    let mut config = load_layers(&layers)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Merge the given config files over the built-in defaults, in order.
pub fn load_layers(paths: &[PathBuf]) -> Result<Config> {
    let mut merged = serde_json::to_value(Config::default())?;
    for path in paths {
        let overlay = read_config_value(path)?;
        merge_values(&mut merged, overlay);
    }
    serde_json::from_value(merged).map_err(|e| Error::Config(format!("Invalid configuration: {e}")))
}

/// Get the global config file path.
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("warpline").join("settings.json"))
}

/// Get the default database path.
pub fn database_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("warpline").join("warpline.db"))
}

impl Config {
    /// Configured database path, falling back to [`database_path`].
    pub fn resolved_database_path(&self) -> Option<PathBuf> {
        self.database.path.clone().or_else(database_path)
    }
}

fn read_config_value(path: &Path) -> Result<serde_json::Value> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse config file {}: {}", path.display(), e))
    })
}

fn merge_values(base: &mut serde_json::Value, overlay: serde_json::Value) {
    match (base, overlay) {
        (serde_json::Value::Object(base), serde_json::Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge_values(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Apply `WARPLINE_*` overrides. Values that fail to parse are ignored.
pub fn apply_env_overrides(config: &mut Config, var: impl Fn(&str) -> Option<String>) {
    if let Some(val) = var("WARPLINE_DATABASE_PATH") {
        config.database.path = Some(PathBuf::from(val));
    }
    if let Some(val) = var("WARPLINE_API_URL") {
        config.registration.base_url = val;
    }
    if let Some(n) = var("WARPLINE_MAX_LOSS").and_then(|v| v.parse().ok()) {
        config.endpoints.max_loss = n;
    }
    if let Some(n) = var("WARPLINE_MAX_DELAY").and_then(|v| v.parse().ok()) {
        config.endpoints.max_delay = n;
    }
    if let Some(val) = var("WARPLINE_LOG_LEVEL") {
        config.log_level = val;
    }
}
