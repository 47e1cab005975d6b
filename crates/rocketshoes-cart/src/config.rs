//! # Cart Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ROCKETSHOES_API_URL=http://localhost:3333                           │
//! │     ROCKETSHOES_API_TIMEOUT=10                                          │
//! │     ROCKETSHOES_NAMESPACE=@RocketShoes                                  │
//! │     ROCKETSHOES_STORAGE_PATH=/tmp/storage.json                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/cart.toml (Linux)                             │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "http://localhost:3333"
//! timeout_secs = 10
//!
//! [storage]
//! namespace = "@RocketShoes"
//! path = "/home/me/.local/share/storefront/storage.json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use rocketshoes_core::DEFAULT_NAMESPACE;

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// API Settings
// =============================================================================

/// Where the catalog API lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. `None` waits as long as the server does.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Key prefix; the cart lives under `<namespace>:cart`.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Storage file. Defaults to the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            namespace: default_namespace(),
            path: None,
        }
    }
}

impl StorageSettings {
    /// The configured path, else `<data dir>/storage.json`.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(|| {
            project_dirs().map(|dirs| dirs.data_dir().join("storage.json"))
        })
    }
}

// =============================================================================
// Cart Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

impl CartConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`cart.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::from_file(config_path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with the config file, without environment.
    pub fn from_file(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let Some(path) = config_path.or_else(Self::default_config_path) else {
            return Ok(Self::default());
        };

        if !path.exists() {
            debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        info!(?path, "Loading cart config from file");
        let contents = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let url = &self.api.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "API base URL must start with http:// or https://, got: {}",
                url
            )));
        }

        if self.storage.namespace.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "storage namespace must not be empty".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies `ROCKETSHOES_*` overrides read through `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("ROCKETSHOES_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = lookup("ROCKETSHOES_API_TIMEOUT") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = Some(secs),
                Err(_) => warn!(value = %timeout, "Ignoring invalid ROCKETSHOES_API_TIMEOUT"),
            }
        }

        if let Some(namespace) = lookup("ROCKETSHOES_NAMESPACE") {
            self.storage.namespace = namespace;
        }

        if let Some(path) = lookup("ROCKETSHOES_STORAGE_PATH") {
            self.storage.path = Some(PathBuf::from(path));
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("cart.toml"))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "rocketshoes", "storefront")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = CartConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:3333");
        assert_eq!(config.api.timeout_secs, None);
        assert_eq!(config.storage.namespace, "@RocketShoes");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");
        std::fs::write(&path, "[api]\nbase_url = \"https://shop.example.com\"\n").unwrap();

        let config = CartConfig::from_file(Some(path)).unwrap();
        assert_eq!(config.api.base_url, "https://shop.example.com");
        assert_eq!(config.storage.namespace, "@RocketShoes");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CartConfig::from_file(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, CartConfig::default());
    }

    #[test]
    fn test_bad_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");
        std::fs::write(&path, "[api\n").unwrap();

        assert!(matches!(
            CartConfig::from_file(Some(path)),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("ROCKETSHOES_API_URL", "http://10.0.0.5:3333"),
            ("ROCKETSHOES_API_TIMEOUT", "15"),
            ("ROCKETSHOES_NAMESPACE", "@Test"),
            ("ROCKETSHOES_STORAGE_PATH", "/tmp/cart.json"),
        ]
        .into_iter()
        .collect();

        let mut config = CartConfig::default();
        config.apply_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://10.0.0.5:3333");
        assert_eq!(config.api.timeout_secs, Some(15));
        assert_eq!(config.storage.namespace, "@Test");
        assert_eq!(
            config.storage.resolved_path(),
            Some(PathBuf::from("/tmp/cart.json"))
        );
    }

    #[test]
    fn test_invalid_timeout_is_ignored() {
        let mut config = CartConfig::default();
        config.apply_overrides(|name| {
            (name == "ROCKETSHOES_API_TIMEOUT").then(|| "soon".to_string())
        });
        assert_eq!(config.api.timeout_secs, None);
    }

    #[test]
    fn test_validation() {
        let mut config = CartConfig::default();
        config.api.base_url = "ws://localhost".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "https://shop.example.com".to_string();
        config.storage.namespace = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&CartConfig::default()).unwrap();
        assert!(toml_str.contains("[api]"));
        assert!(toml_str.contains("[storage]"));
    }
}
