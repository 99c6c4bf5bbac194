// Configuration management for the modular dashboard shell

pub mod config_service;
pub mod env;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use config_service::{ConfigService, ConfigServiceBuilder};
pub use env::{DEFAULT_ENV_PREFIX, EnvLoader};
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use settings::load_core_settings;
pub use validation::{ConfigValidator, Validate};

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Flat key/value configuration store, later sources overriding earlier ones
#[derive(Clone)]
pub struct ConfigManager {
    config: Arc<RwLock<HashMap<String, serde_json::Value>>>,
    env_prefix: Option<String>,
}

impl ConfigManager {
    /// Manager reading variables prefixed with [`DEFAULT_ENV_PREFIX`]
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_ENV_PREFIX.to_string())
    }

    pub fn with_prefix(prefix: String) -> Self {
        Self {
            config: Arc::new(RwLock::new(HashMap::new())),
            env_prefix: Some(prefix),
        }
    }

    /// Load configuration from environment variables
    pub fn load_env(&self) -> Result<()> {
        let loader = EnvLoader::new(self.env_prefix.clone());
        let env_vars = loader.load()?;

        let mut config = self.config.write();
        for (key, value) in env_vars {
            config.insert(key, serde_json::Value::String(value));
        }

        Ok(())
    }

    /// Load a `.env` file into the process environment, then the environment.
    ///
    /// Without a path a missing `.env` in the working directory is ignored.
    pub fn load_dotenv(&self, path: Option<&str>) -> Result<()> {
        if let Some(path) = path {
            dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
        } else {
            dotenvy::dotenv().ok();
        }
        self.load_env()
    }

    /// Merge the top-level keys of a settings file
    pub fn load_file(&self, path: impl AsRef<Path>, format: FileFormat) -> Result<()> {
        let data = ConfigLoader::new(format).load_file(path)?;

        match data {
            serde_json::Value::Object(map) => {
                self.config.write().extend(map);
                Ok(())
            }
            other => Err(ConfigError::ParseError(format!(
                "Expected a table of settings, got {}",
                other
            ))),
        }
    }

    pub fn set<T: serde::Serialize>(&self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;

        self.config.write().insert(key.to_string(), json_value);
        Ok(())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .config
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))?;

        serde_json::from_value(value).map_err(|e| ConfigError::DeserializationError(e.to_string()))
    }

    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    pub fn get_string(&self, key: &str) -> Result<String> {
        self.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.config.read().contains_key(key)
    }

    /// All keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.config.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Copy every entry of `other` over this manager's entries
    pub fn merge(&self, other: &ConfigManager) {
        let other_config = other.config.read().clone();
        self.config.write().extend(other_config);
    }

    /// Every entry as one JSON object
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.config
                .read()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Deserialize every entry into `T` and validate it
    pub fn load_validated<T: DeserializeOwned + Validate>(&self) -> Result<T> {
        let validated: T = serde_json::from_value(self.to_value())
            .map_err(|e| ConfigError::DeserializationError(e.to_string()))?;

        validated.validate()?;
        Ok(validated)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConfigManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigManager")
            .field("keys", &self.keys())
            .field("env_prefix", &self.env_prefix)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let manager = ConfigManager::new();
        manager.set("namespace", "dash").unwrap();

        let value: String = manager.get("namespace").unwrap();
        assert_eq!(value, "dash");
    }

    #[test]
    fn test_get_or_default() {
        let manager = ConfigManager::new();

        let value: String = manager.get_or("fallback_url", "/".to_string());
        assert_eq!(value, "/");
    }

    #[test]
    fn test_missing_and_mistyped_keys() {
        let manager = ConfigManager::new();
        manager.set("namespace", "dash").unwrap();

        assert!(matches!(
            manager.get_string("missing"),
            Err(ConfigError::KeyNotFound(_))
        ));
        assert!(matches!(
            manager.get_bool("namespace"),
            Err(ConfigError::DeserializationError(_))
        ));
        assert!(manager.has("namespace"));
        assert!(!manager.has("missing"));
    }

    #[test]
    fn test_merge_overrides() {
        let base = ConfigManager::new();
        base.set("namespace", "app").unwrap();
        base.set("view_icon", "fa fa-laptop").unwrap();

        let overrides = ConfigManager::new();
        overrides.set("namespace", "dash").unwrap();

        base.merge(&overrides);
        assert_eq!(base.get_string("namespace").unwrap(), "dash");
        assert_eq!(base.keys(), vec!["namespace", "view_icon"]);
    }

    #[test]
    fn test_to_value() {
        let manager = ConfigManager::new();
        manager.set("common_dependencies", vec!["moment"]).unwrap();

        let value = manager.to_value();
        assert_eq!(value["common_dependencies"][0], "moment");
    }
}
