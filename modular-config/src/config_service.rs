// ConfigService - High-level configuration service

use crate::{ConfigManager, FileFormat, Result};
use modular_core::logging::debug;
use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Read-only view over a loaded [`ConfigManager`]
#[derive(Clone, Debug)]
pub struct ConfigService {
    manager: ConfigManager,
}

impl ConfigService {
    pub fn new() -> Self {
        Self {
            manager: ConfigManager::new(),
        }
    }

    pub fn from_manager(manager: ConfigManager) -> Self {
        Self { manager }
    }

    pub fn builder() -> ConfigServiceBuilder {
        ConfigServiceBuilder::new()
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        self.manager.get(key)
    }

    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.manager.get_or(key, default)
    }

    pub fn get_string(&self, key: &str) -> Result<String> {
        self.manager.get_string(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.manager.has(key)
    }

    pub fn manager(&self) -> &ConfigManager {
        &self.manager
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for ConfigService.
///
/// Sources are applied in a fixed order, later ones overriding earlier ones:
/// files in the order added, then the `.env` file, then the environment.
pub struct ConfigServiceBuilder {
    manager: ConfigManager,
    load_env: bool,
    load_dotenv: bool,
    dotenv_path: Option<String>,
    config_files: Vec<(PathBuf, Option<FileFormat>)>,
}

impl ConfigServiceBuilder {
    pub fn new() -> Self {
        Self {
            manager: ConfigManager::new(),
            load_env: false,
            load_dotenv: false,
            dotenv_path: None,
            config_files: Vec::new(),
        }
    }

    /// Set environment variable prefix
    pub fn with_prefix(mut self, prefix: String) -> Self {
        self.manager = ConfigManager::with_prefix(prefix);
        self
    }

    pub fn load_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Load a `.env` file before the environment
    pub fn load_dotenv(mut self, path: Option<String>) -> Self {
        self.load_dotenv = true;
        self.load_env = true;
        self.dotenv_path = path;
        self
    }

    pub fn add_file(mut self, path: impl Into<PathBuf>, format: FileFormat) -> Self {
        self.config_files.push((path.into(), Some(format)));
        self
    }

    /// Add a file whose format is taken from its extension
    pub fn add_file_auto(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_files.push((path.into(), None));
        self
    }

    pub fn build(self) -> Result<ConfigService> {
        for (path, format) in &self.config_files {
            let format = match format {
                Some(format) => *format,
                None => FileFormat::detect(path)?,
            };
            debug!(path = %path.display(), ?format, "Loading configuration file");
            self.manager.load_file(path, format)?;
        }

        if self.load_dotenv {
            self.manager.load_dotenv(self.dotenv_path.as_deref())?;
        } else if self.load_env {
            self.manager.load_env()?;
        }

        debug!(keys = self.manager.keys().len(), "Configuration loaded");
        Ok(ConfigService::from_manager(self.manager))
    }
}

impl Default for ConfigServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
