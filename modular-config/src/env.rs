// Environment variable loading

use crate::{ConfigError, Result};
use std::collections::HashMap;
use std::env;

/// Prefix of the variables read by default, e.g. `MODULAR_NAMESPACE`
pub const DEFAULT_ENV_PREFIX: &str = "MODULAR";

/// Environment variable loader
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Variables carrying the prefix, keyed by the lower-cased remainder.
    ///
    /// `MODULAR_FALLBACK_URL` becomes `fallback_url`. Without a prefix every
    /// variable is returned.
    pub fn load(&self) -> Result<HashMap<String, String>> {
        Ok(env::vars()
            .filter_map(|(key, value)| self.strip(&key).map(|k| (k.to_lowercase(), value)))
            .collect())
    }

    /// Load one variable, `key` being the part after the prefix
    pub fn load_var(&self, key: &str) -> Result<String> {
        env::var(self.full_key(key)).map_err(ConfigError::EnvError)
    }

    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }

    fn full_key(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        }
    }

    fn strip<'a>(&self, key: &'a str) -> Option<&'a str> {
        match &self.prefix {
            Some(prefix) => key
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_prefix('_'))
                .filter(|rest| !rest.is_empty()),
            None => Some(key),
        }
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(Some(DEFAULT_ENV_PREFIX.to_string()))
    }
}
