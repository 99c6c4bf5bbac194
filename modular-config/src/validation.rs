// Configuration validation

use crate::{ConfigError, Result};
use std::collections::HashSet;

/// Trait for validating configuration
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Configuration validator with rules
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate that a value is not empty
    pub fn not_empty(value: &str, field: &str) -> Result<()> {
        if value.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                field
            )));
        }
        Ok(())
    }

    /// Letters, digits, `_` and `$`, not starting with a digit
    pub fn is_identifier(value: &str, field: &str) -> Result<()> {
        Self::not_empty(value, field)?;

        let mut chars = value.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
        let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
        if !valid_start || !valid_rest {
            return Err(ConfigError::ValidationError(format!(
                "{} must be an identifier, got \"{}\"",
                field, value
            )));
        }
        Ok(())
    }

    /// Validate that a URL path is absolute
    pub fn is_absolute_path(value: &str, field: &str) -> Result<()> {
        if !value.starts_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "{} must start with '/', got \"{}\"",
                field, value
            )));
        }
        Ok(())
    }

    /// Validate that no name appears twice
    pub fn unique<'a, I>(names: I, field: &str) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        for name in names {
            if !seen.insert(name) {
                return Err(ConfigError::ValidationError(format!(
                    "{} contains \"{}\" more than once",
                    field, name
                )));
            }
        }
        Ok(())
    }
}
