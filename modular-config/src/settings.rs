// Building the core settings from loaded configuration

use crate::validation::{ConfigValidator, Validate};
use crate::{ConfigError, ConfigService, Result};
use modular_core::CoreSettings;
use modular_core::logging::debug;
use serde_json::Value;

/// Keys holding lists that may also be given as comma-separated strings,
/// as environment variables are.
const LIST_KEYS: &[&str] = &["common_dependencies"];

impl Validate for CoreSettings {
    fn validate(&self) -> Result<()> {
        ConfigValidator::is_identifier(&self.namespace, "namespace")?;
        ConfigValidator::not_empty(&self.modules_dir, "modules_dir")?;
        ConfigValidator::not_empty(&self.view_template_dir, "view_template_dir")?;
        ConfigValidator::is_absolute_path(&self.fallback_url, "fallback_url")?;
        ConfigValidator::unique(
            self.lazy_modules.iter().map(|m| m.name.as_str()),
            "lazy_modules",
        )?;
        for module in &self.lazy_modules {
            ConfigValidator::not_empty(&module.name, "lazy_modules.name")?;
        }
        Ok(())
    }
}

/// Settings from every key of `service`, defaults for the keys it lacks.
///
/// Keys that are not settings are ignored.
pub fn load_core_settings(service: &ConfigService) -> Result<CoreSettings> {
    let mut value = service.manager().to_value();
    if let Value::Object(map) = &mut value {
        for key in LIST_KEYS {
            if let Some(Value::String(list)) = map.get(*key) {
                let items = split_list(list);
                map.insert((*key).to_string(), items);
            }
        }
    }

    let settings: CoreSettings = serde_json::from_value(value)
        .map_err(|e| ConfigError::DeserializationError(e.to_string()))?;
    settings.validate()?;

    debug!(
        namespace = %settings.namespace,
        lazy_modules = settings.lazy_modules.len(),
        "Core settings loaded"
    );
    Ok(settings)
}

fn split_list(list: &str) -> Value {
    Value::Array(
        list.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| Value::String(item.to_string()))
            .collect(),
    )
}
