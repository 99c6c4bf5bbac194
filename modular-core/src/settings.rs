// Settings consumed by the application, its modules and views

use serde::{Deserialize, Serialize};

/// A lazily loaded bundle: a symbolic name and the assets that make it up
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LazyModule {
    pub name: String,
    pub files: Vec<String>,
}

impl LazyModule {
    pub fn new<I, S>(name: impl Into<String>, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            files: files.into_iter().map(Into::into).collect(),
        }
    }
}

/// Application-wide conventions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreSettings {
    /// Prefix of every route name
    pub namespace: String,
    /// Root of module folders for states declared through `Module::add_state`
    pub modules_dir: String,
    /// Root of module folders for view templates
    pub view_template_dir: String,
    pub module_icon: String,
    pub view_icon: String,
    /// URL activated when navigation matches no state
    pub fallback_url: String,
    /// Dependencies resolved by every module state
    pub common_dependencies: Vec<String>,
    pub lazy_modules: Vec<LazyModule>,
}

impl Default for CoreSettings {
    fn default() -> Self {
        Self {
            namespace: "app".to_string(),
            modules_dir: "app/modules".to_string(),
            view_template_dir: "modules".to_string(),
            module_icon: "fa fa-server".to_string(),
            view_icon: "fa fa-laptop".to_string(),
            fallback_url: "/".to_string(),
            common_dependencies: Vec::new(),
            lazy_modules: Vec::new(),
        }
    }
}

impl CoreSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_common_dependency(mut self, name: impl Into<String>) -> Self {
        self.common_dependencies.push(name.into());
        self
    }

    pub fn with_lazy_module(mut self, module: LazyModule) -> Self {
        self.lazy_modules.push(module);
        self
    }

    /// `name` prefixed with the namespace
    pub fn qualify(&self, name: &str) -> String {
        format!("{}.{}", self.namespace, name)
    }
}

/// Per-module settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSettings {
    /// Template folder, defaults to the module name
    pub folder: Option<String>,
}

impl ModuleSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }
}
