// Application: module registry, sidebar menu and bootstrap

use crate::controller::InjectableController;
use crate::host::HostModule;
use crate::logging::{debug, info, warn};
use crate::menu::Menu;
use crate::module::Module;
use crate::resolve::{BundleLoader, DependencyTable};
use crate::router::StateRouter;
use crate::runtime::Runtime;
use crate::scope::{ROOT_SCOPE, RootScope};
use crate::services::ServiceRegistry;
use crate::settings::{CoreSettings, ModuleSettings};
use crate::state::{NESTED_VIEW_TEMPLATE, StateConfig};
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// The dashboard application.
///
/// Built once by the entry point, filled with modules, then turned into a
/// [`Runtime`] by [`bootstrap`](Self::bootstrap).
#[derive(Debug)]
pub struct Application {
    host: HostModule,
    settings: Arc<CoreSettings>,
    modules: HashMap<String, Module>,
    menu: Menu,
    controllers: HashMap<String, InjectableController>,
    services: ServiceRegistry,
}

impl Application {
    pub fn new(settings: CoreSettings) -> Self {
        let host = HostModule::new(settings.namespace.clone());

        // Root of every qualified state name
        host.add_state(
            settings.namespace.clone(),
            StateConfig::default()
                .abstract_state()
                .template(NESTED_VIEW_TEMPLATE),
        );
        host.run(|scope| scope.set_pending_requests(0));

        debug!(namespace = %settings.namespace, "Application created");
        Self {
            host,
            settings: Arc::new(settings),
            modules: HashMap::new(),
            menu: Menu::new(),
            controllers: HashMap::new(),
            services: ServiceRegistry::new(),
        }
    }

    pub fn settings(&self) -> &CoreSettings {
        &self.settings
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Services injectable into controllers once bootstrapped
    pub fn services(&self) -> &ServiceRegistry {
        &self.services
    }

    /// Register a module named `name`.
    pub fn add_module(
        &mut self,
        name: &str,
        title: &str,
        position: i32,
        settings: ModuleSettings,
    ) -> Result<&mut Module> {
        if self.modules.contains_key(name) {
            return Err(Error::DuplicateModule(name.to_string()));
        }

        let module = Module::new(
            self.host.clone(),
            self.settings.clone(),
            &mut self.menu,
            name,
            title,
            position,
            settings,
        );
        debug!(module = name, position, "Module registered");
        Ok(self.modules.entry(name.to_string()).or_insert(module))
    }

    pub fn get_module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    pub fn get_module_mut(&mut self, name: &str) -> Option<&mut Module> {
        self.modules.get_mut(name)
    }

    pub fn module_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.modules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Declare the state `<namespace>.<name>`.
    ///
    /// A non-empty resolve list is turned into a single resolver that must
    /// settle before the state's controller runs.
    ///
    /// This, [`Module::add_state`] and compiled views are the only ways to
    /// declare a route, so every route name carries the namespace. The host
    /// queue itself is not reachable from outside the crate:
    ///
    /// ```compile_fail
    /// use modular_core::{Application, StateConfig};
    ///
    /// let app = Application::default();
    /// app.host().add_state("rogue", StateConfig::default());
    /// ```
    ///
    /// ```compile_fail
    /// let host = modular_core::host::HostModule::new("rogue");
    /// ```
    pub fn add_state(&self, name: &str, settings: StateConfig) {
        self.host.add_state(self.settings.qualify(name), settings);
    }

    /// Register a controller referenced by name from module states
    pub fn register_controller(
        &mut self,
        name: impl Into<String>,
        controller: InjectableController,
    ) -> &mut Self {
        self.controllers.insert(name.into(), controller);
        self
    }

    /// Run every queued config block, then every run block, and hand back
    /// the runtime.
    pub fn bootstrap(self, loader: Arc<dyn BundleLoader>) -> Result<Runtime> {
        for module in self.modules.values().filter(|m| !m.is_started()) {
            warn!(module = %module.name(), "Module was never started; its states are not routed");
        }

        let (config_blocks, run_blocks) = self.host.drain();

        let mut router = StateRouter::new();
        for block in config_blocks {
            block(&mut router)?;
        }

        let root_scope = Arc::new(RootScope::new());
        self.services.register_arc(ROOT_SCOPE, root_scope.clone());
        for block in run_blocks {
            block(&root_scope);
        }

        let dependencies = DependencyTable::from_modules(&self.settings.lazy_modules);
        info!(
            states = router.len(),
            modules = self.modules.len(),
            bundles = dependencies.len(),
            "Application bootstrapped"
        );

        Ok(Runtime::new(
            router,
            self.services,
            root_scope,
            self.controllers,
            loader,
            dependencies,
            self.settings.fallback_url.clone(),
        ))
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new(CoreSettings::default())
    }
}
