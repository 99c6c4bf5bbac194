//! View controllers.
//!
//! A [`Controller`] is an ordered list of [`Callback`]s. Each callback names
//! the services it needs; the controller merges those names into one
//! injection list and, when invoked, hands every callback the same
//! [`Services`] map.
//!
//! ```
//! use modular_core::{Callback, Controller};
//!
//! let mut controller = Controller::new();
//! controller.add(Callback::new(["$rootScope"], |_services| {}));
//! controller.add(Callback::new(["$rootScope", "ngDialog"], |_services| {}));
//!
//! assert_eq!(controller.dependencies(), vec!["$rootScope", "ngDialog"]);
//! ```

use crate::inspect::{services_used_in, unique};
use crate::services::{ServiceRef, ServiceRegistry, Services};
use crate::Result;
use std::sync::Arc;

/// Body of a controller callback
pub type CallbackFn = Arc<dyn Fn(&Services) + Send + Sync>;

/// A controller function together with the service names it uses
#[derive(Clone)]
pub struct Callback {
    dependencies: Vec<String>,
    func: CallbackFn,
}

impl Callback {
    /// Callback with explicitly declared dependencies
    pub fn new<I, S, F>(dependencies: I, func: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&Services) + Send + Sync + 'static,
    {
        Self {
            dependencies: dependencies.into_iter().map(Into::into).collect(),
            func: Arc::new(func),
        }
    }

    /// Callback whose dependencies are read from its source text.
    ///
    /// Every `<param>.<name>` access on the first declared parameter of
    /// `source` becomes a dependency. Accesses the scan cannot see are
    /// silently missing from the list.
    pub fn from_source<F>(source: &str, func: F) -> Self
    where
        F: Fn(&Services) + Send + Sync + 'static,
    {
        Self {
            dependencies: services_used_in(source),
            func: Arc::new(func),
        }
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn call(&self, services: &Services) {
        (self.func)(services)
    }
}

impl std::fmt::Debug for Callback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callback")
            .field("dependencies", &self.dependencies)
            .finish()
    }
}

/// Ordered list of callbacks run together when a route activates
#[derive(Debug, Clone, Default)]
pub struct Controller {
    functions: Vec<Callback>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_functions(functions: Vec<Callback>) -> Self {
        Self { functions }
    }

    pub fn add(&mut self, callback: Callback) -> &mut Self {
        self.functions.push(callback);
        self
    }

    pub fn functions(&self) -> &[Callback] {
        &self.functions
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Service names used by all callbacks, first occurrence first.
    pub fn dependencies(&self) -> Vec<String> {
        unique(
            self.functions
                .iter()
                .flat_map(|callback| callback.dependencies().iter().cloned()),
        )
    }

    /// Freeze the current callbacks into an injectable controller.
    ///
    /// Callbacks added afterwards are not part of the result.
    pub fn injectable(&self) -> InjectableController {
        InjectableController {
            dependencies: self.dependencies(),
            functions: self.functions.clone().into(),
        }
    }
}

/// A controller in the form the router consumes: the ordered dependency
/// names plus a body expecting one value per name.
#[derive(Debug, Clone)]
pub struct InjectableController {
    dependencies: Vec<String>,
    functions: Arc<[Callback]>,
}

impl InjectableController {
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// Run every callback with `values`, matched to the dependency names by
    /// position.
    pub fn invoke(&self, values: Vec<ServiceRef>) {
        let services = Services::from_values(&self.dependencies, values);
        for callback in self.functions.iter() {
            callback.call(&services);
        }
    }

    /// Look the dependencies up in `registry` and invoke.
    pub fn invoke_with(&self, registry: &ServiceRegistry) -> Result<()> {
        let values = registry.collect(&self.dependencies)?;
        self.invoke(values);
        Ok(())
    }
}
