// Named service registry used to inject controllers

use crate::logging::{debug, trace};
use crate::{Error, Result};
use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// A type-erased service instance
pub type ServiceRef = Arc<dyn Any + Send + Sync>;

/// Registry of services addressed by name, e.g. `"$rootScope"`
#[derive(Clone, Default)]
pub struct ServiceRegistry {
    services: Arc<RwLock<HashMap<String, ServiceRef>>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service instance under `name`, replacing any previous one
    pub fn register<T: Any + Send + Sync>(&self, name: impl Into<String>, instance: T) {
        self.register_arc(name, Arc::new(instance));
    }

    /// Register an already shared instance
    pub fn register_arc<T: Any + Send + Sync>(&self, name: impl Into<String>, instance: Arc<T>) {
        let name = name.into();
        debug!(service = %name, type_name = std::any::type_name::<T>(), "Service registered");
        self.services.write().insert(name, instance);
    }

    /// Resolve a service by name and type
    pub fn resolve<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
        trace!(service = name, "Resolving service");
        self.get(name)
            .and_then(|any| any.downcast::<T>().ok())
            .ok_or_else(|| Error::ServiceNotFound(name.to_string()))
    }

    /// Type-erased lookup
    pub fn get(&self, name: &str) -> Option<ServiceRef> {
        self.services.read().get(name).cloned()
    }

    /// Values for `names`, in the same order
    pub fn collect(&self, names: &[String]) -> Result<Vec<ServiceRef>> {
        let services = self.services.read();
        names
            .iter()
            .map(|name| {
                services
                    .get(name)
                    .cloned()
                    .ok_or_else(|| Error::ServiceNotFound(name.clone()))
            })
            .collect()
    }

    pub fn has(&self, name: &str) -> bool {
        self.services.read().contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.services.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("names", &self.names())
            .finish()
    }
}

/// The services handed to a controller callback, keyed by name
#[derive(Clone, Default)]
pub struct Services {
    values: HashMap<String, ServiceRef>,
}

impl Services {
    /// Pair each name with the value supplied at the same position.
    ///
    /// Surplus names or values are ignored.
    pub fn from_values(names: &[String], values: Vec<ServiceRef>) -> Self {
        Self {
            values: names.iter().cloned().zip(values).collect(),
        }
    }

    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        self.values
            .get(name)
            .and_then(|any| any.clone().downcast::<T>().ok())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.values.keys().collect();
        names.sort();
        f.debug_struct("Services").field("names", &names).finish()
    }
}
