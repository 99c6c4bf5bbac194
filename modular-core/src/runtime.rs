//! Bootstrapped application: route activation and navigation.
//!
//! Activating a state runs its resolver to completion and only then invokes
//! its controller. Any failure is reported for that activation alone; the
//! runtime stays on the previously active state and every other state can
//! still be activated.

use crate::controller::InjectableController;
use crate::logging::{debug, info, trace, warn};
use crate::resolve::{BundleLoader, DependencyTable};
use crate::router::StateRouter;
use crate::scope::RootScope;
use crate::services::ServiceRegistry;
use crate::state::{ControllerRef, State};
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;

pub struct Runtime {
    router: StateRouter,
    services: ServiceRegistry,
    root_scope: Arc<RootScope>,
    controllers: HashMap<String, InjectableController>,
    loader: Arc<dyn BundleLoader>,
    dependencies: DependencyTable,
    fallback_url: String,
    current: Option<String>,
}

impl Runtime {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        router: StateRouter,
        services: ServiceRegistry,
        root_scope: Arc<RootScope>,
        controllers: HashMap<String, InjectableController>,
        loader: Arc<dyn BundleLoader>,
        dependencies: DependencyTable,
        fallback_url: String,
    ) -> Self {
        Self {
            router,
            services,
            root_scope,
            controllers,
            loader,
            dependencies,
            fallback_url,
            current: None,
        }
    }

    pub fn router(&self) -> &StateRouter {
        &self.router
    }

    pub fn services(&self) -> &ServiceRegistry {
        &self.services
    }

    pub fn root_scope(&self) -> &Arc<RootScope> {
        &self.root_scope
    }

    pub fn dependencies(&self) -> &DependencyTable {
        &self.dependencies
    }

    /// Name of the active state
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn href(&self, name: &str) -> Option<String> {
        self.router.href(name)
    }

    /// Resolve and enter the state `name`.
    pub async fn activate(&mut self, name: &str) -> Result<()> {
        let state = self
            .router
            .get(name)
            .cloned()
            .ok_or_else(|| Error::StateNotFound(name.to_string()))?;

        match self.enter(&state).await {
            Ok(()) => {
                info!(state = %state.name, "State activated");
                self.current = Some(state.name);
                Ok(())
            }
            Err(e) => {
                warn!(state = %state.name, error = %e, "State activation failed");
                Err(e)
            }
        }
    }

    /// Activate the state whose full URL is `url`, falling back to the
    /// configured fallback URL when nothing matches.
    pub async fn navigate(&mut self, url: &str) -> Result<()> {
        let target = match self.router.find_by_url(url) {
            Some(state) => state.name.clone(),
            None => {
                debug!(url, fallback = %self.fallback_url, "No state matches, using fallback");
                self.router
                    .find_by_url(&self.fallback_url)
                    .map(|state| state.name.clone())
                    .ok_or_else(|| Error::StateNotFound(url.to_string()))?
            }
        };
        self.activate(&target).await
    }

    async fn enter(&self, state: &State) -> Result<()> {
        if state.is_abstract {
            return Err(Error::AbstractState(state.name.clone()));
        }

        if let Some(resolver) = &state.resolve {
            let pending = self.root_scope.request_started();
            trace!(state = %state.name, pending, "Resolving route dependencies");
            let resolved = resolver
                .resolve(self.loader.as_ref(), &self.dependencies)
                .await;
            self.root_scope.request_finished();
            resolved?;
        }

        match &state.controller {
            Some(ControllerRef::Injectable(controller)) => controller.invoke_with(&self.services),
            Some(ControllerRef::Named(name)) => self
                .controllers
                .get(name)
                .ok_or_else(|| Error::ControllerNotFound(name.clone()))?
                .invoke_with(&self.services),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("states", &self.router.len())
            .field("controllers", &self.controllers.len())
            .field("current", &self.current)
            .finish()
    }
}
