//! Route dependency resolution.
//!
//! Before a route's controller runs, its [`Resolver`] walks the declared
//! dependencies strictly in order. A dependency is either an asynchronous
//! step or the symbolic name of a lazily loaded bundle, looked up in the
//! [`DependencyTable`] and handed to a [`BundleLoader`]. The first failure
//! stops the chain and fails the activation of that route only.
//!
//! There is no cancellation and no timeout: a step that never settles blocks
//! its route forever.

use crate::logging::{debug, trace};
use crate::settings::LazyModule;
use crate::{Error, Result};
use async_trait::async_trait;
use futures_util::future::BoxFuture;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

/// An asynchronous resolve step
pub type StepFn = Arc<dyn Fn() -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// One entry of a route's resolve list
#[derive(Clone)]
pub enum Dependency {
    /// Arbitrary asynchronous work
    Step(StepFn),
    /// A bundle name from the dependency table
    Named(String),
}

impl Dependency {
    pub fn step<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        Dependency::Step(Arc::new(move || Box::pin(f())))
    }

    pub fn named(name: impl Into<String>) -> Self {
        Dependency::Named(name.into())
    }
}

impl From<&str> for Dependency {
    fn from(name: &str) -> Self {
        Dependency::Named(name.to_string())
    }
}

impl From<String> for Dependency {
    fn from(name: String) -> Self {
        Dependency::Named(name)
    }
}

impl std::fmt::Debug for Dependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dependency::Step(_) => f.write_str("Step(..)"),
            Dependency::Named(name) => f.debug_tuple("Named").field(name).finish(),
        }
    }
}

/// Bundle name to the ordered asset paths that make it up
#[derive(Debug, Clone, Default)]
pub struct DependencyTable {
    bundles: HashMap<String, Vec<String>>,
}

impl DependencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_modules<'a, I>(modules: I) -> Self
    where
        I: IntoIterator<Item = &'a LazyModule>,
    {
        let mut table = Self::new();
        for module in modules {
            table.insert(module.name.clone(), module.files.clone());
        }
        table
    }

    pub fn insert(&mut self, name: impl Into<String>, files: Vec<String>) -> &mut Self {
        self.bundles.insert(name.into(), files);
        self
    }

    /// Asset paths of `name`, or `None` when the bundle is unknown
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.bundles.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bundles.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

/// Loads script and style assets into the page
#[async_trait]
pub trait BundleLoader: Send + Sync {
    /// Completes once every file in `files` is loaded
    async fn load(&self, files: &[String]) -> Result<()>;
}

/// Sequential resolve pipeline of one route
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    steps: Vec<Dependency>,
}

impl Resolver {
    pub fn new(steps: Vec<Dependency>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[Dependency] {
        &self.steps
    }

    /// Bundle names among the steps, in order
    pub fn named(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter_map(|dep| match dep {
                Dependency::Named(name) => Some(name.as_str()),
                Dependency::Step(_) => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order, each after the previous one settled.
    pub async fn resolve(&self, loader: &dyn BundleLoader, table: &DependencyTable) -> Result<()> {
        for (index, dependency) in self.steps.iter().enumerate() {
            match dependency {
                Dependency::Step(step) => {
                    trace!(step = index, "Running resolve step");
                    step().await?;
                }
                Dependency::Named(name) => {
                    let files = table
                        .get(name)
                        .ok_or_else(|| Error::DependencyNotFound(name.clone()))?;
                    trace!(step = index, dependency = %name, files = files.len(), "Loading bundle");
                    loader.load(files).await?;
                }
            }
        }
        debug!(steps = self.steps.len(), "Resolve chain settled");
        Ok(())
    }
}
