// Host module: queues route declarations and start-up hooks until bootstrap

use crate::logging::trace;
use crate::router::StateRegistry;
use crate::scope::RootScope;
use crate::state::{State, StateConfig};
use crate::Result;
use parking_lot::Mutex;
use std::sync::Arc;

/// Hook run against the state registry at bootstrap
pub type ConfigBlock = Box<dyn FnOnce(&mut dyn StateRegistry) -> Result<()> + Send>;

/// Hook run against the root scope once every config block has run
pub type RunBlock = Box<dyn FnOnce(&RootScope) + Send>;

#[derive(Default)]
struct HostInner {
    config_blocks: Vec<ConfigBlock>,
    run_blocks: Vec<RunBlock>,
}

/// Shared handle to the host module.
///
/// Clones refer to the same queues, so modules and views can declare states
/// without holding a reference to the application. Names reach the queue
/// already qualified; only the application, its modules and their views hold
/// a handle.
#[derive(Clone)]
pub(crate) struct HostModule {
    name: Arc<str>,
    inner: Arc<Mutex<HostInner>>,
}

impl HostModule {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: Arc::from(name.into()),
            inner: Arc::new(Mutex::new(HostInner::default())),
        }
    }

    /// Queue a config block
    pub(crate) fn config<F>(&self, block: F)
    where
        F: FnOnce(&mut dyn StateRegistry) -> Result<()> + Send + 'static,
    {
        self.inner.lock().config_blocks.push(Box::new(block));
    }

    /// Queue a run block
    pub(crate) fn run<F>(&self, block: F)
    where
        F: FnOnce(&RootScope) + Send + 'static,
    {
        self.inner.lock().run_blocks.push(Box::new(block));
    }

    /// Queue the registration of an already built state
    pub(crate) fn declare(&self, state: State) {
        trace!(host = %self.name, state = %state.name, "Queueing state declaration");
        self.config(move |registry| registry.register(state));
    }

    /// Queue the registration of a state named `name` described by `config`
    pub(crate) fn add_state(&self, name: impl Into<String>, config: StateConfig) {
        self.declare(State::declare(name, config));
    }

    #[cfg(test)]
    pub(crate) fn pending_config_blocks(&self) -> usize {
        self.inner.lock().config_blocks.len()
    }

    #[cfg(test)]
    pub(crate) fn pending_run_blocks(&self) -> usize {
        self.inner.lock().run_blocks.len()
    }

    /// Take every queued block, leaving the queues empty
    pub(crate) fn drain(&self) -> (Vec<ConfigBlock>, Vec<RunBlock>) {
        let mut inner = self.inner.lock();
        (
            std::mem::take(&mut inner.config_blocks),
            std::mem::take(&mut inner.run_blocks),
        )
    }
}

impl std::fmt::Debug for HostModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("HostModule")
            .field("name", &self.name)
            .field("config_blocks", &inner.config_blocks.len())
            .field("run_blocks", &inner.run_blocks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::StateRouter;

    #[test]
    fn test_blocks_are_queued_in_order() {
        let host = HostModule::new("core");
        host.add_state("app.a", StateConfig::default());
        host.add_state("app.b", StateConfig::default());
        host.run(|scope| scope.set_pending_requests(0));

        assert_eq!(host.pending_config_blocks(), 2);
        assert_eq!(host.pending_run_blocks(), 1);

        let (configs, runs) = host.drain();
        let mut router = StateRouter::new();
        for block in configs {
            block(&mut router).unwrap();
        }
        let names: Vec<_> = router.states().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["app.a", "app.b"]);
        assert_eq!(runs.len(), 1);
        assert_eq!(host.pending_config_blocks(), 0);
    }

    #[test]
    fn test_clones_share_queues() {
        let host = HostModule::new("core");
        let clone = host.clone();
        clone.add_state("app.x", StateConfig::default());
        assert_eq!(host.pending_config_blocks(), 1);
    }
}
