// State registry the application declares its routes into

use crate::logging::debug;
use crate::state::State;
use crate::{Error, Result};
use std::collections::HashMap;

/// Receiver of state declarations
pub trait StateRegistry {
    fn register(&mut self, state: State) -> Result<()>;
}

/// In-memory state router
#[derive(Debug, Clone, Default)]
pub struct StateRouter {
    states: Vec<State>,
    index: HashMap<String, usize>,
}

impl StateRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&State> {
        self.index.get(name).map(|&i| &self.states[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// States in declaration order
    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Full URL of a state: the URLs of its registered ancestors followed by
    /// its own.
    pub fn href(&self, name: &str) -> Option<String> {
        let state = self.get(name)?;
        let mut segments = vec![state.url.as_str()];
        let mut parent = state.parent_name();
        while let Some(parent_name) = parent {
            match self.get(parent_name) {
                Some(ancestor) => {
                    segments.push(ancestor.url.as_str());
                    parent = ancestor.parent_name();
                }
                None => parent = parent_name.rsplit_once('.').map(|(p, _)| p),
            }
        }
        segments.reverse();

        let url: String = segments.concat();
        Some(if url.is_empty() { "/".to_string() } else { url })
    }

    /// First concrete state whose full URL is `url`
    pub fn find_by_url(&self, url: &str) -> Option<&State> {
        let wanted = normalize(url);
        self.states
            .iter()
            .filter(|state| !state.is_abstract)
            .find(|state| {
                self.href(&state.name)
                    .map(|href| normalize(&href) == wanted)
                    .unwrap_or(false)
            })
    }
}

impl StateRegistry for StateRouter {
    fn register(&mut self, state: State) -> Result<()> {
        if self.index.contains_key(&state.name) {
            return Err(Error::DuplicateState(state.name));
        }
        debug!(state = %state.name, url = %state.url, "State registered");
        self.index.insert(state.name.clone(), self.states.len());
        self.states.push(state);
        Ok(())
    }
}

fn normalize(url: &str) -> &str {
    let trimmed = url.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StateConfig;

    fn router() -> StateRouter {
        let mut router = StateRouter::new();
        router
            .register(State::declare("app", StateConfig::default().abstract_state()))
            .unwrap();
        router
            .register(State::declare(
                "app.trends",
                StateConfig::default().url("/trends").abstract_state(),
            ))
            .unwrap();
        router
            .register(State::declare(
                "app.trends.overview",
                StateConfig::default().url("/overview"),
            ))
            .unwrap();
        router
    }

    #[test]
    fn test_duplicate_state_rejected() {
        let mut router = router();
        let err = router
            .register(State::declare("app.trends", StateConfig::default()))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateState(name) if name == "app.trends"));
        assert_eq!(router.len(), 3);
    }

    #[test]
    fn test_href_concatenates_ancestors() {
        let router = router();
        assert_eq!(router.href("app.trends.overview").as_deref(), Some("/trends/overview"));
        assert_eq!(router.href("app").as_deref(), Some("/"));
        assert_eq!(router.href("app.unknown"), None);
    }

    #[test]
    fn test_find_by_url_skips_abstract_states() {
        let router = router();
        assert_eq!(
            router.find_by_url("/trends/overview/").map(|s| s.name.as_str()),
            Some("app.trends.overview")
        );
        assert!(router.find_by_url("/trends").is_none());
    }
}
