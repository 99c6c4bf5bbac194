// Root scope shared by every controller of the dashboard shell

use crate::menu::{MenuItem, SharedMenuItem, sort_by_position};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Name under which the root scope is injected.
pub const ROOT_SCOPE: &str = "$rootScope";

/// Page-wide state: the document title, the sidebar entries and the count of
/// in-flight data requests.
#[derive(Debug, Default)]
pub struct RootScope {
    title: RwLock<String>,
    menu_items: RwLock<Vec<SharedMenuItem>>,
    pending_requests: AtomicUsize,
}

impl RootScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> String {
        self.title.read().clone()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        *self.title.write() = title.into();
    }

    pub fn push_menu_item(&self, item: SharedMenuItem) {
        self.menu_items.write().push(item);
    }

    /// Sidebar entries in the order modules were started
    pub fn menu_items(&self) -> Vec<MenuItem> {
        self.menu_items
            .read()
            .iter()
            .map(|item| item.read().clone())
            .collect()
    }

    /// Sidebar entries in display order
    pub fn sorted_menu_items(&self) -> Vec<MenuItem> {
        let mut items = self.menu_items();
        sort_by_position(&mut items);
        items
    }

    /// Route resolutions currently in flight
    pub fn pending_requests(&self) -> usize {
        self.pending_requests.load(Ordering::SeqCst)
    }

    pub fn set_pending_requests(&self, count: usize) {
        self.pending_requests.store(count, Ordering::SeqCst);
    }

    pub fn request_started(&self) -> usize {
        self.pending_requests.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn request_finished(&self) -> usize {
        let previous = self
            .pending_requests
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| Some(n.saturating_sub(1)))
            .unwrap_or(0);
        previous.saturating_sub(1)
    }
}
