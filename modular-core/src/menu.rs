//! Sidebar navigation menu.
//!
//! Entries keep their insertion order. The sidebar displays them sorted by
//! `position` through [`Menu::sorted`]; the menu itself is never reordered.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

/// A navigation entry with optional nested children
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    pub href: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub childs: Vec<MenuItem>,
}

impl MenuItem {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
            ..Self::default()
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_position(mut self, position: i32) -> Self {
        self.position = Some(position);
        self
    }
}

/// Menu entry shared between the menu, its module and the root scope.
pub type SharedMenuItem = Arc<RwLock<MenuItem>>;

/// Ordered list of top-level menu entries
#[derive(Debug, Clone, Default)]
pub struct Menu {
    items: Vec<SharedMenuItem>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return a handle for later mutation.
    pub fn add(&mut self, item: MenuItem) -> SharedMenuItem {
        let shared = Arc::new(RwLock::new(item));
        self.items.push(shared.clone());
        shared
    }

    /// Append several entries, in order.
    pub fn add_all<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = MenuItem>,
    {
        for item in items {
            self.add(item);
        }
        self
    }

    pub fn items(&self) -> &[SharedMenuItem] {
        &self.items
    }

    /// Copy of all entries in insertion order
    pub fn snapshot(&self) -> Vec<MenuItem> {
        self.items.iter().map(|item| item.read().clone()).collect()
    }

    /// Copy of all entries in display order
    pub fn sorted(&self) -> Vec<MenuItem> {
        let mut items = self.snapshot();
        sort_by_position(&mut items);
        items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Stable sort by ascending `position`; entries without one go last.
pub fn sort_by_position(items: &mut [MenuItem]) {
    items.sort_by(|a, b| match (a.position, b.position) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
