//! Source-text helpers used to infer controller dependencies.
//!
//! A callback shipped with its source text, such as
//! `function (services) { services.$http.get(...) }`, names the services it
//! needs through attribute accesses on its first parameter. These helpers
//! recover those names. The scan is purely textual: services reached through
//! an alias, a helper function or a computed property are not seen.

use crate::logging::warn;
use regex::Regex;
use std::collections::HashSet;
use std::hash::Hash;

/// Ordered copy of `items` with later duplicates removed.
pub fn unique<T, I>(items: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Text strictly between the first `open` and the next `close` after it.
pub fn between(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let body = &text[start + open.len_utf8()..];
    let end = body.find(close)?;
    Some(&body[..end])
}

/// Declared parameter names of a function given its source text.
///
/// Returns an empty list when the source has no parenthesised parameter list.
pub fn parameter_names(source: &str) -> Vec<String> {
    between(source, '(', ')')
        .map(|params| {
            params
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Attributes accessed on the variable `name` in `source`, in first-occurrence
/// order and without duplicates.
///
/// An access only counts when `name` is preceded by a character that cannot
/// belong to an identifier, so `myservices.x` is not an access on `services`.
pub fn attributes_of(source: &str, name: &str) -> Vec<String> {
    let pattern = format!(
        r"[^a-zA-Z0-9_$]{}\.([0-9a-zA-Z_$]+)",
        regex::escape(name)
    );
    let regex = match Regex::new(&pattern) {
        Ok(regex) => regex,
        Err(e) => {
            warn!(variable = name, error = %e, "Cannot scan for attribute accesses");
            return Vec::new();
        }
    };

    unique(
        regex
            .captures_iter(source)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string()),
    )
}

/// Services used by a callback: the attributes accessed on its first
/// parameter. A callback without parameters uses none.
pub fn services_used_in(source: &str) -> Vec<String> {
    match parameter_names(source).first() {
        Some(param) => attributes_of(source, param),
        None => Vec::new(),
    }
}
