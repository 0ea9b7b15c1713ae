//! Canonical path-to-URL mapping.
//!
//! # Responsibilities
//! - Hold the in-memory result of decoding one configuration source
//! - Exact-key access for the resolver
//! - Last-write-wins insertion during load and runtime registration
//!
//! # Design Decisions
//! - Newtype over `HashMap` so serde sees a plain JSON object
//! - Iteration order is unspecified; persisted output makes no ordering claim
//! - A load either fully replaces a cached mapping or leaves it untouched;
//!   partial updates never escape the loader

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Mapping from request path to destination URL, independent of the
/// serialization format it was decoded from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathMapping {
    entries: HashMap<String, String>,
}

impl PathMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. Returns the previous URL if the path was already
    /// mapped (last write wins).
    pub fn insert(&mut self, path: impl Into<String>, url: impl Into<String>) -> Option<String> {
        self.entries.insert(path.into(), url.into())
    }

    /// Look up the destination URL for an exact path.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the mapping holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(path, url)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for PathMapping {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Runtime registration payload: one `(path, url)` pair to merge into the
/// live mappings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedirectRequest {
    pub path: String,
    pub url: String,
}
