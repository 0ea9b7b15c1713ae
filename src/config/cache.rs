//! One-time-parse cache for resolved mappings.

use std::sync::Arc;

use dashmap::DashMap;

use crate::config::format::Format;
use crate::config::mapping::PathMapping;

/// A thread-safe cache holding at most one resolved mapping per source
/// format. Absence means "not yet loaded"; the loader consults the cache
/// before decoding so each format is parsed once per process lifetime
/// unless explicitly invalidated.
#[derive(Clone, Default)]
pub struct FormatCache {
    inner: Arc<DashMap<Format, Arc<PathMapping>>>,
}

impl FormatCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached mapping for a format, if loaded.
    pub fn get(&self, format: Format) -> Option<Arc<PathMapping>> {
        self.inner.get(&format).map(|entry| entry.value().clone())
    }

    /// Store the resolved mapping for a format, replacing any previous entry.
    pub fn insert(&self, format: Format, mapping: Arc<PathMapping>) {
        self.inner.insert(format, mapping);
    }

    /// Drop the cached entry for a format so the next load re-decodes.
    /// Returns true if an entry was present.
    pub fn invalidate(&self, format: Format) -> bool {
        self.inner.remove(&format).is_some()
    }

    /// Number of formats currently cached.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True if no format has been loaded yet.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_operations() {
        let cache = FormatCache::new();
        assert!(cache.get(Format::Yaml).is_none());

        let mut mapping = PathMapping::new();
        mapping.insert("/rick", "https://x/rick");
        let mapping = Arc::new(mapping);

        cache.insert(Format::Yaml, mapping.clone());
        let cached = cache.get(Format::Yaml).unwrap();
        // Same instance, not a copy.
        assert!(Arc::ptr_eq(&cached, &mapping));
        assert!(cache.get(Format::Json).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate() {
        let cache = FormatCache::new();
        cache.insert(Format::Toml, Arc::new(PathMapping::new()));

        assert!(cache.invalidate(Format::Toml));
        assert!(!cache.invalidate(Format::Toml));
        assert!(cache.is_empty());
    }
}
