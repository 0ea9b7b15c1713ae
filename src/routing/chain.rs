//! Namespace dispatch chain.
//!
//! # Responsibilities
//! - Hold the registered namespaces in registration order
//! - Strip a matching namespace prefix and resolve the remainder against
//!   that namespace's live mapping
//! - Fall through to the terminal catch-all when nothing resolves
//! - Merge validated runtime registrations into the live mappings
//!
//! # Design Decisions
//! - Prefix stripping is generic over the namespace string; no assumptions
//!   about prefix length
//! - Each mapping sits behind its own RwLock: per-request reads, a write
//!   lock only while a registration merges, so readers never observe a
//!   partially merged map
//! - First matching namespace wins; a miss inside it continues down the
//!   chain and ultimately falls through to the catch-all

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::format::Format;
use crate::config::mapping::{PathMapping, RedirectRequest};
use crate::config::validation::{validate_request, ValidationError};
use crate::routing::resolver::resolve;

/// One namespace of the dispatch chain: a URL prefix bound to the live
/// mapping decoded from one source format.
struct Namespace {
    prefix: String,
    format: Format,
    mapping: Arc<RwLock<PathMapping>>,
}

/// Outcome of dispatching a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A mapping entry matched; redirect to this destination.
    Redirect {
        target: String,
        /// Namespace prefix that resolved the path, for logging/metrics.
        namespace: String,
    },
    /// Nothing resolved; the terminal catch-all handles the request.
    Fallthrough,
}

/// Ordered list of namespaces with a terminal catch-all.
#[derive(Default)]
pub struct DispatchChain {
    namespaces: Vec<Namespace>,
}

impl DispatchChain {
    /// Create an empty chain. With no namespaces every path falls through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a namespace. Dispatch checks namespaces in registration order.
    pub fn add_namespace(&mut self, prefix: impl Into<String>, format: Format, mapping: PathMapping) {
        self.namespaces.push(Namespace {
            prefix: canonical_prefix(&prefix.into()),
            format,
            mapping: Arc::new(RwLock::new(mapping)),
        });
    }

    /// Resolve a request path against the chain.
    pub async fn dispatch(&self, path: &str) -> Dispatch {
        for namespace in &self.namespaces {
            let Some(remainder) = strip_namespace(&namespace.prefix, path) else {
                continue;
            };

            let mapping = namespace.mapping.read().await;
            if let Some(target) = resolve(&mapping, remainder) {
                return Dispatch::Redirect {
                    target: target.to_string(),
                    namespace: namespace.prefix.clone(),
                };
            }
            // Miss within the namespace: keep falling through the chain.
        }
        Dispatch::Fallthrough
    }

    /// Validate a registration and merge it into every namespace's live
    /// mapping. A validation failure mutates nothing.
    pub async fn register(&self, request: &RedirectRequest) -> Result<(), ValidationError> {
        validate_request(request)?;

        for namespace in &self.namespaces {
            let mut mapping = namespace.mapping.write().await;
            mapping.insert(request.path.clone(), request.url.clone());
        }
        Ok(())
    }

    /// Snapshot the current mapping for a format, if a namespace serves it.
    pub async fn snapshot(&self, format: Format) -> Option<PathMapping> {
        for namespace in &self.namespaces {
            if namespace.format == format {
                return Some(namespace.mapping.read().await.clone());
            }
        }
        None
    }
}

/// Normalize a configured prefix to `/name` form (leading slash, no
/// trailing slash). The bare root is left as `/`.
fn canonical_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Strip a namespace prefix from a request path, keeping the remainder
/// rooted. Returns `None` when the prefix does not match on a segment
/// boundary.
fn strip_namespace<'a>(prefix: &str, path: &'a str) -> Option<&'a str> {
    let remainder = path.strip_prefix(prefix)?;
    if remainder.starts_with('/') {
        Some(remainder)
    } else {
        None
    }
}
