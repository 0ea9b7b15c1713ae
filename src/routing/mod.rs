//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → chain.rs (namespace prefix match, generic strip)
//!     → resolver.rs (exact lookup in the namespace's live mapping)
//!     → Dispatch::Redirect or Dispatch::Fallthrough (terminal catch-all)
//!
//! Chain construction (at startup):
//!     loaded PathMapping per source
//!     → add_namespace() in registration order
//!     → shared via Arc with every handler
//! ```
//!
//! # Design Decisions
//! - Namespaces checked in registration order, first match wins
//! - Explicit Fallthrough rather than a silent default
//! - Exact-path equality only; no patterns in the hot path

pub mod chain;
pub mod resolver;

pub use chain::{Dispatch, DispatchChain};
pub use resolver::resolve;
