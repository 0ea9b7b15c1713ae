//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! server config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → ServerConfig (defaults applied, immutable)
//!
//! redirect source bytes (YAML/JSON/TOML)
//!     → loader.rs decode (format-specific, into a generic nested value)
//!     → loader.rs normalize (one shape function for all formats)
//!     → validation.rs (entry checks)
//!     → PathMapping, stored once per format in cache.rs
//! ```
//!
//! # Design Decisions
//! - Each source format is parsed at most once per process; the cache is
//!   consulted before any decode work
//! - Shape normalization is structure-driven, so a format gains a new shape
//!   without a new loader
//! - Entry validation is shared with the runtime registration path

pub mod cache;
pub mod format;
pub mod loader;
pub mod mapping;
pub mod schema;
pub mod validation;

pub use cache::FormatCache;
pub use format::Format;
pub use loader::ConfigError;
pub use mapping::{PathMapping, RedirectRequest};
pub use schema::ServerConfig;
pub use validation::ValidationError;
