//! Multi-format URL redirect server library.

pub mod config;
pub mod http;
pub mod observability;
pub mod persist;
pub mod routing;

pub use config::schema::ServerConfig;
pub use config::{Format, FormatCache, PathMapping, RedirectRequest};
pub use http::HttpServer;
pub use routing::DispatchChain;
