//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, request ID)
//!     → dispatch chain (namespace match, mapping lookup)
//!     → 303 redirect, or 301 → "/" from the catch-all
//!
//! Admin API:
//!     GET  /api/status           → version + status
//!     GET  /api/config/{format}  → JSON dump of the live mapping
//!     POST /api/config/add       → runtime registration (201 / 400)
//! ```

pub mod request;
pub mod server;

pub use request::{MakeUuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
