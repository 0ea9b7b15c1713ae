//! Write-back persistence subsystem.
//!
//! Resolved mappings are written to disk on demand for audit and
//! debugging: a human-readable `path - url` line file plus a
//! re-serialization in the namespace's originating format. Best effort
//! only; a failure here never affects the in-memory mappings.

pub mod writer;

pub use writer::{persist_lines, persist_native, PersistError};
