//! Configuration loading.
//!
//! # Responsibilities
//! - Load and parse the server-level config file (TOML)
//! - Ingest redirect mapping sources: decode bytes per format, normalize the
//!   decoded document into a canonical [`PathMapping`], populate the cache
//!
//! # Design Decisions
//! - One generic decode step per format into `serde_json::Value`, then a
//!   single shape-normalization function; no per-format loader duplication
//! - The cache short-circuit is checked first: a format already loaded is
//!   returned as-is without re-decoding, even for different input bytes
//! - Decode or validation failure never touches the cache

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::config::cache::FormatCache;
use crate::config::format::Format;
use crate::config::mapping::PathMapping;
use crate::config::schema::ServerConfig;
use crate::config::validation::{validate_path, validate_url, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse server config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{format} decode error: {message}")]
    Decode { format: Format, message: String },

    #[error("{format} document has unsupported shape: {message}")]
    Shape { format: Format, message: String },

    #[error("invalid mapping entry: {0}")]
    Entry(#[from] ValidationError),

    #[error("cannot determine format for source {0:?} (no recognized extension)")]
    UnknownFormat(String),
}

/// Load the server-level configuration from a TOML file.
pub fn load_server_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ServerConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Resolve a mapping for one source format.
///
/// Returns the cached mapping unchanged when the format was already loaded.
/// Otherwise decodes `bytes`, normalizes the document shape, validates every
/// entry, and stores the result in the cache. On any failure the cache is
/// left untouched.
pub fn load(
    format: Format,
    bytes: &[u8],
    cache: &FormatCache,
) -> Result<Arc<PathMapping>, ConfigError> {
    if let Some(cached) = cache.get(format) {
        tracing::debug!(%format, "Mapping cache hit, skipping decode");
        return Ok(cached);
    }

    let document = decode(format, bytes)?;
    let mapping = Arc::new(normalize(format, document)?);
    cache.insert(format, mapping.clone());

    tracing::info!(%format, entries = mapping.len(), "Mapping decoded");
    Ok(mapping)
}

/// Decode raw bytes into a generic nested value.
fn decode(format: Format, bytes: &[u8]) -> Result<Value, ConfigError> {
    match format {
        Format::Yaml => serde_yaml::from_slice(bytes).map_err(|e| ConfigError::Decode {
            format,
            message: e.to_string(),
        }),
        Format::Json => serde_json::from_slice(bytes).map_err(|e| ConfigError::Decode {
            format,
            message: e.to_string(),
        }),
        Format::Toml => {
            let text = std::str::from_utf8(bytes).map_err(|e| ConfigError::Decode {
                format,
                message: e.to_string(),
            })?;
            toml::from_str(text).map_err(|e| ConfigError::Decode {
                format,
                message: e.to_string(),
            })
        }
    }
}

/// Normalize a decoded document into the canonical mapping.
///
/// Three shapes are accepted, selected by structure rather than by format:
/// - a sequence of `{path, url}` records
/// - a table with a `config` field holding a path → url table
/// - a collection of named tables whose string leaves are path → url
///   entries (tables may nest to arbitrary depth)
fn normalize(format: Format, document: Value) -> Result<PathMapping, ConfigError> {
    let mut mapping = PathMapping::new();

    match document {
        Value::Array(records) => {
            for record in &records {
                let entry = record.as_object().ok_or_else(|| ConfigError::Shape {
                    format,
                    message: "sequence elements must be {path, url} records".to_string(),
                })?;
                let path = entry.get("path").and_then(Value::as_str);
                let url = entry.get("url").and_then(Value::as_str);
                match (path, url) {
                    (Some(path), Some(url)) => insert_entry(&mut mapping, path, url)?,
                    _ => {
                        return Err(ConfigError::Shape {
                            format,
                            message: "record is missing a string path or url field".to_string(),
                        })
                    }
                }
            }
        }
        Value::Object(mut doc) => {
            if let Some(config) = doc.remove("config") {
                let table = config.as_object().ok_or_else(|| ConfigError::Shape {
                    format,
                    message: "config field must be a table of path → url".to_string(),
                })?;
                for (path, url) in table {
                    let url = url.as_str().ok_or_else(|| ConfigError::Shape {
                        format,
                        message: format!("destination for {path:?} must be a string"),
                    })?;
                    insert_entry(&mut mapping, path, url)?;
                }
            } else {
                collect_tables(format, &Value::Object(doc), &mut mapping)?;
            }
        }
        _ => {
            return Err(ConfigError::Shape {
                format,
                message: "document must be a sequence of records or a table".to_string(),
            })
        }
    }

    Ok(mapping)
}

/// Flatten nested tables: every string leaf is a path → url entry keyed by
/// its innermost key. Collisions across tables are last-write-wins with an
/// unspecified iteration order.
fn collect_tables(
    format: Format,
    value: &Value,
    mapping: &mut PathMapping,
) -> Result<(), ConfigError> {
    if let Value::Object(table) = value {
        for (key, entry) in table {
            match entry {
                Value::String(url) => insert_entry(mapping, key, url)?,
                Value::Object(_) => collect_tables(format, entry, mapping)?,
                _ => {
                    return Err(ConfigError::Shape {
                        format,
                        message: format!("table entry {key:?} must be a string or a table"),
                    })
                }
            }
        }
    }
    Ok(())
}

fn insert_entry(mapping: &mut PathMapping, path: &str, url: &str) -> Result<(), ConfigError> {
    validate_path(path)?;
    validate_url(url)?;
    mapping.insert(path, url);
    Ok(())
}
