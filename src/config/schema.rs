//! Configuration schema definitions.
//!
//! This module defines the server-level configuration structure. All types
//! derive Serde traits for deserialization from config files; every field
//! has a default so a minimal (or empty) config file is valid.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::format::Format;

/// Root configuration for the redirect server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Redirect mapping sources, one namespace each.
    pub sources: Vec<SourceConfig>,

    /// Write-back persistence settings.
    pub persistence: PersistenceConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// One redirect mapping source.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Path to the mapping file.
    pub path: PathBuf,

    /// Source format. Detected from the file extension when omitted.
    #[serde(default)]
    pub format: Option<Format>,

    /// Namespace prefix served from this source (e.g., "/yaml").
    /// Defaults to "/" + the format identifier.
    #[serde(default)]
    pub namespace: Option<String>,
}

impl SourceConfig {
    /// The namespace prefix for this source, given its resolved format.
    pub fn namespace_or_default(&self, format: Format) -> String {
        match &self.namespace {
            Some(ns) => ns.clone(),
            None => format!("/{}", format.as_str()),
        }
    }
}

/// Write-back persistence settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Write resolved mappings back to disk after loading.
    pub enabled: bool,

    /// Directory the audit and re-serialized files are written into.
    pub output_dir: PathBuf,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output_dir: PathBuf::from("."),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(config.sources.is_empty());
        assert!(config.persistence.enabled);
        assert_eq!(config.timeouts.request_secs, 30);
    }

    #[test]
    fn test_source_section() {
        let config: ServerConfig = toml::from_str(
            r#"
            [[sources]]
            path = "redirects.yml"

            [[sources]]
            path = "links.conf"
            format = "toml"
            namespace = "/links"
            "#,
        )
        .unwrap();

        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.sources[0].format, None);
        assert_eq!(config.sources[0].namespace_or_default(Format::Yaml), "/yaml");
        assert_eq!(config.sources[1].format, Some(Format::Toml));
        assert_eq!(config.sources[1].namespace_or_default(Format::Toml), "/links");
    }
}
