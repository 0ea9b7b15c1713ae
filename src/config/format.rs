//! Source format identifiers.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A supported configuration source format.
///
/// Each format maps to one decoder and one namespace of the dispatch chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Yaml,
    Json,
    Toml,
}

/// Error returned when a format identifier is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown format identifier: {0:?}")]
pub struct UnknownFormat(pub String);

impl Format {
    /// Canonical lowercase identifier, also used as the namespace default.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
            Format::Toml => "toml",
        }
    }

    /// Detect the format from a file extension (`.yaml`/`.yml`, `.json`, `.toml`).
    pub fn from_path(path: &Path) -> Option<Format> {
        match path.extension()?.to_str()? {
            "yaml" | "yml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            "toml" => Some(Format::Toml),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yaml" | "yml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            "toml" => Ok(Format::Toml),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identifiers() {
        assert_eq!("yaml".parse::<Format>().unwrap(), Format::Yaml);
        assert_eq!("yml".parse::<Format>().unwrap(), Format::Yaml);
        assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
        assert_eq!("toml".parse::<Format>().unwrap(), Format::Toml);
        assert!("xml".parse::<Format>().is_err());
    }

    #[test]
    fn test_detect_from_path() {
        assert_eq!(Format::from_path(Path::new("redirects.yml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("a/b/redirects.toml")), Some(Format::Toml));
        assert_eq!(Format::from_path(Path::new("redirects.ini")), None);
        assert_eq!(Format::from_path(Path::new("redirects")), None);
    }
}
