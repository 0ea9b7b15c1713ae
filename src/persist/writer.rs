//! Mapping write-back.
//!
//! # Responsibilities
//! - Serialize a resolved mapping to a line-oriented audit file
//! - Re-serialize a mapping into its originating format, loadable by the
//!   corresponding decoder
//!
//! # Design Decisions
//! - File handles are scoped: the writer is dropped (and the handle closed)
//!   on every exit path, including a write error partway through
//! - The first error aborts the remaining writes for that call; bytes
//!   already written are not rolled back
//! - Iteration order is unspecified; a persist → load round trip reproduces
//!   the entry set, not the byte order

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::config::format::Format;
use crate::config::mapping::PathMapping;

/// Error type for write-back persistence.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialize error: {0}")]
    Serialize(String),
}

/// Record shape used for the YAML re-serialization, matching the
/// list-of-records input contract.
#[derive(Serialize)]
struct Record<'a> {
    path: &'a str,
    url: &'a str,
}

/// Document shape used for the TOML re-serialization: one named table.
#[derive(Serialize)]
struct TableDocument<'a> {
    redirects: &'a PathMapping,
}

/// Write the mapping as `path - url` lines.
pub fn persist_lines(mapping: &PathMapping, path: &Path) -> Result<(), PersistError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    for (request_path, url) in mapping.iter() {
        writeln!(writer, "{} - {}", request_path, url)?;
    }
    writer.flush()?;

    tracing::debug!(path = %path.display(), entries = mapping.len(), "Mapping persisted");
    Ok(())
}

/// Re-serialize the mapping into the given source format and write it out.
///
/// The chosen document shapes round-trip: loading the written file with the
/// same format reproduces the entry set.
pub fn persist_native(
    mapping: &PathMapping,
    format: Format,
    path: &Path,
) -> Result<(), PersistError> {
    let rendered = render(mapping, format)?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(rendered.as_bytes())?;
    writer.flush()?;

    tracing::debug!(path = %path.display(), %format, "Mapping re-serialized");
    Ok(())
}

fn render(mapping: &PathMapping, format: Format) -> Result<String, PersistError> {
    match format {
        Format::Yaml => {
            let records: Vec<Record<'_>> = mapping
                .iter()
                .map(|(path, url)| Record { path, url })
                .collect();
            serde_yaml::to_string(&records).map_err(|e| PersistError::Serialize(e.to_string()))
        }
        Format::Json => {
            let document = serde_json::json!({ "config": mapping });
            serde_json::to_string_pretty(&document)
                .map_err(|e| PersistError::Serialize(e.to_string()))
        }
        Format::Toml => toml::to_string(&TableDocument { redirects: mapping })
            .map_err(|e| PersistError::Serialize(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cache::FormatCache;
    use crate::config::loader;
    use std::collections::HashSet;
    use std::fs;

    fn sample() -> PathMapping {
        let mut mapping = PathMapping::new();
        mapping.insert("/rick", "https://x/rick");
        mapping.insert("/google", "https://x/google");
        mapping
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("redirect_server_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_line_format() {
        let path = temp_path("lines.txt");
        persist_lines(&sample(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: HashSet<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.contains("/rick - https://x/rick"));
        assert!(lines.contains("/google - https://x/google"));

        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_round_trip_yaml() {
        let path = temp_path("roundtrip.yaml");
        let original = sample();
        persist_native(&original, Format::Yaml, &path).unwrap();

        let bytes = fs::read(&path).unwrap();
        let cache = FormatCache::new();
        let loaded = loader::load(Format::Yaml, &bytes, &cache).unwrap();
        assert_eq!(*loaded, original);

        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_round_trip_json() {
        let path = temp_path("roundtrip.json");
        let original = sample();
        persist_native(&original, Format::Json, &path).unwrap();

        let bytes = fs::read(&path).unwrap();
        let cache = FormatCache::new();
        let loaded = loader::load(Format::Json, &bytes, &cache).unwrap();
        assert_eq!(*loaded, original);

        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_round_trip_toml() {
        let path = temp_path("roundtrip.toml");
        let original = sample();
        persist_native(&original, Format::Toml, &path).unwrap();

        let bytes = fs::read(&path).unwrap();
        let cache = FormatCache::new();
        let loaded = loader::load(Format::Toml, &bytes, &cache).unwrap();
        assert_eq!(*loaded, original);

        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_create_failure_surfaces() {
        let path = temp_path("no_such_dir").join("out.txt");
        let err = persist_lines(&sample(), &path).unwrap_err();
        assert!(matches!(err, PersistError::Io(_)));
    }
}
