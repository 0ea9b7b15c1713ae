//! Mapping entry validation.
//!
//! # Responsibilities
//! - Semantic validation of `(path, url)` pairs (serde handles syntactic)
//! - Shared between the loader and the runtime registration endpoint
//!
//! # Design Decisions
//! - Pure functions: input → Result, no state touched
//! - A rejected registration must leave the live mappings unchanged, so
//!   validation always runs before any mutation

use thiserror::Error;
use url::Url;

use crate::config::mapping::RedirectRequest;

/// A `(path, url)` pair that cannot enter a mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("path must not be empty")]
    EmptyPath,

    #[error("path {0:?} must start with '/'")]
    RelativePath(String),

    #[error("destination {url:?} is not a valid absolute url: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Check that a request path is non-empty and rooted.
pub fn validate_path(path: &str) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::EmptyPath);
    }
    if !path.starts_with('/') {
        return Err(ValidationError::RelativePath(path.to_string()));
    }
    Ok(())
}

/// Check that a destination is a syntactically valid absolute URL.
pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    Url::parse(url)
        .map(|_| ())
        .map_err(|e| ValidationError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })
}

/// Validate a registration request as a whole.
pub fn validate_request(request: &RedirectRequest) -> Result<(), ValidationError> {
    validate_path(&request.path)?;
    validate_url(&request.url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_rules() {
        assert_eq!(validate_path(""), Err(ValidationError::EmptyPath));
        assert_eq!(
            validate_path("rick"),
            Err(ValidationError::RelativePath("rick".to_string()))
        );
        assert!(validate_path("/rick").is_ok());
    }

    #[test]
    fn test_url_rules() {
        assert!(validate_url("https://x/rick").is_ok());
        // Relative references have no base to resolve against.
        assert!(validate_url("/rick").is_err());
        assert!(validate_url("").is_err());
    }

    #[test]
    fn test_request_rules() {
        let ok = RedirectRequest {
            path: "/new".to_string(),
            url: "https://y".to_string(),
        };
        assert!(validate_request(&ok).is_ok());

        let bad = RedirectRequest {
            path: String::new(),
            url: "https://y".to_string(),
        };
        assert_eq!(validate_request(&bad), Err(ValidationError::EmptyPath));
    }
}
