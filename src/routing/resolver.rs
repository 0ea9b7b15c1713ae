//! Redirect target resolution.
//!
//! # Design Decisions
//! - Exact string match only; no trailing-slash, case, or percent-encoding
//!   normalization beyond what the transport already applied
//! - A miss is a normal negative result routed to the fallback, not an error

use crate::config::mapping::PathMapping;

/// Look up the redirect target for a request path.
pub fn resolve<'a>(mapping: &'a PathMapping, path: &str) -> Option<&'a str> {
    mapping.get(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PathMapping {
        let mut mapping = PathMapping::new();
        mapping.insert("/rick", "https://x/rick");
        mapping.insert("/google", "https://x/google");
        mapping
    }

    #[test]
    fn test_resolve_hit() {
        let mapping = sample();
        assert_eq!(resolve(&mapping, "/rick"), Some("https://x/rick"));
        assert_eq!(resolve(&mapping, "/google"), Some("https://x/google"));
    }

    #[test]
    fn test_resolve_miss() {
        let mapping = sample();
        assert_eq!(resolve(&mapping, "/bing"), None);
        assert_eq!(resolve(&mapping, ""), None);
    }

    #[test]
    fn test_no_normalization() {
        let mapping = sample();
        // Exact match: a trailing slash is a different path.
        assert_eq!(resolve(&mapping, "/rick/"), None);
        assert_eq!(resolve(&mapping, "/RICK"), None);
    }
}
