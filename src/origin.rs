//! Origin normalization: URL string to scheme+host+port identity.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ToggleError;

/// A normalized web origin: scheme, host and non-default port of a URL,
/// with path, query and fragment stripped.
///
/// Values only exist for URLs with a real (tuple) origin, so an `Origin` is
/// never empty and never the opaque `"null"` serialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Origin(String);

impl Origin {
    /// Normalize an absolute URL down to its origin.
    ///
    /// Examples:
    /// - https://www.example.com/path?q=1 → https://www.example.com
    /// - HTTPS://Example.COM:443/ → https://example.com
    /// - http://localhost:3000/app → http://localhost:3000
    ///
    /// Fails with `InvalidUrl` for anything that is not a parseable absolute
    /// URL, and for URLs whose origin is opaque (`data:`, `about:blank`,
    /// `file:` and other non-web schemes). Normalizing an already-normalized
    /// origin returns an equal value.
    pub fn parse(raw: &str) -> Result<Origin, ToggleError> {
        let url = Url::parse(raw.trim()).map_err(|_| ToggleError::InvalidUrl(raw.to_string()))?;
        match url.origin() {
            origin @ url::Origin::Tuple(..) => Ok(Origin(origin.ascii_serialization())),
            url::Origin::Opaque(_) => Err(ToggleError::InvalidUrl(raw.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin(raw: &str) -> Origin {
        Origin::parse(raw).unwrap()
    }

    #[test]
    fn test_strips_path_query_and_fragment() {
        assert_eq!(origin("https://example.com/path").as_str(), "https://example.com");
        assert_eq!(
            origin("https://example.com/search?q=rust#results").as_str(),
            "https://example.com"
        );
        assert_eq!(origin("http://example.com/").as_str(), "http://example.com");
    }

    #[test]
    fn test_keeps_subdomain() {
        assert_eq!(origin("https://news.bbc.co.uk/article").as_str(), "https://news.bbc.co.uk");
    }

    #[test]
    fn test_ignores_credentials() {
        assert_eq!(origin("https://user:pw@example.com/x").as_str(), "https://example.com");
    }

    #[test]
    fn test_lowercases_scheme_and_host() {
        assert_eq!(origin("HTTPS://Example.COM/Path").as_str(), "https://example.com");
    }

    #[test]
    fn test_default_port_elided() {
        assert_eq!(origin("https://example.com:443/").as_str(), "https://example.com");
        assert_eq!(origin("http://example.com:80/").as_str(), "http://example.com");
    }

    #[test]
    fn test_explicit_port_kept() {
        assert_eq!(origin("http://localhost:3000/app").as_str(), "http://localhost:3000");
        assert_eq!(origin("http://127.0.0.1:8080/x").as_str(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_idempotent() {
        let first = origin("https://example.com/deep/path");
        let second = Origin::parse(first.as_str()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_non_absolute_input() {
        assert!(matches!(Origin::parse("not-a-url"), Err(ToggleError::InvalidUrl(_))));
        assert!(matches!(Origin::parse(""), Err(ToggleError::InvalidUrl(_))));
        assert!(matches!(Origin::parse("/relative/path"), Err(ToggleError::InvalidUrl(_))));
        assert!(matches!(Origin::parse("https://"), Err(ToggleError::InvalidUrl(_))));
    }

    #[test]
    fn test_rejects_opaque_origins() {
        assert!(matches!(
            Origin::parse("data:text/html,hello"),
            Err(ToggleError::InvalidUrl(_))
        ));
        assert!(matches!(Origin::parse("about:blank"), Err(ToggleError::InvalidUrl(_))));
    }
}
