//! The persisted allow-list of active origins.

use serde::{Deserialize, Serialize};

use crate::origin::Origin;

/// Version stamped into every stored registry document.
pub const STORAGE_VERSION: u32 = 1;

/// Ordered, duplicate-free list of origins the extension is active on.
///
/// Insertion order is preserved but carries no meaning. Serializes as a
/// versioned document, `{"version": 1, "origins": [...]}`; the legacy bare
/// array of origin strings is still accepted when reading, so a list written
/// by an older install survives the upgrade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredSites")]
pub struct ActiveSites {
    version: u32,
    origins: Vec<Origin>,
}

impl ActiveSites {
    pub fn new() -> ActiveSites {
        ActiveSites {
            version: STORAGE_VERSION,
            origins: Vec::new(),
        }
    }

    /// Build a registry from origins, dropping duplicates.
    pub fn from_origins(origins: impl IntoIterator<Item = Origin>) -> ActiveSites {
        let mut sites = ActiveSites::new();
        for origin in origins {
            sites.insert(origin);
        }
        sites
    }

    pub fn contains(&self, origin: &Origin) -> bool {
        self.origins.contains(origin)
    }

    /// Add an origin. Returns false (and changes nothing) when it is
    /// already present.
    pub fn insert(&mut self, origin: Origin) -> bool {
        if self.contains(&origin) {
            return false;
        }
        self.origins.push(origin);
        true
    }

    /// Remove an origin. Returns false when it was not present.
    pub fn remove(&mut self, origin: &Origin) -> bool {
        let original_len = self.origins.len();
        self.origins.retain(|o| o != origin);
        self.origins.len() < original_len
    }

    /// Flip membership for an origin. Returns whether it is active afterwards.
    pub fn toggle(&mut self, origin: Origin) -> bool {
        if self.remove(&origin) {
            false
        } else {
            self.origins.push(origin);
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Origin> {
        self.origins.iter()
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}

impl Default for ActiveSites {
    fn default() -> Self {
        Self::new()
    }
}

/// Wire forms accepted when reading from storage.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredSites {
    Versioned { version: u32, origins: Vec<Origin> },
    Legacy(Vec<Origin>),
}

impl From<StoredSites> for ActiveSites {
    fn from(stored: StoredSites) -> ActiveSites {
        let origins = match stored {
            StoredSites::Versioned { origins, .. } => origins,
            StoredSites::Legacy(origins) => origins,
        };
        // Re-inserting dedupes lists written before the duplicate check
        // existed and normalizes the version stamp.
        ActiveSites::from_origins(origins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin(raw: &str) -> Origin {
        Origin::parse(raw).unwrap()
    }

    fn listed(sites: &ActiveSites) -> Vec<String> {
        sites.iter().map(|o| o.as_str().to_string()).collect()
    }

    #[test]
    fn test_insert_and_contains() {
        let mut sites = ActiveSites::new();
        assert!(sites.insert(origin("https://example.com/path")));
        assert!(sites.contains(&origin("https://example.com")));
        assert_eq!(sites.len(), 1);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut once = ActiveSites::new();
        once.insert(origin("https://example.com"));

        let mut twice = ActiveSites::new();
        assert!(twice.insert(origin("https://example.com")));
        assert!(!twice.insert(origin("https://example.com")));

        assert_eq!(once, twice);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut sites = ActiveSites::new();
        assert!(!sites.remove(&origin("https://example.com")));
        assert!(!sites.remove(&origin("https://example.com")));
        assert!(sites.is_empty());
    }

    #[test]
    fn test_round_trip_membership() {
        let mut sites = ActiveSites::new();
        let o = origin("https://foo.test");
        sites.insert(o.clone());
        assert!(sites.contains(&o));
        sites.remove(&o);
        assert!(!sites.contains(&o));
    }

    #[test]
    fn test_toggle_flips_membership() {
        let mut sites = ActiveSites::new();
        assert!(sites.toggle(origin("https://example.com")));
        assert!(sites.contains(&origin("https://example.com")));
        assert!(!sites.toggle(origin("https://example.com")));
        assert!(sites.is_empty());
    }

    #[test]
    fn test_no_duplicates_after_mixed_operations() {
        let mut sites = ActiveSites::new();
        let a = origin("https://a.test");
        let b = origin("https://b.test");
        sites.insert(a.clone());
        sites.insert(b.clone());
        sites.insert(a.clone());
        sites.remove(&b);
        sites.insert(b.clone());
        sites.insert(b.clone());
        sites.toggle(a.clone());
        sites.toggle(a.clone());

        let mut seen = listed(&sites);
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), sites.len());
    }

    #[test]
    fn test_preserves_insertion_order() {
        let mut sites = ActiveSites::new();
        sites.insert(origin("https://b.test"));
        sites.insert(origin("https://a.test"));
        sites.insert(origin("https://c.test"));
        assert_eq!(listed(&sites), vec!["https://b.test", "https://a.test", "https://c.test"]);
    }

    #[test]
    fn test_serializes_versioned_document() {
        let sites = ActiveSites::from_origins([origin("https://example.com")]);
        let json = serde_json::to_value(&sites).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"version": 1, "origins": ["https://example.com"]})
        );
    }

    #[test]
    fn test_reads_versioned_document() {
        let sites: ActiveSites =
            serde_json::from_str(r#"{"version": 1, "origins": ["https://example.com"]}"#).unwrap();
        assert!(sites.contains(&origin("https://example.com")));
        assert_eq!(sites.len(), 1);
    }

    #[test]
    fn test_reads_legacy_bare_array() {
        let sites: ActiveSites =
            serde_json::from_str(r#"["https://example.com", "https://foo.test"]"#).unwrap();
        assert!(sites.contains(&origin("https://example.com")));
        assert!(sites.contains(&origin("https://foo.test")));
        assert_eq!(sites.len(), 2);
    }

    #[test]
    fn test_reading_dedupes_stored_duplicates() {
        let sites: ActiveSites =
            serde_json::from_str(r#"["https://example.com", "https://example.com"]"#).unwrap();
        assert_eq!(sites.len(), 1);
    }

    #[test]
    fn test_serde_round_trip() {
        let sites = ActiveSites::from_origins([origin("https://a.test"), origin("https://b.test")]);
        let json = serde_json::to_string(&sites).unwrap();
        let back: ActiveSites = serde_json::from_str(&json).unwrap();
        assert_eq!(sites, back);
    }
}
