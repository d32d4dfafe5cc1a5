//! Runtime configuration for the background worker.

use crate::icon::IconPaths;
use crate::origin::Origin;

/// chrome.storage.local key the registry lives under.
pub const DEFAULT_STORAGE_KEY: &str = "activeSites";

/// Settings the background worker runs with.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage key holding the registry document.
    pub storage_key: String,
    /// Toolbar icon assets for the two states.
    pub icons: IconPaths,
    /// Origins the registry is seeded with on first use. Empty by default;
    /// a build can ship a prefilled allow-list here.
    pub seed: Vec<Origin>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            icons: IconPaths::new("./icons/toggle-on.svg", "./icons/toggle-off.svg"),
            seed: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed_is_empty() {
        assert!(Config::default().seed.is_empty());
    }

    #[test]
    fn test_default_storage_key() {
        assert_eq!(Config::default().storage_key, "activeSites");
    }

    #[test]
    fn test_default_icons_differ_per_state() {
        let icons = Config::default().icons;
        assert_ne!(icons.asset_for(true), icons.asset_for(false));
    }
}
