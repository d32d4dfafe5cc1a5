//! Serde models of the host tab event payloads.

use serde::{Deserialize, Serialize};

/// Tab object as delivered by chrome.tabs and chrome.action events.
///
/// Every field is optional: the host omits `url` without the tabs
/// permission and `id` for devtools windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabSnapshot {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl TabSnapshot {
    /// True once the tab has finished loading. Intermediate onUpdated
    /// events fire with status "loading" and are not worth acting on.
    pub fn is_complete(&self) -> bool {
        self.status.as_deref() == Some("complete")
    }
}

/// changeInfo payload from chrome.tabs.onUpdated. Only carries the fields
/// that actually changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabChange {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}
