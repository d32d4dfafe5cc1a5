//! Status derivation: membership in the registry is the status.

use crate::origin::Origin;
use crate::registry::ActiveSites;

/// Per-event session state: the origin an event was about and whether the
/// extension is active there.
///
/// Rebuilt from a registry snapshot on every event, never persisted. A
/// status flag stored next to the list can drift out of sync with it;
/// a value derived on demand can not.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteStatus {
    pub origin: Origin,
    pub active: bool,
}

/// Resolve an origin's status against a registry snapshot.
pub fn resolve(sites: &ActiveSites, origin: &Origin) -> SiteStatus {
    SiteStatus {
        origin: origin.clone(),
        active: sites.contains(origin),
    }
}
