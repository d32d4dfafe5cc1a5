//! Storage port: whole-value persistence of the registry.

use crate::error::StorageError;
use crate::registry::ActiveSites;

/// Async persistence seam over the host key-value store.
///
/// Writes replace the whole stored value, so a failed `save` leaves the
/// stored registry exactly as it was. Serializing read-modify-write cycles
/// is the coordinator's job, not the store's.
#[allow(async_fn_in_trait)]
pub trait SiteStore {
    /// Read the stored registry. `None` when the key has never been written.
    async fn load(&self) -> Result<Option<ActiveSites>, StorageError>;

    /// Replace the stored registry.
    async fn save(&self, sites: &ActiveSites) -> Result<(), StorageError>;
}
