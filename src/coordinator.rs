//! Serializes tab-update and toolbar-click events against the registry.

use std::cell::RefCell;

use futures::lock::{Mutex, MutexGuard};
use log::debug;

use crate::error::ToggleError;
use crate::icon::IconPresenter;
use crate::origin::Origin;
use crate::registry::ActiveSites;
use crate::status::{resolve, SiteStatus};
use crate::store::SiteStore;
use crate::tab::{TabChange, TabSnapshot};

/// One-way notification channel to a tab's content script.
pub trait SignalSink {
    fn notify(&self, tab_id: i32, active: bool);
}

/// Where the coordinator is inside a transition. Stored behind the gate, so
/// a second event can never observe a half-applied one.
#[derive(Debug)]
enum Phase {
    Idle,
    Updating(Origin),
    Toggling(Origin),
}

/// The single funnel for all host events touching the registry or the icon.
///
/// Every transition holds `gate` for its whole read-resolve-present span
/// (including the write, for a toggle). An event that arrives mid-transition
/// awaits the lock and runs afterwards. That queueing is what keeps the icon
/// and the registry in agreement when a click lands while a navigation
/// update is still in flight; two unserialized handlers would each read,
/// write and present against different snapshots.
pub struct Coordinator<S, P, N> {
    seed: Vec<Origin>,
    store: S,
    icon: P,
    signals: N,
    gate: Mutex<Phase>,
    /// Last resolved status. Informational only: consulted for
    /// storage-change refreshes and for clicks on tabs whose URL the host
    /// withholds, overwritten on every transition, never the source of truth.
    session: RefCell<Option<SiteStatus>>,
}

impl<S, P, N> Coordinator<S, P, N>
where
    S: SiteStore,
    P: IconPresenter,
    N: SignalSink,
{
    pub fn new(seed: Vec<Origin>, store: S, icon: P, signals: N) -> Coordinator<S, P, N> {
        Coordinator {
            seed,
            store,
            icon,
            signals,
            gate: Mutex::new(Phase::Idle),
            session: RefCell::new(None),
        }
    }

    /// chrome.runtime.onInstalled: make sure a stored registry exists.
    pub async fn installed(&self) -> Result<(), ToggleError> {
        let mut phase = self.enter().await;
        let result = self.load_or_seed().await;
        *phase = Phase::Idle;
        result.map(|_| ())
    }

    /// chrome.tabs.onUpdated: refresh the icon once navigation settles.
    ///
    /// Intermediate events (tab still loading, no URL available) return
    /// `Ok(None)` without touching anything. A malformed URL is rejected
    /// before the transition starts, so neither registry nor icon change.
    pub async fn tab_updated(
        &self,
        tab_id: Option<i32>,
        change: &TabChange,
        tab: &TabSnapshot,
    ) -> Result<Option<SiteStatus>, ToggleError> {
        if !tab.is_complete() {
            return Ok(None);
        }
        let Some(raw) = change.url.as_deref().or(tab.url.as_deref()) else {
            return Ok(None);
        };
        let origin = Origin::parse(raw)?;

        let mut phase = self.enter().await;
        *phase = Phase::Updating(origin.clone());
        let result = self.refresh(origin, tab_id).await;
        *phase = Phase::Idle;
        result.map(Some)
    }

    /// chrome.action.onClicked: flip the clicked tab's origin and show the
    /// new state.
    pub async fn action_clicked(&self, tab: &TabSnapshot) -> Result<SiteStatus, ToggleError> {
        let origin = match tab.url.as_deref() {
            Some(raw) => Origin::parse(raw)?,
            // The host omits tab.url without the tabs permission; fall back
            // to the origin the last transition resolved.
            None => self.last_origin().ok_or(ToggleError::MissingUrl)?,
        };

        let mut phase = self.enter().await;
        *phase = Phase::Toggling(origin.clone());
        let result = self.toggle(origin, tab.id).await;
        *phase = Phase::Idle;
        result
    }

    /// chrome.storage.onChanged: informational. Re-resolves the last known
    /// origin against a fresh read and re-presents the icon. Never writes,
    /// so a notification can not trigger further notifications.
    pub async fn storage_changed(&self) -> Result<(), ToggleError> {
        let Some(origin) = self.last_origin() else {
            return Ok(());
        };
        let mut phase = self.enter().await;
        *phase = Phase::Updating(origin.clone());
        let result = self.refresh(origin, None).await;
        *phase = Phase::Idle;
        result.map(|_| ())
    }

    async fn refresh(&self, origin: Origin, tab_id: Option<i32>) -> Result<SiteStatus, ToggleError> {
        let sites = self.load_or_seed().await?;
        let status = resolve(&sites, &origin);
        self.publish(&status, tab_id);
        Ok(status)
    }

    async fn toggle(&self, origin: Origin, tab_id: Option<i32>) -> Result<SiteStatus, ToggleError> {
        let mut sites = self.load_or_seed().await?;
        let added = sites.toggle(origin.clone());
        self.store.save(&sites).await?;
        debug!("{} {}", if added { "added" } else { "removed" }, origin);
        let status = resolve(&sites, &origin);
        self.publish(&status, tab_id);
        Ok(status)
    }

    /// A missing stored value means first use: persist the seed and start
    /// from it.
    async fn load_or_seed(&self) -> Result<ActiveSites, ToggleError> {
        if let Some(sites) = self.store.load().await? {
            return Ok(sites);
        }
        let seeded = ActiveSites::from_origins(self.seed.iter().cloned());
        debug!("no stored registry, seeding {} origin(s)", seeded.len());
        self.store.save(&seeded).await?;
        Ok(seeded)
    }

    fn publish(&self, status: &SiteStatus, tab_id: Option<i32>) {
        self.icon.present(status.active);
        if let Some(tab_id) = tab_id {
            self.signals.notify(tab_id, status.active);
        }
        *self.session.borrow_mut() = Some(status.clone());
    }

    fn last_origin(&self) -> Option<Origin> {
        self.session.borrow().as_ref().map(|s| s.origin.clone())
    }

    async fn enter(&self) -> MutexGuard<'_, Phase> {
        match self.gate.try_lock() {
            Some(guard) => guard,
            None => {
                debug!("event deferred behind an in-flight transition");
                self.gate.lock().await
            }
        }
    }
}
