//! Bindings to the chrome.* extension APIs and the host-side
//! implementations of the storage, icon and messaging ports.

use js_sys::{Object, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::coordinator::SignalSink;
use crate::error::StorageError;
use crate::icon::{IconPaths, IconPresenter};
use crate::registry::ActiveSites;
use crate::store::SiteStore;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["chrome", "storage", "local"], js_name = get, catch)]
    async fn storage_get(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "storage", "local"], js_name = set, catch)]
    async fn storage_set(items: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "action"], js_name = setIcon)]
    fn action_set_icon(details: &JsValue);

    #[wasm_bindgen(js_namespace = ["chrome", "tabs"], js_name = sendMessage, catch)]
    async fn tabs_send_message(tab_id: i32, message: JsValue) -> Result<JsValue, JsValue>;
}

fn js_error(value: JsValue) -> StorageError {
    StorageError::new(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

/// Registry persistence over chrome.storage.local, one key, whole-value
/// writes.
pub struct LocalAreaStore {
    key: String,
}

impl LocalAreaStore {
    pub fn new(key: String) -> LocalAreaStore {
        LocalAreaStore { key }
    }
}

impl SiteStore for LocalAreaStore {
    async fn load(&self) -> Result<Option<ActiveSites>, StorageError> {
        let bag = storage_get(&self.key).await.map_err(js_error)?;
        // get() resolves to an object carrying the requested key; the key is
        // absent entirely when it has never been written.
        let value = Reflect::get(&bag, &JsValue::from_str(&self.key)).map_err(js_error)?;
        if value.is_undefined() || value.is_null() {
            return Ok(None);
        }
        let sites = serde_wasm_bindgen::from_value(value)
            .map_err(|e| StorageError::new(format!("stored registry is unreadable: {e}")))?;
        Ok(Some(sites))
    }

    async fn save(&self, sites: &ActiveSites) -> Result<(), StorageError> {
        let value = serde_wasm_bindgen::to_value(sites)
            .map_err(|e| StorageError::new(format!("registry failed to serialize: {e}")))?;
        let items = Object::new();
        Reflect::set(&items, &JsValue::from_str(&self.key), &value).map_err(js_error)?;
        storage_set(items.into()).await.map_err(js_error)
    }
}

#[derive(Serialize)]
struct IconDetails<'a> {
    path: &'a str,
}

/// Toolbar icon over chrome.action.setIcon.
pub struct ActionIcon {
    paths: IconPaths,
}

impl ActionIcon {
    pub fn new(paths: IconPaths) -> ActionIcon {
        ActionIcon { paths }
    }
}

impl IconPresenter for ActionIcon {
    fn present(&self, active: bool) {
        let details = IconDetails {
            path: self.paths.asset_for(active),
        };
        match serde_wasm_bindgen::to_value(&details) {
            Ok(details) => action_set_icon(&details),
            // present() must not fail for a valid bool; log and move on.
            Err(e) => log::warn!("setIcon details failed to serialize: {e}"),
        }
    }
}

/// Fire-and-forget status signal to a tab's content script.
pub struct TabMessenger;

impl SignalSink for TabMessenger {
    fn notify(&self, tab_id: i32, active: bool) {
        spawn_local(async move {
            // The tab may have no content script injected; a failed send is
            // expected there and only worth a trace.
            if let Err(e) = tabs_send_message(tab_id, JsValue::from_bool(active)).await {
                log::debug!("signal to tab {tab_id} not delivered: {e:?}");
            }
        });
    }
}
