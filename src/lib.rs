//! Site Toggle - per-site activation switch for a browser extension,
//! built with Rust + WASM. The toolbar button toggles the current tab's
//! origin on a persisted allow-list and the icon mirrors membership.

mod browser;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod icon;
pub mod origin;
pub mod registry;
pub mod status;
pub mod store;
pub mod tab;

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use browser::{ActionIcon, LocalAreaStore, TabMessenger};
use config::Config;
use coordinator::Coordinator;
use tab::{TabChange, TabSnapshot};

type Background = Coordinator<LocalAreaStore, ActionIcon, TabMessenger>;

thread_local! {
    static BACKGROUND: Rc<Background> = Rc::new(build(Config::default()));
}

fn build(config: Config) -> Background {
    let Config {
        storage_key,
        icons,
        seed,
    } = config;
    Coordinator::new(
        seed,
        LocalAreaStore::new(storage_key),
        ActionIcon::new(icons),
        TabMessenger,
    )
}

fn background() -> Rc<Background> {
    BACKGROUND.with(Rc::clone)
}

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

/// chrome.runtime.onInstalled: seed the registry if none is stored yet.
#[wasm_bindgen]
pub fn on_installed() {
    let background = background();
    spawn_local(async move {
        if let Err(e) = background.installed().await {
            log::warn!("install-time seeding failed: {e}");
        }
    });
}

/// chrome.tabs.onUpdated: refresh the icon once the navigation settles.
#[wasm_bindgen]
pub fn on_tab_updated(tab_id: i32, change_info: JsValue, tab: JsValue) {
    let change: TabChange = match serde_wasm_bindgen::from_value(change_info) {
        Ok(change) => change,
        Err(e) => {
            log::warn!("unreadable changeInfo payload: {e}");
            return;
        }
    };
    let tab: TabSnapshot = match serde_wasm_bindgen::from_value(tab) {
        Ok(tab) => tab,
        Err(e) => {
            log::warn!("unreadable tab payload: {e}");
            return;
        }
    };

    let background = background();
    spawn_local(async move {
        match background.tab_updated(Some(tab_id), &change, &tab).await {
            Ok(Some(status)) => {
                log::debug!("navigation settled: {} active={}", status.origin, status.active);
            }
            Ok(None) => {}
            Err(e) => log::warn!("navigation update dropped: {e}"),
        }
    });
}

/// chrome.action.onClicked: toggle the clicked tab's origin.
#[wasm_bindgen]
pub fn on_action_clicked(tab: JsValue) {
    let tab: TabSnapshot = match serde_wasm_bindgen::from_value(tab) {
        Ok(tab) => tab,
        Err(e) => {
            log::warn!("unreadable tab payload: {e}");
            return;
        }
    };

    let background = background();
    spawn_local(async move {
        match background.action_clicked(&tab).await {
            Ok(status) => {
                log::info!(
                    "{} is now {}",
                    status.origin,
                    if status.active { "active" } else { "inactive" }
                );
            }
            Err(e) => log::warn!("toggle failed: {e}"),
        }
    });
}

/// chrome.storage.onChanged: informational refresh of the icon. Mutations
/// never start here, so a change notification can not loop back into a
/// write.
#[wasm_bindgen]
pub fn on_storage_changed(changes: JsValue, area: &str) {
    if area != "local" {
        return;
    }
    let relevant = js_sys::Reflect::has(&changes, &JsValue::from_str(config::DEFAULT_STORAGE_KEY))
        .unwrap_or(false);
    if !relevant {
        return;
    }

    let background = background();
    spawn_local(async move {
        if let Err(e) = background.storage_changed().await {
            log::warn!("icon refresh after storage change failed: {e}");
        }
    });
}
