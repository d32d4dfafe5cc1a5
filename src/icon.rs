//! Toolbar icon selection: boolean status to asset path.

/// The pair of toolbar icon assets.
#[derive(Debug, Clone, PartialEq)]
pub struct IconPaths {
    pub on: String,
    pub off: String,
}

impl IconPaths {
    pub fn new(on: impl Into<String>, off: impl Into<String>) -> IconPaths {
        IconPaths {
            on: on.into(),
            off: off.into(),
        }
    }

    /// The selection rule: "on" asset for an active origin, "off" otherwise.
    pub fn asset_for(&self, active: bool) -> &str {
        if active { &self.on } else { &self.off }
    }
}

/// Side-effect port the coordinator presents status through. The wasm
/// implementation calls chrome.action.setIcon; tests record the calls.
pub trait IconPresenter {
    fn present(&self, active: bool);
}
