//! Browser bindings: DOM mounting, timers, console logging.
//!
//! Everything touching `web_sys` only builds for `wasm32`. The page must
//! provide the elements named by the `*_ID` constants below.

#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod autocomplete;
#[cfg(target_arch = "wasm32")]
pub mod listener;
#[cfg(target_arch = "wasm32")]
pub mod logging;
#[cfg(target_arch = "wasm32")]
pub mod scheduler;
#[cfg(target_arch = "wasm32")]
pub mod view;

#[cfg(target_arch = "wasm32")]
pub use app::App;
#[cfg(target_arch = "wasm32")]
pub use autocomplete::MountedAutocomplete;
#[cfg(target_arch = "wasm32")]
pub use listener::EventListener;
#[cfg(target_arch = "wasm32")]
pub use logging::init_logging;
#[cfg(target_arch = "wasm32")]
pub use scheduler::{BrowserScheduler, BrowserSpawner};
#[cfg(target_arch = "wasm32")]
pub use view::DomSummaryView;

use crate::error::ConfigError;
use thiserror::Error;

/// Container for the left search box.
pub const LEFT_AUTOCOMPLETE_ID: &str = "left-autocomplete";
/// Container for the right search box.
pub const RIGHT_AUTOCOMPLETE_ID: &str = "right-autocomplete";
/// Left summary area.
pub const LEFT_SUMMARY_ID: &str = "left-summary";
/// Right summary area.
pub const RIGHT_SUMMARY_ID: &str = "right-summary";
/// Selector for the hint shown before the first pick.
pub const TUTORIAL_SELECTOR: &str = ".tutorial";
/// Class that hides the hint.
pub const HIDDEN_CLASS: &str = "is-hidden";

/// Failure to attach the app to the page.
#[derive(Debug, Error)]
pub enum MountError {
    /// No `window` global (not running in a browser)
    #[error("no global window")]
    NoWindow,

    /// Window without a document
    #[error("window has no document")]
    NoDocument,

    /// A required element is missing or has the wrong type
    #[error("element not found: {0}")]
    MissingElement(String),

    /// Bad configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A DOM call threw
    #[error("JavaScript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl MountError {
    pub(crate) fn js(value: &wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<MountError> for wasm_bindgen::JsValue {
    fn from(err: MountError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_error_display() {
        assert_eq!(
            MountError::MissingElement("#left-summary".into()).to_string(),
            "element not found: #left-summary"
        );
        let config = ConfigError::InvalidValue {
            field: "debounce_ms",
            message: "must be positive".into(),
        };
        assert!(MountError::from(config)
            .to_string()
            .starts_with("configuration error:"));
    }
}
