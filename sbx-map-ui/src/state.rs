//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.
//! Selection state lives in the `MapController`; the other signals only track
//! page lifecycle.

use dioxus::prelude::*;
use sbx_core::config::MapConfig;
use sbx_core::MapController;

#[derive(Clone, Copy)]
pub struct AppState {
    /// Active attribute, extra layer, highlight, popup and info panel
    pub controller: Signal<MapController>,
    /// Set once the ArcGIS view has been created
    pub map_ready: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
    /// Filename picked in the reference dataset dropdown (empty until chosen)
    pub reference_dataset: Signal<String>,
}

impl AppState {
    /// Create a new AppState for the default Zurich map.
    pub fn new() -> Self {
        Self::with_config(MapConfig::default())
    }

    pub fn with_config(config: MapConfig) -> Self {
        Self {
            controller: Signal::new(MapController::new(config)),
            map_ready: Signal::new(false),
            error_msg: Signal::new(None),
            reference_dataset: Signal::new(String::new()),
        }
    }
}
