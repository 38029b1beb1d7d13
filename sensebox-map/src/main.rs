//! SenseBox Zurich comparison map
//!
//! Shows SenseBox Mini readings collected by bike in Höngg and Wipkingen next
//! to the City of Zurich reference stations, colored by the selected
//! attribute. Clicking a reading compares it with its matched reference value.
//!
//! Data flow:
//! 1. `assets/map-config.json` is embedded and parsed into a `MapConfig`.
//! 2. On mount, the ArcGIS view is created through the JS bridge with the
//!    circle (sensor) and square (reference) renderers for the default attribute.
//! 3. Hit test callbacks from the map are routed through the `MapController`;
//!    the controls stay disabled until the view reports it has loaded.
//! 4. Dropdowns, checkboxes and footer links update the controller; the
//!    legend, popup and info panel re-render from it.

use dioxus::prelude::*;
use sbx_core::config::MapConfig;
use sbx_map_ui::components::{
    AttributeSelector, ComparisonPopupView, ErrorDisplay, FooterLinks, InfoPanel, LayerToggles,
    LegendPanel, LoadingSpinner, MapContainer, ReferenceDatasetSelector,
};
use sbx_map_ui::events;
use sbx_map_ui::js_bridge;
use sbx_map_ui::state::AppState;

/// Map view and data source overrides.
const MAP_CONFIG_JSON: &str = include_str!("../assets/map-config.json");

/// DOM id of the ArcGIS view container.
const VIEW_ID: &str = "viewDiv";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("sensebox-map-root"))
        .launch(App);
}

/// Parsed config, or the defaults plus the reason the override was rejected.
fn load_config() -> (MapConfig, Option<String>) {
    match MapConfig::from_json(MAP_CONFIG_JSON) {
        Ok(config) => (config, None),
        Err(e) => {
            log::error!("Falling back to default map config: {}", e);
            (MapConfig::default(), Some(e.to_string()))
        }
    }
}

#[component]
fn App() -> Element {
    let state = use_context_provider(|| {
        let (config, error) = load_config();
        let mut state = AppState::with_config(config);
        state.error_msg.set(error);
        state
    });

    // Create the map once; nothing here subscribes to signals.
    // `map_ready` is set by the bridge once the view has loaded.
    use_effect(move || {
        events::install_map_handlers(state);
        let controller = state.controller.peek();
        js_bridge::init_map(
            VIEW_ID,
            controller.config(),
            &controller.sensor_rule(),
            &controller.reference_rule(),
        );
    });

    rsx! {
        MapContainer { id: VIEW_ID.to_string() }

        if let Some(err) = (state.error_msg)() {
            ErrorDisplay { message: err }
        }
        if !(state.map_ready)() {
            LoadingSpinner {}
        }

        div {
            class: "controls",
            LayerToggles {}
            AttributeSelector {}
            ReferenceDatasetSelector {}
        }

        LegendPanel {}
        ComparisonPopupView {}
        InfoPanel {}
        FooterLinks {}
    }
}
