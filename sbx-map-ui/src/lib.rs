//! Dioxus components and ArcGIS bridge for the SenseBox Zurich map.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the ArcGIS map functions in `assets/js/arcgis-map.js`
//! - `events`: hit test callbacks from the map, routed through `MapController`
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: RSX components (selectors, legend, popup, info panel, ...)

pub mod components;
pub mod events;
pub mod js_bridge;
pub mod state;
