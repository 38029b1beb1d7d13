//! Core logic for the SenseBox Zurich comparison map.
//!
//! This crate provides:
//! - `attribute`: the closed set of measured attributes, their units and color ramps
//! - `style`: attribute + symbol shape -> `RenderRule` (ArcGIS renderer JSON)
//! - `legend`: legend bands derived from the same ramps
//! - `popup`: feature records and the sensor/reference comparison popup
//! - `panel`: the footer info panel state machine
//! - `config`: map view and data source configuration
//! - `controller`: `MapController`, the single owner of UI selection state
//!
//! Nothing here touches the DOM or the map library; `sbx-map-ui` applies the
//! values returned by the controller.

pub mod attribute;
pub mod config;
pub mod controller;
pub mod error;
pub mod legend;
pub mod panel;
pub mod popup;
pub mod style;

pub use attribute::{Attribute, ColorRampStop};
pub use controller::MapController;
pub use error::ParseError;
