//! Dioxus RSX components for the SenseBox map page.

mod attribute_selector;
mod comparison_popup;
mod error_display;
mod info_panel;
mod layer_toggles;
mod legend_panel;
mod loading_spinner;
mod map_container;
mod reference_dataset_selector;

pub use attribute_selector::AttributeSelector;
pub use comparison_popup::ComparisonPopupView;
pub use error_display::ErrorDisplay;
pub use info_panel::{FooterLinks, InfoPanel};
pub use layer_toggles::LayerToggles;
pub use legend_panel::LegendPanel;
pub use loading_spinner::LoadingSpinner;
pub use map_container::MapContainer;
pub use reference_dataset_selector::ReferenceDatasetSelector;
