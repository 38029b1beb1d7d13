//! Container the ArcGIS view renders into.

use crate::state::AppState;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct MapContainerProps {
    /// The DOM id for the map view (ArcGIS renders into this)
    pub id: String,
}

/// Map view container; shrinks to half height while the info panel is open.
#[component]
pub fn MapContainer(props: MapContainerProps) -> Element {
    let state = use_context::<AppState>();
    let panel = use_memo(move || state.controller.read().panel());
    let class = panel().layout_classes().view;

    rsx! {
        div {
            id: "{props.id}",
            class: "{class}",
        }
    }
}
