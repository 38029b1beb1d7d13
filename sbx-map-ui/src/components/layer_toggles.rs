//! Visibility checkboxes for the sensor and reference layers.

use crate::js_bridge;
use crate::state::AppState;
use dioxus::prelude::*;
use sbx_core::controller::MapLayer;

#[component]
pub fn LayerToggles() -> Element {
    let mut state = use_context::<AppState>();
    let sensebox_visible = use_memo(move || state.controller.read().is_layer_visible(MapLayer::Sensebox));
    let reference_visible = use_memo(move || state.controller.read().is_layer_visible(MapLayer::Reference));
    let map_ready = (state.map_ready)();

    let mut toggle = move |layer: MapLayer, visible: bool| {
        if state.controller.write().set_layer_visible(layer, visible) {
            js_bridge::set_layer_visible(layer, visible);
        }
    };

    rsx! {
        div {
            class: "layer-toggles",
            label {
                input {
                    id: "senseboxLayerToggle",
                    r#type: "checkbox",
                    checked: sensebox_visible(),
                    disabled: !map_ready,
                    onchange: move |evt: Event<FormData>| toggle(MapLayer::Sensebox, evt.checked()),
                }
                " SenseBox"
            }
            label {
                input {
                    id: "referenceLayerToggle",
                    r#type: "checkbox",
                    checked: reference_visible(),
                    disabled: !map_ready,
                    onchange: move |evt: Event<FormData>| toggle(MapLayer::Reference, evt.checked()),
                }
                " Reference Data"
            }
        }
    }
}
