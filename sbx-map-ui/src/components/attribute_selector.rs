//! Dropdown for the active attribute.

use crate::js_bridge;
use crate::state::AppState;
use dioxus::prelude::*;
use sbx_core::controller::MapLayer;
use sbx_core::Attribute;

/// Attribute dropdown selector.
/// Restyles every layer through the controller; the legend follows via state.
#[component]
pub fn AttributeSelector() -> Element {
    let mut state = use_context::<AppState>();
    let selected = use_memo(move || state.controller.read().attribute());
    let map_ready = (state.map_ready)();

    let on_change = move |evt: Event<FormData>| {
        let attribute = match evt.value().parse::<Attribute>() {
            Ok(attribute) => attribute,
            Err(e) => {
                log::warn!("{}", e);
                return;
            }
        };
        let change = state.controller.write().select_attribute(attribute);
        js_bridge::set_renderer(MapLayer::Sensebox, &change.sensor_rule);
        js_bridge::set_renderer(MapLayer::Reference, &change.reference_rule);
        if let Some(rule) = &change.extra_rule {
            js_bridge::set_extra_renderer(rule);
        }
    };

    rsx! {
        div {
            class: "selector",
            label {
                r#for: "attributeSelect",
                "Attribute: "
            }
            select {
                id: "attributeSelect",
                disabled: !map_ready,
                onchange: on_change,
                for attribute in Attribute::ALL {
                    option {
                        value: "{attribute.field()}",
                        selected: attribute == selected(),
                        "{attribute.label()}"
                    }
                }
            }
        }
    }
}
