//! Dropdown for the extra reference dataset.

use crate::js_bridge;
use crate::state::AppState;
use dioxus::prelude::*;
use sbx_core::controller::ExtraLayerSwap;

/// Banner text after a swap settles; a successful load clears any earlier one.
fn load_error_message(swap: &ExtraLayerSwap, result: &Result<(), String>) -> Option<String> {
    result
        .as_ref()
        .err()
        .map(|_| format!("Could not load {}", swap.add.filename))
}

/// Reference dataset dropdown selector.
/// Swaps the extra reference layer, styled for the active attribute.
#[component]
pub fn ReferenceDatasetSelector() -> Element {
    let mut state = use_context::<AppState>();
    let datasets = state.controller.peek().config().reference_datasets.clone();
    let selected = (state.reference_dataset)();
    let map_ready = (state.map_ready)();

    let on_change = move |evt: Event<FormData>| {
        let filename = evt.value();
        if filename.is_empty() {
            return;
        }
        state.reference_dataset.set(filename.clone());
        let swap = state.controller.write().load_extra_reference(&filename);
        spawn(async move {
            let result = js_bridge::swap_extra_layer(&swap).await;
            if let Err(e) = &result {
                log::warn!("Failed to load reference dataset {}: {}", swap.add.filename, e);
                state.controller.write().discard_extra_layer(swap.add.id);
            }
            state.error_msg.set(load_error_message(&swap, &result));
        });
    };

    rsx! {
        div {
            class: "selector",
            label {
                r#for: "referenceDatasetSelect",
                "Additional reference: "
            }
            select {
                id: "referenceDatasetSelect",
                disabled: !map_ready,
                onchange: on_change,
                option {
                    value: "",
                    disabled: true,
                    selected: selected.is_empty(),
                    "Choose a dataset"
                }
                for dataset in datasets.iter() {
                    option {
                        value: "{dataset.filename}",
                        selected: dataset.filename == selected,
                        "{dataset.label}"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbx_core::MapController;

    #[test]
    fn successful_swap_clears_banner() {
        let mut controller = MapController::default();
        let failed = controller.load_extra_reference("foo.geojson");
        assert_eq!(
            load_error_message(&failed, &Err("404".to_string())),
            Some("Could not load foo.geojson".to_string())
        );

        let next = controller.load_extra_reference("bar.geojson");
        assert_eq!(load_error_message(&next, &Ok(())), None);
    }
}
