//! Legend for the active attribute.

use crate::state::AppState;
use dioxus::prelude::*;

/// Color swatches and value bands. Rebuilt from scratch whenever the
/// attribute changes.
#[component]
pub fn LegendPanel() -> Element {
    let state = use_context::<AppState>();
    let legend = use_memo(move || state.controller.read().legend());
    let panel = use_memo(move || state.controller.read().panel());
    let legend = legend();
    let title = legend.title();
    let class = format!("legend {}", panel().layout_classes().legend);

    rsx! {
        div {
            id: "dynamicLegend",
            class: "{class}",
            div { class: "legend-title", "{title}" }
            div {
                id: "legendStops",
                for entry in legend.entries.iter() {
                    div {
                        key: "{entry.label}",
                        class: "legend-stop",
                        div {
                            class: "legend-color-box",
                            background_color: "{entry.color}",
                        }
                        span { "{entry.label}" }
                    }
                }
            }
        }
    }
}
