//! The comparison popup anchored next to the clicked sensor reading.

use crate::state::AppState;
use dioxus::prelude::*;
use sbx_core::popup::PopupContent;

/// Positioned by the map bridge; only the content and visibility are rendered here.
#[component]
pub fn ComparisonPopupView() -> Element {
    let state = use_context::<AppState>();
    let content = use_memo(move || state.controller.read().popup().clone());
    let content = content();
    let display = if content.is_visible() { "block" } else { "none" };

    let body = match content {
        PopupContent::Welcome => rsx! {
            b { "Welcome!" }
            br {}
            "Feel free to click on any point to see the difference to the reference dataset."
        },
        PopupContent::Comparison(popup) => rsx! {
            div { strong { "{popup.title()}" } }
            div { strong { "SenseBox: " } "{popup.sensor_line()}" }
            div { strong { "Reference: " } "{popup.reference_line()}" }
            div {
                strong { "Difference: " }
                span { color: "#051d64", "{popup.difference_line()}" }
            }
        },
        PopupContent::Hidden => rsx! {},
    };

    rsx! {
        div {
            id: "customPopup",
            display: "{display}",
            {body}
        }
    }
}
