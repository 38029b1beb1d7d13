//! Loading indicator shown until the map view exists.

use dioxus::prelude::*;

#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        div {
            class: "map-loading",
            style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); z-index: 10; color: #666;",
            "Loading map..."
        }
    }
}
