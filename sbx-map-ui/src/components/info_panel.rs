//! Footer links and the collapsible info panel.

use crate::state::AppState;
use dioxus::prelude::*;
use sbx_core::panel::InfoSection;

/// Footer navigation; each link opens its section in the info panel.
#[component]
pub fn FooterLinks() -> Element {
    let mut state = use_context::<AppState>();

    rsx! {
        footer {
            id: "footerLinks",
            for section in InfoSection::ALL {
                a {
                    href: "#",
                    "data-section": "{section.id()}",
                    onclick: move |evt: Event<MouseData>| {
                        evt.prevent_default();
                        state.controller.write().open_section(section.id());
                    },
                    "{section.link_text()}"
                }
            }
        }
    }
}

/// Info panel with the static text of the open section and a collapse button.
#[component]
pub fn InfoPanel() -> Element {
    let mut state = use_context::<AppState>();
    let panel = use_memo(move || state.controller.read().panel());
    let panel = panel();
    let classes = panel.layout_classes();
    let (title, html) = panel
        .section()
        .map(|s| (s.title(), s.html()))
        .unwrap_or(("", ""));

    rsx! {
        div {
            id: "infoPanel",
            class: "{classes.panel}",
            button {
                id: "collapsePanel",
                class: "{classes.collapse_button}",
                onclick: move |_| {
                    state.controller.write().collapse_panel();
                },
                "▾"
            }
            h2 { id: "infoTitle", "{title}" }
            div { id: "infoContent", dangerous_inner_html: "{html}" }
        }
    }
}
