//! Hit test and readiness callbacks from the map.
//!
//! The bridge script asks for a ticket before awaiting `view.hitTest` and
//! returns it with a JSON payload once the test resolves. The payload is
//! `null` when no sensor feature was hit, otherwise
//! `{"attributes": {...}, "longitude": .., "latitude": ..}` for clicks and
//! `{"objectId": ..}` for pointer moves.

use crate::js_bridge;
use crate::state::AppState;
use dioxus::prelude::*;
use sbx_core::controller::{ClickHit, FeatureId, HitTestKind, HitTestTicket};
use sbx_core::popup::{FeatureRecord, MapPoint};
use sbx_core::MapController;
use serde::Deserialize;

pub fn parse_kind(kind: &str) -> Option<HitTestKind> {
    match kind {
        "click" => Some(HitTestKind::Click),
        "hover" => Some(HitTestKind::Hover),
        _ => None,
    }
}

#[derive(Deserialize)]
struct ClickPayload {
    #[serde(default)]
    attributes: FeatureRecord,
    longitude: f64,
    latitude: f64,
}

#[derive(Deserialize)]
struct HoverPayload {
    #[serde(rename = "objectId")]
    object_id: FeatureId,
}

pub fn parse_click_payload(json: &str) -> serde_json::Result<Option<ClickHit>> {
    let payload: Option<ClickPayload> = serde_json::from_str(json)?;
    Ok(payload.map(|p| ClickHit {
        record: p.attributes,
        location: MapPoint {
            longitude: p.longitude,
            latitude: p.latitude,
        },
    }))
}

pub fn parse_hover_payload(json: &str) -> serde_json::Result<Option<FeatureId>> {
    let payload: Option<HoverPayload> = serde_json::from_str(json)?;
    Ok(payload.map(|p| p.object_id))
}

fn resolve(mut controller: Signal<MapController>, ticket: HitTestTicket, payload: &str) {
    match ticket.kind {
        HitTestKind::Click => {
            let hit = match parse_click_payload(payload) {
                Ok(hit) => hit,
                Err(e) => {
                    log::warn!("Malformed click payload: {}", e);
                    return;
                }
            };
            let resolved = controller.write().resolve_click(ticket, hit);
            if resolved.is_some() {
                js_bridge::set_popup_anchor(controller.peek().popup_anchor());
            }
        }
        HitTestKind::Hover => {
            let hit = match parse_hover_payload(payload) {
                Ok(hit) => hit,
                Err(e) => {
                    log::warn!("Malformed hover payload: {}", e);
                    return;
                }
            };
            let resolved = controller.write().resolve_hover(ticket, hit);
            if let Some(change) = resolved {
                js_bridge::apply_highlight(change);
            }
        }
    }
}

/// Register the map callbacks for the lifetime of the page. Must run before
/// the map is initialized so the ready signal is not missed.
pub fn install_map_handlers(state: AppState) {
    let mut controller = state.controller;
    let begin = move |kind: String| -> f64 {
        match parse_kind(&kind) {
            Some(kind) => controller.write().begin_hit_test(kind).seq as f64,
            None => {
                log::warn!("Unknown hit test kind {}", kind);
                0.0
            }
        }
    };
    let resolve_controller = state.controller;
    let resolve_hit = move |kind: String, seq: f64, payload: String| {
        let Some(kind) = parse_kind(&kind) else {
            return;
        };
        let ticket = HitTestTicket {
            kind,
            seq: seq as u64,
        };
        resolve(resolve_controller, ticket, &payload);
    };
    let mut map_ready = state.map_ready;
    let ready = move || {
        log::info!("Map view ready");
        map_ready.set(true);
    };
    if let Err(e) = js_bridge::register_map_handlers(begin, resolve_hit, ready) {
        log::error!("Failed to register map handlers: {}", e);
    }
}
