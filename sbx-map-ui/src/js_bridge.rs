//! Typed wrappers around the ArcGIS map via `js_sys::eval()`.
//!
//! The map script lives in `assets/js/arcgis-map.js` and is evaluated as a
//! global once the ArcGIS AMD loader is available. It exposes `window.sbxMap`;
//! this module serializes render rules and layer swaps and calls into it.

use sbx_core::config::MapConfig;
use sbx_core::controller::{ExtraLayerSwap, FeatureId, HighlightChange, MapLayer};
use sbx_core::popup::MapPoint;
use sbx_core::style::RenderRule;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

// Embed the map bridge at compile time
static ARCGIS_MAP_JS: &str = include_str!("../assets/js/arcgis-map.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('SBX JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

/// Layer key used by the bridge script.
fn layer_key(layer: MapLayer) -> &'static str {
    match layer {
        MapLayer::Sensebox => "sensebox",
        MapLayer::Reference => "reference",
    }
}

/// Config object handed to `sbxMap.init`.
fn init_config_json(config: &MapConfig) -> serde_json::Value {
    serde_json::json!({
        "sensebox_url": config.sensebox_url,
        "sensebox_layer_id": config.sensebox_layer_id,
        "reference_url": config.reference_url,
        "reference_title": config.reference_title,
        "definition_expression": config.definition_expression,
        "view": config.view_json(),
    })
}

/// Create the map view inside `container_id`.
///
/// Uses a polling loop to wait for the ArcGIS loader and the container DOM
/// element, then evaluates the bridge at global scope (indirect eval) and
/// initializes the map with the sensor and reference renderers.
pub fn init_map(container_id: &str, config: &MapConfig, sensor: &RenderRule, reference: &RenderRule) {
    let store_js = format!(
        "window.__sbxMapScript = {};",
        serde_json::to_string(ARCGIS_MAP_JS).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    let config_json = init_config_json(config);
    let sensor_json = sensor.to_renderer_json();
    let reference_json = reference.to_renderer_json();
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (typeof require !== 'undefined' && document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    if (!window.sbxMap) {{
                        (0, eval)(window.__sbxMapScript);
                        delete window.__sbxMapScript;
                    }}
                    try {{
                        window.sbxMap.init('{container_id}', {config_json}, {sensor_json}, {reference_json});
                    }} catch(e) {{ console.error('[SBX] map init error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Replace the renderer of a toggleable layer.
pub fn set_renderer(layer: MapLayer, rule: &RenderRule) {
    call_js(&format!(
        "window.sbxMap && window.sbxMap.setRenderer('{}', {});",
        layer_key(layer),
        rule.to_renderer_json()
    ));
}

/// Restyle the extra reference layer, if one is loaded.
pub fn set_extra_renderer(rule: &RenderRule) {
    call_js(&format!(
        "window.sbxMap && window.sbxMap.setRenderer('extra', {});",
        rule.to_renderer_json()
    ));
}

pub fn set_layer_visible(layer: MapLayer, visible: bool) {
    call_js(&format!(
        "window.sbxMap && window.sbxMap.setLayerVisible('{}', {});",
        layer_key(layer),
        visible
    ));
}

/// Remove the current extra reference layer and add the new one.
///
/// Resolves when the new layer has loaded; a rejected load is returned as
/// the error message.
pub async fn swap_extra_layer(swap: &ExtraLayerSwap) -> Result<(), String> {
    if let Some(previous) = &swap.remove {
        log::info!("Removing extra reference layer {}", previous.filename);
    }
    let payload = serde_json::json!({
        "id": swap.add.id,
        "url": swap.add.url,
        "title": swap.add.title,
        "definition_expression": swap.add.definition_expression,
        "renderer": swap.add.rule.to_renderer_json(),
    });
    let value = js_sys::eval(&format!("window.sbxMap.swapExtraLayer({})", payload)).map_err(js_error)?;
    let promise = value
        .dyn_into::<js_sys::Promise>()
        .map_err(|_| "swapExtraLayer did not return a promise".to_string())?;
    JsFuture::from(promise).await.map(|_| ()).map_err(js_error)
}

/// Apply a highlight change: clear first, then highlight.
pub fn apply_highlight(change: HighlightChange) {
    if change.clear.is_some() {
        call_js("window.sbxMap && window.sbxMap.clearHighlight();");
    }
    if let Some(oid) = change.apply {
        highlight(oid);
    }
}

fn highlight(oid: FeatureId) {
    call_js(&format!("window.sbxMap && window.sbxMap.highlight({});", oid));
}

/// Anchor the popup to a map location, or detach it.
pub fn set_popup_anchor(anchor: Option<MapPoint>) {
    let anchor_json = match anchor {
        Some(p) => serde_json::json!({ "longitude": p.longitude, "latitude": p.latitude }),
        None => serde_json::Value::Null,
    };
    call_js(&format!(
        "window.sbxMap && window.sbxMap.setPopupAnchor({});",
        anchor_json
    ));
}

/// Install the map callbacks as `window.__sbxHandlers`.
///
/// `begin(kind)` returns the ticket sequence number; `resolve(kind, seq,
/// payload_json)` delivers the result. `ready()` fires once the view has
/// finished loading. The closures live for the rest of the page.
pub fn register_map_handlers(
    begin: impl FnMut(String) -> f64 + 'static,
    resolve: impl FnMut(String, f64, String) + 'static,
    ready: impl FnMut() + 'static,
) -> Result<(), String> {
    let begin = Closure::<dyn FnMut(String) -> f64>::new(begin);
    let resolve = Closure::<dyn FnMut(String, f64, String)>::new(resolve);
    let ready = Closure::<dyn FnMut()>::new(ready);

    let handlers = js_sys::Object::new();
    js_sys::Reflect::set(&handlers, &JsValue::from_str("beginHitTest"), begin.as_ref())
        .map_err(js_error)?;
    js_sys::Reflect::set(&handlers, &JsValue::from_str("resolveHitTest"), resolve.as_ref())
        .map_err(js_error)?;
    js_sys::Reflect::set(&handlers, &JsValue::from_str("mapReady"), ready.as_ref())
        .map_err(js_error)?;

    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    js_sys::Reflect::set(&window, &JsValue::from_str("__sbxHandlers"), &handlers)
        .map_err(js_error)?;

    begin.forget();
    resolve.forget();
    ready.forget();
    Ok(())
}
