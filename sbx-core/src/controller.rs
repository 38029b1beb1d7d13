//! `MapController` owns every piece of UI selection state of the map page.
//!
//! Event handlers call into the controller and apply what it returns: render
//! rules and a legend when the attribute changes, a layer swap when another
//! reference dataset is picked, popup content for clicks and highlight changes
//! for pointer moves.
//!
//! Hit tests run asynchronously in the map library. Each one is started with
//! [`MapController::begin_hit_test`], which hands out a ticket carrying a
//! monotonically increasing sequence number. Only the response for the latest
//! ticket of a kind is applied; anything older is dropped.

use crate::attribute::Attribute;
use crate::config::MapConfig;
use crate::legend::Legend;
use crate::panel::PanelState;
use crate::popup::{ComparisonPopup, FeatureRecord, MapPoint, PopupContent};
use crate::style::{resolve_rule, RenderRule, SymbolShape};

pub const EXTRA_LAYER_TITLE: &str = "Additional Reference Dataset";

/// Object id of a feature in the sensor layer.
pub type FeatureId = i64;

/// Layers with a visibility checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapLayer {
    Sensebox,
    Reference,
}

/// The currently displayed extra reference layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtraReferenceLayer {
    /// Unique per load, so the bridge can tell successive layers apart.
    pub id: u64,
    pub filename: String,
    pub url: String,
    pub title: &'static str,
    pub definition_expression: String,
    pub rule: RenderRule,
}

/// Replace the extra reference layer: remove `remove` first, then add `add`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtraLayerSwap {
    pub remove: Option<ExtraReferenceLayer>,
    pub add: ExtraReferenceLayer,
}

/// Everything that has to be re-rendered after the attribute dropdown changes.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeChange {
    pub attribute: Attribute,
    pub sensor_rule: RenderRule,
    pub reference_rule: RenderRule,
    /// Present when an extra reference layer is loaded.
    pub extra_rule: Option<RenderRule>,
    pub legend: Legend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitTestKind {
    Click,
    Hover,
}

/// Handed out when a hit test starts and returned with its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTestTicket {
    pub kind: HitTestKind,
    pub seq: u64,
}

/// A click that landed on a sensor feature.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickHit {
    pub record: FeatureRecord,
    pub location: MapPoint,
}

/// Highlight operations to apply, in order: `clear` then `apply`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighlightChange {
    pub clear: Option<FeatureId>,
    pub apply: Option<FeatureId>,
}

impl HighlightChange {
    pub fn is_noop(&self) -> bool {
        self.clear.is_none() && self.apply.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapController {
    config: MapConfig,
    attribute: Attribute,
    sensebox_visible: bool,
    reference_visible: bool,
    extra_layer: Option<ExtraReferenceLayer>,
    next_layer_id: u64,
    highlight: Option<FeatureId>,
    popup: PopupContent,
    popup_anchor: Option<MapPoint>,
    panel: PanelState,
    next_seq: u64,
    latest_click: u64,
    latest_hover: u64,
}

impl Default for MapController {
    fn default() -> Self {
        Self::new(MapConfig::default())
    }
}

impl MapController {
    pub fn new(config: MapConfig) -> Self {
        Self {
            config,
            attribute: Attribute::default(),
            sensebox_visible: true,
            reference_visible: true,
            extra_layer: None,
            next_layer_id: 1,
            highlight: None,
            popup: PopupContent::Welcome,
            popup_anchor: None,
            panel: PanelState::Collapsed,
            next_seq: 0,
            latest_click: 0,
            latest_hover: 0,
        }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    pub fn sensor_rule(&self) -> RenderRule {
        resolve_rule(self.attribute, SymbolShape::Circle)
    }

    pub fn reference_rule(&self) -> RenderRule {
        resolve_rule(self.attribute, SymbolShape::Square)
    }

    pub fn legend(&self) -> Legend {
        Legend::for_attribute(self.attribute)
    }

    /// Switch the active attribute and restyle every layer.
    pub fn select_attribute(&mut self, attribute: Attribute) -> AttributeChange {
        if attribute != self.attribute {
            log::info!("Active attribute {} -> {}", self.attribute, attribute);
        }
        self.attribute = attribute;
        let reference_rule = self.reference_rule();
        let extra_rule = self.extra_layer.as_mut().map(|layer| {
            layer.rule = reference_rule.clone();
            reference_rule.clone()
        });
        AttributeChange {
            attribute,
            sensor_rule: self.sensor_rule(),
            reference_rule,
            extra_rule,
            legend: self.legend(),
        }
    }

    /// Returns whether the visibility actually changed.
    pub fn set_layer_visible(&mut self, layer: MapLayer, visible: bool) -> bool {
        let slot = match layer {
            MapLayer::Sensebox => &mut self.sensebox_visible,
            MapLayer::Reference => &mut self.reference_visible,
        };
        let changed = *slot != visible;
        *slot = visible;
        changed
    }

    pub fn is_layer_visible(&self, layer: MapLayer) -> bool {
        match layer {
            MapLayer::Sensebox => self.sensebox_visible,
            MapLayer::Reference => self.reference_visible,
        }
    }

    /// Replace the extra reference layer with `filename`, styled for the
    /// active attribute. The previous layer is released before the new one
    /// is recorded.
    pub fn load_extra_reference(&mut self, filename: &str) -> ExtraLayerSwap {
        let remove = self.extra_layer.take();
        let add = ExtraReferenceLayer {
            id: self.next_layer_id,
            filename: filename.to_string(),
            url: self.config.data_url(filename),
            title: EXTRA_LAYER_TITLE,
            definition_expression: self.config.definition_expression.clone(),
            rule: self.reference_rule(),
        };
        self.next_layer_id += 1;
        log::info!(
            "Extra reference layer {} -> {} ({})",
            remove.as_ref().map(|l| l.filename.as_str()).unwrap_or("none"),
            add.filename,
            self.attribute
        );
        self.extra_layer = Some(add.clone());
        ExtraLayerSwap { remove, add }
    }

    pub fn extra_layer(&self) -> Option<&ExtraReferenceLayer> {
        self.extra_layer.as_ref()
    }

    /// Forget the extra layer `id` after its load failed on the map.
    ///
    /// A failure for a layer that has since been replaced leaves the current
    /// one alone. Returns whether the record was dropped.
    pub fn discard_extra_layer(&mut self, id: u64) -> bool {
        if self.extra_layer.as_ref().map(|l| l.id) != Some(id) {
            return false;
        }
        if let Some(layer) = self.extra_layer.take() {
            log::warn!("Dropping extra reference layer {}", layer.filename);
        }
        true
    }

    /// Start a hit test of `kind`; any earlier ticket of that kind is now stale.
    pub fn begin_hit_test(&mut self, kind: HitTestKind) -> HitTestTicket {
        self.next_seq += 1;
        let seq = self.next_seq;
        match kind {
            HitTestKind::Click => self.latest_click = seq,
            HitTestKind::Hover => self.latest_hover = seq,
        }
        HitTestTicket { kind, seq }
    }

    fn is_current(&self, ticket: HitTestTicket) -> bool {
        let latest = match ticket.kind {
            HitTestKind::Click => self.latest_click,
            HitTestKind::Hover => self.latest_hover,
        };
        ticket.seq == latest
    }

    /// Apply a click hit test. `None` for stale tickets, otherwise the new
    /// popup content; a click on empty map hides the popup.
    pub fn resolve_click(
        &mut self,
        ticket: HitTestTicket,
        hit: Option<ClickHit>,
    ) -> Option<PopupContent> {
        if ticket.kind != HitTestKind::Click || !self.is_current(ticket) {
            log::debug!("Dropping stale click hit test #{}", ticket.seq);
            return None;
        }
        match hit {
            Some(hit) => {
                self.popup = PopupContent::Comparison(ComparisonPopup::from_record(
                    &hit.record,
                    self.attribute,
                ));
                self.popup_anchor = Some(hit.location);
            }
            None => {
                self.popup = PopupContent::Hidden;
                self.popup_anchor = None;
            }
        }
        Some(self.popup.clone())
    }

    /// Apply a hover hit test. `None` for stale tickets.
    pub fn resolve_hover(
        &mut self,
        ticket: HitTestTicket,
        hit: Option<FeatureId>,
    ) -> Option<HighlightChange> {
        if ticket.kind != HitTestKind::Hover || !self.is_current(ticket) {
            log::debug!("Dropping stale hover hit test #{}", ticket.seq);
            return None;
        }
        if hit == self.highlight {
            return Some(HighlightChange::default());
        }
        let change = HighlightChange {
            clear: self.highlight.take(),
            apply: hit,
        };
        self.highlight = hit;
        Some(change)
    }

    pub fn highlight(&self) -> Option<FeatureId> {
        self.highlight
    }

    pub fn popup(&self) -> &PopupContent {
        &self.popup
    }

    /// Map location the popup is anchored to, re-projected when the view moves.
    pub fn popup_anchor(&self) -> Option<MapPoint> {
        self.popup_anchor
    }

    pub fn open_section(&mut self, section_id: &str) -> PanelState {
        self.panel = self.panel.open(section_id);
        self.panel
    }

    pub fn collapse_panel(&mut self) -> PanelState {
        self.panel = self.panel.collapse();
        self.panel
    }

    pub fn panel(&self) -> PanelState {
        self.panel
    }
}
