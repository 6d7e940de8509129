//! Flood hazard overlays, one per return period.
//!
//! Layers are created once when the map is ready and only their visibility
//! changes afterwards. Each fill sits directly below the first symbol layer of
//! the base style so labels stay readable.

use crate::surface::{FillLayerSpec, LayerKind, MapSurface, SourceData, StyleLayer};
use serde::{Deserialize, Serialize};

/// Severity attribute carried by every hazard feature.
pub const SEVERITY_PROPERTY: &str = "Var";
pub const FALLBACK_COLOR: &str = "#888888";
pub const FILL_OPACITY: f64 = 0.40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnPeriod {
    Y5,
    Y25,
    Y100,
}

impl ReturnPeriod {
    pub const ALL: [ReturnPeriod; 3] = [ReturnPeriod::Y5, ReturnPeriod::Y25, ReturnPeriod::Y100];

    pub fn years(&self) -> u32 {
        match self {
            ReturnPeriod::Y5 => 5,
            ReturnPeriod::Y25 => 25,
            ReturnPeriod::Y100 => 100,
        }
    }

    pub fn from_years(years: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|period| period.years() == years)
    }

    pub fn source_id(&self) -> String {
        format!("y{}_flood_map", self.years())
    }

    pub fn layer_id(&self) -> String {
        format!("y{}-flood-fill", self.years())
    }

    pub fn data_url(&self) -> String {
        format!("/static/data/flooding_data/y{}_floods.geojson", self.years())
    }

    /// Colors for severities 1, 2 and 3.
    pub fn palette(&self) -> [&'static str; 3] {
        match self {
            ReturnPeriod::Y5 => ["#b6f2a1", "#4fc24f", "#1a7f2a"],
            ReturnPeriod::Y25 => ["#e0b3ff", "#9933ff", "#4d0080"],
            ReturnPeriod::Y100 => ["#ffd9b3", "#ff9900", "#b35900"],
        }
    }

    /// Fill color for a feature's severity value.
    pub fn severity_color(&self, severity: Option<i64>) -> &'static str {
        match severity {
            Some(level @ 1..=3) => self.palette()[(level - 1) as usize],
            _ => FALLBACK_COLOR,
        }
    }

    fn fill_spec(&self) -> FillLayerSpec {
        FillLayerSpec {
            id: self.layer_id(),
            source: self.source_id(),
            property: SEVERITY_PROPERTY.to_string(),
            stops: self
                .palette()
                .iter()
                .zip(1..)
                .map(|(color, level)| (level, color.to_string()))
                .collect(),
            fallback_color: FALLBACK_COLOR.to_string(),
            opacity: FILL_OPACITY,
        }
    }

    fn index(&self) -> usize {
        match self {
            ReturnPeriod::Y5 => 0,
            ReturnPeriod::Y25 => 1,
            ReturnPeriod::Y100 => 2,
        }
    }
}

/// First symbol layer of the style, the insertion point for hazard fills.
pub fn first_symbol_layer(layers: &[StyleLayer]) -> Option<&str> {
    layers
        .iter()
        .find(|layer| layer.kind == LayerKind::Symbol)
        .map(|layer| layer.id.as_str())
}

/// Visibility toggles for the three hazard overlays.
#[derive(Debug)]
pub struct HazardLayerController {
    visible: [bool; 3],
    installed: bool,
}

impl Default for HazardLayerController {
    fn default() -> Self {
        Self::new()
    }
}

impl HazardLayerController {
    pub fn new() -> Self {
        Self {
            visible: [true; 3],
            installed: false,
        }
    }

    /// Add sources and fill layers. Only the first call has any effect.
    pub fn install<S: MapSurface + ?Sized>(&mut self, surface: &mut S) {
        if self.installed {
            return;
        }

        let style = surface.style_layers();
        let before = first_symbol_layer(&style).map(str::to_string);

        for period in ReturnPeriod::ALL {
            surface.add_geojson_source(&period.source_id(), SourceData::Url(period.data_url()));
            surface.add_fill_layer(period.fill_spec(), before.as_deref());
            if !self.is_visible(period) {
                surface.set_layer_visibility(&period.layer_id(), false);
            }
        }

        self.installed = true;
        tracing::debug!(
            "Installed hazard layers below {}",
            before.as_deref().unwrap_or("<top>")
        );
    }

    /// Show or hide one overlay. Before install the choice is remembered.
    pub fn set_visible<S: MapSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        period: ReturnPeriod,
        visible: bool,
    ) {
        self.visible[period.index()] = visible;
        if self.installed {
            surface.set_layer_visibility(&period.layer_id(), visible);
        }
    }

    pub fn toggle<S: MapSurface + ?Sized>(&mut self, surface: &mut S, period: ReturnPeriod) -> bool {
        let visible = !self.is_visible(period);
        self.set_visible(surface, period, visible);
        visible
    }

    pub fn is_visible(&self, period: ReturnPeriod) -> bool {
        self.visible[period.index()]
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }
}
