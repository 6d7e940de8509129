//! Interface to the external map rendering engine.
//!
//! The engine owns every visual object (markers, sources, layers). The core
//! only holds opaque handles and drives the engine through [`MapSurface`].

use crate::models::{Coordinates, Role};
use crate::spatial::BoundingBox;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque reference to a marker living inside the rendering engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Green,
    Red,
}

impl MarkerColor {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Source => MarkerColor::Green,
            Role::Destination { .. } => MarkerColor::Red,
        }
    }

    pub fn as_css(&self) -> &'static str {
        match self {
            MarkerColor::Green => "green",
            MarkerColor::Red => "red",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Background,
    Fill,
    Line,
    Symbol,
    Raster,
    Other,
}

/// A layer of the loaded base style, in draw order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleLayer {
    pub id: String,
    pub kind: LayerKind,
}

/// Categorical fill: `match(property) { k => color, ... } else fallback`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillLayerSpec {
    pub id: String,
    pub source: String,
    pub property: String,
    pub stops: Vec<(i64, String)>,
    pub fallback_color: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineLayerSpec {
    pub id: String,
    pub source: String,
    pub color: String,
    pub width: f64,
    pub round_joins: bool,
}

/// Data attached to a GeoJSON source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SourceData {
    /// Fetched lazily by the engine.
    Url(String),
    Inline(Value),
}

/// Operations the core needs from the rendering engine.
///
/// Marker operations must only be called through
/// [`MarkerSync`](crate::markers::MarkerSync).
pub trait MapSurface: Send {
    fn add_marker(&mut self, at: Coordinates, color: MarkerColor) -> MarkerHandle;
    fn move_marker(&mut self, marker: MarkerHandle, to: Coordinates);
    fn recolor_marker(&mut self, marker: MarkerHandle, color: MarkerColor);
    fn remove_marker(&mut self, marker: MarkerHandle);

    fn fly_to(&mut self, center: Coordinates, zoom: f64);
    fn fit_bounds(&mut self, bounds: BoundingBox, padding: f64);

    /// Layers of the base style, in draw order.
    fn style_layers(&self) -> Vec<StyleLayer>;
    fn has_source(&self, id: &str) -> bool;
    fn add_geojson_source(&mut self, id: &str, data: SourceData);
    fn set_source_data(&mut self, id: &str, data: SourceData);
    /// Insert a fill layer directly below `before`, or on top when `None`.
    fn add_fill_layer(&mut self, spec: FillLayerSpec, before: Option<&str>);
    fn add_line_layer(&mut self, spec: LineLayerSpec);
    fn set_layer_visibility(&mut self, id: &str, visible: bool);
}

pub mod recording {
    //! Headless surface that keeps engine state in memory.
    //!
    //! Used by the CLI tools and by tests to observe what the core asked the
    //! engine to do.

    use super::*;
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        next_marker: u64,
        pub markers: HashMap<MarkerHandle, (Coordinates, MarkerColor)>,
        pub removed_markers: Vec<MarkerHandle>,
        pub style: Vec<StyleLayer>,
        pub sources: HashMap<String, SourceData>,
        /// (spec, id of the layer it was inserted below)
        pub fill_layers: Vec<(FillLayerSpec, Option<String>)>,
        pub line_layers: Vec<LineLayerSpec>,
        pub visibility: HashMap<String, bool>,
        pub flights: Vec<(Coordinates, f64)>,
        pub fits: Vec<(BoundingBox, f64)>,
        pub source_updates: usize,
    }

    impl RecordingSurface {
        pub fn with_style(style: Vec<StyleLayer>) -> Self {
            Self {
                style,
                ..Self::default()
            }
        }
    }

    impl MapSurface for RecordingSurface {
        fn add_marker(&mut self, at: Coordinates, color: MarkerColor) -> MarkerHandle {
            self.next_marker += 1;
            let handle = MarkerHandle(self.next_marker);
            self.markers.insert(handle, (at, color));
            handle
        }

        fn move_marker(&mut self, marker: MarkerHandle, to: Coordinates) {
            if let Some(entry) = self.markers.get_mut(&marker) {
                entry.0 = to;
            }
        }

        fn recolor_marker(&mut self, marker: MarkerHandle, color: MarkerColor) {
            if let Some(entry) = self.markers.get_mut(&marker) {
                entry.1 = color;
            }
        }

        fn remove_marker(&mut self, marker: MarkerHandle) {
            self.markers.remove(&marker);
            self.removed_markers.push(marker);
        }

        fn fly_to(&mut self, center: Coordinates, zoom: f64) {
            self.flights.push((center, zoom));
        }

        fn fit_bounds(&mut self, bounds: BoundingBox, padding: f64) {
            self.fits.push((bounds, padding));
        }

        fn style_layers(&self) -> Vec<StyleLayer> {
            self.style.clone()
        }

        fn has_source(&self, id: &str) -> bool {
            self.sources.contains_key(id)
        }

        fn add_geojson_source(&mut self, id: &str, data: SourceData) {
            self.sources.insert(id.to_string(), data);
        }

        fn set_source_data(&mut self, id: &str, data: SourceData) {
            self.source_updates += 1;
            self.sources.insert(id.to_string(), data);
        }

        fn add_fill_layer(&mut self, spec: FillLayerSpec, before: Option<&str>) {
            self.fill_layers.push((spec, before.map(str::to_string)));
        }

        fn add_line_layer(&mut self, spec: LineLayerSpec) {
            self.line_layers.push(spec);
        }

        fn set_layer_visibility(&mut self, id: &str, visible: bool) {
            self.visibility.insert(id.to_string(), visible);
        }
    }
}
