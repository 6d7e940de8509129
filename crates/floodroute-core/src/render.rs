//! Drawing of an optimized route and its distance/duration summary.

use crate::error::RouteDocumentError;
use crate::models::{Coordinates, RoutePoint, RouteResult};
use crate::spatial::{BoundingBox, ROUTE_PADDING};
use crate::surface::{LineLayerSpec, MapSurface, SourceData};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const ROUTE_SOURCE_ID: &str = "route";
pub const ROUTE_LAYER_ID: &str = "route-line";
pub const ROUTE_COLOR: &str = "#0074D9";
pub const ROUTE_WIDTH: f64 = 6.0;

#[derive(Debug, Deserialize)]
struct RouteDocument {
    #[serde(default)]
    features: Vec<RouteFeature>,
}

#[derive(Debug, Deserialize)]
struct RouteFeature {
    geometry: LineGeometry,
    #[serde(default)]
    properties: RouteProperties,
}

#[derive(Debug, Deserialize)]
struct LineGeometry {
    #[serde(default)]
    coordinates: Vec<RoutePoint>,
}

#[derive(Debug, Default, Deserialize)]
struct RouteProperties {
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
}

impl RouteResult {
    /// Read the route `FeatureCollection` served by the results page.
    ///
    /// Only the first feature is used.
    pub fn from_geojson(document: Value) -> Result<Self, RouteDocumentError> {
        let document: RouteDocument = serde_json::from_value(document)?;
        let feature = document
            .features
            .into_iter()
            .next()
            .ok_or(RouteDocumentError::NoFeatures)?;

        Ok(Self {
            geometry: feature.geometry.coordinates,
            distance_m: feature.properties.distance,
            duration_s: feature.properties.duration,
        })
    }

    pub fn from_geojson_str(text: &str) -> Result<Self, RouteDocumentError> {
        Self::from_geojson(serde_json::from_str(text)?)
    }

    /// Points with both components present, in route order.
    pub fn valid_points(&self) -> Vec<Coordinates> {
        self.geometry
            .iter()
            .filter_map(RoutePoint::coordinates)
            .collect()
    }
}

/// Human-facing route figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteSummary {
    pub distance_km: f64,
    pub duration_min: f64,
}

impl RouteSummary {
    pub fn from_route(route: &RouteResult) -> Self {
        Self {
            distance_km: route.distance_m / 1000.0,
            duration_min: route.duration_s / 60.0,
        }
    }

    pub fn distance_text(&self) -> String {
        format!("Distance: {:.2} km", self.distance_km)
    }

    pub fn duration_text(&self) -> String {
        format!("Duration: {:.1} min", self.duration_min)
    }
}

/// Draws routes once the base map is ready, buffering anything earlier.
#[derive(Debug, Default)]
pub struct RouteRenderer {
    map_ready: bool,
    pending: Option<RouteResult>,
    bounds: Option<BoundingBox>,
}

impl RouteRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The base map and its style finished loading.
    ///
    /// Renders the buffered route, if any. Later calls render nothing.
    pub fn on_map_ready<S: MapSurface + ?Sized>(&mut self, surface: &mut S) -> Option<RouteSummary> {
        self.map_ready = true;
        let route = self.pending.take()?;
        tracing::debug!("Rendering route buffered before map load");
        Some(self.render(surface, &route))
    }

    /// Draw a route, or buffer it until the map is ready.
    ///
    /// A buffered route is replaced, never merged, by a newer one.
    pub fn show<S: MapSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        route: RouteResult,
    ) -> Option<RouteSummary> {
        if !self.map_ready {
            self.pending = Some(route);
            return None;
        }
        Some(self.render(surface, &route))
    }

    /// Bounds the view was last fit to.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn render<S: MapSurface + ?Sized>(&mut self, surface: &mut S, route: &RouteResult) -> RouteSummary {
        let points = route.valid_points();
        let dropped = route.geometry.len() - points.len();
        if dropped > 0 {
            tracing::debug!("Dropped {} route point(s) with missing components", dropped);
        }

        let data = SourceData::Inline(line_feature(&points, route));
        if surface.has_source(ROUTE_SOURCE_ID) {
            surface.set_source_data(ROUTE_SOURCE_ID, data);
        } else {
            surface.add_geojson_source(ROUTE_SOURCE_ID, data);
            surface.add_line_layer(LineLayerSpec {
                id: ROUTE_LAYER_ID.to_string(),
                source: ROUTE_SOURCE_ID.to_string(),
                color: ROUTE_COLOR.to_string(),
                width: ROUTE_WIDTH,
                round_joins: true,
            });
        }

        self.bounds = BoundingBox::from_points(points.iter().copied());
        match self.bounds {
            Some(bounds) => surface.fit_bounds(bounds, ROUTE_PADDING),
            None => tracing::warn!("Route has no complete points, keeping current view"),
        }

        RouteSummary::from_route(route)
    }
}

fn line_feature(points: &[Coordinates], route: &RouteResult) -> Value {
    let coordinates: Vec<[f64; 2]> = points.iter().map(|p| [p.lon, p.lat]).collect();
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": coordinates },
            "properties": { "distance": route.distance_m, "duration": route.duration_s }
        }]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::RecordingSurface;

    fn sample_document() -> Value {
        json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[121.0, 14.5], [null, 14.52], [121.03, 14.53]]
                },
                "properties": { "distance": 12340.0, "duration": 754.0 }
            }]
        })
    }

    #[test]
    fn malformed_points_are_filtered_from_bounds() {
        let route = RouteResult::from_geojson(sample_document()).unwrap();
        let mut surface = RecordingSurface::default();
        let mut renderer = RouteRenderer::new();
        renderer.on_map_ready(&mut surface);

        renderer.show(&mut surface, route).unwrap();

        let (bounds, padding) = surface.fits[0];
        assert_eq!(padding, ROUTE_PADDING);
        assert_eq!(bounds.min, Coordinates::new(121.0, 14.5));
        assert_eq!(bounds.max, Coordinates::new(121.03, 14.53));

        let Some(SourceData::Inline(data)) = surface.sources.get(ROUTE_SOURCE_ID) else {
            panic!("route source missing");
        };
        let coords = data["features"][0]["geometry"]["coordinates"].as_array().unwrap();
        assert_eq!(coords.len(), 2);
    }

    #[test]
    fn summary_formats_kilometres_and_minutes() {
        let route = RouteResult::from_geojson(sample_document()).unwrap();
        let summary = RouteSummary::from_route(&route);
        assert_eq!(summary.distance_text(), "Distance: 12.34 km");
        assert_eq!(summary.duration_text(), "Duration: 12.6 min");
    }

    #[test]
    fn route_before_map_ready_renders_exactly_once() {
        let route = RouteResult::from_geojson(sample_document()).unwrap();
        let mut surface = RecordingSurface::default();
        let mut renderer = RouteRenderer::new();

        assert!(renderer.show(&mut surface, route).is_none());
        assert!(renderer.has_pending());
        assert!(surface.line_layers.is_empty());

        assert!(renderer.on_map_ready(&mut surface).is_some());
        assert!(renderer.on_map_ready(&mut surface).is_none());
        assert_eq!(surface.line_layers.len(), 1);
        assert_eq!(surface.fits.len(), 1);
    }

    #[test]
    fn second_route_replaces_geometry_in_place() {
        let mut surface = RecordingSurface::default();
        let mut renderer = RouteRenderer::new();
        renderer.on_map_ready(&mut surface);

        let first = RouteResult::from_geojson(sample_document()).unwrap();
        renderer.show(&mut surface, first);
        let second = RouteResult {
            geometry: vec![RoutePoint {
                lon: Some(121.1),
                lat: Some(14.6),
            }],
            distance_m: 10.0,
            duration_s: 60.0,
        };
        renderer.show(&mut surface, second);

        assert_eq!(surface.line_layers.len(), 1);
        assert_eq!(surface.source_updates, 1);
        assert_eq!(
            renderer.bounds(),
            Some(BoundingBox::from_point(Coordinates::new(121.1, 14.6)))
        );
    }

    #[test]
    fn document_without_features_is_rejected() {
        let err = RouteResult::from_geojson(json!({ "type": "FeatureCollection", "features": [] }))
            .unwrap_err();
        assert!(matches!(err, RouteDocumentError::NoFeatures));
    }

    #[test]
    fn missing_properties_default_to_zero() {
        let route = RouteResult::from_geojson_str(
            r#"{"features":[{"geometry":{"coordinates":[[121.0,14.5]]}}]}"#,
        )
        .unwrap();
        assert_eq!(route.distance_m, 0.0);
        assert_eq!(route.duration_s, 0.0);
    }
}
