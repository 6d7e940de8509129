//! Floodroute CLI - command line tools for the flood-aware route planner.
//!
//! Binaries:
//! - geocode: forward and reverse geocoding against the backend
//! - plan_route: place waypoints and submit them for optimization
//! - show_route: render a route document and print its summary

use floodroute_core::surface::recording::RecordingSurface;
use floodroute_core::surface::{
    FillLayerSpec, LayerKind, LineLayerSpec, SourceData, StyleLayer,
};
use floodroute_core::{
    BoundingBox, Coordinates, HazardLayerController, MapSurface, MarkerColor, MarkerHandle,
    RouteRenderer, RouteResult, RouteSummary,
};
use floodroute_planner::{NoticeLevel, PlannerEvent};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Layers of the base street style the CLI pretends is loaded.
pub fn street_style() -> Vec<StyleLayer> {
    [
        ("background", LayerKind::Background),
        ("landuse", LayerKind::Fill),
        ("water", LayerKind::Fill),
        ("road-primary", LayerKind::Line),
        ("road-label", LayerKind::Symbol),
        ("place-label", LayerKind::Symbol),
    ]
    .into_iter()
    .map(|(id, kind)| StyleLayer {
        id: id.to_string(),
        kind,
    })
    .collect()
}

/// Headless map that records every call and logs it.
#[derive(Debug)]
pub struct ConsoleSurface {
    inner: RecordingSurface,
}

impl ConsoleSurface {
    pub fn new() -> Self {
        Self {
            inner: RecordingSurface::with_style(street_style()),
        }
    }

    pub fn recorded(&self) -> &RecordingSurface {
        &self.inner
    }
}

impl Default for ConsoleSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MapSurface for ConsoleSurface {
    fn add_marker(&mut self, at: Coordinates, color: MarkerColor) -> MarkerHandle {
        let marker = self.inner.add_marker(at, color);
        tracing::info!("Marker {} ({}) at {}", marker.0, color.as_css(), at.label());
        marker
    }

    fn move_marker(&mut self, marker: MarkerHandle, to: Coordinates) {
        tracing::info!("Marker {} moved to {}", marker.0, to.label());
        self.inner.move_marker(marker, to);
    }

    fn recolor_marker(&mut self, marker: MarkerHandle, color: MarkerColor) {
        tracing::debug!("Marker {} recolored {}", marker.0, color.as_css());
        self.inner.recolor_marker(marker, color);
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        tracing::info!("Marker {} removed", marker.0);
        self.inner.remove_marker(marker);
    }

    fn fly_to(&mut self, center: Coordinates, zoom: f64) {
        tracing::debug!("Fly to {} at zoom {}", center.label(), zoom);
        self.inner.fly_to(center, zoom);
    }

    fn fit_bounds(&mut self, bounds: BoundingBox, padding: f64) {
        tracing::debug!(
            "Fit view to [{}, {}] - [{}, {}] padding {}",
            bounds.min.lon,
            bounds.min.lat,
            bounds.max.lon,
            bounds.max.lat,
            padding
        );
        self.inner.fit_bounds(bounds, padding);
    }

    fn style_layers(&self) -> Vec<StyleLayer> {
        self.inner.style_layers()
    }

    fn has_source(&self, id: &str) -> bool {
        self.inner.has_source(id)
    }

    fn add_geojson_source(&mut self, id: &str, data: SourceData) {
        tracing::debug!("Source '{}' added", id);
        self.inner.add_geojson_source(id, data);
    }

    fn set_source_data(&mut self, id: &str, data: SourceData) {
        tracing::debug!("Source '{}' updated", id);
        self.inner.set_source_data(id, data);
    }

    fn add_fill_layer(&mut self, spec: FillLayerSpec, before: Option<&str>) {
        tracing::debug!("Fill layer '{}' below {:?}", spec.id, before);
        self.inner.add_fill_layer(spec, before);
    }

    fn add_line_layer(&mut self, spec: LineLayerSpec) {
        tracing::debug!("Line layer '{}' ({}, width {})", spec.id, spec.color, spec.width);
        self.inner.add_line_layer(spec);
    }

    fn set_layer_visibility(&mut self, id: &str, visible: bool) {
        tracing::debug!("Layer '{}' visible: {}", id, visible);
        self.inner.set_layer_visibility(id, visible);
    }
}

/// Draw the results map: flood overlays first, then the route on top.
///
/// The route is handed over before the map reports ready, the order the
/// results page sees them in. Returns `None` only if nothing was rendered.
pub fn render_results<S: MapSurface>(
    surface: &mut S,
    route: RouteResult,
) -> (RouteRenderer, Option<RouteSummary>) {
    let mut renderer = RouteRenderer::new();
    renderer.show(surface, route);

    let mut hazards = HazardLayerController::new();
    hazards.install(surface);
    let summary = renderer.on_map_ready(surface);
    (renderer, summary)
}

/// Log every notice the planner publishes until the channel closes.
///
/// A slow reader skips the events it lagged behind on and keeps going.
/// Returns how many notices were logged.
pub async fn log_notices(mut events: broadcast::Receiver<PlannerEvent>) -> usize {
    let mut logged = 0;
    loop {
        match events.recv().await {
            Ok(PlannerEvent::Notice(notice)) => {
                match notice.level {
                    NoticeLevel::Error => tracing::error!("{}", notice.message),
                    NoticeLevel::Warning => tracing::warn!("{}", notice.message),
                    NoticeLevel::Info => tracing::info!("{}", notice.message),
                }
                logged += 1;
            }
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("Skipped {} planner events", skipped);
            }
            Err(RecvError::Closed) => return logged,
        }
    }
}

/// Parse `lon,lat` as given on the command line.
pub fn parse_point(text: &str) -> Result<Coordinates, String> {
    let (lon, lat) = text
        .split_once(',')
        .ok_or_else(|| format!("expected lon,lat but got '{}'", text))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lon.trim()))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
    if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
        return Err(format!("point out of range: {}", text));
    }
    Ok(Coordinates::new(lon, lat))
}

/// Install the fmt subscriber, honoring `RUST_LOG` on top of `directive`.
pub fn init_tracing(directive: &str) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?))
        .init();
    Ok(())
}
