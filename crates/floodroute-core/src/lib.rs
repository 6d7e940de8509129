//! Floodroute core - waypoint, marker, selection and map-layer state.
//!
//! Everything here is synchronous and free of I/O. The rendering engine is
//! reached through the [`MapSurface`] trait.

pub mod error;
pub mod generation;
pub mod hazard;
pub mod markers;
pub mod models;
pub mod registry;
pub mod render;
pub mod selection;
pub mod spatial;
pub mod surface;

pub use error::{RouteDocumentError, ValidationError};
pub use generation::{Generation, GenerationCounter};
pub use hazard::{HazardLayerController, ReturnPeriod};
pub use markers::MarkerSync;
pub use models::{
    Coordinates, LatLon, OptimizeRequest, Role, RoutePoint, RouteResult, SearchHit, Waypoint,
    WaypointId,
};
pub use registry::WaypointRegistry;
pub use render::{RouteRenderer, RouteSummary};
pub use selection::Selection;
pub use spatial::BoundingBox;
pub use surface::{MapSurface, MarkerColor, MarkerHandle};
