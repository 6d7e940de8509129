//! Binding between waypoints and the markers drawn by the rendering engine.
//!
//! `MarkerSync` is the only writer of markers. Bindings are keyed by
//! [`WaypointId`], so they outlive any UI element that displays the waypoint.

use crate::models::{Waypoint, WaypointId};
use crate::surface::{MapSurface, MarkerColor, MarkerHandle};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct MarkerSync {
    bindings: HashMap<WaypointId, MarkerHandle>,
}

impl MarkerSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the waypoint's marker in line with its coordinates.
    ///
    /// Creates the marker on first placement, otherwise moves and recolors it.
    /// A waypoint without coordinates is left alone.
    pub fn sync<S: MapSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        waypoint: &Waypoint,
    ) -> Option<MarkerHandle> {
        let coordinates = waypoint.coordinates?;
        let color = MarkerColor::for_role(waypoint.role);

        let handle = match self.bindings.get(&waypoint.id) {
            Some(&handle) => {
                surface.move_marker(handle, coordinates);
                surface.recolor_marker(handle, color);
                handle
            }
            None => {
                let handle = surface.add_marker(coordinates, color);
                self.bindings.insert(waypoint.id, handle);
                tracing::debug!("Created {} marker for {}", color.as_css(), waypoint.id);
                handle
            }
        };

        Some(handle)
    }

    /// Remove the waypoint's marker from the engine. Safe to repeat.
    pub fn teardown<S: MapSurface + ?Sized>(&mut self, surface: &mut S, id: WaypointId) {
        if let Some(handle) = self.bindings.remove(&id) {
            surface.remove_marker(handle);
            tracing::debug!("Removed marker for {}", id);
        }
    }

    pub fn marker(&self, id: WaypointId) -> Option<MarkerHandle> {
        self.bindings.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
