//! Ordered collection of waypoints: one source followed by the destinations.

use crate::error::ValidationError;
use crate::markers::MarkerSync;
use crate::models::{Coordinates, OptimizeRequest, Role, Waypoint, WaypointId};
use crate::surface::MapSurface;

/// Owns every waypoint record. Holds no UI state.
#[derive(Debug, Clone)]
pub struct WaypointRegistry {
    source: Waypoint,
    destinations: Vec<Waypoint>,
    next_id: u32,
}

impl Default for WaypointRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WaypointRegistry {
    /// Create a registry holding only the (unplaced) source.
    pub fn new() -> Self {
        Self {
            source: Waypoint::new(WaypointId(0), Role::Source),
            destinations: Vec::new(),
            next_id: 1,
        }
    }

    pub fn source(&self) -> &Waypoint {
        &self.source
    }

    pub fn source_id(&self) -> WaypointId {
        self.source.id
    }

    /// Append a destination without coordinates.
    pub fn add_destination(&mut self) -> Waypoint {
        let id = WaypointId(self.next_id);
        self.next_id += 1;
        let waypoint = Waypoint::new(
            id,
            Role::Destination {
                ordinal: self.destinations.len() + 1,
            },
        );
        self.destinations.push(waypoint.clone());
        tracing::debug!("Added destination {}", id);
        waypoint
    }

    /// Remove a destination, tearing its marker down first.
    ///
    /// Returns `None` (and does nothing) for the source or an unknown id.
    pub fn remove_destination<S: MapSurface + ?Sized>(
        &mut self,
        id: WaypointId,
        markers: &mut MarkerSync,
        surface: &mut S,
    ) -> Option<Waypoint> {
        let index = self.destinations.iter().position(|wp| wp.id == id)?;
        markers.teardown(surface, id);
        let removed = self.destinations.remove(index);

        for (i, waypoint) in self.destinations.iter_mut().enumerate().skip(index) {
            waypoint.role = Role::Destination { ordinal: i + 1 };
        }

        tracing::debug!("Removed destination {}", id);
        Some(removed)
    }

    /// Assign a position and label. Returns false for an unknown id.
    pub fn set_coordinates(
        &mut self,
        id: WaypointId,
        coordinates: Coordinates,
        label: impl Into<String>,
    ) -> bool {
        match self.get_mut(id) {
            Some(waypoint) => {
                waypoint.coordinates = Some(coordinates);
                waypoint.label = label.into();
                true
            }
            None => false,
        }
    }

    /// Replace only the label. Returns false for an unknown id.
    pub fn set_label(&mut self, id: WaypointId, label: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(waypoint) => {
                waypoint.label = label.into();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: WaypointId) -> Option<&Waypoint> {
        if self.source.id == id {
            return Some(&self.source);
        }
        self.destinations.iter().find(|wp| wp.id == id)
    }

    fn get_mut(&mut self, id: WaypointId) -> Option<&mut Waypoint> {
        if self.source.id == id {
            return Some(&mut self.source);
        }
        self.destinations.iter_mut().find(|wp| wp.id == id)
    }

    pub fn contains(&self, id: WaypointId) -> bool {
        self.get(id).is_some()
    }

    /// Source first, then destinations in insertion order.
    pub fn all(&self) -> impl Iterator<Item = &Waypoint> {
        std::iter::once(&self.source).chain(self.destinations.iter())
    }

    pub fn destinations(&self) -> &[Waypoint] {
        &self.destinations
    }

    /// Build the optimize request body from the placed waypoints.
    ///
    /// Destinations without coordinates are skipped; order is preserved.
    pub fn route_request(&self) -> Result<OptimizeRequest, ValidationError> {
        let source = self
            .source
            .coordinates
            .ok_or(ValidationError::MissingSource)?;

        let destinations: Vec<_> = self
            .destinations
            .iter()
            .filter_map(|wp| wp.coordinates)
            .map(Into::into)
            .collect();

        if destinations.is_empty() {
            return Err(ValidationError::MissingDestination);
        }

        Ok(OptimizeRequest {
            source: source.into(),
            destinations,
        })
    }
}
