//! Session state shared by every input channel of the planner.

use floodroute_core::{
    Coordinates, Generation, GenerationCounter, HazardLayerController, MapSurface, MarkerSync,
    SearchHit, Selection, WaypointId, WaypointRegistry,
};
use std::collections::HashMap;

/// Forward-geocode session: latest query, its generation, visible results.
#[derive(Debug, Default)]
pub struct SearchSession {
    pub(crate) query: String,
    pub(crate) generations: GenerationCounter,
    pub(crate) results: Vec<SearchHit>,
}

impl SearchSession {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchHit] {
        &self.results
    }

    /// Drop the visible results and invalidate any in-flight request.
    pub(crate) fn reset(&mut self) {
        self.query.clear();
        self.results.clear();
        self.generations.advance();
    }
}

/// Everything the planner mutates. Always accessed under one lock so each
/// event handler applies its changes atomically.
pub struct PlannerState<S> {
    pub(crate) surface: S,
    pub(crate) registry: WaypointRegistry,
    pub(crate) markers: MarkerSync,
    pub(crate) selection: Selection,
    pub(crate) hazards: HazardLayerController,
    pub(crate) search: SearchSession,
    /// Reverse-geocode generations, one counter per waypoint
    pub(crate) reverse: HashMap<WaypointId, GenerationCounter>,
}

impl<S: MapSurface> PlannerState<S> {
    pub(crate) fn new(surface: S) -> Self {
        Self {
            surface,
            registry: WaypointRegistry::new(),
            markers: MarkerSync::new(),
            selection: Selection::Idle,
            hazards: HazardLayerController::new(),
            search: SearchSession::default(),
            reverse: HashMap::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn registry(&self) -> &WaypointRegistry {
        &self.registry
    }

    pub fn markers(&self) -> &MarkerSync {
        &self.markers
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn hazards(&self) -> &HazardLayerController {
        &self.hazards
    }

    pub fn search(&self) -> &SearchSession {
        &self.search
    }

    /// Place a waypoint and bring its marker along in the same step.
    pub(crate) fn place(&mut self, id: WaypointId, at: Coordinates, label: String) -> bool {
        if !self.registry.set_coordinates(id, at, label) {
            return false;
        }
        if let Some(waypoint) = self.registry.get(id) {
            self.markers.sync(&mut self.surface, waypoint);
        }
        true
    }

    /// Invalidate any reverse-geocode still in flight for the waypoint.
    pub(crate) fn next_reverse_generation(&mut self, id: WaypointId) -> Generation {
        self.reverse.entry(id).or_default().advance()
    }
}
