//! Map clicks: place the armed waypoint, then resolve an address for it.

use crate::events::{NoticeLevel, PlannerEvent};
use crate::planner::Planner;
use floodroute_core::spatial::PICK_ZOOM;
use floodroute_core::{Coordinates, Generation, MapSurface, WaypointId};
use floodroute_sdk::{ApiError, PlannerApi};
use tokio::task::JoinHandle;

impl<A, S> Planner<A, S>
where
    A: PlannerApi,
    S: MapSurface + 'static,
{
    /// The map was clicked. Ignored unless a waypoint is armed.
    ///
    /// The waypoint, its marker and the view update immediately with a
    /// coordinate label; the returned task replaces the label once the
    /// address resolves. Must be called inside a tokio runtime.
    pub fn on_map_click(&self, at: Coordinates) -> Option<JoinHandle<()>> {
        let (id, generation, label) = {
            let mut state = self.lock();
            let id = state.selection.armed()?;
            let label = at.label();
            if !state.place(id, at, label.clone()) {
                return None;
            }
            state.surface.fly_to(at, PICK_ZOOM);
            (id, state.next_reverse_generation(id), label)
        };

        tracing::debug!("Placed {} at {:?}, resolving address", id, at);
        self.emit(PlannerEvent::LabelChanged { id, label });

        let planner = self.clone();
        Some(tokio::spawn(async move {
            let outcome = planner.inner.api.reverse_search(at).await;
            planner.apply_reverse(id, generation, outcome);
        }))
    }

    fn apply_reverse(
        &self,
        id: WaypointId,
        generation: Generation,
        outcome: Result<Option<String>, ApiError>,
    ) {
        let label = {
            let mut state = self.lock();
            let current = state
                .reverse
                .get(&id)
                .is_some_and(|counter| counter.is_current(generation));
            if !current {
                tracing::debug!("Discarding stale reverse geocode for {}", id);
                return;
            }

            match outcome {
                Ok(Some(name)) => {
                    state.registry.set_label(id, name.clone());
                    name
                }
                Ok(None) => {
                    tracing::debug!("No address found for {}", id);
                    return;
                }
                Err(e) => {
                    drop(state);
                    tracing::warn!("Reverse geocoding error: {}", e);
                    self.notify(
                        NoticeLevel::Warning,
                        "Could not resolve an address for this point.",
                    );
                    return;
                }
            }
        };

        self.emit(PlannerEvent::LabelChanged { id, label });
    }
}
