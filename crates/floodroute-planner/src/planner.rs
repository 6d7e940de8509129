//! The planner session: one handle shared by every input channel.
//!
//! Handlers take the state lock, apply their change synchronously and release
//! it before any network await, so transitions never interleave.

use crate::config::Config;
use crate::events::{Notice, NoticeLevel, PlannerEvent};
use crate::state::PlannerState;
use floodroute_core::hazard::ReturnPeriod;
use floodroute_core::spatial::{INITIAL_ZOOM, SERVICE_AREA, SERVICE_AREA_PADDING};
use floodroute_core::{MapSurface, Selection, WaypointId};
use floodroute_sdk::PlannerApi;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

const EVENT_CAPACITY: usize = 64;

pub(crate) struct Shared<A, S> {
    pub(crate) api: A,
    pub(crate) state: Mutex<PlannerState<S>>,
    pub(crate) events: broadcast::Sender<PlannerEvent>,
    pub(crate) search_debounce: Duration,
    /// Pending debounce timer, replaced on every keystroke
    pub(crate) debounce: Mutex<Option<JoinHandle<()>>>,
}

/// Cloneable handle to a planner session.
pub struct Planner<A, S> {
    pub(crate) inner: Arc<Shared<A, S>>,
}

impl<A, S> Clone for Planner<A, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A, S> Planner<A, S>
where
    A: PlannerApi,
    S: MapSurface + 'static,
{
    /// Start a session with only the (unplaced) source waypoint.
    ///
    /// The view starts centered on the service area at [`INITIAL_ZOOM`].
    pub fn new(api: A, mut surface: S, config: &Config) -> Self {
        surface.fly_to(SERVICE_AREA.center(), INITIAL_ZOOM);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Shared {
                api,
                state: Mutex::new(PlannerState::new(surface)),
                events,
                search_debounce: config.search_debounce,
                debounce: Mutex::new(None),
            }),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlannerEvent> {
        self.inner.events.subscribe()
    }

    /// Read the session state.
    pub fn inspect<R>(&self, f: impl FnOnce(&PlannerState<S>) -> R) -> R {
        f(&self.lock())
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, PlannerState<S>> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn emit(&self, event: PlannerEvent) {
        // No receivers is fine: nobody is presenting the session.
        let _ = self.inner.events.send(event);
    }

    pub(crate) fn notify(&self, level: NoticeLevel, message: impl Into<String>) {
        self.emit(PlannerEvent::Notice(Notice::new(level, message)));
    }

    /// The base map and its style finished loading.
    pub fn on_map_ready(&self) {
        let mut state = self.lock();
        let state = &mut *state;
        state.surface.fit_bounds(SERVICE_AREA, SERVICE_AREA_PADDING);
        state.hazards.install(&mut state.surface);
        tracing::info!("Map ready, hazard layers installed");
    }

    pub fn set_hazard_visible(&self, period: ReturnPeriod, visible: bool) {
        let mut state = self.lock();
        let state = &mut *state;
        state.hazards.set_visible(&mut state.surface, period, visible);
        tracing::debug!("{}-year hazard layer visible: {}", period.years(), visible);
    }

    /// Flip one hazard overlay and return its new visibility.
    pub fn toggle_hazard(&self, period: ReturnPeriod) -> bool {
        let mut state = self.lock();
        let state = &mut *state;
        state.hazards.toggle(&mut state.surface, period)
    }

    pub fn source_id(&self) -> WaypointId {
        self.lock().registry.source_id()
    }

    pub fn add_destination(&self) -> WaypointId {
        let id = self.lock().registry.add_destination().id;
        self.emit(PlannerEvent::WaypointAdded(id));
        id
    }

    /// Remove a destination row with its marker. The source cannot be removed.
    pub fn remove_destination(&self, id: WaypointId) -> bool {
        let selection_changed = {
            let mut state = self.lock();
            let state = &mut *state;
            if state
                .registry
                .remove_destination(id, &mut state.markers, &mut state.surface)
                .is_none()
            {
                return false;
            }
            state.reverse.remove(&id);

            let before = state.selection;
            state.selection = before.forget(id);
            (state.selection != before).then_some(state.selection)
        };

        self.emit(PlannerEvent::WaypointRemoved(id));
        if let Some(selection) = selection_changed {
            self.emit(PlannerEvent::SelectionChanged(selection));
        }
        true
    }

    /// The "pick on map" control of a row was clicked.
    pub fn toggle_pick(&self, id: WaypointId) -> Selection {
        let selection = {
            let mut state = self.lock();
            if !state.registry.contains(id) {
                return state.selection;
            }
            state.selection = state.selection.toggle(id);
            state.selection
        };

        tracing::debug!("Selection is now {:?}", selection);
        self.emit(PlannerEvent::SelectionChanged(selection));
        selection
    }

    pub fn selection(&self) -> Selection {
        self.lock().selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floodroute_core::surface::recording::RecordingSurface;
    use floodroute_core::{Coordinates, OptimizeRequest, SearchHit};
    use floodroute_sdk::{ApiError, OptimizeOutcome};

    struct NoBackend;

    impl PlannerApi for NoBackend {
        async fn search(&self, _query: &str) -> Result<Vec<SearchHit>, ApiError> {
            Ok(Vec::new())
        }

        async fn reverse_search(&self, _at: Coordinates) -> Result<Option<String>, ApiError> {
            Ok(None)
        }

        async fn optimize(&self, _request: &OptimizeRequest) -> Result<OptimizeOutcome, ApiError> {
            Ok(OptimizeOutcome::Unexpected(serde_json::Value::Null))
        }
    }

    fn planner() -> Planner<NoBackend, RecordingSurface> {
        Planner::new(NoBackend, RecordingSurface::default(), &Config::default())
    }

    #[test]
    fn arming_second_row_disarms_first() {
        let planner = planner();
        let a = planner.add_destination();
        let b = planner.add_destination();

        assert_eq!(planner.toggle_pick(a), Selection::Armed(a));
        assert_eq!(planner.toggle_pick(b), Selection::Armed(b));
        assert_eq!(planner.toggle_pick(b), Selection::Idle);
    }

    #[test]
    fn toggle_pick_ignores_unknown_rows() {
        let planner = planner();
        assert_eq!(planner.toggle_pick(WaypointId(42)), Selection::Idle);
    }

    #[test]
    fn removing_armed_row_clears_selection() {
        let planner = planner();
        let mut events = planner.subscribe();
        let dest = planner.add_destination();
        planner.toggle_pick(dest);

        assert!(planner.remove_destination(dest));
        assert_eq!(planner.selection(), Selection::Idle);

        let mut seen = Vec::new();
        while let Ok(event) = events.try_recv() {
            seen.push(event);
        }
        assert!(matches!(
            seen.last(),
            Some(PlannerEvent::SelectionChanged(Selection::Idle))
        ));
    }

    #[test]
    fn source_cannot_be_removed() {
        let planner = planner();
        assert!(!planner.remove_destination(planner.source_id()));
    }

    #[test]
    fn new_session_starts_on_service_area_center() {
        let planner = planner();
        planner.inspect(|state| {
            assert_eq!(
                state.surface().flights,
                vec![(SERVICE_AREA.center(), INITIAL_ZOOM)]
            );
            assert!(state.surface().fits.is_empty());
        });
    }

    #[test]
    fn map_ready_fits_service_area_and_installs_hazards() {
        let planner = planner();
        planner.on_map_ready();
        planner.on_map_ready();

        planner.inspect(|state| {
            assert_eq!(state.surface().fits, vec![(SERVICE_AREA, SERVICE_AREA_PADDING); 2]);
            assert_eq!(state.surface().fill_layers.len(), 3);
            assert!(state.hazards().is_installed());
        });
    }

    #[test]
    fn hazard_toggle_round_trip() {
        let planner = planner();
        planner.on_map_ready();

        assert!(!planner.toggle_hazard(ReturnPeriod::Y5));
        assert!(planner.toggle_hazard(ReturnPeriod::Y5));
        planner.set_hazard_visible(ReturnPeriod::Y25, false);

        planner.inspect(|state| {
            assert!(state.hazards().is_visible(ReturnPeriod::Y5));
            assert!(!state.hazards().is_visible(ReturnPeriod::Y25));
        });
    }
}
