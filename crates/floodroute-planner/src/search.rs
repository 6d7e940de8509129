//! Debounced forward-geocode search feeding the armed waypoint.
//!
//! Each keystroke restarts a quiet-period timer. When the timer fires the
//! request takes a fresh generation; only the response holding the current
//! generation may replace the visible results.

use crate::events::{NoticeLevel, PlannerEvent};
use crate::planner::Planner;
use floodroute_core::spatial::PICK_ZOOM;
use floodroute_core::{Generation, MapSurface, SearchHit, WaypointId};
use floodroute_sdk::{ApiError, PlannerApi};
use std::sync::PoisonError;

impl<A, S> Planner<A, S>
where
    A: PlannerApi,
    S: MapSurface + 'static,
{
    /// The search control of a row was opened: arm the row and start a fresh session.
    pub fn open_search(&self, id: WaypointId) -> bool {
        self.cancel_debounce();
        let selection = {
            let mut state = self.lock();
            if !state.registry.contains(id) {
                return false;
            }
            state.selection = state.selection.arm(id);
            state.search.reset();
            state.selection
        };

        self.emit(PlannerEvent::SelectionChanged(selection));
        self.emit(PlannerEvent::SearchResults(Vec::new()));
        true
    }

    /// Text in the search box changed. Must be called inside a tokio runtime.
    pub fn on_search_input(&self, text: &str) {
        self.cancel_debounce();
        let query = text.trim().to_string();

        if query.is_empty() {
            self.lock().search.reset();
            self.emit(PlannerEvent::SearchResults(Vec::new()));
            return;
        }

        self.lock().search.query = query.clone();

        let planner = self.clone();
        let quiet = self.inner.search_debounce;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            planner.issue_search(query);
        });

        let mut pending = self
            .inner
            .debounce
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *pending = Some(timer);
    }

    /// Apply the result at `index` to the armed waypoint.
    ///
    /// Returns the waypoint that was placed, or `None` when nothing is armed or
    /// the index is out of range.
    pub fn select_result(&self, index: usize) -> Option<WaypointId> {
        let (id, hit) = {
            let mut state = self.lock();
            let hit = state.search.results.get(index)?.clone();
            let Some(id) = state.selection.armed() else {
                drop(state);
                self.notify(NoticeLevel::Warning, "Pick a waypoint before choosing a result.");
                return None;
            };

            let at = hit.coordinates();
            if !state.place(id, at, hit.display_name.clone()) {
                return None;
            }
            // A late reverse-geocode for this waypoint must not overwrite the choice.
            state.next_reverse_generation(id);
            state.surface.fly_to(at, PICK_ZOOM);
            state.search.reset();
            (id, hit)
        };

        tracing::info!("Placed {} at search result '{}'", id, hit.display_name);
        self.emit(PlannerEvent::LabelChanged {
            id,
            label: hit.display_name,
        });
        self.emit(PlannerEvent::SearchResults(Vec::new()));
        Some(id)
    }

    pub fn search_results(&self) -> Vec<SearchHit> {
        self.lock().search.results.clone()
    }

    fn cancel_debounce(&self) {
        let mut pending = self
            .inner
            .debounce
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(timer) = pending.take() {
            timer.abort();
        }
    }

    /// Timer fired: tag a request with a new generation and send it.
    ///
    /// The request runs on its own task so a later keystroke that aborts the
    /// timer never cancels a request already in flight.
    fn issue_search(&self, query: String) {
        let generation = self.lock().search.generations.advance();
        tracing::debug!("Search #{} for '{}'", generation.value(), query);

        let planner = self.clone();
        tokio::spawn(async move {
            let outcome = planner.inner.api.search(&query).await;
            planner.apply_search(generation, outcome);
        });
    }

    fn apply_search(&self, generation: Generation, outcome: Result<Vec<SearchHit>, ApiError>) {
        let mut state = self.lock();
        if !state.search.generations.is_current(generation) {
            tracing::debug!("Discarding stale search #{}", generation.value());
            return;
        }

        match outcome {
            Ok(hits) => {
                state.search.results = hits.clone();
                drop(state);
                self.emit(PlannerEvent::SearchResults(hits));
            }
            Err(e) => {
                drop(state);
                tracing::error!("Error fetching locations: {}", e);
                self.notify(NoticeLevel::Error, "Error fetching results");
            }
        }
    }
}
