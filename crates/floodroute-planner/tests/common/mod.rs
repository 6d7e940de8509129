//! Scripted backend for planner tests.
#![allow(dead_code)]

use floodroute_core::surface::recording::RecordingSurface;
use floodroute_core::{Coordinates, OptimizeRequest, SearchHit};
use floodroute_planner::{Config, Planner};
use floodroute_sdk::{ApiError, OptimizeOutcome, PlannerApi};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub type TestPlanner = Planner<Arc<FakeApi>, RecordingSurface>;

/// Backend whose latency and answers are chosen per test.
#[derive(Default)]
pub struct FakeApi {
    pub searches: Mutex<Vec<String>>,
    pub reverse_calls: Mutex<Vec<Coordinates>>,
    pub optimizations: Mutex<Vec<OptimizeRequest>>,
    search_delays: HashMap<String, Duration>,
    /// Reverse-geocode latency keyed by longitude in micro-degrees
    reverse_delays: HashMap<i64, Duration>,
    reverse_names: bool,
    offline: bool,
    optimize_body: Option<Value>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            reverse_names: true,
            ..Self::default()
        }
    }

    pub fn search_delay(mut self, query: &str, delay: Duration) -> Self {
        self.search_delays.insert(query.to_string(), delay);
        self
    }

    pub fn reverse_delay(mut self, lon: f64, delay: Duration) -> Self {
        self.reverse_delays.insert(micro(lon), delay);
        self
    }

    pub fn unresolved(mut self) -> Self {
        self.reverse_names = false;
        self
    }

    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    pub fn optimize_reply(mut self, body: Value) -> Self {
        self.optimize_body = Some(body);
        self
    }

    pub fn into_planner(self) -> (TestPlanner, Arc<FakeApi>) {
        let api = Arc::new(self);
        let planner = Planner::new(api.clone(), RecordingSurface::default(), &Config::default());
        (planner, api)
    }

    fn failure() -> ApiError {
        ApiError::Status(reqwest::StatusCode::BAD_GATEWAY)
    }
}

fn micro(value: f64) -> i64 {
    (value * 1_000_000.0).round() as i64
}

pub fn reverse_name(at: Coordinates) -> String {
    format!("Place near {:.3}, {:.3}", at.lat, at.lon)
}

impl PlannerApi for FakeApi {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ApiError> {
        self.searches.lock().unwrap().push(query.to_string());
        let delay = self
            .search_delays
            .get(query)
            .copied()
            .unwrap_or(Duration::from_millis(50));
        tokio::time::sleep(delay).await;

        if self.offline {
            return Err(Self::failure());
        }
        Ok(vec![SearchHit {
            lat: 14.5995,
            lon: 120.9842,
            display_name: query.to_string(),
        }])
    }

    async fn reverse_search(&self, at: Coordinates) -> Result<Option<String>, ApiError> {
        self.reverse_calls.lock().unwrap().push(at);
        let delay = self
            .reverse_delays
            .get(&micro(at.lon))
            .copied()
            .unwrap_or(Duration::from_millis(50));
        tokio::time::sleep(delay).await;

        if self.offline {
            return Err(Self::failure());
        }
        Ok(self.reverse_names.then(|| reverse_name(at)))
    }

    async fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizeOutcome, ApiError> {
        self.optimizations.lock().unwrap().push(request.clone());
        if self.offline {
            return Err(Self::failure());
        }
        let body = self.optimize_body.clone().unwrap_or(Value::Null);
        Ok(OptimizeOutcome::from_body(body))
    }
}

/// Every waypoint has a marker exactly when it has coordinates.
pub fn assert_markers_match(planner: &TestPlanner) {
    planner.inspect(|state| {
        for waypoint in state.registry().all() {
            assert_eq!(
                state.markers().marker(waypoint.id).is_some(),
                waypoint.coordinates.is_some(),
                "marker binding out of sync for {}",
                waypoint.id
            );
        }
        assert_eq!(state.markers().len(), state.surface().markers.len());
    });
}
