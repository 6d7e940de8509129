//! Route submission.

mod common;

use common::FakeApi;
use floodroute_core::{Coordinates, LatLon, ValidationError};
use floodroute_planner::{PlannerEvent, SubmitError};
use serde_json::json;

async fn place(planner: &common::TestPlanner, id: floodroute_core::WaypointId, at: Coordinates) {
    planner.toggle_pick(id);
    planner.on_map_click(at).unwrap().await.unwrap();
    planner.toggle_pick(id);
}

#[tokio::test(start_paused = true)]
async fn missing_source_blocks_without_network_call() {
    let (planner, api) = FakeApi::new().into_planner();
    let dest = planner.add_destination();
    place(&planner, dest, Coordinates::new(121.02, 14.56)).await;
    let mut events = planner.subscribe();

    let err = planner.submit().await.unwrap_err();
    assert!(matches!(
        err,
        SubmitError::Validation(ValidationError::MissingSource)
    ));
    assert!(api.optimizations.lock().unwrap().is_empty());
    match events.try_recv() {
        Ok(PlannerEvent::Notice(notice)) => {
            assert_eq!(notice.message, "Please select a source point on the map.")
        }
        other => panic!("expected notice, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn missing_destination_blocks_without_network_call() {
    let (planner, api) = FakeApi::new().into_planner();
    planner.add_destination();
    place(&planner, planner.source_id(), Coordinates::new(121.0, 14.55)).await;

    let err = planner.submit().await.unwrap_err();
    assert!(matches!(
        err,
        SubmitError::Validation(ValidationError::MissingDestination)
    ));
    assert!(api.optimizations.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn redirect_response_navigates() {
    let (planner, api) = FakeApi::new()
        .optimize_reply(json!({ "redirect": "/route/42" }))
        .into_planner();
    let dest = planner.add_destination();
    place(&planner, planner.source_id(), Coordinates::new(121.0, 14.55)).await;
    place(&planner, dest, Coordinates::new(121.02, 14.56)).await;
    let mut events = planner.subscribe();

    assert_eq!(planner.submit().await.unwrap(), "/route/42");

    let sent = api.optimizations.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].source, LatLon { lat: 14.55, lon: 121.0 });
    assert_eq!(sent[0].destinations, vec![LatLon { lat: 14.56, lon: 121.02 }]);
    assert!(matches!(
        events.try_recv(),
        Ok(PlannerEvent::Navigate(target)) if target == "/route/42"
    ));
}

#[tokio::test(start_paused = true)]
async fn destinations_are_sent_in_row_order() {
    let (planner, api) = FakeApi::new()
        .optimize_reply(json!({ "redirect": "/results" }))
        .into_planner();
    let first = planner.add_destination();
    let second = planner.add_destination();
    place(&planner, planner.source_id(), Coordinates::new(121.0, 14.55)).await;
    place(&planner, second, Coordinates::new(121.05, 14.6)).await;
    place(&planner, first, Coordinates::new(121.02, 14.56)).await;

    planner.submit().await.unwrap();

    let sent = api.optimizations.lock().unwrap().clone();
    assert_eq!(
        sent[0].destinations,
        vec![
            LatLon { lat: 14.56, lon: 121.02 },
            LatLon { lat: 14.6, lon: 121.05 },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn response_without_redirect_is_unexpected() {
    let (planner, _api) = FakeApi::new()
        .optimize_reply(json!({ "error": "no route" }))
        .into_planner();
    let dest = planner.add_destination();
    place(&planner, planner.source_id(), Coordinates::new(121.0, 14.55)).await;
    place(&planner, dest, Coordinates::new(121.02, 14.56)).await;
    let mut events = planner.subscribe();

    let err = planner.submit().await.unwrap_err();
    assert!(matches!(err, SubmitError::UnexpectedResponse(_)));
    assert!(matches!(events.try_recv(), Ok(PlannerEvent::Notice(_))));
    assert!(events.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn network_failure_leaves_waypoints_untouched() {
    let api = FakeApi::new().offline();
    let (planner, _api) = api.into_planner();
    let dest = planner.add_destination();
    planner.inspect(|state| assert!(state.registry().source().coordinates.is_none()));

    // Place points directly through clicks; reverse lookups fail but placement stands.
    place(&planner, planner.source_id(), Coordinates::new(121.0, 14.55)).await;
    place(&planner, dest, Coordinates::new(121.02, 14.56)).await;
    let before: Vec<_> = planner.inspect(|state| state.registry().all().cloned().collect());

    let err = planner.submit().await.unwrap_err();
    assert!(matches!(err, SubmitError::Network(_)));

    let after: Vec<_> = planner.inspect(|state| state.registry().all().cloned().collect());
    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(&after) {
        assert_eq!(b.coordinates, a.coordinates);
        assert_eq!(b.label, a.label);
    }
}
