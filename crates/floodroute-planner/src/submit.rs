//! Route submission to the optimizer.

use crate::events::{NoticeLevel, PlannerEvent};
use crate::planner::Planner;
use floodroute_core::{MapSurface, ValidationError};
use floodroute_sdk::{ApiError, OptimizeOutcome, PlannerApi};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to submit route: {0}")]
    Network(#[from] ApiError),
    #[error("unexpected response from optimizer: {0}")]
    UnexpectedResponse(Value),
}

impl<A, S> Planner<A, S>
where
    A: PlannerApi,
    S: MapSurface + 'static,
{
    /// Send every placed waypoint to the optimizer.
    ///
    /// On success a [`PlannerEvent::Navigate`] is published and the redirect
    /// target returned. Failures are published as notices; the waypoints are
    /// never modified, so the user can retry.
    pub async fn submit(&self) -> Result<String, SubmitError> {
        let request = self.lock().registry.route_request();
        let request = match request {
            Ok(request) => request,
            Err(e) => {
                tracing::info!("Route submission blocked: {}", e);
                self.notify(NoticeLevel::Error, e.to_string());
                return Err(e.into());
            }
        };

        tracing::info!(
            "Submitting route with {} destination(s)",
            request.destinations.len()
        );

        match self.inner.api.optimize(&request).await {
            Ok(OptimizeOutcome::Redirect(target)) => {
                tracing::info!("Optimizer redirected to {}", target);
                self.emit(PlannerEvent::Navigate(target.clone()));
                Ok(target)
            }
            Ok(OptimizeOutcome::Unexpected(body)) => {
                tracing::error!("Unexpected response: {}", body);
                self.notify(
                    NoticeLevel::Error,
                    "Something went wrong while planning the route.",
                );
                Err(SubmitError::UnexpectedResponse(body))
            }
            Err(e) => {
                tracing::error!("Error submitting route: {}", e);
                self.notify(NoticeLevel::Error, "Failed to submit route.");
                Err(e.into())
            }
        }
    }
}
