//! Backend operations the planner depends on.

use crate::error::ApiError;
use floodroute_core::{Coordinates, OptimizeRequest, SearchHit};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

/// What `POST /api/optimize` answered.
#[derive(Debug, Clone, PartialEq)]
pub enum OptimizeOutcome {
    /// Page to navigate to for the computed route.
    Redirect(String),
    /// Any body without a redirect instruction.
    Unexpected(Value),
}

impl OptimizeOutcome {
    pub fn from_body(body: Value) -> Self {
        match body.get("redirect").and_then(Value::as_str) {
            Some(target) if !target.is_empty() => OptimizeOutcome::Redirect(target.to_string()),
            _ => OptimizeOutcome::Unexpected(body),
        }
    }
}

/// Geocoding and optimization collaborator.
pub trait PlannerApi: Send + Sync + 'static {
    /// `GET /api/search/{query}`
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<SearchHit>, ApiError>> + Send;

    /// `GET /api/reverse-search/{lon}/{lat}`. `None` when the point did not resolve.
    fn reverse_search(
        &self,
        at: Coordinates,
    ) -> impl Future<Output = Result<Option<String>, ApiError>> + Send;

    /// `POST /api/optimize`
    fn optimize(
        &self,
        request: &OptimizeRequest,
    ) -> impl Future<Output = Result<OptimizeOutcome, ApiError>> + Send;
}

impl<T: PlannerApi> PlannerApi for Arc<T> {
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<SearchHit>, ApiError>> + Send {
        (**self).search(query)
    }

    fn reverse_search(
        &self,
        at: Coordinates,
    ) -> impl Future<Output = Result<Option<String>, ApiError>> + Send {
        (**self).reverse_search(at)
    }

    fn optimize(
        &self,
        request: &OptimizeRequest,
    ) -> impl Future<Output = Result<OptimizeOutcome, ApiError>> + Send {
        (**self).optimize(request)
    }
}
