//! Error types raised by core state operations.

use thiserror::Error;

/// Why a route cannot be submitted yet. Displayed verbatim to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a source point on the map.")]
    MissingSource,
    #[error("Please select at least one destination point on the map.")]
    MissingDestination,
}

/// A route document that cannot be rendered at all.
#[derive(Debug, Error)]
pub enum RouteDocumentError {
    #[error("route document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("route document has no features")]
    NoFeatures,
}
