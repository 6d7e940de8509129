//! Floodroute SDK - client for the planner backend API.
//!
//! Exposes the [`PlannerApi`] trait the session engine is generic over and
//! [`HttpPlannerApi`], its implementation over HTTP.

pub mod api;
pub mod client;
pub mod error;

pub use api::{OptimizeOutcome, PlannerApi};
pub use client::HttpPlannerApi;
pub use error::ApiError;
