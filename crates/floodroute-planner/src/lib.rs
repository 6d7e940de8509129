//! Floodroute planner - event-driven session engine.
//!
//! Keeps waypoint rows, map markers and the armed-waypoint selection
//! consistent across map clicks, debounced search and route submission.

pub mod config;
pub mod events;
pub mod planner;
mod reverse;
mod search;
pub mod state;
pub mod submit;

pub use config::Config;
pub use events::{Notice, NoticeLevel, PlannerEvent};
pub use planner::Planner;
pub use state::{PlannerState, SearchSession};
pub use submit::SubmitError;
