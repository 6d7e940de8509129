//! Notifications published to whatever presents the planner to the user.

use chrono::{DateTime, Utc};
use floodroute_core::{SearchHit, Selection, WaypointId};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Non-blocking message for the user.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PlannerEvent {
    WaypointAdded(WaypointId),
    WaypointRemoved(WaypointId),
    SelectionChanged(Selection),
    LabelChanged { id: WaypointId, label: String },
    SearchResults(Vec<SearchHit>),
    /// Leave the planner page for the computed route.
    Navigate(String),
    Notice(Notice),
}
