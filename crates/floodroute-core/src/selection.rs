//! Which waypoint, if any, receives the next map click or search selection.

use crate::models::WaypointId;
use serde::{Deserialize, Serialize};

/// Two-state selection machine. At most one waypoint is armed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "waypoint", rename_all = "lowercase")]
pub enum Selection {
    #[default]
    Idle,
    Armed(WaypointId),
}

impl Selection {
    /// The "pick on map" control of a row was clicked.
    ///
    /// Arms the row, replacing any other armed row, or disarms it if it was
    /// already armed.
    pub fn toggle(self, id: WaypointId) -> Self {
        match self {
            Selection::Armed(current) if current == id => Selection::Idle,
            _ => Selection::Armed(id),
        }
    }

    /// Arm a row unconditionally.
    pub fn arm(self, id: WaypointId) -> Self {
        Selection::Armed(id)
    }

    /// The waypoint was destroyed; drop it if it is the armed one.
    pub fn forget(self, id: WaypointId) -> Self {
        match self {
            Selection::Armed(current) if current == id => Selection::Idle,
            other => other,
        }
    }

    pub fn armed(&self) -> Option<WaypointId> {
        match self {
            Selection::Idle => None,
            Selection::Armed(id) => Some(*id),
        }
    }

    pub fn is_armed(&self, id: WaypointId) -> bool {
        self.armed() == Some(id)
    }
}
