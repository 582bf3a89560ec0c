// Navigation events: the engine's output to the host.
//
// Every engine call returns the events it produced, in order, instead of
// pushing them to registered listeners. The host routes them to its
// collaborators: `Waypoint` / `WaypointCleared` to the marker renderer,
// `Status` to the on-screen label and the speech sink, `Arrived` / `NoPath`
// to whatever UI reacts to the end of a request.
//
// Status strings keep the wording the on-device UI already shows.

use crate::types::WorldPos;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum NavEvent {
    /// Show the waypoint marker at `position` (world space, marker height
    /// included). `index` is 0-based within `total` waypoints.
    Waypoint {
        node: String,
        index: usize,
        total: usize,
        position: WorldPos,
    },
    /// Remove the waypoint marker; no waypoint is active.
    WaypointCleared,
    /// The walker reached the last waypoint.
    Arrived { node: String },
    /// The destination is unreachable from the current location.
    NoPath { from: String, to: String },
    /// Human-readable status for the label and speech output.
    Status(String),
}

impl NavEvent {
    pub fn status_text(&self) -> Option<&str> {
        match self {
            NavEvent::Status(text) => Some(text),
            _ => None,
        }
    }
}

pub fn current_location_status(node: &str) -> String {
    format!("Current: {node}")
}

pub fn going_to_status(node: &str, index: usize, total: usize) -> String {
    format!("Going to {node} ({}/{total})", index + 1)
}

pub const NO_LOCATION_STATUS: &str = "Scan a QR to set your current location first.";
pub const NO_PATH_STATUS: &str = "No path found.";
pub const FINISHED_STATUS: &str = "Navigation finished.";
