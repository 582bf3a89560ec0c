// Waypoint progression state machine.
//
// A `Navigator` owns at most one navigation session: the computed route as a
// list of waypoints (world positions), and a cursor to the waypoint the
// walker is heading for. It is driven entirely by the host:
//
//   Idle --start_navigation(ok)--> Navigating --last waypoint reached--> Finished
//     ^            |                    |                                   |
//     |        no path / error        clear()                  clear() / start_navigation
//     +------------+--------------------+-----------------------------------+
//
// `on_position_update` is called at the host's cadence (per frame or per pose
// sample) with the walker's world position. When the ground-plane distance to
// the current waypoint is strictly below the threshold the cursor advances
// by one. The navigator never reads a position on its own and never blocks.
//
// Waypoint positions are computed once, at session start, from the graph's
// pixel positions through the floor plan, raised by `waypoint_height` (the
// marker floats above the floor; the distance test ignores height). Path nodes
// that only exist as edge endpoints have no position and are skipped as
// waypoints; the walker is sent straight to the next positioned node.
//
// See also: `pathfinding.rs` for the route, `guide.rs` which owns a
// `Navigator` and feeds it location and position inputs.

use crate::error::Result;
use crate::event::{self, NavEvent};
use crate::nav::NavGraph;
use crate::pathfinding::find_path;
use crate::transform::FloorPlan;
use crate::types::{NodeId, WorldPos};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavState {
    /// No session.
    Idle,
    /// Session active, cursor on a waypoint.
    Navigating,
    /// Cursor ran past the last waypoint.
    Finished,
}

/// One stop along the route.
#[derive(Clone, Debug, PartialEq)]
pub struct Waypoint {
    pub node: NodeId,
    pub name: String,
    pub position: WorldPos,
}

/// An active (or just finished) route.
#[derive(Clone, Debug, PartialEq)]
pub struct NavSession {
    /// The full route from A*, start and goal included.
    pub path: Vec<NodeId>,
    pub total_cost: f64,
    /// Displayable stops along `path`. Path nodes without a position are
    /// left out, so this can be shorter than `path`.
    pub waypoints: Vec<Waypoint>,
    /// Index into `waypoints` (not `path`) of the stop being approached. Only
    /// increases. The `index`/`total` progress counter in emitted events
    /// counts waypoints too.
    pub cursor: usize,
}

impl NavSession {
    pub fn current(&self) -> Option<&Waypoint> {
        self.waypoints.get(self.cursor)
    }

    pub fn is_active(&self) -> bool {
        self.cursor < self.waypoints.len()
    }
}

#[derive(Clone, Debug)]
pub struct Navigator {
    state: NavState,
    session: Option<NavSession>,
    waypoint_height: f64,
    /// Last waypoint node the walker got within range of.
    last_reached: Option<NodeId>,
    status: String,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Navigator {
    pub fn new(waypoint_height: f64) -> Self {
        Self {
            state: NavState::Idle,
            session: None,
            waypoint_height,
            last_reached: None,
            status: String::new(),
        }
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn session(&self) -> Option<&NavSession> {
        self.session.as_ref()
    }

    /// The waypoint currently shown, if navigating.
    pub fn current_waypoint(&self) -> Option<&Waypoint> {
        match self.state {
            NavState::Navigating => self.session.as_ref().and_then(NavSession::current),
            _ => None,
        }
    }

    pub fn last_reached(&self) -> Option<NodeId> {
        self.last_reached
    }

    /// The most recent status string emitted.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Compute a route and start guiding along it.
    ///
    /// Any previous session is discarded first, so on `Err` or "no path" the
    /// navigator is `Idle`. On success the first waypoint is emitted.
    pub fn start_navigation(
        &mut self,
        graph: &NavGraph,
        plan: &FloorPlan,
        current: &str,
        destination: &str,
    ) -> Result<Vec<NavEvent>> {
        let mut events = self.clear();

        let Some(path) = find_path(graph, current, destination)? else {
            tracing::warn!(from = current, to = destination, "destination unreachable");
            events.push(NavEvent::NoPath {
                from: current.to_owned(),
                to: destination.to_owned(),
            });
            self.push_status(&mut events, event::NO_PATH_STATUS.to_owned());
            return Ok(events);
        };

        let waypoints: Vec<Waypoint> = path
            .nodes
            .iter()
            .filter_map(|&id| match graph.position(id) {
                Some(pixel) => Some(Waypoint {
                    node: id,
                    name: graph.name(id).to_owned(),
                    position: plan.to_world(pixel).with_height(self.waypoint_height),
                }),
                None => {
                    tracing::warn!(node = graph.name(id), "skipping waypoint with no position");
                    None
                }
            })
            .collect();

        tracing::info!(
            from = current,
            to = destination,
            waypoints = waypoints.len(),
            cost = path.total_cost,
            "navigation started"
        );
        self.session = Some(NavSession {
            path: path.nodes,
            total_cost: path.total_cost,
            waypoints,
            cursor: 0,
        });
        self.state = NavState::Navigating;
        self.emit_current(&mut events);
        Ok(events)
    }

    /// Feed one position sample. Advances at most one waypoint per call.
    ///
    /// Does nothing unless `Navigating`. The comparison is strict: a walker
    /// exactly `proximity_threshold` away has not reached the waypoint, and
    /// neither has a NaN sample (tracking lost).
    pub fn on_position_update(&mut self, position: WorldPos, proximity_threshold: f64) -> Vec<NavEvent> {
        let mut events = Vec::new();
        if self.state != NavState::Navigating {
            return events;
        }
        let Some(session) = self.session.as_mut() else {
            return events;
        };
        let Some(waypoint) = session.current() else {
            return events;
        };
        let distance = position.planar_distance(waypoint.position);
        // Positive `<`: a NaN distance or threshold is never in range.
        let in_range = distance < proximity_threshold;
        if !in_range {
            return events;
        }

        let reached = waypoint.node;
        tracing::debug!(node = %waypoint.name, distance, "waypoint reached");
        session.cursor += 1;
        self.last_reached = Some(reached);

        if session.is_active() {
            self.emit_current(&mut events);
        } else {
            let node = session
                .waypoints
                .last()
                .map(|w| w.name.clone())
                .unwrap_or_default();
            tracing::info!(node = %node, "navigation finished");
            self.state = NavState::Finished;
            events.push(NavEvent::WaypointCleared);
            events.push(NavEvent::Arrived { node });
            self.push_status(&mut events, event::FINISHED_STATUS.to_owned());
        }
        events
    }

    /// Drop any session and return to `Idle`. Emits `WaypointCleared` if a
    /// waypoint was showing.
    pub fn clear(&mut self) -> Vec<NavEvent> {
        let was_showing = self.state == NavState::Navigating;
        self.state = NavState::Idle;
        self.session = None;
        if was_showing {
            vec![NavEvent::WaypointCleared]
        } else {
            Vec::new()
        }
    }

    fn emit_current(&mut self, events: &mut Vec<NavEvent>) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let Some(waypoint) = session.current() else {
            return;
        };
        let total = session.waypoints.len();
        let status = event::going_to_status(&waypoint.name, session.cursor, total);
        events.push(NavEvent::Waypoint {
            node: waypoint.name.clone(),
            index: session.cursor,
            total,
            position: waypoint.position,
        });
        self.push_status(events, status);
    }

    fn push_status(&mut self, events: &mut Vec<NavEvent>, status: String) {
        self.status.clone_from(&status);
        events.push(NavEvent::Status(status));
    }
}
