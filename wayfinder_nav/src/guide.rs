// The guide: application loop glue around the navigator.
//
// A `Guide` owns everything one floor's navigation needs: the loaded graph,
// its floor plan, the destination list, the config, and a `Navigator`. The
// host's collaborators never call the navigator directly; they produce typed
// `GuideInput` values that the host routes into `Guide::handle()`:
//
// - the marker scanner produces `LocationScanned(payload)`, the decoded text
//   is the node id of where the user is standing, taken as authoritative;
// - the destination picker produces `DestinationSelected(node)`;
// - the pose tracker produces `PositionSample(world position)` at its cadence;
// - a cancel button produces `Clear`.
//
// Each call returns the `NavEvent`s it produced. Status events are also
// forwarded to the optional `SpeechSink` when `speak_status` is on.
//
// See also: `navigator.rs` for the state machine, `definition.rs` for the
// file a guide is built from.

use crate::config::GuideConfig;
use crate::definition::{Destination, GraphDefinition};
use crate::error::Result;
use crate::event::{self, NavEvent};
use crate::nav::NavGraph;
use crate::navigator::Navigator;
use crate::transform::FloorPlan;
use crate::types::WorldPos;

/// Sink for status text (text-to-speech on device). Stateless from the
/// engine's point of view.
pub trait SpeechSink {
    fn speak(&mut self, text: &str);
}

/// Speech sink that writes to the log, for hosts without TTS.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSpeech;

impl SpeechSink for LogSpeech {
    fn speak(&mut self, text: &str) {
        tracing::info!(target: "wayfinder_nav::speech", "{text}");
    }
}

/// Inputs from the host's collaborators.
#[derive(Clone, Debug, PartialEq)]
pub enum GuideInput {
    LocationScanned(String),
    DestinationSelected(String),
    PositionSample(WorldPos),
    Clear,
}

pub struct Guide {
    config: GuideConfig,
    floor: String,
    graph: NavGraph,
    plan: FloorPlan,
    destinations: Vec<Destination>,
    navigator: Navigator,
    current_location: Option<String>,
    speech: Option<Box<dyn SpeechSink>>,
}

impl Guide {
    /// Fails with `InvalidDefinition` if `config` does not validate or the
    /// definition has no usable floor plan.
    pub fn new(definition: &GraphDefinition, config: GuideConfig) -> Result<Self> {
        config.validate()?;
        let plan = definition.floor_plan(config.fallback_map_size)?;
        let navigator = Navigator::new(config.waypoint_height);
        Ok(Self {
            floor: definition.floor.clone(),
            graph: definition.build_graph(),
            plan,
            destinations: definition.destinations(),
            navigator,
            current_location: None,
            speech: None,
            config,
        })
    }

    pub fn with_speech(mut self, sink: Box<dyn SpeechSink>) -> Self {
        self.speech = Some(sink);
        self
    }

    pub fn graph(&self) -> &NavGraph {
        &self.graph
    }

    pub fn floor_plan(&self) -> &FloorPlan {
        &self.plan
    }

    pub fn floor(&self) -> &str {
        &self.floor
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn config(&self) -> &GuideConfig {
        &self.config
    }

    pub fn current_location(&self) -> Option<&str> {
        self.current_location.as_deref()
    }

    /// Replace the graph wholesale. Any session is dropped. The current
    /// location survives only if the new graph still has that node. On error
    /// the old graph stays in place.
    pub fn reload(&mut self, definition: &GraphDefinition) -> Result<Vec<NavEvent>> {
        let plan = definition.floor_plan(self.config.fallback_map_size)?;
        let events = self.navigator.clear();
        self.floor = definition.floor.clone();
        self.graph = definition.build_graph();
        self.plan = plan;
        self.destinations = definition.destinations();
        if let Some(location) = &self.current_location
            && !self.graph.contains(location)
        {
            tracing::warn!(node = %location, "current location not in reloaded graph");
            self.current_location = None;
        }
        tracing::info!(floor = %self.floor, nodes = self.graph.node_count(), "graph reloaded");
        Ok(events)
    }

    pub fn handle(&mut self, input: GuideInput) -> Result<Vec<NavEvent>> {
        match input {
            GuideInput::LocationScanned(payload) => Ok(self.on_location_update(&payload)),
            GuideInput::DestinationSelected(node) => self.select_destination(&node),
            GuideInput::PositionSample(position) => Ok(self.on_position_update(position)),
            GuideInput::Clear => Ok(self.clear()),
        }
    }

    /// The user's location was (re)established, e.g. by scanning a marker.
    /// The payload is trimmed and used as a node id as-is.
    pub fn on_location_update(&mut self, payload: &str) -> Vec<NavEvent> {
        let node = payload.trim();
        if node.is_empty() {
            tracing::warn!("ignoring empty location payload");
            return Vec::new();
        }
        if !self.graph.contains(node) {
            tracing::warn!(node, "scanned location is not in the graph");
        }
        self.current_location = Some(node.to_owned());
        let events = vec![NavEvent::Status(event::current_location_status(node))];
        self.speak(&events);
        events
    }

    /// Route from the current location to `destination` and start guiding.
    pub fn select_destination(&mut self, destination: &str) -> Result<Vec<NavEvent>> {
        let Some(current) = self.current_location.clone() else {
            tracing::info!(destination, "destination chosen before location is known");
            let events = vec![NavEvent::Status(event::NO_LOCATION_STATUS.to_owned())];
            self.speak(&events);
            return Ok(events);
        };
        let events = self
            .navigator
            .start_navigation(&self.graph, &self.plan, &current, destination)?;
        self.speak(&events);
        Ok(events)
    }

    /// One pose sample from the tracker.
    pub fn on_position_update(&mut self, position: WorldPos) -> Vec<NavEvent> {
        let events = self
            .navigator
            .on_position_update(position, self.config.proximity_threshold);
        if let Some(reached) = self.navigator.last_reached()
            && !events.is_empty()
        {
            self.current_location = Some(self.graph.name(reached).to_owned());
        }
        self.speak(&events);
        events
    }

    pub fn clear(&mut self) -> Vec<NavEvent> {
        self.navigator.clear()
    }

    fn speak(&mut self, events: &[NavEvent]) {
        if !self.config.speak_status {
            return;
        }
        if let Some(sink) = self.speech.as_mut() {
            for text in events.iter().filter_map(NavEvent::status_text) {
                sink.speak(text);
            }
        }
    }
}
