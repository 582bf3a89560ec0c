// wayfinder_nav: indoor waypoint navigation engine.
//
// This crate contains everything needed to guide a walker through a floor
// plan: the graph loaded from the authoring tool's JSON, A* routing over it,
// and the state machine that turns a live position stream into "next
// waypoint" / "arrived" events. It has no camera, rendering, or speech
// dependencies; those collaborators talk to it through plain values.
//
// Module overview:
// - `types.rs`:       NodeId, PixelCoord, WorldPos.
// - `error.rs`:       NavError and the crate `Result` alias.
// - `definition.rs`:  GraphDefinition: the persisted JSON schema (nodes, edges, POIs).
// - `transform.rs`:   Floor-plan pixel -> metric ground-plane transform, FloorPlan.
// - `queue.rs`:       IndexedPriorityQueue: min-heap with decrease-key, the A* open set.
// - `nav.rs`:         NavGraph: node arena, name lookup, undirected adjacency.
// - `pathfinding.rs`: A* search with a Euclidean heuristic.
// - `event.rs`:       NavEvent: waypoint/arrival/status outputs for the host.
// - `navigator.rs`:   Navigator: Idle/Navigating/Finished waypoint state machine.
// - `config.rs`:      GuideConfig: proximity threshold, marker height, etc.
// - `guide.rs`:       Guide: the application loop that routes typed inputs
//                     (location scans, destination picks, position samples)
//                     into the navigator and forwards status to a speech sink.
//
// Everything here is synchronous and single-threaded. The host drives the
// engine by calling into it once per position sample; nothing blocks, polls,
// or spawns threads. Every mutating call takes `&mut self`; hosts that need
// cross-thread access wrap the `Guide` themselves.

pub mod config;
pub mod definition;
pub mod error;
pub mod event;
pub mod guide;
pub mod nav;
pub mod navigator;
pub mod pathfinding;
pub mod queue;
pub mod transform;
pub mod types;

#[cfg(test)]
mod test_util;

pub use config::GuideConfig;
pub use definition::{Destination, EdgeRecord, GraphDefinition, NodeRecord, PoiRecord};
pub use error::{NavError, Result};
pub use event::NavEvent;
pub use guide::{Guide, GuideInput, LogSpeech, SpeechSink};
pub use nav::NavGraph;
pub use navigator::{NavSession, NavState, Navigator};
pub use pathfinding::{PathResult, find_path};
pub use queue::IndexedPriorityQueue;
pub use transform::{FloorPlan, pixel_to_world};
pub use types::{NodeId, PixelCoord, WorldPos};
