// Navigation graph for one floor.
//
// The nav graph is an arena of `NavNode`s addressed by `NodeId`, a
// name -> `NodeId` lookup table, and an undirected adjacency list stored per
// node. It is built once from the authoring tool's node and edge lists by
// `NavGraph::load()` and is never mutated afterwards; a new definition means a
// new graph.
//
// Edges may name ids that have no node record. Loading tolerates this: the id
// gets an arena slot with `position: None` so its adjacency still works, and a
// warning is logged. `validate()` reports such ids for tooling that wants to
// reject the file instead. Anything that needs a position (the A* heuristic at
// an endpoint, a waypoint marker) must handle `None`.
//
// See also: `definition.rs` for the JSON records fed into `load()`,
// `pathfinding.rs` for A* search over this graph.

use crate::definition::{EdgeRecord, NodeRecord};
use crate::types::{NodeId, PixelCoord};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A node in the navigation graph: a named spot a walker can stand on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavNode {
    pub id: NodeId,
    /// The authored node id string (e.g. "N14"). Unique within a graph.
    pub name: String,
    /// Floor-plan pixel position. `None` for ids only mentioned by an edge.
    pub position: Option<PixelCoord>,
    /// Human-readable description from the authoring tool.
    pub label: String,
}

/// One direction of an undirected edge, as seen from its source node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub node: NodeId,
    pub cost: f64,
}

/// The navigation graph container.
#[derive(Clone, Debug, Default)]
pub struct NavGraph {
    nodes: Vec<NavNode>,
    by_name: FxHashMap<String, NodeId>,
    /// `adjacency[node]` lists outgoing half-edges in load order.
    adjacency: Vec<SmallVec<[Neighbor; 4]>>,
    edge_count: usize,
}

impl NavGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from scratch out of node and edge records.
    ///
    /// Each edge becomes two half-edges with the same cost. Duplicate edges
    /// are kept as duplicate adjacency entries. A node record whose id was
    /// already seen overwrites the earlier position and label. Negative costs
    /// are clamped to 0.
    pub fn load(nodes: &[NodeRecord], edges: &[EdgeRecord]) -> Self {
        let mut graph = Self::new();
        for record in nodes {
            let id = graph.intern(&record.id);
            let node = &mut graph.nodes[id.index()];
            node.position = Some(PixelCoord::new(record.x, record.y));
            node.label = record.label.clone();
        }
        for edge in edges {
            let from = graph.intern(&edge.from);
            let to = graph.intern(&edge.to);
            let cost = if edge.cost < 0.0 {
                tracing::warn!(from = %edge.from, to = %edge.to, cost = edge.cost, "negative edge cost clamped to 0");
                0.0
            } else {
                edge.cost
            };
            graph.add_edge(from, to, cost);
        }
        for node in graph.nodes.iter().filter(|n| n.position.is_none()) {
            tracing::warn!(node = %node.name, "edge references a node with no record");
        }
        tracing::debug!(
            nodes = graph.nodes.len(),
            edges = graph.edge_count,
            "nav graph loaded"
        );
        graph
    }

    /// Look up `name`, adding a position-less arena slot if it is new.
    fn intern(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NavNode {
            id,
            name: name.to_owned(),
            position: None,
            label: String::new(),
        });
        self.adjacency.push(SmallVec::new());
        self.by_name.insert(name.to_owned(), id);
        id
    }

    fn add_edge(&mut self, from: NodeId, to: NodeId, cost: f64) {
        self.adjacency[from.index()].push(Neighbor { node: to, cost });
        self.adjacency[to.index()].push(Neighbor { node: from, cost });
        self.edge_count += 1;
    }

    /// Ids referenced by edges that have no node record, in load order.
    pub fn validate(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| n.position.is_none())
            .map(|n| n.name.as_str())
            .collect()
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Get a node by id. Panics on an id from another graph.
    pub fn node(&self, id: NodeId) -> &NavNode {
        &self.nodes[id.index()]
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.index()].name
    }

    pub fn position(&self, id: NodeId) -> Option<PixelCoord> {
        self.nodes.get(id.index()).and_then(|n| n.position)
    }

    /// Pixel position of a named node. `None` both for unknown names and for
    /// ids that only appear in edges.
    pub fn position_of(&self, name: &str) -> Option<PixelCoord> {
        self.node_id(name).and_then(|id| self.position(id))
    }

    /// Outgoing half-edges of a node.
    pub fn neighbors(&self, id: NodeId) -> &[Neighbor] {
        &self.adjacency[id.index()]
    }

    /// Number of arena slots, including position-less ids.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges loaded (duplicates included).
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NavNode> {
        self.nodes.iter()
    }
}
