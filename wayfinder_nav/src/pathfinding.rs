// A* pathfinding over the navigation graph.
//
// Implements standard A* search with `IndexedPriorityQueue` as the open set,
// so a node's entry is lowered in place instead of pushed again. Scores and
// came-from links are `Vec`s indexed by `NodeId`.
//
// The heuristic is straight-line pixel distance to the goal. It is admissible
// only when every edge cost is at least the pixel distance it spans; the
// authoring tool writes costs that way, but nothing here enforces it, and
// cheaper-than-straight-line edges can make results suboptimal. Nodes known
// only from edges have no position and get a heuristic of 0.
//
// Ties: the open set orders by `(f_score, g_score)`, and a neighbor still in
// the open set takes the current node as predecessor on an equal-cost
// relaxation. Among equally cheap routes this prefers the one through more
// intermediate nodes, which gives the walker more waypoints.
//
// See also: `nav.rs` for the graph, `navigator.rs` which consumes the path.

use crate::error::{NavError, Result};
use crate::nav::{NavGraph, Neighbor};
use crate::queue::IndexedPriorityQueue;
use crate::types::{NodeId, PixelCoord};

/// The result of a successful A* search.
#[derive(Clone, Debug, PartialEq)]
pub struct PathResult {
    /// Sequence of node IDs from start to goal (inclusive).
    pub nodes: Vec<NodeId>,
    /// Sum of edge costs along `nodes`.
    pub total_cost: f64,
}

impl PathResult {
    /// The authored node names along the path.
    pub fn names<'g>(&self, graph: &'g NavGraph) -> Vec<&'g str> {
        self.nodes.iter().map(|&id| graph.name(id)).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Find the cheapest path between two named nodes.
///
/// Returns `Ok(None)` when the goal is unreachable. Fails with `NodeNotFound`
/// if a name is unknown, or `MissingNodePosition` if an endpoint is only known
/// from an edge (the heuristic needs its position).
pub fn find_path(graph: &NavGraph, start: &str, goal: &str) -> Result<Option<PathResult>> {
    let start = graph
        .node_id(start)
        .ok_or_else(|| NavError::NodeNotFound(start.to_owned()))?;
    let goal = graph
        .node_id(goal)
        .ok_or_else(|| NavError::NodeNotFound(goal.to_owned()))?;
    astar(graph, start, goal)
}

/// A* between two node ids of `graph`.
pub fn astar(graph: &NavGraph, start: NodeId, goal: NodeId) -> Result<Option<PathResult>> {
    let start_pos = endpoint_position(graph, start)?;
    let goal_pos = endpoint_position(graph, goal)?;

    let n = graph.node_count();
    // g_score[node] = cost of cheapest known path from start to node.
    let mut g_score = vec![f64::INFINITY; n];
    let mut came_from: Vec<Option<NodeId>> = vec![None; n];

    g_score[start.index()] = 0.0;

    let mut open: IndexedPriorityQueue<NodeId, (f64, f64)> = IndexedPriorityQueue::with_capacity(n);
    open.insert(start, (start_pos.distance(goal_pos), 0.0));

    let mut expanded = 0usize;
    while let Ok(current) = open.extract_min() {
        if current == goal {
            let path = reconstruct_path(&came_from, goal, g_score[goal.index()]);
            tracing::debug!(
                from = graph.name(start),
                to = graph.name(goal),
                hops = path.nodes.len() - 1,
                cost = path.total_cost,
                expanded,
                "path found"
            );
            return Ok(Some(path));
        }
        expanded += 1;

        let current_g = g_score[current.index()];
        for &Neighbor { node: neighbor, cost } in graph.neighbors(current) {
            let ni = neighbor.index();
            let tentative_g = current_g + cost;

            if tentative_g < g_score[ni] {
                g_score[ni] = tentative_g;
                came_from[ni] = Some(current);
                let f = tentative_g + heuristic(graph, neighbor, goal_pos);
                open.insert(neighbor, (f, tentative_g));
            } else if tentative_g == g_score[ni] && open.contains(&neighbor) {
                came_from[ni] = Some(current);
            }
        }
    }

    tracing::debug!(
        from = graph.name(start),
        to = graph.name(goal),
        expanded,
        "no path"
    );
    Ok(None)
}

fn endpoint_position(graph: &NavGraph, id: NodeId) -> Result<PixelCoord> {
    graph
        .position(id)
        .ok_or_else(|| NavError::MissingNodePosition(graph.name(id).to_owned()))
}

/// Euclidean pixel distance to the goal; 0 for position-less nodes.
fn heuristic(graph: &NavGraph, node: NodeId, goal_pos: PixelCoord) -> f64 {
    graph
        .position(node)
        .map_or(0.0, |pos| pos.distance(goal_pos))
}

/// Walk came-from links back from the goal and reverse.
fn reconstruct_path(came_from: &[Option<NodeId>], goal: NodeId, total_cost: f64) -> PathResult {
    let mut nodes = vec![goal];
    let mut current = goal;
    while let Some(prev) = came_from[current.index()] {
        nodes.push(prev);
        current = prev;
    }
    nodes.reverse();
    PathResult { nodes, total_cost }
}
