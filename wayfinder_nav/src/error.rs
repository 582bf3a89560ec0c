// Error types for the navigation engine.
//
// Every error here is local and recoverable: a failed route request leaves
// the navigator in `Idle`, ready for another destination. "No path" is not an
// error at all; `find_path` returns `Ok(None)` for disconnected endpoints.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavError {
    /// The id is not known to the graph at all.
    #[error("node '{0}' not found in graph")]
    NodeNotFound(String),

    /// The id appears in the adjacency (an edge mentions it) but there is no
    /// node record, so it has no position for the heuristic or the waypoint.
    #[error("node '{0}' is referenced by an edge but has no position")]
    MissingNodePosition(String),

    /// `extract_min` on an empty priority queue.
    #[error("priority queue is empty")]
    EmptyQueue,

    #[error("invalid graph definition: {0}")]
    InvalidDefinition(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, NavError>;
