// Core value types shared across the engine.
//
// Defines the arena index for graph nodes (`NodeId`) and the two coordinate
// spaces the engine works in: floor-plan pixels (`PixelCoord`, where the
// graph lives and the A* heuristic is measured) and metric world space
// (`WorldPos`, where the walker's position stream and the rendered waypoint
// marker live).
//
// See also: `transform.rs` for the mapping between the two spaces, `nav.rs`
// for the arena that `NodeId` indexes into.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a node in a loaded `NavGraph`'s arena.
///
/// Ids are assigned sequentially at load time and are only meaningful for the
/// graph that produced them. A reload invalidates every outstanding id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A position on the floor-plan image, in pixels. `y` grows downward on the
/// image, which maps to `+z` in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelCoord {
    pub x: f64,
    pub y: f64,
}

impl PixelCoord {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance in pixels.
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl fmt::Display for PixelCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A position in metric world space.
///
/// The coordinate system follows the AR host's conventions:
/// - X: along the floor plan's horizontal axis
/// - Y: up (height above the floor)
/// - Z: along the floor plan's vertical axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl WorldPos {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Distance on the ground plane, ignoring height.
    pub fn planar_distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.z - other.z)
    }

    /// Same ground-plane position at height `y`.
    pub fn with_height(self, y: f64) -> Self {
        Self { y, ..self }
    }
}

impl From<[f64; 3]> for WorldPos {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for WorldPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}
