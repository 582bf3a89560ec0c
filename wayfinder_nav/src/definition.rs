// Graph definition payload: the JSON file written by the authoring tool.
//
// One file describes one floor: the floor-plan image and its scale, the node
// and edge lists, and the points of interest offered as destinations. The
// engine only reads this format. Field names match the files already in use:
//
//   {
//     "floor": "1",
//     "map_image": "floor1.png",
//     "scale_m_per_pixel": 0.05,
//     "map_size": [1200, 800],
//     "nodes": [{"id": "N0", "x": 120, "y": 640, "label": "Entrance"}],
//     "edges": [{"from": "N0", "to": "N10", "cost": 42.0}],
//     "pois":  [{"id": "cafe", "node": "N10", "label": "Cafe"}]
//   }
//
// `map_size` is optional. The floor-plan size normally comes from the image the
// host loads; files can embed it so headless tools don't need the image.

use crate::error::{NavError, Result};
use crate::nav::NavGraph;
use crate::transform::FloorPlan;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    pub cost: f64,
}

/// A point of interest: a named destination attached to a graph node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoiRecord {
    pub id: String,
    pub node: String,
    #[serde(default)]
    pub label: String,
}

/// An entry for the destination picker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Node id to route to.
    pub node: String,
    /// Text to show. Falls back to the node id when the POI has no label.
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphDefinition {
    #[serde(default)]
    pub floor: String,
    #[serde(default)]
    pub map_image: String,
    pub scale_m_per_pixel: f64,
    /// Floor-plan image size in pixels, `[width, height]`.
    #[serde(default)]
    pub map_size: Option<[f64; 2]>,
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
    #[serde(default)]
    pub pois: Vec<PoiRecord>,
}

impl GraphDefinition {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| NavError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let definition = Self::from_json(&text)?;
        tracing::info!(
            path = %path.display(),
            floor = %definition.floor,
            nodes = definition.nodes.len(),
            edges = definition.edges.len(),
            "graph definition loaded"
        );
        Ok(definition)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn build_graph(&self) -> NavGraph {
        NavGraph::load(&self.nodes, &self.edges)
    }

    /// The pixel-to-world transform for this floor. The image size comes from
    /// `map_size` if present, else from `fallback_size`.
    pub fn floor_plan(&self, fallback_size: Option<(f64, f64)>) -> Result<FloorPlan> {
        let scale = self.scale_m_per_pixel;
        if !(scale.is_finite() && scale > 0.0) {
            return Err(NavError::InvalidDefinition(format!(
                "scale_m_per_pixel must be positive, got {scale}"
            )));
        }
        let size = self
            .map_size
            .map(|[w, h]| (w, h))
            .or(fallback_size)
            .ok_or_else(|| {
                NavError::InvalidDefinition(format!(
                    "no floor-plan size for '{}' (set map_size or a fallback)",
                    self.map_image
                ))
            })?;
        if !(size.0 > 0.0 && size.1 > 0.0) {
            return Err(NavError::InvalidDefinition(format!(
                "floor-plan size must be positive, got {}x{}",
                size.0, size.1
            )));
        }
        Ok(FloorPlan::new(size, scale))
    }

    /// Points of interest in file order, for a destination picker.
    pub fn destinations(&self) -> Vec<Destination> {
        self.pois
            .iter()
            .map(|poi| Destination {
                node: poi.node.clone(),
                label: if poi.label.is_empty() {
                    poi.node.clone()
                } else {
                    poi.label.clone()
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PixelCoord;

    const FLOOR1: &str = r#"{
        "floor": "1",
        "map_image": "floor1.png",
        "scale_m_per_pixel": 0.05,
        "nodes": [
            {"id": "N0", "x": 100, "y": 200, "label": "Entrance"},
            {"id": "N10", "x": 300.5, "y": 200}
        ],
        "edges": [{"from": "N0", "to": "N10", "cost": 200.5}],
        "pois": [
            {"id": "cafe", "node": "N10", "label": "Cafe"},
            {"id": "door", "node": "N0", "label": ""}
        ]
    }"#;

    #[test]
    fn parses_authoring_tool_format() {
        let def = GraphDefinition::from_json(FLOOR1).unwrap();
        assert_eq!(def.floor, "1");
        assert_eq!(def.nodes.len(), 2);
        assert_eq!(def.nodes[0].label, "Entrance");
        assert_eq!(def.nodes[1].label, "");
        assert_eq!(def.edges[0].cost, 200.5);
        assert_eq!(def.map_size, None);
    }

    #[test]
    fn built_graph_keeps_exact_pixels() {
        let def = GraphDefinition::from_json(FLOOR1).unwrap();
        let graph = def.build_graph();
        for record in &def.nodes {
            assert_eq!(
                graph.position_of(&record.id),
                Some(PixelCoord::new(record.x, record.y))
            );
        }
    }

    #[test]
    fn destinations_fall_back_to_node_id() {
        let def = GraphDefinition::from_json(FLOOR1).unwrap();
        let dests = def.destinations();
        assert_eq!(dests[0].label, "Cafe");
        assert_eq!(dests[0].node, "N10");
        assert_eq!(dests[1].label, "N0");
    }

    #[test]
    fn floor_plan_prefers_embedded_size() {
        let mut def = GraphDefinition::from_json(FLOOR1).unwrap();
        def.map_size = Some([1200.0, 800.0]);
        let plan = def.floor_plan(Some((10.0, 10.0))).unwrap();
        assert_eq!(plan.image_size, (1200.0, 800.0));
        assert_eq!(plan.scale_m_per_pixel, 0.05);
    }

    #[test]
    fn floor_plan_uses_fallback_or_fails() {
        let def = GraphDefinition::from_json(FLOOR1).unwrap();
        assert_eq!(def.floor_plan(Some((640.0, 480.0))).unwrap().image_size, (640.0, 480.0));
        assert!(matches!(def.floor_plan(None), Err(NavError::InvalidDefinition(_))));
    }

    #[test]
    fn floor_plan_rejects_bad_scale() {
        let mut def = GraphDefinition::from_json(FLOOR1).unwrap();
        def.scale_m_per_pixel = 0.0;
        assert!(def.floor_plan(Some((1.0, 1.0))).is_err());
        def.scale_m_per_pixel = f64::NAN;
        assert!(def.floor_plan(Some((1.0, 1.0))).is_err());
    }

    #[test]
    fn rejects_missing_required_fields() {
        let err = GraphDefinition::from_json(r#"{"nodes": []}"#).unwrap_err();
        assert!(matches!(err, NavError::Json(_)));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = GraphDefinition::load(Path::new("/nonexistent/graph_floor1.json")).unwrap_err();
        assert!(matches!(err, NavError::Io { .. }));
    }

    #[test]
    fn json_roundtrip_preserves_definition() {
        let def = GraphDefinition::from_json(FLOOR1).unwrap();
        let restored = GraphDefinition::from_json(&def.to_json().unwrap()).unwrap();
        assert_eq!(def, restored);
    }
}
