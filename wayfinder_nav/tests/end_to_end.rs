// End-to-end tests for the navigation engine.
//
// Each test starts from a graph definition file on disk (the format the
// authoring tool writes), builds a `Guide` from it, and drives it only through
// `GuideInput` values, the same path a host application takes: scan a
// location, pick a destination, stream positions until arrival.

use std::io::Write;

use wayfinder_nav::{
    GraphDefinition, Guide, GuideConfig, GuideInput, NavEvent, NavState, PixelCoord, WorldPos,
    find_path, pixel_to_world,
};

/// A small office floor: a corridor N0-N10-N14-N30 with a shortcut room N49
/// between N10 and N30, and a disconnected storage room N84.
const FLOOR1: &str = r#"{
    "floor": "1",
    "map_image": "floor1.png",
    "scale_m_per_pixel": 0.05,
    "map_size": [800, 600],
    "nodes": [
        {"id": "N0",  "x": 100, "y": 300, "label": "Entrance"},
        {"id": "N10", "x": 200, "y": 300, "label": "Corridor west"},
        {"id": "N14", "x": 300, "y": 300, "label": "Corridor mid"},
        {"id": "N30", "x": 400, "y": 300, "label": "Corridor east"},
        {"id": "N49", "x": 300, "y": 200, "label": "Meeting room"},
        {"id": "N84", "x": 700, "y": 50,  "label": "Storage"}
    ],
    "edges": [
        {"from": "N0",  "to": "N10", "cost": 100},
        {"from": "N10", "to": "N14", "cost": 100},
        {"from": "N14", "to": "N30", "cost": 100},
        {"from": "N10", "to": "N49", "cost": 150},
        {"from": "N49", "to": "N30", "cost": 150}
    ],
    "pois": [
        {"id": "exit",    "node": "N30", "label": "East exit"},
        {"id": "meeting", "node": "N49", "label": "Meeting room"},
        {"id": "storage", "node": "N84", "label": "Storage"}
    ]
}"#;

fn write_definition(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

fn load_guide() -> Guide {
    let file = write_definition(FLOOR1);
    let def = GraphDefinition::load(file.path()).unwrap();
    Guide::new(&def, GuideConfig::default()).unwrap()
}

fn waypoint(events: &[NavEvent]) -> Option<(String, WorldPos)> {
    events.iter().find_map(|e| match e {
        NavEvent::Waypoint { node, position, .. } => Some((node.clone(), *position)),
        _ => None,
    })
}

#[test]
fn loaded_positions_round_trip_exactly() {
    let file = write_definition(FLOOR1);
    let def = GraphDefinition::load(file.path()).unwrap();
    let graph = def.build_graph();
    for node in &def.nodes {
        assert_eq!(graph.position_of(&node.id), Some(PixelCoord::new(node.x, node.y)));
    }
}

#[test]
fn walk_corridor_to_exit() {
    let mut guide = load_guide();
    guide.handle(GuideInput::LocationScanned("N0".into())).unwrap();
    let events = guide
        .handle(GuideInput::DestinationSelected("N30".into()))
        .unwrap();

    let mut visited = Vec::new();
    let mut next = waypoint(&events);
    while let Some((node, position)) = next.take() {
        visited.push(node);
        // A sample 0.5 m short of the marker, at head height.
        let sample = WorldPos::new(position.x - 0.5, 1.6, position.z);
        let events = guide.handle(GuideInput::PositionSample(sample)).unwrap();
        next = waypoint(&events);
        if next.is_none() {
            assert!(events.contains(&NavEvent::Arrived { node: "N30".into() }));
        }
    }

    assert_eq!(visited, vec!["N0", "N10", "N14", "N30"]);
    assert_eq!(guide.navigator().state(), NavState::Finished);
    assert_eq!(guide.current_location(), Some("N30"));
}

#[test]
fn waypoint_positions_use_floor_plan_and_marker_height() {
    let mut guide = load_guide();
    guide.on_location_update("N0");
    let events = guide.select_destination("N10").unwrap();
    let (node, position) = waypoint(&events).unwrap();
    assert_eq!(node, "N0");
    let ground = pixel_to_world(PixelCoord::new(100.0, 300.0), (800.0, 600.0), 0.05);
    assert_eq!(position, ground.with_height(0.2));
}

#[test]
fn storage_is_unreachable() {
    let mut guide = load_guide();
    guide.on_location_update("N0");
    let events = guide.select_destination("N84").unwrap();
    assert!(events.contains(&NavEvent::NoPath {
        from: "N0".into(),
        to: "N84".into()
    }));
    assert_eq!(guide.navigator().state(), NavState::Idle);
    // Still usable afterwards.
    guide.select_destination("N49").unwrap();
    assert_eq!(guide.navigator().state(), NavState::Navigating);
}

#[test]
fn corridor_beats_meeting_room_detour() {
    let def = GraphDefinition::from_json(FLOOR1).unwrap();
    let graph = def.build_graph();
    let path = find_path(&graph, "N0", "N30").unwrap().unwrap();
    assert_eq!(path.total_cost, 300.0);
    assert_eq!(path.names(&graph), vec!["N0", "N10", "N14", "N30"]);
}

#[test]
fn equal_cost_triangle() {
    let def = GraphDefinition::from_json(
        r#"{
            "scale_m_per_pixel": 1.0,
            "nodes": [
                {"id": "A", "x": 0, "y": 0},
                {"id": "B", "x": 10, "y": 0},
                {"id": "C", "x": 10, "y": 10}
            ],
            "edges": [
                {"from": "A", "to": "B", "cost": 10},
                {"from": "B", "to": "C", "cost": 10},
                {"from": "A", "to": "C", "cost": 20}
            ]
        }"#,
    )
    .unwrap();
    let graph = def.build_graph();
    let path = find_path(&graph, "A", "C").unwrap().unwrap();
    assert_eq!(path.names(&graph), vec!["A", "B", "C"]);
    assert_eq!(path.total_cost, 20.0);
}

#[test]
fn dangling_edge_is_tolerated_until_used_as_endpoint() {
    let mut json: serde_json::Value = serde_json::from_str(FLOOR1).unwrap();
    json["edges"]
        .as_array_mut()
        .unwrap()
        .push(serde_json::json!({"from": "N30", "to": "N120", "cost": 80}));
    let def: GraphDefinition = serde_json::from_value(json).unwrap();
    let graph = def.build_graph();
    assert_eq!(graph.validate(), vec!["N120"]);
    assert!(find_path(&graph, "N0", "N30").unwrap().is_some());
    let err = find_path(&graph, "N0", "N120").unwrap_err();
    assert!(matches!(err, wayfinder_nav::NavError::MissingNodePosition(id) if id == "N120"));
}
