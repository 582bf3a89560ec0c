// Tests for the CLI subcommands, run against definition files on disk.

use std::io::Write;

use wayfinder_cli::commands;
use wayfinder_nav::{GraphDefinition, GuideConfig, WorldPos};

/// Three nodes in a row, 100 px apart, at 0.1 m/px: world x = -10, 0, 10.
const HALLWAY: &str = r#"{
    "floor": "G",
    "map_image": "hallway.png",
    "scale_m_per_pixel": 0.1,
    "map_size": [400, 100],
    "nodes": [
        {"id": "A", "x": 100, "y": 50},
        {"id": "B", "x": 200, "y": 50},
        {"id": "C", "x": 300, "y": 50},
        {"id": "D", "x": 390, "y": 90}
    ],
    "edges": [
        {"from": "A", "to": "B", "cost": 100},
        {"from": "B", "to": "C", "cost": 100}
    ],
    "pois": [
        {"id": "door", "node": "C", "label": "Front door"},
        {"id": "closet", "node": "D"}
    ]
}"#;

fn write_temp(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

fn hallway() -> GraphDefinition {
    let file = write_temp(HALLWAY);
    GraphDefinition::load(file.path()).unwrap()
}

fn run<F: FnOnce(&mut Vec<u8>)>(f: F) -> String {
    let mut out = Vec::new();
    f(&mut out);
    String::from_utf8(out).unwrap()
}

#[test]
fn route_prints_path_and_cost() {
    let def = hallway();
    let text = run(|out| commands::route(&def, "A", "C", out).unwrap());
    assert_eq!(text, "A -> B -> C\ncost: 200\nhops: 2\n");
}

#[test]
fn route_reports_unreachable() {
    let def = hallway();
    let text = run(|out| commands::route(&def, "A", "D", out).unwrap());
    assert_eq!(text, "no path from A to D\n");
}

#[test]
fn route_to_unknown_node_fails() {
    let def = hallway();
    let mut out = Vec::new();
    let err = commands::route(&def, "A", "Z", &mut out).unwrap_err();
    assert!(format!("{err:#}").contains("Z"));
}

#[test]
fn destinations_fall_back_to_node_id() {
    let def = hallway();
    let text = run(|out| commands::destinations(&def, out).unwrap());
    assert_eq!(text, "C\tFront door\nD\tD\n");
}

#[test]
fn validate_clean_definition() {
    let def = hallway();
    let mut out = Vec::new();
    assert!(commands::validate(&def, &mut out).unwrap());
    let text = String::from_utf8(out).unwrap();
    assert!(text.ends_with("ok\n"), "{text}");
}

#[test]
fn validate_flags_dangling_references() {
    let mut def = hallway();
    def.edges.push(wayfinder_nav::EdgeRecord {
        from: "C".into(),
        to: "E".into(),
        cost: 10.0,
    });
    def.pois.push(wayfinder_nav::PoiRecord {
        id: "ghost".into(),
        node: "Q".into(),
        label: String::new(),
    });
    let mut out = Vec::new();
    assert!(!commands::validate(&def, &mut out).unwrap());
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("edge endpoint without node record: E"), "{text}");
    assert!(text.contains("poi 'ghost' points at unknown node Q"), "{text}");
}

#[test]
fn load_positions_reads_xyz_triples() {
    let file = write_temp("[[1.0, 1.6, -2.0], [0, 0, 0]]");
    let samples = commands::load_positions(file.path()).unwrap();
    assert_eq!(
        samples,
        vec![WorldPos::new(1.0, 1.6, -2.0), WorldPos::new(0.0, 0.0, 0.0)]
    );
}

#[test]
fn load_positions_rejects_bad_shape() {
    let file = write_temp(r#"[{"x": 1}]"#);
    assert!(commands::load_positions(file.path()).is_err());
}

#[test]
fn replay_walks_to_destination() {
    let def = hallway();
    let samples = vec![
        WorldPos::new(-10.0, 1.6, 0.0),
        WorldPos::new(0.0, 1.6, 0.3),
        WorldPos::new(9.5, 1.6, 0.0),
        WorldPos::new(9.5, 1.6, 0.0),
    ];
    let mut out = Vec::new();
    let summary =
        commands::replay(&def, GuideConfig::default(), "A", "C", &samples, &mut out).unwrap();
    assert!(summary.arrived);
    assert_eq!(summary.waypoints_reached, 3);
    // The trailing sample is never consumed.
    assert_eq!(summary.samples_used, 3);

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("waypoint A [1/3]"), "{text}");
    assert!(text.contains("waypoint C [3/3]"), "{text}");
    assert!(text.contains("arrived at C"), "{text}");
    assert!(text.contains("status: Navigation finished."), "{text}");
}

#[test]
fn replay_that_stops_short_does_not_arrive() {
    let def = hallway();
    let samples = vec![WorldPos::new(-10.0, 0.0, 0.0), WorldPos::new(-5.0, 0.0, 0.0)];
    let mut out = Vec::new();
    let summary =
        commands::replay(&def, GuideConfig::default(), "A", "C", &samples, &mut out).unwrap();
    assert!(!summary.arrived);
    assert_eq!(summary.waypoints_reached, 1);
    assert_eq!(summary.samples_used, 2);
}

#[test]
fn replay_without_path_does_not_arrive() {
    let def = hallway();
    let mut out = Vec::new();
    let summary = commands::replay(&def, GuideConfig::default(), "A", "D", &[], &mut out).unwrap();
    assert!(!summary.arrived);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("no path from A to D"), "{text}");
}
