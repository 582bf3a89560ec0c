// Subcommand implementations.
//
// Each command takes an already-loaded `GraphDefinition` and writes
// human-readable lines to `out`. Errors carry `anyhow` context naming the
// input that caused them; `main.rs` reports them and exits non-zero.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use wayfinder_nav::{
    GraphDefinition, Guide, GuideConfig, GuideInput, LogSpeech, NavEvent, NavState, WorldPos,
    find_path,
};

/// Print the cheapest route between two nodes.
pub fn route(def: &GraphDefinition, from: &str, to: &str, out: &mut impl Write) -> Result<()> {
    let graph = def.build_graph();
    match find_path(&graph, from, to).with_context(|| format!("routing {from} -> {to}"))? {
        Some(path) => {
            writeln!(out, "{}", path.names(&graph).join(" -> "))?;
            writeln!(out, "cost: {}", path.total_cost)?;
            writeln!(out, "hops: {}", path.len() - 1)?;
        }
        None => writeln!(out, "no path from {from} to {to}")?,
    }
    Ok(())
}

/// List the points of interest offered as destinations.
pub fn destinations(def: &GraphDefinition, out: &mut impl Write) -> Result<()> {
    for dest in def.destinations() {
        writeln!(out, "{}\t{}", dest.node, dest.label)?;
    }
    Ok(())
}

/// Report ids referenced by edges without a node record, and POIs pointing
/// at unknown nodes. Returns `true` when the definition is clean.
pub fn validate(def: &GraphDefinition, out: &mut impl Write) -> Result<bool> {
    let graph = def.build_graph();
    let mut clean = true;
    for name in graph.validate() {
        writeln!(out, "edge endpoint without node record: {name}")?;
        clean = false;
    }
    for poi in &def.pois {
        if !graph.contains(&poi.node) {
            writeln!(out, "poi '{}' points at unknown node {}", poi.id, poi.node)?;
            clean = false;
        }
    }
    writeln!(
        out,
        "{} nodes, {} edges, {} destinations: {}",
        graph.node_count(),
        graph.edge_count(),
        def.pois.len(),
        if clean { "ok" } else { "problems found" }
    )?;
    Ok(clean)
}

/// Read a recorded position stream: a JSON array of `[x, y, z]` samples.
pub fn load_positions(path: &Path) -> Result<Vec<WorldPos>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading positions from {}", path.display()))?;
    let samples: Vec<[f64; 3]> = serde_json::from_str(&text)
        .with_context(|| format!("parsing positions in {}", path.display()))?;
    Ok(samples.into_iter().map(WorldPos::from).collect())
}

/// Outcome of a replay.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplaySummary {
    pub samples_used: usize,
    pub waypoints_reached: usize,
    pub arrived: bool,
}

/// Drive a `Guide` as the device would: scan `from`, select `to`, then feed
/// every sample until arrival. Events are printed one per line.
pub fn replay(
    def: &GraphDefinition,
    config: GuideConfig,
    from: &str,
    to: &str,
    samples: &[WorldPos],
    out: &mut impl Write,
) -> Result<ReplaySummary> {
    let mut guide = Guide::new(def, config)
        .context("building guide")?
        .with_speech(Box::new(LogSpeech));

    let setup = [
        GuideInput::LocationScanned(from.to_owned()),
        GuideInput::DestinationSelected(to.to_owned()),
    ];
    for input in setup {
        let events = guide
            .handle(input)
            .with_context(|| format!("starting navigation {from} -> {to}"))?;
        for event in &events {
            print_event(event, out)?;
        }
    }

    let mut summary = ReplaySummary {
        samples_used: 0,
        waypoints_reached: 0,
        arrived: false,
    };
    for &sample in samples {
        if guide.navigator().state() != NavState::Navigating {
            break;
        }
        let events = guide.handle(GuideInput::PositionSample(sample))?;
        summary.samples_used += 1;
        if !events.is_empty() {
            summary.waypoints_reached += 1;
        }
        for event in &events {
            print_event(event, out)?;
        }
    }
    summary.arrived = guide.navigator().state() == NavState::Finished;
    Ok(summary)
}

fn print_event(event: &NavEvent, out: &mut impl Write) -> Result<()> {
    match event {
        NavEvent::Waypoint {
            node,
            index,
            total,
            position,
        } => writeln!(out, "waypoint {node} [{}/{total}] at {position}", index + 1)?,
        NavEvent::WaypointCleared => writeln!(out, "waypoint cleared")?,
        NavEvent::Arrived { node } => writeln!(out, "arrived at {node}")?,
        NavEvent::NoPath { from, to } => writeln!(out, "no path from {from} to {to}")?,
        NavEvent::Status(text) => writeln!(out, "status: {text}")?,
    }
    Ok(())
}
