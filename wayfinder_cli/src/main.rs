// CLI entry point for the wayfinder navigation engine.
//
// Loads a floor's graph definition and runs one subcommand against it.
// Log output goes to stderr (filter with RUST_LOG); command output goes to
// stdout. See `commands.rs` for what each subcommand prints.
//
// Usage:
//   wayfinder --graph <FILE> [--config <FILE>] <COMMAND>
//     route --from <ID> --to <ID>                      Cheapest route
//     destinations                                     List points of interest
//     replay --from <ID> --to <ID> --positions <FILE>  Replay a position stream
//     validate                                         Check the definition

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wayfinder_cli::commands;
use wayfinder_nav::{GraphDefinition, GuideConfig};

#[derive(Parser)]
#[command(name = "wayfinder", version, about = "Indoor waypoint navigation")]
struct Cli {
    /// Graph definition JSON for the floor.
    #[arg(long, global = true)]
    graph: Option<PathBuf>,

    /// Guide configuration JSON (defaults apply when omitted).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the cheapest route between two nodes.
    Route {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// List the destinations offered on this floor.
    Destinations,
    /// Feed a recorded stream of positions through a guide session.
    Replay {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// JSON array of [x, y, z] world positions.
        #[arg(long)]
        positions: PathBuf,
    },
    /// Check the definition for dangling references.
    Validate,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("wayfinder_nav=info,wayfinder=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(graph_path) = cli.graph else {
        bail!("--graph <FILE> is required");
    };
    let def = GraphDefinition::load(&graph_path)
        .with_context(|| format!("loading graph definition {}", graph_path.display()))?;
    let config = match &cli.config {
        Some(path) => GuideConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GuideConfig::default(),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Route { from, to } => commands::route(&def, &from, &to, &mut out)?,
        Command::Destinations => commands::destinations(&def, &mut out)?,
        Command::Replay {
            from,
            to,
            positions,
        } => {
            let samples = commands::load_positions(&positions)?;
            let summary = commands::replay(&def, config, &from, &to, &samples, &mut out)?;
            tracing::info!(
                samples = summary.samples_used,
                reached = summary.waypoints_reached,
                arrived = summary.arrived,
                "replay finished"
            );
            if !summary.arrived {
                bail!("did not arrive at {to} after {} samples", samples.len());
            }
        }
        Command::Validate => {
            if !commands::validate(&def, &mut out)? {
                bail!("{} has problems", graph_path.display());
            }
        }
    }
    Ok(())
}
