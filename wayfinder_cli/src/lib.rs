// wayfinder_cli: command-line driver for the navigation engine.
//
// The `wayfinder` binary stands in for the on-device host loop: it loads a
// floor's graph definition and either answers one-off questions about it
// (routes, destinations, consistency) or replays a recorded position stream
// through a `Guide` exactly as the device would feed it.
//
// Module overview:
// - `commands.rs`: one function per subcommand, writing to any `io::Write`
//                  so tests can capture output.
// - `main.rs`:     clap argument parsing, logging setup, dispatch.

pub mod commands;
