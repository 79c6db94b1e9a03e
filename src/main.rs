mod config;
mod entities;
mod game;
mod grid;
mod logging;
mod types;

use clap::Parser;
use log::{LevelFilter, debug, info, warn};

use crate::config::{SimConfig, TICK_MS};
use crate::game::{Game, TickStatus};
use crate::types::SimCommand;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Defender placements as ROW,COL (repeatable).
    #[arg(long = "plant", value_name = "ROW,COL")]
    plants: Vec<String>,

    /// Defender removals as ROW,COL, applied after placements (the shovel).
    #[arg(long = "shovel", value_name = "ROW,COL")]
    shovels: Vec<String>,

    /// Maximum number of ticks to simulate (3600 = one minute at 60 Hz).
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// RNG seed for reproducible adversary spawns (random when omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Debug filter to specify log topics (e.g., "tick,combat")
    /// Available topics: tick, spawn, combat, place
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_cell(spec: &str) -> Option<(usize, usize)> {
    let (row, col) = spec.split_once(',')?;
    Some((row.trim().parse().ok()?, col.trim().parse().ok()?))
}

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize the logger
    let log_level = match args.log_level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };

    if let Err(e) = logging::init_logger(log_level, args.debug_filter) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    info!("Initializing Lawn Siege...");

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("RNG seed: {}", seed);

    let mut game = Game::new(SimConfig::default(), seed);

    // Apply the scripted placements and removals before the first tick.
    for spec in &args.plants {
        match parse_cell(spec) {
            Some((row, col)) => game.apply_command(SimCommand::PlaceDefender { row, col }),
            None => warn!("Ignoring malformed --plant value '{}'", spec),
        }
    }
    for spec in &args.shovels {
        match parse_cell(spec) {
            Some((row, col)) => game.apply_command(SimCommand::RemoveDefender { row, col }),
            None => warn!("Ignoring malformed --shovel value '{}'", spec),
        }
    }

    info!(
        "Simulating up to {} ticks at {:.2} ms/tick with {} defender(s).",
        args.ticks,
        TICK_MS,
        game.defenders.len()
    );

    let mut snapshot = game.snapshot();
    let mut ticks_run = 0;
    while ticks_run < args.ticks && game.status() == TickStatus::Running {
        snapshot = game.tick(TICK_MS).snapshot;
        ticks_run += 1;
    }

    match game.status() {
        TickStatus::Breached => info!(
            "Defense line breached after {} ticks ({:.1} s).",
            ticks_run,
            ticks_run as f64 * TICK_MS / 1000.0
        ),
        TickStatus::Running => info!("Defense held for all {} ticks.", ticks_run),
    }
    info!(
        "Final state: {} defender(s), {} adversary(ies), {} projectile(s) live.",
        snapshot.defenders.len(),
        snapshot.adversaries.len(),
        snapshot.projectiles.len()
    );
    for view in snapshot.defenders.iter().chain(snapshot.adversaries.iter()) {
        debug!(
            "{:?} at ({:.0}, {:.0}) with {:.0}% health",
            view.kind,
            view.position.x,
            view.position.y,
            view.hp_ratio * 100.0
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("2,3"), Some((2, 3)));
        assert_eq!(parse_cell(" 4 , 0 "), Some((4, 0)));
        assert_eq!(parse_cell("4"), None);
        assert_eq!(parse_cell("a,b"), None);
        assert_eq!(parse_cell("-1,2"), None);
    }
}
