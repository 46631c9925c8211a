//! Headless Skirmish Runner
//!
//! Builds a level (random or from a scenario file), orders one unit to move
//! and plays the move out tick by tick. Prints a JSON report on stdout.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use grid_tactics::core::{EntityId, Result, Side, TacticsConfig, TacticsError};
use grid_tactics::tactics::{
    Action, ActionCommit, ActionMove, AnimationController, Coordinate, Grid, Highlight, Level,
    MaintenanceStatus, Scenario, Terrain, UnitAttributes, UnitType,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Headless Skirmish Runner - play out a single move order
#[derive(Parser, Debug)]
#[command(name = "skirmish_runner")]
#[command(about = "Order one unit to move across a tactical grid and report the result as JSON")]
struct Args {
    /// Scenario TOML file; the first unit listed is the one that moves
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Movement config TOML file (ignored when a scenario is given)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Map width in cells for random maps
    #[arg(long, default_value_t = 12)]
    width: u32,

    /// Map height in cells for random maps
    #[arg(long, default_value_t = 12)]
    height: u32,

    /// Fraction of cells covered with obstacles on random maps, in [0, 1]
    #[arg(long, value_parser = parse_fraction, default_value_t = 0.2)]
    obstacles: f64,

    /// Action points of the moving unit on random maps
    #[arg(long, default_value_t = 8)]
    ap: i32,

    /// Walking speed in cells per second on random maps
    #[arg(long, default_value_t = 2.0)]
    speed: f32,

    /// Start cell as "x,y" (random maps only)
    #[arg(long, value_parser = parse_coordinate, default_value = "0,0")]
    from: Coordinate,

    /// Destination cell as "x,y"
    #[arg(long, value_parser = parse_coordinate, default_value = "4,4")]
    to: Coordinate,

    /// Seconds per simulation tick
    #[arg(long, default_value_t = 0.1)]
    dt: f32,

    /// Maximum ticks before giving up
    #[arg(long, default_value_t = 1000)]
    max_ticks: u32,

    /// Random seed for deterministic maps
    #[arg(long)]
    seed: Option<u64>,
}

/// JSON output structure
#[derive(Serialize)]
struct SkirmishResult {
    outcome: String,
    seed: Option<u64>,
    ticks: u32,
    reachable_cells: usize,
    path: Vec<Coordinate>,
    final_cell: Coordinate,
    final_ap: i32,
    interrupts_checked: u32,
    board: Vec<String>,
}

fn parse_coordinate(s: &str) -> std::result::Result<Coordinate, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got {:?}", s))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in {:?}: {}", s, e))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in {:?}: {}", s, e))?;
    Ok(Coordinate::new(x, y))
}

fn parse_fraction(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s.trim().parse().map_err(|e| format!("bad number {:?}: {}", s, e))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("{} is not a fraction in [0, 1]", value));
    }
    Ok(value)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("grid_tactics=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(result) => match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: failed to serialize result: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<SkirmishResult> {
    let (mut level, mover, seed) = match &args.scenario {
        Some(path) => {
            let (level, ids) = Scenario::load(path)?.build()?;
            let mover = ids
                .first()
                .copied()
                .ok_or_else(|| TacticsError::InvalidConfig("scenario has no units".into()))?;
            (level, mover, None)
        }
        None => {
            let seed = args.seed.unwrap_or_else(rand::random);
            let (level, mover) = random_level(args, seed)?;
            (level, mover, Some(seed))
        }
    };

    let mut action = ActionMove::new(mover);
    let mut result = SkirmishResult {
        outcome: "unavailable".into(),
        seed,
        ticks: 0,
        reachable_cells: 0,
        path: Vec::new(),
        final_cell: Coordinate::new(0, 0),
        final_ap: 0,
        interrupts_checked: 0,
        board: Vec::new(),
    };

    if action.prep(&mut level) {
        result.reachable_cells = action.reachable().len();
        let (bx, by) = (args.to.x as f32 + 0.5, args.to.y as f32 + 0.5);
        action.mouse_over(&mut level, bx, by);

        match action.mouse_click(&mut level, bx, by) {
            ActionCommit::NoAction => {
                result.outcome = "rejected".into();
                action.cancel(&mut level);
            }
            ActionCommit::StandardAction => {
                result.board = level.grid.render(Highlight::REACHABLE).lines().map(String::from).collect();
                if let Some(ent) = level.entity(mover) {
                    result.path = ent.path.iter().copied().collect();
                }
                let outcome = play_out(args, &mut level, &mut action, mover, &mut result);
                result.outcome = outcome.into();
            }
        }
    }

    let ent = level.entity(mover).ok_or(TacticsError::UnknownEntity(mover))?;
    result.final_cell = ent.cell();
    result.final_ap = ent.cur_ap();
    Ok(result)
}

/// Tick the committed move until it completes, is interrupted or times out
fn play_out(
    args: &Args,
    level: &mut Level,
    action: &mut ActionMove,
    mover: EntityId,
    result: &mut SkirmishResult,
) -> &'static str {
    while result.ticks < args.max_ticks {
        result.ticks += 1;
        level.think(args.dt);
        match action.maintain(level, args.dt) {
            MaintenanceStatus::InProgress => {}
            MaintenanceStatus::CheckForInterrupts => {
                result.interrupts_checked += 1;
                let enemies = level.visible_enemies(mover);
                if !enemies.is_empty() {
                    tracing::info!(?enemies, tick = result.ticks, "hostile units spotted, halting");
                    action.pause(level);
                    return "interrupted";
                }
            }
            MaintenanceStatus::Complete => return "complete",
        }
    }
    action.pause(level);
    "timeout"
}

/// Grass map with a seeded scatter of brush, forest and walls
fn random_level(args: &Args, seed: u64) -> Result<(Level, EntityId)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let config = match &args.config {
        Some(path) => TacticsConfig::load(path)?,
        None => TacticsConfig::default(),
    };

    let mut grid = Grid::new(args.width, args.height);
    let obstacles = [Terrain::Brush, Terrain::Forest, Terrain::Wall];
    for y in 0..args.height as i32 {
        for x in 0..args.width as i32 {
            let coord = Coordinate::new(x, y);
            if coord == args.from || coord == args.to {
                continue;
            }
            if rng.gen_bool(args.obstacles) {
                grid.set_terrain(coord, obstacles[rng.gen_range(0..obstacles.len())]);
            }
        }
    }

    let attrs = UnitAttributes::uniform(6, 0, 0)
        .with_move_mod(Terrain::Brush, 1)
        .with_move_mod(Terrain::Forest, 2)
        .impassable(Terrain::Wall)
        .with_concealment(Terrain::Forest, 2)
        .opaque(Terrain::Wall);
    let mut unit = UnitType::new("skirmisher", args.ap, attrs);
    unit.move_speed = args.speed;

    let mut level = Level::with_config(grid, config);
    let mover = level.spawn(
        Arc::new(unit),
        args.from,
        Side(1),
        Box::new(AnimationController::new(0.1)),
    )?;
    level.on_setup();
    Ok((level, mover))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fraction_rejects_non_finite() {
        assert_eq!(parse_fraction("0.35"), Ok(0.35));
        assert_eq!(parse_fraction("1"), Ok(1.0));
        assert!(parse_fraction("NaN").is_err());
        assert!(parse_fraction("inf").is_err());
        assert!(parse_fraction("-0.1").is_err());
        assert!(parse_fraction("1.5").is_err());
        assert!(parse_fraction("lots").is_err());
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("3, 4"), Ok(Coordinate::new(3, 4)));
        assert!(parse_coordinate("3").is_err());
    }

    #[test]
    fn test_obstacles_flag_rejects_nan() {
        assert!(Args::try_parse_from(["skirmish_runner", "--obstacles", "NaN"]).is_err());
        let args = Args::try_parse_from(["skirmish_runner", "--obstacles", "0.5"]).unwrap();
        assert_eq!(args.obstacles, 0.5);
    }
}
