// main.rs - Command-line front end for the maze solver
// Generates (or loads) a maze, draws it, prints the optimal start -> key -> goal
// route and optionally scores a finished run against it.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::{info, warn};
use maze_solver::{LevelConfig, MazeInstance, MazeSolver, OptimalRoute, ScoreRules};
use serde::Serialize;

mod ascii;

/// CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Maze width in cells
    #[arg(short = 'W', long, default_value = "5")]
    pub width: usize,

    /// Maze height in cells
    #[arg(short = 'H', long, default_value = "5")]
    pub height: usize,

    /// RNG seed; a random one is drawn and reported when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Use a level preset (1-3) for the size instead of --width/--height
    #[arg(short, long)]
    pub level: Option<u32>,

    /// Load a saved maze JSON file instead of generating one
    #[arg(short, long)]
    pub maze: Option<PathBuf>,

    /// Write maze and optimal route as JSON; use "-" for stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Moves a player needed to finish; prints the resulting score
    #[arg(long)]
    pub moves: Option<usize>,

    /// Seconds left on the clock for --moves scoring
    #[arg(long)]
    pub seconds_left: Option<u32>,

    /// Skip the text drawing
    #[arg(short, long)]
    pub quiet: bool,
}

/// JSON written by --output
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    maze: &'a MazeInstance,
    route: &'a OptimalRoute,
    optimal_moves: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<i64>,
}

/// Width and height to generate, with a level preset taking priority.
fn resolve_dimensions(args: &Args) -> Result<(usize, usize)> {
    match args.level {
        Some(level) => {
            let preset = LevelConfig::for_level(level)
                .ok_or_else(|| anyhow!("Unknown level {level}; expected 1 to 3"))?;
            info!(
                "Level {} \"{}\": {}x{}, {}s",
                preset.level, preset.name, preset.size, preset.size, preset.time_limit_secs
            );
            Ok((preset.size, preset.size))
        }
        None => Ok((args.width, args.height)),
    }
}

fn load_maze(path: &Path) -> Result<MazeInstance> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&s)
        .with_context(|| format!("Failed to parse maze JSON from {}", path.display()))
}

fn write_report(path: &Path, report: &Report<'_>) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    if path.as_os_str() == "-" {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{json}").context("Failed to write report to stdout")?;
    } else {
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Saved maze to {}", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    info!("Starting with {args:?}");

    let solver = MazeSolver::new();
    let maze = match &args.maze {
        Some(path) => {
            if args.seed.is_some() || args.level.is_some() {
                warn!("--seed and --level are ignored when loading {}", path.display());
            }
            load_maze(path)?
        }
        None => {
            let (width, height) = resolve_dimensions(&args)?;
            solver
                .generate(width, height, args.seed)
                .context("Maze generation failed")?
        }
    };

    if let Some(seed) = maze.seed() {
        info!("Maze {}x{} (seed {seed})", maze.width(), maze.height());
    }

    let route = solver
        .optimal_route(&maze)
        .context("Maze has no start -> key -> goal route")?;
    info!(
        "Optimal route: {} moves to the key, {} to the goal, {} total",
        route.to_key.move_count(),
        route.to_goal.move_count(),
        route.optimal_moves()
    );

    if !args.quiet {
        println!("{}", ascii::draw(&maze, &route.positions()));
    }

    let score = args.moves.map(|moves| {
        let seconds_left = args.seconds_left.unwrap_or(0);
        let rules = ScoreRules::default();
        let score = rules.level_score(seconds_left, moves, route.optimal_moves());
        info!(
            "{moves} moves with {seconds_left}s left: penalty {}, score {score}",
            rules.move_penalty(moves, route.optimal_moves())
        );
        score
    });

    if let Some(output) = &args.output {
        let report = Report {
            maze: &maze,
            route: &route,
            optimal_moves: route.optimal_moves(),
            score,
        };
        write_report(output, &report)?;
    }

    Ok(())
}
