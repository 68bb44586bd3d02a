// lib.rs - Maze solver engine: perfect-maze generation, marker placement and shortest paths
//
// The game controller asks for one maze per level, then for the start -> key
// and key -> goal paths that form the scoring baseline.

use rayon::prelude::*;

pub mod error;
pub mod generator;
pub mod grid;
pub mod maze;
pub mod pathfinder;
pub mod scoring;

// Re-export commonly used types
pub use error::{MazeError, PositionFault, Result};
pub use grid::{Cell, CellRole, Direction, Grid, Position, MIN_DIMENSION};
pub use maze::{MazeInstance, OptimalRoute};
pub use pathfinder::Path;
pub use scoring::{LevelConfig, ScoreRules, LEVELS};

/// Stateless entry point tying the generator and the pathfinder together.
#[derive(Debug, Clone, Copy, Default)]
pub struct MazeSolver;

impl MazeSolver {
    pub fn new() -> Self {
        Self
    }

    /// Build a `width x height` perfect maze. The same seed always yields the
    /// same maze; without one a fresh seed is drawn and kept on the result.
    pub fn generate(&self, width: usize, height: usize, seed: Option<u64>) -> Result<MazeInstance> {
        generator::generate(width, height, seed)
    }

    /// Shortest path between two open cells of `maze`, endpoints included.
    pub fn find_path(&self, maze: &MazeInstance, from: Position, to: Position) -> Result<Path> {
        pathfinder::find_path(maze.grid(), from, to)
    }

    pub fn optimal_route(&self, maze: &MazeInstance) -> Result<OptimalRoute> {
        Ok(OptimalRoute {
            to_key: self.find_path(maze, maze.start(), maze.key())?,
            to_goal: self.find_path(maze, maze.key(), maze.goal())?,
        })
    }

    /// Generate one maze per seed in parallel. Each maze owns its grid and
    /// RNG stream, so results match sequential generation.
    pub fn generate_batch(
        &self,
        width: usize,
        height: usize,
        seeds: &[u64],
    ) -> Vec<Result<MazeInstance>> {
        seeds
            .par_iter()
            .map(|&seed| self.generate(width, height, Some(seed)))
            .collect()
    }
}
