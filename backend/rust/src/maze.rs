// maze.rs - A generated maze with its start, key and goal, plus the scoring baseline

use serde::{Deserialize, Serialize};

use crate::error::{MazeError, Result};
use crate::grid::{CellRole, Grid, Position};
use crate::pathfinder::{self, Path};

/// One level's maze. Immutable once built; gameplay state such as "player
/// holds the key" belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMaze")]
pub struct MazeInstance {
    pub(crate) grid: Grid,
    pub(crate) start: Position,
    pub(crate) key: Position,
    pub(crate) goal: Position,
    /// RNG seed that reproduces this maze, when it was generated here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) seed: Option<u64>,
}

#[derive(Deserialize)]
struct RawMaze {
    grid: Grid,
    start: Position,
    key: Position,
    goal: Position,
    #[serde(default)]
    seed: Option<u64>,
}

impl MazeInstance {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn key(&self) -> Position {
        self.key
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Check every structural invariant: markers distinct, open and matching
    /// the grid's cell roles, and the carved passages forming a spanning tree
    /// over the open cells.
    pub fn validate(&self) -> Result<()> {
        let markers = [
            (CellRole::Start, self.start),
            (CellRole::Key, self.key),
            (CellRole::Goal, self.goal),
        ];

        for (role, pos) in markers {
            if !self.grid.is_open(pos) {
                return Err(MazeError::invalid_data(format!(
                    "{:?} at {} is not an open cell",
                    role, pos
                )));
            }
            let tagged: Vec<Position> = self
                .grid
                .cells()
                .iter()
                .filter(|c| c.role() == role)
                .map(|c| c.position())
                .collect();
            if tagged != [pos] {
                return Err(MazeError::invalid_data(format!(
                    "{:?} expected only at {}, grid marks {:?}",
                    role, pos, tagged
                )));
            }
        }
        if self.start == self.key || self.key == self.goal || self.start == self.goal {
            return Err(MazeError::invalid_data(
                "start, key and goal must be distinct cells",
            ));
        }

        let open = self.grid.open_cell_count();
        let edges = self.grid.edge_count();
        if edges + 1 != open {
            return Err(MazeError::invalid_data(format!(
                "{} open cells joined by {} passages is not a tree",
                open, edges
            )));
        }
        let reached = pathfinder::distances(&self.grid, self.start)?
            .iter()
            .filter(|d| d.is_some())
            .count();
        if reached != open {
            return Err(MazeError::invalid_data(format!(
                "only {} of {} open cells are reachable from the start",
                reached, open
            )));
        }

        Ok(())
    }
}

impl TryFrom<RawMaze> for MazeInstance {
    type Error = MazeError;

    fn try_from(raw: RawMaze) -> Result<Self> {
        let maze = MazeInstance {
            grid: raw.grid,
            start: raw.start,
            key: raw.key,
            goal: raw.goal,
            seed: raw.seed,
        };
        maze.validate()?;
        Ok(maze)
    }
}

/// Shortest start -> key -> goal route, the zero-penalty baseline for scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimalRoute {
    pub to_key: Path,
    pub to_goal: Path,
}

impl OptimalRoute {
    pub fn optimal_moves(&self) -> usize {
        self.to_key.move_count() + self.to_goal.move_count()
    }

    /// The whole walk with the key cell listed once
    pub fn positions(&self) -> Vec<Position> {
        let mut walk = self.to_key.positions().to_vec();
        walk.extend(self.to_goal.positions().iter().skip(1));
        walk
    }
}
