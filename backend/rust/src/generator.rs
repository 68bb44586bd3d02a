// generator.rs - Perfect-maze carving (randomized depth-first backtracker) and marker placement
//
// Carving runs on an explicit stack, so the depth of the search is bounded by
// heap memory rather than the native call stack. Every carve links an
// unvisited cell to the cell on top of the stack, which means the passages
// can never close a loop and always form a spanning tree.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{MazeError, Result};
use crate::grid::{CellRole, Grid, Position};
use crate::maze::MazeInstance;
use crate::pathfinder;

/// Cell the carve starts from; it also becomes the start marker.
pub const ORIGIN: Position = Position::new(0, 0);

/// Generate a maze from `seed`, or from a fresh random seed when none is
/// given. The seed actually used is stored on the returned maze.
pub fn generate(width: usize, height: usize, seed: Option<u64>) -> Result<MazeInstance> {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(seed);

    let mut maze = generate_with_rng(width, height, &mut rng)?;
    maze.seed = Some(seed);

    log::debug!(
        "Generated {}x{} maze from seed {}: start {}, key {}, goal {}",
        width,
        height,
        seed,
        maze.start,
        maze.key,
        maze.goal
    );
    Ok(maze)
}

/// Generate a maze drawing every random choice from `rng`.
pub fn generate_with_rng<R: Rng>(width: usize, height: usize, rng: &mut R) -> Result<MazeInstance> {
    let mut grid = Grid::new(width, height)?;
    carve_passages(&mut grid, ORIGIN, rng);

    let (start, key, goal) = place_markers(&grid, ORIGIN)?;
    grid.set_role(start, CellRole::Start);
    grid.set_role(key, CellRole::Key);
    grid.set_role(goal, CellRole::Goal);

    let maze = MazeInstance {
        grid,
        start,
        key,
        goal,
        seed: None,
    };
    debug_assert_eq!(maze.validate(), Ok(()));
    Ok(maze)
}

fn carve_passages<R: Rng>(grid: &mut Grid, origin: Position, rng: &mut R) {
    let mut visited = vec![false; grid.cells().len()];
    let mut stack = Vec::with_capacity(grid.cells().len());
    let mut candidates = Vec::with_capacity(4);

    if let Some(i) = grid.index_of(origin) {
        visited[i] = true;
        grid.open_cell(origin);
        stack.push(origin);
    }

    while let Some(&current) = stack.last() {
        candidates.clear();
        candidates.extend(
            grid.neighbors(current)
                .into_iter()
                .filter(|&n| grid.index_of(n).is_some_and(|i| !visited[i])),
        );

        if candidates.is_empty() {
            // Dead end, backtrack
            stack.pop();
            continue;
        }

        let next = candidates[rng.random_range(0..candidates.len())];
        grid.carve(current, next);
        if let Some(i) = grid.index_of(next) {
            visited[i] = true;
        }
        stack.push(next);
    }
}

/// Deepest cell by BFS depth, skipping `exclude`. Ties go to the first cell
/// in row-major order.
fn farthest(grid: &Grid, depth: &[Option<usize>], exclude: &[Position]) -> Option<Position> {
    let mut best: Option<(usize, Position)> = None;
    for (i, d) in depth.iter().enumerate() {
        let Some(d) = *d else {
            continue;
        };
        let pos = grid.position_of(i);
        if exclude.contains(&pos) {
            continue;
        }
        if best.map_or(true, |(best_depth, _)| d > best_depth) {
            best = Some((d, pos));
        }
    }
    best.map(|(_, pos)| pos)
}

/// Start on the carve origin, goal as far from it as possible, key as far
/// from the goal as possible so heading for the goal first never pays off.
fn place_markers(grid: &Grid, start: Position) -> Result<(Position, Position, Position)> {
    let from_start = pathfinder::distances(grid, start)?;
    let goal = farthest(grid, &from_start, &[start])
        .ok_or_else(|| MazeError::invalid_data("no open cell left for the goal"))?;

    let from_goal = pathfinder::distances(grid, goal)?;
    let key = farthest(grid, &from_goal, &[start, goal])
        .ok_or_else(|| MazeError::invalid_data("no open cell left for the key"))?;

    Ok((start, key, goal))
}
