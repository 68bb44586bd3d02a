// pathfinder.rs - Breadth-first shortest paths over carved passages

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::{MazeError, PositionFault, Result};
use crate::grid::{Grid, Position};

/// Ordered positions from source to destination, both included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<Position>);

impl Path {
    pub fn positions(&self) -> &[Position] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Steps needed to walk the path
    pub fn move_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn first(&self) -> Option<Position> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<Position> {
        self.0.last().copied()
    }

    pub fn reversed(&self) -> Path {
        Path(self.0.iter().rev().copied().collect())
    }

    pub fn into_positions(self) -> Vec<Position> {
        self.0
    }
}

fn check_endpoint(grid: &Grid, pos: Position) -> Result<usize> {
    let index = grid.index_of(pos).ok_or(MazeError::InvalidPosition {
        position: pos,
        fault: PositionFault::OutOfBounds,
    })?;
    if !grid.is_open(pos) {
        return Err(MazeError::InvalidPosition {
            position: pos,
            fault: PositionFault::Blocked,
        });
    }
    Ok(index)
}

/// Shortest path between two open cells.
///
/// Neighbors are expanded in `Direction::ALL` order, so when several shortest
/// paths exist (only possible on a grid with loops) the same one always wins.
pub fn find_path(grid: &Grid, from: Position, to: Position) -> Result<Path> {
    let start = check_endpoint(grid, from)?;
    let target = check_endpoint(grid, to)?;

    let mut parent: Vec<Option<usize>> = vec![None; grid.cells().len()];
    let mut visited = vec![false; grid.cells().len()];
    let mut queue = VecDeque::new();

    visited[start] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == target {
            break;
        }
        for next in grid.passages(grid.position_of(current)) {
            if !grid.is_open(next) {
                continue;
            }
            let Some(idx) = grid.index_of(next) else {
                continue;
            };
            if !visited[idx] {
                visited[idx] = true;
                parent[idx] = Some(current);
                queue.push_back(idx);
            }
        }
    }

    if !visited[target] {
        log::error!("Maze is inconsistent: no path from {} to {}", from, to);
        return Err(MazeError::Unreachable { from, to });
    }

    // Walk parent pointers back to the source
    let mut positions = vec![to];
    let mut cursor = target;
    while let Some(prev) = parent[cursor] {
        positions.push(grid.position_of(prev));
        cursor = prev;
    }
    positions.reverse();

    log::trace!("Path {} -> {}: {} moves", from, to, positions.len() - 1);
    Ok(Path(positions))
}

/// BFS depth of every cell from `from`, indexed like `Grid::cells`.
/// Cells that cannot be reached are `None`.
pub fn distances(grid: &Grid, from: Position) -> Result<Vec<Option<usize>>> {
    let start = check_endpoint(grid, from)?;

    let mut depth: Vec<Option<usize>> = vec![None; grid.cells().len()];
    let mut queue = VecDeque::new();
    depth[start] = Some(0);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let d = depth[current].unwrap_or_default();
        for next in grid.passages(grid.position_of(current)) {
            if !grid.is_open(next) {
                continue;
            }
            if let Some(idx) = grid.index_of(next) {
                if depth[idx].is_none() {
                    depth[idx] = Some(d + 1);
                    queue.push_back(idx);
                }
            }
        }
    }

    Ok(depth)
}

/// True when both cells are open and joined by passages.
pub fn is_reachable(grid: &Grid, from: Position, to: Position) -> bool {
    let Some(target) = grid.index_of(to) else {
        return false;
    };
    grid.is_open(to)
        && distances(grid, from).is_ok_and(|depth| depth[target].is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fully carved 2x2 ring: two equally short routes between opposite corners
    fn ring() -> Grid {
        let mut g = Grid::new(2, 2).unwrap();
        g.carve(Position::new(0, 0), Position::new(0, 1));
        g.carve(Position::new(0, 1), Position::new(1, 1));
        g.carve(Position::new(1, 1), Position::new(1, 0));
        g.carve(Position::new(1, 0), Position::new(0, 0));
        g
    }

    /// 3x1 corridor plus a sealed-off open cell below it
    fn corridor_with_island() -> Grid {
        let mut g = Grid::new(3, 2).unwrap();
        g.carve(Position::new(0, 0), Position::new(0, 1));
        g.carve(Position::new(0, 1), Position::new(0, 2));
        g.open_cell(Position::new(1, 1));
        g
    }

    #[test]
    fn test_same_cell_is_single_position() {
        let g = ring();
        let path = find_path(&g, Position::new(1, 1), Position::new(1, 1)).unwrap();
        assert_eq!(path.positions(), &[Position::new(1, 1)]);
        assert_eq!(path.move_count(), 0);
    }

    #[test]
    fn test_corridor_path() {
        let g = corridor_with_island();
        let path = find_path(&g, Position::new(0, 2), Position::new(0, 0)).unwrap();
        assert_eq!(
            path.positions(),
            &[Position::new(0, 2), Position::new(0, 1), Position::new(0, 0)]
        );
        assert_eq!(path.first(), Some(Position::new(0, 2)));
        assert_eq!(path.last(), Some(Position::new(0, 0)));
        assert_eq!(path.move_count(), 2);
    }

    #[test]
    fn test_ties_prefer_vertical_moves_first() {
        let g = ring();
        let path = find_path(&g, Position::new(0, 0), Position::new(1, 1)).unwrap();
        assert_eq!(
            path.positions(),
            &[Position::new(0, 0), Position::new(1, 0), Position::new(1, 1)]
        );
        // Same choice every time
        assert_eq!(
            path,
            find_path(&g, Position::new(0, 0), Position::new(1, 1)).unwrap()
        );
    }

    #[test]
    fn test_unreachable_island() {
        let g = corridor_with_island();
        let err = find_path(&g, Position::new(0, 0), Position::new(1, 1)).unwrap_err();
        assert_eq!(
            err,
            MazeError::Unreachable {
                from: Position::new(0, 0),
                to: Position::new(1, 1)
            }
        );
        assert!(!is_reachable(&g, Position::new(0, 0), Position::new(1, 1)));
    }

    #[test]
    fn test_invalid_endpoints() {
        let g = corridor_with_island();
        assert_eq!(
            find_path(&g, Position::new(1, 0), Position::new(0, 0)).unwrap_err(),
            MazeError::InvalidPosition {
                position: Position::new(1, 0),
                fault: PositionFault::Blocked
            }
        );
        assert_eq!(
            find_path(&g, Position::new(0, 0), Position::new(0, 3)).unwrap_err(),
            MazeError::InvalidPosition {
                position: Position::new(0, 3),
                fault: PositionFault::OutOfBounds
            }
        );
    }

    #[test]
    fn test_distances() {
        let g = corridor_with_island();
        let depth = distances(&g, Position::new(0, 0)).unwrap();
        assert_eq!(depth, vec![Some(0), Some(1), Some(2), None, None, None]);

        let g = ring();
        let depth = distances(&g, Position::new(0, 0)).unwrap();
        assert_eq!(depth, vec![Some(0), Some(1), Some(1), Some(2)]);
    }

    #[test]
    fn test_reversed() {
        let g = corridor_with_island();
        let path = find_path(&g, Position::new(0, 0), Position::new(0, 2)).unwrap();
        assert_eq!(
            path.reversed(),
            find_path(&g, Position::new(0, 2), Position::new(0, 0)).unwrap()
        );
    }
}
