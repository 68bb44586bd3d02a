// grid.rs - Flat cell arena, row/column coordinates and passage queries
//
// Cells live in a single Vec indexed `row * width + col`. A passage between two
// adjacent cells exists only when it was carved; two open cells that merely
// touch are still separated by a wall.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MazeError, Result};

/// Smallest allowed width and height
pub const MIN_DIMENSION: usize = 2;

// ============================================================================
// COORDINATES
// ============================================================================

/// Row/column pair: `x` is the row, `y` the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Position one step away in `dir`, or None when that would go below zero.
    /// The result is not bounds-checked against any grid.
    pub fn step(self, dir: Direction) -> Option<Position> {
        let (x, y) = match dir {
            Direction::Up => (self.x.checked_sub(1)?, self.y),
            Direction::Down => (self.x.checked_add(1)?, self.y),
            Direction::Left => (self.x, self.y.checked_sub(1)?),
            Direction::Right => (self.x, self.y.checked_add(1)?),
        };
        Some(Position { x, y })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four moves a player can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Canonical order used for every neighbor scan
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Direction that leads from `from` to the 4-adjacent `to`
    pub fn between(from: Position, to: Position) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&dir| from.step(dir) == Some(to))
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

const ALL_PASSAGES: u8 = 0b1111;

// ============================================================================
// CELLS
// ============================================================================

/// Marker carried by a cell. One enum instead of three flags keeps the
/// markers mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellRole {
    #[default]
    Floor,
    Start,
    Key,
    Goal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    row: usize,
    col: usize,
    is_blocked: bool,
    #[serde(default)]
    role: CellRole,
    /// Bit per `Direction` with a carved passage
    #[serde(default)]
    passages: u8,
}

impl Cell {
    fn blocked(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            is_blocked: true,
            role: CellRole::Floor,
            passages: 0,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    pub fn is_blocked(&self) -> bool {
        self.is_blocked
    }

    pub fn is_open(&self) -> bool {
        !self.is_blocked
    }

    pub fn role(&self) -> CellRole {
        self.role
    }

    pub fn is_start(&self) -> bool {
        self.role == CellRole::Start
    }

    pub fn is_key(&self) -> bool {
        self.role == CellRole::Key
    }

    pub fn is_goal(&self) -> bool {
        self.role == CellRole::Goal
    }

    pub fn has_passage(&self, dir: Direction) -> bool {
        self.passages & dir.bit() != 0
    }
}

// ============================================================================
// GRID
// ============================================================================

/// Rectangular `height x width` arena of cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

/// Unchecked wire form, validated into a `Grid`
#[derive(Deserialize)]
struct RawGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

/// Number of cells in a `width x height` grid, or `InvalidDimensions`.
pub(crate) fn cell_count(width: usize, height: usize) -> Result<usize> {
    if width < MIN_DIMENSION || height < MIN_DIMENSION {
        return Err(MazeError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(MazeError::InvalidDimensions { width, height })
}

impl Grid {
    /// Grid with every cell blocked and no passages.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let count = cell_count(width, height)?;
        let cells = (0..count)
            .map(|i| Cell::blocked(i / width, i % width))
            .collect();
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.height && pos.y < self.width
    }

    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.contains(pos).then(|| pos.x * self.width + pos.y)
    }

    pub fn position_of(&self, index: usize) -> Position {
        Position::new(index / self.width, index % self.width)
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index_of(pos).map(|i| &self.cells[i])
    }

    /// In-bounds positions one step away, blocked or not, in `Direction::ALL` order.
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        if !self.contains(pos) {
            return Vec::new();
        }
        Direction::ALL
            .into_iter()
            .filter_map(|dir| pos.step(dir))
            .filter(|&n| self.contains(n))
            .collect()
    }

    pub fn is_open(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(Cell::is_open)
    }

    /// Neighbors joined to `pos` by a carved passage, in `Direction::ALL` order.
    pub fn passages(&self, pos: Position) -> Vec<Position> {
        let Some(cell) = self.cell(pos) else {
            return Vec::new();
        };
        Direction::ALL
            .into_iter()
            .filter(|&dir| cell.has_passage(dir))
            .filter_map(|dir| pos.step(dir))
            .filter(|&n| self.contains(n))
            .collect()
    }

    pub fn has_passage(&self, a: Position, b: Position) -> bool {
        match (self.cell(a), Direction::between(a, b)) {
            (Some(cell), Some(dir)) => self.contains(b) && cell.has_passage(dir),
            _ => false,
        }
    }

    /// Whether a player standing on `from` may step onto `to`.
    pub fn can_move(&self, from: Position, to: Position) -> bool {
        self.is_open(from) && self.is_open(to) && self.has_passage(from, to)
    }

    pub fn open_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_open()).count()
    }

    /// Number of carved passages. Each one is counted once, from its upper
    /// or left end.
    pub fn edge_count(&self) -> usize {
        self.cells
            .iter()
            .map(|c| {
                usize::from(c.has_passage(Direction::Down))
                    + usize::from(c.has_passage(Direction::Right))
            })
            .sum()
    }

    pub fn open_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().filter(|c| c.is_open()).map(Cell::position)
    }

    /// First cell carrying `role`, in row-major order
    pub fn find_role(&self, role: CellRole) -> Option<Position> {
        self.cells
            .iter()
            .find(|c| c.role == role)
            .map(Cell::position)
    }

    // --- mutation, used while a maze is being built ---

    pub(crate) fn open_cell(&mut self, pos: Position) {
        if let Some(i) = self.index_of(pos) {
            self.cells[i].is_blocked = false;
        }
    }

    /// Open both cells and record a passage in both directions.
    pub(crate) fn carve(&mut self, a: Position, b: Position) {
        let (Some(ia), Some(ib), Some(dir)) =
            (self.index_of(a), self.index_of(b), Direction::between(a, b))
        else {
            return;
        };
        self.cells[ia].is_blocked = false;
        self.cells[ib].is_blocked = false;
        self.cells[ia].passages |= dir.bit();
        self.cells[ib].passages |= dir.opposite().bit();
    }

    pub(crate) fn set_role(&mut self, pos: Position, role: CellRole) {
        if let Some(i) = self.index_of(pos) {
            self.cells[i].role = role;
        }
    }
}

impl TryFrom<RawGrid> for Grid {
    type Error = MazeError;

    fn try_from(raw: RawGrid) -> Result<Self> {
        let count = cell_count(raw.width, raw.height).map_err(|e| MazeError::invalid_data(e.to_string()))?;
        if raw.cells.len() != count {
            return Err(MazeError::invalid_data(format!(
                "expected {} cells for a {}x{} grid, found {}",
                count,
                raw.width,
                raw.height,
                raw.cells.len()
            )));
        }

        let grid = Grid {
            width: raw.width,
            height: raw.height,
            cells: raw.cells,
        };

        for (i, cell) in grid.cells.iter().enumerate() {
            let pos = grid.position_of(i);
            if cell.position() != pos {
                return Err(MazeError::invalid_data(format!(
                    "cell {} claims to be at {}",
                    pos,
                    cell.position()
                )));
            }
            if cell.passages & !ALL_PASSAGES != 0 {
                return Err(MazeError::invalid_data(format!(
                    "cell {} has unknown passage bits {:#06b}",
                    pos, cell.passages
                )));
            }
            if cell.is_blocked && cell.passages != 0 {
                return Err(MazeError::invalid_data(format!(
                    "blocked cell {} has passages",
                    pos
                )));
            }
            for dir in Direction::ALL.into_iter().filter(|&d| cell.has_passage(d)) {
                let neighbor = pos
                    .step(dir)
                    .and_then(|n| grid.cell(n))
                    .ok_or_else(|| {
                        MazeError::invalid_data(format!(
                            "cell {} has a passage {:?} out of the grid",
                            pos, dir
                        ))
                    })?;
                if !neighbor.has_passage(dir.opposite()) {
                    return Err(MazeError::invalid_data(format!(
                        "passage {:?} from {} is not matched by {}",
                        dir,
                        pos,
                        neighbor.position()
                    )));
                }
            }
        }

        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(width: usize, height: usize) -> Grid {
        Grid::new(width, height).unwrap()
    }

    #[test]
    fn test_new_grid_is_fully_blocked() {
        let g = grid(3, 2);
        assert_eq!(g.cells().len(), 6);
        assert_eq!(g.open_cell_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.cell(Position::new(1, 2)).unwrap().position(), Position::new(1, 2));
    }

    #[test]
    fn test_rejects_small_dimensions() {
        assert_eq!(
            Grid::new(1, 5),
            Err(MazeError::InvalidDimensions { width: 1, height: 5 })
        );
        assert!(Grid::new(5, 0).is_err());
        assert!(Grid::new(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_neighbors_respect_bounds_and_order() {
        let g = grid(3, 3);
        assert_eq!(
            g.neighbors(Position::new(0, 0)),
            vec![Position::new(1, 0), Position::new(0, 1)]
        );
        assert_eq!(
            g.neighbors(Position::new(1, 1)),
            vec![
                Position::new(0, 1),
                Position::new(2, 1),
                Position::new(1, 0),
                Position::new(1, 2),
            ]
        );
        assert_eq!(g.neighbors(Position::new(2, 2)).len(), 2);
        assert!(g.neighbors(Position::new(3, 0)).is_empty());
    }

    #[test]
    fn test_width_is_columns_and_height_is_rows() {
        let g = grid(4, 2);
        assert!(g.contains(Position::new(1, 3)));
        assert!(!g.contains(Position::new(2, 0)));
        assert!(!g.contains(Position::new(0, 4)));
        assert_eq!(g.index_of(Position::new(1, 2)), Some(6));
        assert_eq!(g.position_of(6), Position::new(1, 2));
    }

    #[test]
    fn test_carve_opens_both_ends_symmetrically() {
        let mut g = grid(2, 2);
        let a = Position::new(0, 0);
        let b = Position::new(0, 1);
        g.carve(a, b);

        assert!(g.is_open(a) && g.is_open(b));
        assert!(g.has_passage(a, b));
        assert!(g.has_passage(b, a));
        assert!(g.can_move(b, a));
        assert_eq!(g.passages(a), vec![b]);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.open_cell_count(), 2);
    }

    #[test]
    fn test_adjacent_open_cells_without_passage_are_walled() {
        let mut g = grid(2, 2);
        g.open_cell(Position::new(0, 0));
        g.open_cell(Position::new(1, 0));
        assert!(!g.can_move(Position::new(0, 0), Position::new(1, 0)));
        assert!(g.passages(Position::new(0, 0)).is_empty());
    }

    #[test]
    fn test_carve_ignores_non_adjacent_cells() {
        let mut g = grid(3, 3);
        g.carve(Position::new(0, 0), Position::new(1, 1));
        assert_eq!(g.open_cell_count(), 0);
    }

    #[test]
    fn test_is_open_out_of_bounds() {
        let mut g = grid(2, 2);
        g.open_cell(Position::new(1, 1));
        assert!(g.is_open(Position::new(1, 1)));
        assert!(!g.is_open(Position::new(2, 1)));
        assert!(!g.is_open(Position::new(0, 0)));
    }

    #[test]
    fn test_json_round_trip_keeps_passages() {
        let mut g = grid(2, 2);
        g.carve(Position::new(0, 0), Position::new(1, 0));
        g.set_role(Position::new(1, 0), CellRole::Goal);

        let json = serde_json::to_string(&g).unwrap();
        assert!(json.contains("\"isBlocked\":false"));
        assert!(json.contains("\"role\":\"goal\""));

        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
        assert_eq!(back.find_role(CellRole::Goal), Some(Position::new(1, 0)));
    }

    #[test]
    fn test_deserialize_rejects_one_sided_passage() {
        let json = r#"{
            "width": 2, "height": 2,
            "cells": [
                {"row": 0, "col": 0, "isBlocked": false, "passages": 2},
                {"row": 0, "col": 1, "isBlocked": true},
                {"row": 1, "col": 0, "isBlocked": false},
                {"row": 1, "col": 1, "isBlocked": true}
            ]
        }"#;
        let err = serde_json::from_str::<Grid>(json).unwrap_err();
        assert!(err.to_string().contains("is not matched"), "{err}");
    }

    #[test]
    fn test_deserialize_rejects_wrong_cell_count_and_coordinates() {
        let short = r#"{"width": 2, "height": 2, "cells": []}"#;
        assert!(serde_json::from_str::<Grid>(short).is_err());

        let swapped = r#"{
            "width": 2, "height": 2,
            "cells": [
                {"row": 0, "col": 1, "isBlocked": true},
                {"row": 0, "col": 0, "isBlocked": true},
                {"row": 1, "col": 0, "isBlocked": true},
                {"row": 1, "col": 1, "isBlocked": true}
            ]
        }"#;
        let err = serde_json::from_str::<Grid>(swapped).unwrap_err();
        assert!(err.to_string().contains("claims to be at"), "{err}");
    }

    #[test]
    fn test_passage_off_the_edge_is_rejected() {
        let json = r#"{
            "width": 2, "height": 2,
            "cells": [
                {"row": 0, "col": 0, "isBlocked": false, "passages": 1},
                {"row": 0, "col": 1, "isBlocked": true},
                {"row": 1, "col": 0, "isBlocked": true},
                {"row": 1, "col": 1, "isBlocked": true}
            ]
        }"#;
        let err = serde_json::from_str::<Grid>(json).unwrap_err();
        assert!(err.to_string().contains("out of the grid"), "{err}");
    }

    #[test]
    fn test_direction_between() {
        let p = Position::new(1, 1);
        assert_eq!(Direction::between(p, Position::new(0, 1)), Some(Direction::Up));
        assert_eq!(Direction::between(p, Position::new(1, 2)), Some(Direction::Right));
        assert_eq!(Direction::between(p, Position::new(2, 2)), None);
        assert_eq!(Direction::between(p, p), None);
        assert_eq!(Position::new(0, 0).step(Direction::Up), None);
    }
}
