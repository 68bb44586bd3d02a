// ascii.rs - Text drawing of a maze for terminal inspection
//
// Every cell is two characters wide. Walls are drawn wherever two neighboring
// cells share no carved passage.

use maze_solver::{Direction, MazeInstance, Position};

fn cell_glyph(maze: &MazeInstance, pos: Position, route: &[Position]) -> &'static str {
    let Some(cell) = maze.grid().cell(pos) else {
        return "  ";
    };
    if cell.is_blocked() {
        "##"
    } else if cell.is_start() {
        "S "
    } else if cell.is_key() {
        "K "
    } else if cell.is_goal() {
        "G "
    } else if route.contains(&pos) {
        ". "
    } else {
        "  "
    }
}

/// Draw `maze`, marking cells on `route` with dots.
pub fn draw(maze: &MazeInstance, route: &[Position]) -> String {
    let grid = maze.grid();
    let mut out = String::new();

    out.push('+');
    for _ in 0..grid.width() {
        out.push_str("--+");
    }
    out.push('\n');

    for x in 0..grid.height() {
        let mut body = String::from("|");
        let mut floor = String::from("+");
        for y in 0..grid.width() {
            let pos = Position::new(x, y);
            let cell = grid.cell(pos);
            let open = |dir| cell.is_some_and(|c| c.has_passage(dir));

            body.push_str(cell_glyph(maze, pos, route));
            body.push(if open(Direction::Right) { ' ' } else { '|' });
            floor.push_str(if open(Direction::Down) { "  " } else { "--" });
            floor.push('+');
        }
        out.push_str(&body);
        out.push('\n');
        out.push_str(&floor);
        out.push('\n');
    }
    out
}
