//! Simulator display painting. Visualization only; nothing here mutates the
//! maze model or the mouse pose.

use crate::client::MouseIo;
use crate::error::Result;
use crate::maze::{CellCoord, Maze};

/// Paint the exploration view: every cell shows its current flood distance,
/// colored by role. The mouse's cell is red, goal cells green, visited cells
/// blue, unexplored cells yellow.
pub fn paint_exploration<I: MouseIo>(
    io: &mut I,
    maze: &Maze,
    position: CellCoord,
    goal_cells: &[CellCoord],
) -> Result<()> {
    for y in 0..maze.height() as i32 {
        for x in 0..maze.width() as i32 {
            let cell = CellCoord::new(x, y);
            io.set_text(cell, &maze.distance(cell).to_string())?;

            let color = if cell == position {
                'r'
            } else if goal_cells.contains(&cell) {
                'G'
            } else if maze.is_visited(cell) {
                'B'
            } else {
                'Y'
            };
            io.set_color(cell, color)?;
        }
    }
    Ok(())
}

/// Paint the committed speed-run path: clear all colors, cyan path cells,
/// red launch cell.
pub fn paint_speed_path<I: MouseIo>(
    io: &mut I,
    path: &[CellCoord],
    start: CellCoord,
) -> Result<()> {
    io.clear_all_color()?;
    for &cell in path {
        io.set_color(cell, 'C')?;
    }
    io.set_color(start, 'r')
}
