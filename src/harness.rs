//! Simulated mouse for tests: a ground-truth maze plus a `MouseIo`
//! implementation with actuation counters.

use crate::client::MouseIo;
use crate::error::Result;
use crate::maze::{CellCoord, Direction, Maze};

/// In-memory mouse over a ground-truth maze. Sensors read the visible wall
/// set; hidden walls block movement without being sensed until a crash
/// reveals them, which models an edge the map believes open.
pub struct SimMouse {
    walls: Maze,
    hidden: Vec<(CellCoord, Direction)>,
    start: CellCoord,
    pub position: CellCoord,
    pub facing: Direction,
    pub right_turns: usize,
    pub left_turns: usize,
    pub moves: usize,
    pub failed_moves: usize,
    pub reset_pending: bool,
}

impl SimMouse {
    /// Open maze of the given size: boundary walls only.
    pub fn open(width: usize, height: usize) -> Self {
        let start = CellCoord::new(0, 0);
        Self {
            walls: Maze::new(width, height),
            hidden: Vec::new(),
            start,
            position: start,
            facing: Direction::North,
            right_turns: 0,
            left_turns: 0,
            moves: 0,
            failed_moves: 0,
            reset_pending: false,
        }
    }

    /// Add a wall the sensors can see.
    pub fn add_wall(&mut self, cell: CellCoord, dir: Direction) {
        self.walls.set_wall(cell, dir);
    }

    /// Add a wall invisible to the sensors. It blocks movement, and the first
    /// crash against it makes it visible.
    pub fn add_hidden_wall(&mut self, cell: CellCoord, dir: Direction) {
        self.hidden.push((cell, dir));
    }

    /// Simulate an external reset: the mouse is teleported back to the start
    /// cell facing North and the reset flag raises until acknowledged.
    pub fn trigger_reset(&mut self) {
        self.position = self.start;
        self.facing = Direction::North;
        self.reset_pending = true;
    }

    fn hidden_index(&self, cell: CellCoord, dir: Direction) -> Option<usize> {
        let mirror = (cell.neighbor(dir), dir.opposite());
        self.hidden
            .iter()
            .position(|&edge| edge == (cell, dir) || edge == mirror)
    }
}

impl MouseIo for SimMouse {
    fn wall_front(&mut self) -> Result<bool> {
        Ok(self.walls.has_wall(self.position, self.facing))
    }

    fn wall_right(&mut self) -> Result<bool> {
        Ok(self.walls.has_wall(self.position, self.facing.clockwise()))
    }

    fn wall_left(&mut self) -> Result<bool> {
        Ok(self.walls.has_wall(self.position, self.facing.counter_clockwise()))
    }

    fn turn_left(&mut self) -> Result<()> {
        self.facing = self.facing.counter_clockwise();
        self.left_turns += 1;
        Ok(())
    }

    fn turn_right(&mut self) -> Result<()> {
        self.facing = self.facing.clockwise();
        self.right_turns += 1;
        Ok(())
    }

    fn move_forward(&mut self) -> Result<bool> {
        if self.walls.has_wall(self.position, self.facing) {
            self.failed_moves += 1;
            return Ok(false);
        }
        if let Some(index) = self.hidden_index(self.position, self.facing) {
            self.hidden.swap_remove(index);
            self.walls.set_wall(self.position, self.facing);
            self.failed_moves += 1;
            return Ok(false);
        }

        self.position = self.position.neighbor(self.facing);
        self.moves += 1;
        Ok(true)
    }

    fn was_reset(&mut self) -> Result<bool> {
        Ok(self.reset_pending)
    }

    fn ack_reset(&mut self) -> Result<()> {
        self.reset_pending = false;
        Ok(())
    }

    fn set_text(&mut self, _cell: CellCoord, _text: &str) -> Result<()> {
        Ok(())
    }

    fn set_color(&mut self, _cell: CellCoord, _color: char) -> Result<()> {
        Ok(())
    }

    fn clear_all_color(&mut self) -> Result<()> {
        Ok(())
    }

    fn set_wall(&mut self, _cell: CellCoord, _dir: Direction) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensing_is_relative_to_facing() {
        let mut mouse = SimMouse::open(4, 4);
        mouse.add_wall(CellCoord::new(1, 1), Direction::East);
        mouse.position = CellCoord::new(1, 1);

        mouse.facing = Direction::North;
        assert!(!mouse.wall_front().unwrap());
        assert!(mouse.wall_right().unwrap());

        mouse.facing = Direction::South;
        assert!(mouse.wall_left().unwrap());
        assert!(!mouse.wall_front().unwrap());
    }

    #[test]
    fn test_hidden_wall_blocks_then_becomes_visible() {
        let mut mouse = SimMouse::open(4, 4);
        mouse.add_hidden_wall(CellCoord::new(0, 0), Direction::North);

        assert!(!mouse.wall_front().unwrap());
        assert!(!mouse.move_forward().unwrap());
        assert_eq!(mouse.position, CellCoord::new(0, 0));
        assert_eq!(mouse.failed_moves, 1);

        // The crash reveals the wall to subsequent sensing
        assert!(mouse.wall_front().unwrap());
    }

    #[test]
    fn test_hidden_wall_blocks_from_mirror_side() {
        let mut mouse = SimMouse::open(4, 4);
        mouse.add_hidden_wall(CellCoord::new(0, 1), Direction::South);

        mouse.facing = Direction::North;
        assert!(!mouse.move_forward().unwrap());
        assert_eq!(mouse.failed_moves, 1);
    }

    #[test]
    fn test_reset_teleports_to_start() {
        let mut mouse = SimMouse::open(4, 4);
        mouse.move_forward().unwrap();
        mouse.turn_right().unwrap();

        mouse.trigger_reset();
        assert!(mouse.was_reset().unwrap());
        assert_eq!(mouse.position, CellCoord::new(0, 0));
        assert_eq!(mouse.facing, Direction::North);

        mouse.ack_reset().unwrap();
        assert!(!mouse.was_reset().unwrap());
    }
}
