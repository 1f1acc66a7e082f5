//! Per-step navigation decisions: direction choice, turning, advancing.

use tracing::{debug, warn};

use crate::client::MouseIo;
use crate::error::{MushakError, Result};
use crate::maze::flood::{self, FloodTarget};
use crate::maze::{CellCoord, Direction, Maze};

/// Mouse pose: cell position plus facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MouseState {
    pub position: CellCoord,
    pub facing: Direction,
}

impl MouseState {
    pub fn new(position: CellCoord, facing: Direction) -> Self {
        Self { position, facing }
    }
}

/// Pick the open direction whose neighbor has the smallest distance.
///
/// Directions are scanned in the fixed priority order North, East, South,
/// West; walls and out-of-bounds neighbors are skipped, and the first minimum
/// wins. Returns `NoOpenDirection` when every side is blocked; the caller
/// treats that as "hold position, retry next tick".
pub fn choose_direction(maze: &Maze, position: CellCoord) -> Result<Direction> {
    let mut best: Option<(Direction, i32)> = None;

    for dir in Direction::ALL {
        let Some(neighbor) = maze.open_neighbor(position, dir) else {
            continue;
        };
        let d = maze.distance(neighbor);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((dir, d)),
        }
    }

    match best {
        Some((dir, _)) => Ok(dir),
        None => Err(MushakError::NoOpenDirection {
            x: position.x,
            y: position.y,
        }),
    }
}

/// Rotate the mouse to face `target`, updating the facing after every
/// actuation call. A 180° turn is always two right turns, a fixed tie-break
/// for mechanical consistency.
pub fn turn_toward<I: MouseIo>(io: &mut I, state: &mut MouseState, target: Direction) -> Result<()> {
    match state.facing.turn_steps(target) {
        0 => {}
        1 => {
            io.turn_right()?;
            state.facing = state.facing.clockwise();
        }
        3 => {
            io.turn_left()?;
            state.facing = state.facing.counter_clockwise();
        }
        _ => {
            io.turn_right()?;
            state.facing = state.facing.clockwise();
            io.turn_right()?;
            state.facing = state.facing.clockwise();
        }
    }
    Ok(())
}

/// One navigation step: choose the best direction, turn, and move.
///
/// Returns `true` if the mouse advanced one cell. A move failure means the
/// actuator hit a wall the map did not know about: the wall is recorded on
/// both endpoints, the distance field is reflooded toward the active target,
/// and the mouse holds position. A recoverable event, not a fault.
pub fn advance<I: MouseIo>(
    io: &mut I,
    maze: &mut Maze,
    state: &mut MouseState,
    target: &FloodTarget,
) -> Result<bool> {
    let dir = choose_direction(maze, state.position)?;
    debug!(
        "advancing from ({}, {}) toward {:?}",
        state.position.x, state.position.y, dir
    );

    turn_toward(io, state, dir)?;

    if io.move_forward()? {
        state.position = state.position.neighbor(dir);
        Ok(true)
    } else {
        warn!(
            "move blocked at ({}, {}) facing {:?}: recording wall and reflooding",
            state.position.x, state.position.y, dir
        );
        maze.set_wall(state.position, dir);
        flood::compute_distances(maze, target);
        Ok(false)
    }
}
