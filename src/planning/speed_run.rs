//! Blind replay of a verified path at speed.

use tracing::{error, info};

use crate::client::MouseIo;
use crate::error::{MushakError, Result};
use crate::maze::{CellCoord, Maze};
use crate::navigation::controller::{self, MouseState};

/// Replay a verified path with no sensing and no replanning.
///
/// The mouse turns toward each successive cell and moves; any blocked move
/// is fatal, since the path was verified against the wall map and a failure
/// here means the map and the physical maze disagree on a committed edge.
/// Returns the number of moves executed.
pub fn run_speed_path<I: MouseIo>(
    io: &mut I,
    maze: &Maze,
    state: &mut MouseState,
    path: &[CellCoord],
) -> Result<usize> {
    let mut moves = 0;

    for (step, pair) in path.windows(2).enumerate() {
        let (from, to) = (pair[0], pair[1]);
        let dir = from
            .direction_to(to)
            .ok_or(MushakError::PathBlocked { from, to })?;

        controller::turn_toward(io, state, dir)?;

        if !io.move_forward()? {
            error!(
                "speed run blocked at ({}, {}) facing {:?}, step {} of {}; \
                 map claims the edge is {}",
                state.position.x,
                state.position.y,
                dir,
                step,
                path.len() - 1,
                if maze.has_wall(from, dir) {
                    "walled"
                } else {
                    "open"
                }
            );
            return Err(MushakError::SpeedRunBlocked {
                at: state.position,
                facing: dir,
                step,
            });
        }

        state.position = to;
        moves += 1;
    }

    info!("speed run complete: {} moves", moves);
    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::SimMouse;
    use crate::maze::Direction;
    use crate::planning::compute_shortest_path;

    #[test]
    fn test_replay_executes_exactly_path_len_moves() {
        // Scenario D: replaying a verified path takes path-length moves with
        // zero failures
        let mut io = SimMouse::open(16, 16);
        let mut maze = Maze::new(16, 16);
        let goal = vec![
            CellCoord::new(7, 7),
            CellCoord::new(7, 8),
            CellCoord::new(8, 7),
            CellCoord::new(8, 8),
        ];
        let path = compute_shortest_path(&mut maze, CellCoord::new(0, 0), &goal).unwrap();

        let mut state = MouseState::new(CellCoord::new(0, 0), Direction::North);
        let moves = run_speed_path(&mut io, &maze, &mut state, &path).unwrap();

        assert_eq!(moves, path.len() - 1);
        assert_eq!(io.moves, moves);
        assert_eq!(io.failed_moves, 0);
        assert_eq!(state.position, *path.last().unwrap());
    }

    #[test]
    fn test_blocked_replay_reports_step_index() {
        let mut io = SimMouse::open(8, 8);
        // A wall the verified map never learned about
        io.add_wall(CellCoord::new(0, 2), Direction::North);

        let maze = Maze::new(8, 8);
        let path = vec![
            CellCoord::new(0, 0),
            CellCoord::new(0, 1),
            CellCoord::new(0, 2),
            CellCoord::new(0, 3),
        ];
        let mut state = MouseState::new(CellCoord::new(0, 0), Direction::North);

        match run_speed_path(&mut io, &maze, &mut state, &path) {
            Err(MushakError::SpeedRunBlocked { at, step, .. }) => {
                assert_eq!(at, CellCoord::new(0, 2));
                assert_eq!(step, 2);
            }
            other => panic!("expected SpeedRunBlocked, got {:?}", other),
        }
        assert_eq!(io.failed_moves, 1);
    }

    #[test]
    fn test_non_adjacent_path_cells_rejected() {
        let mut io = SimMouse::open(8, 8);
        let maze = Maze::new(8, 8);
        let path = vec![CellCoord::new(0, 0), CellCoord::new(3, 0)];
        let mut state = MouseState::new(CellCoord::new(0, 0), Direction::North);

        assert!(matches!(
            run_speed_path(&mut io, &maze, &mut state, &path),
            Err(MushakError::PathBlocked { .. })
        ));
    }
}
