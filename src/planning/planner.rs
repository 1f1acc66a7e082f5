//! Shortest-path computation and verification.

use tracing::{debug, info};

use crate::error::{MushakError, Result};
use crate::maze::flood::{self, FloodTarget};
use crate::maze::{CellCoord, Direction, Maze};

/// Compute a concrete shortest route from `start` into the goal region.
///
/// Floods the maze from the goal cells, then greedily walks downhill from
/// `start`, at each step moving to the open neighbor with the smallest
/// distance (ties broken by the fixed North, East, South, West scan order)
/// provided it is strictly smaller than the current cell's. A step with no
/// strictly improving neighbor means the wall map is inconsistent or the
/// goal is unreachable; that is an error, never silently ignored.
pub fn compute_shortest_path(
    maze: &mut Maze,
    start: CellCoord,
    goal_cells: &[CellCoord],
) -> Result<Vec<CellCoord>> {
    flood::compute_distances(maze, &FloodTarget::uniform(goal_cells.to_vec()));

    let mut path = vec![start];
    let mut current = start;

    while !goal_cells.contains(&current) {
        let here = maze.distance(current);
        let mut best: Option<(CellCoord, i32)> = None;

        for dir in Direction::ALL {
            let Some(neighbor) = maze.open_neighbor(current, dir) else {
                continue;
            };
            let d = maze.distance(neighbor);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((neighbor, d)),
            }
        }

        match best {
            Some((next, d)) if d < here => {
                path.push(next);
                current = next;
            }
            _ => {
                return Err(MushakError::PathComputation {
                    x: current.x,
                    y: current.y,
                });
            }
        }
    }

    info!("shortest path computed: {} moves", path.len() - 1);
    Ok(path)
}

/// Verify that a computed path is safe to replay blind.
///
/// Two checks, both required: every consecutive pair must be connected by an
/// edge the map records as open (guards against a desynchronized recompute),
/// and every cell must have been visited during exploration (guards against
/// committing to an unconfirmed shortcut). Edge failures are reported before
/// visitation failures.
pub fn verify_path(maze: &Maze, path: &[CellCoord]) -> Result<()> {
    for pair in path.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let open = from
            .direction_to(to)
            .is_some_and(|dir| !maze.has_wall(from, dir));
        if !open {
            return Err(MushakError::PathBlocked { from, to });
        }
    }

    for &cell in path {
        if !maze.is_visited(cell) {
            return Err(MushakError::PathUnvisited { cell });
        }
    }

    debug!("path verified: {} cells, all open and visited", path.len());
    Ok(())
}

/// Estimate whether every cell that could lie on a shortest start-to-goal
/// route has been visited.
///
/// A cell is a candidate when its distance to the goal region is no larger
/// than the best known start-to-goal distance and it has an open neighbor
/// exactly one hop closer. Used by the return phase's coverage gate.
pub fn critical_paths_explored(
    maze: &mut Maze,
    start: CellCoord,
    goal_cells: &[CellCoord],
) -> bool {
    flood::compute_distances(maze, &FloodTarget::uniform(goal_cells.to_vec()));

    let best = maze.distance(start);
    if best >= maze.unreachable() {
        return false;
    }

    let mut unvisited_candidates = 0;
    for y in 0..maze.height() as i32 {
        for x in 0..maze.width() as i32 {
            let cell = CellCoord::new(x, y);
            let d = maze.distance(cell);
            if d > best || maze.is_visited(cell) {
                continue;
            }
            let on_gradient = Direction::ALL.into_iter().any(|dir| {
                maze.open_neighbor(cell, dir)
                    .is_some_and(|n| maze.distance(n) == d - 1)
            });
            if on_gradient {
                unvisited_candidates += 1;
            }
        }
    }

    debug!(
        "unvisited candidate shortest-path cells: {}",
        unvisited_candidates
    );
    unvisited_candidates == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center_goal() -> Vec<CellCoord> {
        vec![
            CellCoord::new(7, 7),
            CellCoord::new(7, 8),
            CellCoord::new(8, 7),
            CellCoord::new(8, 8),
        ]
    }

    fn mark_all_visited(maze: &mut Maze) {
        for y in 0..maze.height() as i32 {
            for x in 0..maze.width() as i32 {
                maze.mark_visited(CellCoord::new(x, y));
            }
        }
    }

    #[test]
    fn test_open_grid_shortest_path_is_manhattan() {
        // Scenario A: empty 16x16 grid, 4-cell center goal, start (0,0)
        let mut maze = Maze::new(16, 16);
        let path =
            compute_shortest_path(&mut maze, CellCoord::new(0, 0), &center_goal()).unwrap();

        assert_eq!(path.len() - 1, 14);
        assert_eq!(path[0], CellCoord::new(0, 0));
        assert!(center_goal().contains(path.last().unwrap()));
    }

    #[test]
    fn test_path_routes_around_wall() {
        // Scenario B: one wall on the direct route forces a detour
        let mut maze = Maze::new(16, 16);
        let start = CellCoord::new(0, 0);

        let direct = compute_shortest_path(&mut maze, start, &center_goal()).unwrap();
        let blocked_from = direct[3];
        let blocked_to = direct[4];
        let dir = blocked_from.direction_to(blocked_to).unwrap();
        maze.set_wall(blocked_from, dir);

        let detour = compute_shortest_path(&mut maze, start, &center_goal()).unwrap();
        verify_edges_open(&maze, &detour);
        assert!(!detour
            .windows(2)
            .any(|p| p[0] == blocked_from && p[1] == blocked_to));
        // Still a shortest path in the open grid: plenty of equal-length
        // alternatives exist around a single wall
        assert_eq!(detour.len() - 1, 14);
    }

    fn verify_edges_open(maze: &Maze, path: &[CellCoord]) {
        for pair in path.windows(2) {
            let dir = pair[0].direction_to(pair[1]).unwrap();
            assert!(!maze.has_wall(pair[0], dir));
        }
    }

    #[test]
    fn test_trace_fails_from_sealed_start() {
        let mut maze = Maze::new(8, 8);
        let start = CellCoord::new(0, 0);
        for dir in Direction::ALL {
            maze.set_wall(start, dir);
        }

        let result = compute_shortest_path(&mut maze, start, &[CellCoord::new(7, 7)]);
        assert!(matches!(
            result,
            Err(MushakError::PathComputation { x: 0, y: 0 })
        ));
    }

    #[test]
    fn test_verify_rejects_blocked_edge() {
        let mut maze = Maze::new(8, 8);
        mark_all_visited(&mut maze);
        let path = vec![CellCoord::new(0, 0), CellCoord::new(0, 1)];

        assert!(verify_path(&maze, &path).is_ok());

        maze.set_wall(CellCoord::new(0, 0), Direction::North);
        assert!(matches!(
            verify_path(&maze, &path),
            Err(MushakError::PathBlocked { .. })
        ));
    }

    #[test]
    fn test_verify_rejects_non_adjacent_pair() {
        let mut maze = Maze::new(8, 8);
        mark_all_visited(&mut maze);
        let path = vec![CellCoord::new(0, 0), CellCoord::new(2, 0)];
        assert!(matches!(
            verify_path(&maze, &path),
            Err(MushakError::PathBlocked { .. })
        ));
    }

    #[test]
    fn test_verify_reports_first_unvisited_cell() {
        let mut maze = Maze::new(8, 8);
        let path = vec![
            CellCoord::new(0, 0),
            CellCoord::new(0, 1),
            CellCoord::new(0, 2),
        ];
        maze.mark_visited(CellCoord::new(0, 0));
        maze.mark_visited(CellCoord::new(0, 2));

        match verify_path(&maze, &path) {
            Err(MushakError::PathUnvisited { cell }) => {
                assert_eq!(cell, CellCoord::new(0, 1));
            }
            other => panic!("expected PathUnvisited, got {:?}", other),
        }
    }

    #[test]
    fn test_critical_paths_pass_when_candidates_visited() {
        let mut maze = Maze::new(8, 8);
        mark_all_visited(&mut maze);
        assert!(critical_paths_explored(
            &mut maze,
            CellCoord::new(0, 0),
            &[CellCoord::new(4, 4)]
        ));
    }

    #[test]
    fn test_critical_paths_fail_with_unvisited_candidate() {
        // (2,2) sits well inside the shortest-path corridor and is the only
        // unvisited cell
        let mut maze = Maze::new(8, 8);
        for y in 0..8 {
            for x in 0..8 {
                if (x, y) != (2, 2) {
                    maze.mark_visited(CellCoord::new(x, y));
                }
            }
        }
        assert!(!critical_paths_explored(
            &mut maze,
            CellCoord::new(0, 0),
            &[CellCoord::new(4, 4)]
        ));
    }
}
