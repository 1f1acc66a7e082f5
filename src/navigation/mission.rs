//! Mission state machine: SEARCH -> RETURN -> SPEED.
//!
//! One `Mission` owns the maze model and the mouse pose and drives the three
//! phases to completion:
//! - SEARCH flood-fills toward the goal region and always moves downhill
//! - RETURN heads back to start with the exploration-biased flood until
//!   coverage is sufficient, then plain flooding home
//! - SPEED replays the verified shortest path blind
//!
//! Wall sensing, visitation marking, and external-reset handling happen once
//! per tick, before the phase logic runs.

use tracing::{info, warn};

use crate::client::MouseIo;
use crate::config::MushakConfig;
use crate::display;
use crate::error::{MushakError, Result};
use crate::maze::flood::{self, FloodTarget};
use crate::maze::{CellCoord, Direction, Maze};
use crate::navigation::controller::{self, MouseState};
use crate::planning;

/// Mission phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Search,
    Return,
    Speed,
}

/// What the search phase is currently flooding toward. Normally the goal
/// region; after a failed path verification, the specific unvisited cell that
/// broke the path.
#[derive(Clone, Debug)]
enum SearchTarget {
    Goal,
    Cell(CellCoord),
}

/// Final mission statistics.
#[derive(Clone, Copy, Debug)]
pub struct MissionReport {
    /// Cells moved during the search and return phases combined.
    pub search_moves: usize,
    /// Cells moved during the speed run.
    pub speed_moves: usize,
    /// Fraction of cells visited at mission end.
    pub coverage: f32,
}

pub struct Mission {
    config: MushakConfig,
    maze: Maze,
    state: MouseState,
    mode: Mode,
    search_target: SearchTarget,
    explore_phase_complete: bool,
    path: Vec<CellCoord>,
    search_moves: usize,
    start: CellCoord,
    goal_cells: Vec<CellCoord>,
}

impl Mission {
    pub fn new(config: MushakConfig) -> Self {
        let start = config.maze.start_cell();
        let goal_cells = config.maze.goal_cells();
        let mut maze = Maze::new(config.maze.width, config.maze.height);
        flood::compute_distances(&mut maze, &FloodTarget::uniform(goal_cells.clone()));

        Self {
            config,
            maze,
            state: MouseState::new(start, Direction::North),
            mode: Mode::Search,
            search_target: SearchTarget::Goal,
            explore_phase_complete: false,
            path: Vec::new(),
            search_moves: 0,
            start,
            goal_cells,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn mouse(&self) -> &MouseState {
        &self.state
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn search_moves(&self) -> usize {
        self.search_moves
    }

    /// Whether the return-phase coverage gate has latched.
    pub fn exploration_complete(&self) -> bool {
        self.explore_phase_complete
    }

    /// Drive the mission to completion.
    pub fn run<I: MouseIo>(&mut self, io: &mut I) -> Result<MissionReport> {
        loop {
            if let Some(report) = self.tick(io)? {
                return Ok(report);
            }
        }
    }

    /// One mission tick: handle external reset, sense, mark, then run the
    /// current phase. Returns the final report once the speed run finishes.
    pub fn tick<I: MouseIo>(&mut self, io: &mut I) -> Result<Option<MissionReport>> {
        if io.was_reset()? {
            io.ack_reset()?;
            warn!("external reset detected, restarting mission from scratch");
            self.reinitialize();
            return Ok(None);
        }

        self.sense_walls(io)?;
        self.maze.mark_visited(self.state.position);

        match self.mode {
            Mode::Search => {
                self.step_search(io)?;
                Ok(None)
            }
            Mode::Return => {
                self.step_return(io)?;
                Ok(None)
            }
            Mode::Speed => {
                let speed_moves =
                    planning::run_speed_path(io, &self.maze, &mut self.state, &self.path)?;
                Ok(Some(MissionReport {
                    search_moves: self.search_moves,
                    speed_moves,
                    coverage: self.maze.coverage(),
                }))
            }
        }
    }

    /// Read the three wall sensors and record the results on both edge
    /// endpoints. Open readings clear stale walls; boundary walls are
    /// permanent and survive clearing.
    fn sense_walls<I: MouseIo>(&mut self, io: &mut I) -> Result<()> {
        let pos = self.state.position;
        let facing = self.state.facing;
        let readings = [
            (io.wall_front()?, facing),
            (io.wall_right()?, facing.clockwise()),
            (io.wall_left()?, facing.counter_clockwise()),
        ];

        for (walled, dir) in readings {
            if walled {
                self.maze.set_wall(pos, dir);
                io.set_wall(pos, dir)?;
            } else {
                self.maze.clear_wall(pos, dir);
            }
        }
        Ok(())
    }

    fn step_search<I: MouseIo>(&mut self, io: &mut I) -> Result<()> {
        // A retarget is done once its cell has been visited
        if let SearchTarget::Cell(cell) = self.search_target {
            if self.maze.is_visited(cell) {
                info!("retarget cell ({}, {}) visited, resuming goal search", cell.x, cell.y);
                self.search_target = SearchTarget::Goal;
            }
        }

        if matches!(self.search_target, SearchTarget::Goal)
            && self.goal_cells.contains(&self.state.position)
        {
            info!(
                "goal reached after {} moves, returning to start",
                self.search_moves
            );
            // Entering any goal cell confirms the whole region: competition
            // goal blocks are internally open
            for &cell in &self.goal_cells {
                self.maze.mark_visited(cell);
            }
            self.mode = Mode::Return;
            return Ok(());
        }

        let sources = match &self.search_target {
            SearchTarget::Goal => self.goal_cells.clone(),
            SearchTarget::Cell(cell) => vec![*cell],
        };
        let target = FloodTarget::uniform(sources);
        flood::compute_distances(&mut self.maze, &target);
        display::paint_exploration(io, &self.maze, self.state.position, &self.goal_cells)?;

        self.advance_or_hold(io, &target)
    }

    fn step_return<I: MouseIo>(&mut self, io: &mut I) -> Result<()> {
        if self.state.position == self.start {
            return self.finish_return(io);
        }

        if !self.explore_phase_complete {
            // Either condition ends exploration: enough of the maze seen, or
            // every candidate shortest-path cell already confirmed
            let coverage = self.maze.coverage();
            if coverage >= self.config.exploration.coverage_threshold
                || planning::critical_paths_explored(&mut self.maze, self.start, &self.goal_cells)
            {
                info!(
                    "exploration complete at {:.0}% coverage, heading straight back",
                    coverage * 100.0
                );
                self.explore_phase_complete = true;
            }
        }

        let target = if self.explore_phase_complete {
            FloodTarget::uniform(vec![self.start])
        } else {
            FloodTarget::exploration_biased(
                vec![self.start],
                self.goal_cells.clone(),
                &self.config.exploration,
            )
        };
        flood::compute_distances(&mut self.maze, &target);
        display::paint_exploration(io, &self.maze, self.state.position, &self.goal_cells)?;

        self.advance_or_hold(io, &target)
    }

    /// Back at the start cell: compute and verify the shortest path, square up
    /// facing North, and commit to the speed run. Verification failures drop
    /// back to SEARCH instead of aborting the mission.
    fn finish_return<I: MouseIo>(&mut self, io: &mut I) -> Result<()> {
        match self.prepare_speed_run(io) {
            Ok(()) => {
                self.mode = Mode::Speed;
                Ok(())
            }
            Err(MushakError::PathUnvisited { cell }) => {
                warn!(
                    "path cell ({}, {}) never visited, searching it before the speed run",
                    cell.x, cell.y
                );
                self.mode = Mode::Search;
                self.search_target = SearchTarget::Cell(cell);
                Ok(())
            }
            Err(MushakError::PathBlocked { from, to }) => {
                warn!(
                    "path edge ({}, {}) -> ({}, {}) blocked, searching again",
                    from.x, from.y, to.x, to.y
                );
                self.mode = Mode::Search;
                self.search_target = SearchTarget::Goal;
                Ok(())
            }
            Err(MushakError::PathComputation { x, y }) => {
                warn!("path trace stalled at ({}, {}), searching again", x, y);
                self.mode = Mode::Search;
                self.search_target = SearchTarget::Goal;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn prepare_speed_run<I: MouseIo>(&mut self, io: &mut I) -> Result<()> {
        let mut path =
            planning::compute_shortest_path(&mut self.maze, self.start, &self.goal_cells)?;
        planning::verify_path(&self.maze, &path)?;

        // Square up to the canonical launch facing and take one fresh wall
        // reading before committing
        controller::turn_toward(io, &mut self.state, Direction::North)?;
        self.sense_walls(io)?;

        let first_edge_blocked = path.len() >= 2
            && path[0]
                .direction_to(path[1])
                .is_none_or(|dir| self.maze.has_wall(path[0], dir));
        if first_edge_blocked {
            warn!("first path edge closed by fresh sensing, recomputing");
            path = planning::compute_shortest_path(&mut self.maze, self.start, &self.goal_cells)?;
            planning::verify_path(&self.maze, &path)?;
        }

        display::paint_speed_path(io, &path, self.start)?;
        info!("committing to speed run: {} moves", path.len() - 1);
        self.path = path;
        Ok(())
    }

    /// Advance one cell toward the flood target. A fully sealed cell is held
    /// rather than treated as fatal; the next tick's sensing may clear a
    /// spurious wall.
    fn advance_or_hold<I: MouseIo>(&mut self, io: &mut I, target: &FloodTarget) -> Result<()> {
        match controller::advance(io, &mut self.maze, &mut self.state, target) {
            Ok(true) => {
                self.search_moves += 1;
                Ok(())
            }
            Ok(false) => Ok(()),
            Err(MushakError::NoOpenDirection { x, y }) => {
                warn!("no open direction at ({}, {}), holding position", x, y);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Full restart after an external reset: the physical mouse is back at the
    /// start cell facing North and everything learned is discarded.
    fn reinitialize(&mut self) {
        self.maze.reset();
        flood::compute_distances(&mut self.maze, &FloodTarget::uniform(self.goal_cells.clone()));
        self.state = MouseState::new(self.start, Direction::North);
        self.mode = Mode::Search;
        self.search_target = SearchTarget::Goal;
        self.explore_phase_complete = false;
        self.path.clear();
        self.search_moves = 0;
    }
}
