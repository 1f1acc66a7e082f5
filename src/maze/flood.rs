//! Multi-source BFS flood fill over the maze wall graph.
//!
//! The engine recomputes the whole distance field from scratch on every call;
//! stale fields are never patched incrementally. A pluggable weighting
//! selects between plain hop counting and the exploration-biased variant used
//! while return-phase coverage is incomplete.

use std::collections::VecDeque;

use crate::config::ExplorationConfig;

use super::{CellCoord, Direction, Maze};

/// Distance weighting strategy for a flood-fill sweep.
#[derive(Clone, Debug)]
pub enum Weighting {
    /// Plain hop count: every open edge costs 1.
    Uniform,
    /// Hop count minus per-cell bonuses that reward unvisited cells and cells
    /// near the goal region. The bonuses are applied to the finished hop
    /// field, not folded into the relaxation, so attractive frontier clusters
    /// cannot form negative cycles. Effective distances may go negative; the
    /// field is shifted back to non-negative afterwards because consumers
    /// treat it as a "closer is better" ranking during this phase, not a hop
    /// count.
    ExplorationBiased {
        goal_cells: Vec<CellCoord>,
        unvisited_bonus: i32,
        proximity_divisor: i32,
    },
}

/// A flood-fill request: source cells (all seeded at distance 0) plus the
/// weighting to relax with.
#[derive(Clone, Debug)]
pub struct FloodTarget {
    pub sources: Vec<CellCoord>,
    pub weighting: Weighting,
}

impl FloodTarget {
    /// Plain hop-count flood rooted at `sources`.
    pub fn uniform(sources: Vec<CellCoord>) -> Self {
        Self {
            sources,
            weighting: Weighting::Uniform,
        }
    }

    /// Exploration-biased flood rooted at `sources`, rewarding unvisited
    /// cells and proximity to `goal_cells`.
    pub fn exploration_biased(
        sources: Vec<CellCoord>,
        goal_cells: Vec<CellCoord>,
        config: &ExplorationConfig,
    ) -> Self {
        Self {
            sources,
            weighting: Weighting::ExplorationBiased {
                goal_cells,
                unvisited_bonus: config.unvisited_bonus,
                proximity_divisor: config.proximity_divisor,
            },
        }
    }
}

/// Recompute the maze distance field from the target's source set.
///
/// All sources are seeded at distance 0 and relaxed breadth-first across open
/// edges. On return every reachable cell holds its best distance to the
/// nearest source under the chosen weighting; unreachable cells keep the
/// sentinel. With uniform weighting the result is the exact shortest
/// open-edge hop count.
pub fn compute_distances(maze: &mut Maze, target: &FloodTarget) {
    maze.reset_distances();

    let mut queue = VecDeque::with_capacity(maze.width() * maze.height());
    for &source in &target.sources {
        if maze.in_bounds(source) {
            maze.set_distance(source, 0);
            queue.push_back(source);
        }
    }

    while let Some(cell) = queue.pop_front() {
        let d = maze.distance(cell);

        for dir in Direction::ALL {
            if maze.has_wall(cell, dir) {
                continue;
            }
            let neighbor = cell.neighbor(dir);
            if !maze.in_bounds(neighbor) {
                continue;
            }

            if d + 1 < maze.distance(neighbor) {
                maze.set_distance(neighbor, d + 1);
                queue.push_back(neighbor);
            }
        }
    }

    if let Weighting::ExplorationBiased { .. } = target.weighting {
        apply_exploration_bias(maze, &target.weighting);
    }
}

/// Turn the hop field into an effective-distance ranking: subtract the
/// per-cell bonus from every reachable cell, then shift the whole field up by
/// the minimum so it stays non-negative.
fn apply_exploration_bias(maze: &mut Maze, weighting: &Weighting) {
    let sentinel = maze.unreachable();
    for y in 0..maze.height() as i32 {
        for x in 0..maze.width() as i32 {
            let cell = CellCoord::new(x, y);
            let d = maze.distance(cell);
            if d < sentinel {
                let b = bonus(maze, cell, weighting);
                maze.set_distance(cell, d - b);
            }
        }
    }

    let min = maze.min_distance();
    if min < 0 {
        maze.shift_distances(-min);
    }
}

/// Exploration bonus for `cell` under the given weighting. Visited cells get
/// nothing; unvisited cells get a flat bonus plus a goal-proximity bonus.
fn bonus(maze: &Maze, cell: CellCoord, weighting: &Weighting) -> i32 {
    match weighting {
        Weighting::Uniform => 0,
        Weighting::ExplorationBiased {
            goal_cells,
            unvisited_bonus,
            proximity_divisor,
        } => {
            if maze.is_visited(cell) {
                return 0;
            }
            let span = (maze.width() + maze.height()) as i32;
            let goal_dist = goal_cells
                .iter()
                .map(|&g| cell.manhattan_distance(g))
                .min()
                .unwrap_or(span);
            let proximity = (span - goal_dist) / (*proximity_divisor).max(1);
            unvisited_bonus + proximity
        }
    }
}
