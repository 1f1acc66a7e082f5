//! Path planning module: shortest-path computation, verification, and the
//! terminal speed run.
//!
//! This module provides:
//! - Gradient-descent shortest-path tracing over a goal-rooted flood field
//! - Path verification against the wall map and the visited set
//! - Blind replay of a verified path with no replanning

mod planner;
mod speed_run;

pub use planner::{compute_shortest_path, critical_paths_explored, verify_path};
pub use speed_run::run_speed_path;
