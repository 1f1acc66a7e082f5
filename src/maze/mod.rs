//! Maze state and the flood-fill distance engine.
//!
//! This module provides:
//! - Wall, visited, and distance state for a bounded grid
//! - Multi-source BFS flood fill with a pluggable distance weighting

pub mod flood;
mod grid;

pub use grid::{CellCoord, Direction, Maze};
