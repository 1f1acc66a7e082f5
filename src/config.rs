//! Configuration loading for MushakNav

use crate::error::{MushakError, Result};
use crate::maze::CellCoord;
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Clone, Debug, Deserialize)]
pub struct MushakConfig {
    #[serde(default)]
    pub maze: MazeConfig,
    #[serde(default)]
    pub exploration: ExplorationConfig,
}

/// Maze geometry and mission endpoints
#[derive(Clone, Debug, Deserialize)]
pub struct MazeConfig {
    /// Grid width in cells (default: 16)
    #[serde(default = "default_width")]
    pub width: usize,

    /// Grid height in cells (default: 16)
    #[serde(default = "default_height")]
    pub height: usize,

    /// Start cell as [x, y] (default: [0, 0])
    #[serde(default = "default_start")]
    pub start: [usize; 2],

    /// Goal cells as [x, y] pairs; empty means the 2x2 center block
    #[serde(default)]
    pub goal_cells: Vec<[usize; 2]>,
}

/// Exploration tuning for the return phase.
///
/// The bonus magnitudes are empirically chosen; they only need to produce a
/// "closer is better" ranking that favors unvisited and goal-proximate cells,
/// not an exact hop count.
#[derive(Clone, Debug, Deserialize)]
pub struct ExplorationConfig {
    /// Coverage ratio above which the return phase stops exploring and heads
    /// straight back to start (default: 0.75)
    #[serde(default = "default_coverage_threshold")]
    pub coverage_threshold: f32,

    /// Flood-fill bonus for relaxing into a not-yet-visited cell (default: 2)
    #[serde(default = "default_unvisited_bonus")]
    pub unvisited_bonus: i32,

    /// Divisor for the goal-proximity bonus on unvisited cells (default: 2)
    #[serde(default = "default_proximity_divisor")]
    pub proximity_divisor: i32,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            start: default_start(),
            goal_cells: Vec::new(),
        }
    }
}

impl Default for ExplorationConfig {
    fn default() -> Self {
        Self {
            coverage_threshold: default_coverage_threshold(),
            unvisited_bonus: default_unvisited_bonus(),
            proximity_divisor: default_proximity_divisor(),
        }
    }
}

impl Default for MushakConfig {
    fn default() -> Self {
        Self {
            maze: MazeConfig::default(),
            exploration: ExplorationConfig::default(),
        }
    }
}

// Default value functions
fn default_width() -> usize {
    16
}
fn default_height() -> usize {
    16
}
fn default_start() -> [usize; 2] {
    [0, 0]
}
fn default_coverage_threshold() -> f32 {
    0.75
}
fn default_unvisited_bonus() -> i32 {
    2
}
fn default_proximity_divisor() -> i32 {
    2
}

impl MazeConfig {
    /// Start cell as a coordinate.
    pub fn start_cell(&self) -> CellCoord {
        CellCoord::new(self.start[0] as i32, self.start[1] as i32)
    }

    /// Configured goal cells, or the 2x2 center block when none are given.
    pub fn goal_cells(&self) -> Vec<CellCoord> {
        if !self.goal_cells.is_empty() {
            return self
                .goal_cells
                .iter()
                .map(|c| CellCoord::new(c[0] as i32, c[1] as i32))
                .collect();
        }

        let cx = (self.width / 2) as i32;
        let cy = (self.height / 2) as i32;
        let xs = if self.width >= 2 { vec![cx - 1, cx] } else { vec![cx] };
        let ys = if self.height >= 2 { vec![cy - 1, cy] } else { vec![cy] };

        let mut cells = Vec::with_capacity(xs.len() * ys.len());
        for &x in &xs {
            for &y in &ys {
                cells.push(CellCoord::new(x, y));
            }
        }
        cells
    }
}

impl MushakConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MushakError::Config(format!("Failed to read config file: {}", e)))?;
        let config: MushakConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
