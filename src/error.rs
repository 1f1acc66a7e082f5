//! Error types for MushakNav

use thiserror::Error;

use crate::maze::{CellCoord, Direction};

/// MushakNav error type
#[derive(Error, Debug)]
pub enum MushakError {
    #[error("Simulator I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Every neighbor of the current cell is walled off. Recoverable: the
    /// caller holds position and retries next tick.
    #[error("no open direction at ({x}, {y})")]
    NoOpenDirection { x: i32, y: i32 },

    /// The shortest-path trace found no strictly closer open neighbor,
    /// which means the wall map is inconsistent or incomplete.
    #[error("shortest-path trace stalled at ({x}, {y}): no strictly closer open neighbor")]
    PathComputation { x: i32, y: i32 },

    /// A path edge crosses a wall recorded in the map.
    #[error("path edge ({},{}) -> ({},{}) is not an open edge", from.x, from.y, to.x, to.y)]
    PathBlocked { from: CellCoord, to: CellCoord },

    /// A path cell was never visited during exploration, so a blind replay
    /// over it would be unconfirmed.
    #[error("path crosses unvisited cell ({},{})", cell.x, cell.y)]
    PathUnvisited { cell: CellCoord },

    /// A move failed during the blind replay. Fatal for the mission: the map
    /// is provably wrong and continuing to trust it is unsafe.
    #[error("speed run blocked at ({},{}) facing {facing:?}, path index {step}", at.x, at.y)]
    SpeedRunBlocked {
        at: CellCoord,
        facing: Direction,
        step: usize,
    },
}

impl From<toml::de::Error> for MushakError {
    fn from(e: toml::de::Error) -> Self {
        MushakError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MushakError>;
