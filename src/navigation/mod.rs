//! Navigation module: per-step decision logic and the mission state machine.
//!
//! This module provides:
//! - Direction choice, turning, and single-cell advancement
//! - The SEARCH -> RETURN -> SPEED mission state machine

pub mod controller;
mod mission;

pub use mission::Mission;
