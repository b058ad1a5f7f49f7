//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One tick per call, no wall-clock time
//! - Seeded RNG only
//! - Obstacles kept in spawn order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod geometry;
pub mod state;
pub mod tick;

pub use geometry::{Aabb, Body, GeometricObject, Playfield};
pub use state::{GameMode, GameState, Obstacle, Player, Rules};
pub use tick::{Move, advance_frame, apply_move, check, tick, update};
