//! Dodge Paddle - steer a paddle up and down, let the balls fly past
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, scoring, collisions)
//! - `renderer`: 2D canvas drawing of the scene and end screen
//! - `app`: Mode machine driven by timer ticks and key presses
//! - `platform`: Browser host glue (canvas, timer, keyboard)
//! - `settings`: Data-driven tuning and colors

pub mod app;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{App, Awaiting, Response, TimerCommand};
pub use error::ConfigError;
pub use settings::{Palette, Settings};

/// Game configuration constants
pub mod consts {
    /// Play loop rate; the timer period is `1000 / TICK_HZ` ms, floored
    pub const TICK_HZ: u32 = 70;
    /// A new obstacle spawns on every frame count divisible by this
    pub const SPAWN_INTERVAL_FRAMES: u64 = 50;

    /// Obstacle radius range `[MIN, MAX)`
    pub const MIN_OBSTACLE_RADIUS: f64 = 3.0;
    pub const MAX_OBSTACLE_RADIUS: f64 = 10.0;
    /// Obstacle speed is this divided by its radius (pixels per tick)
    pub const OBSTACLE_SPEED_FACTOR: f64 = 10.0;

    /// Player height is the playfield height divided by this
    pub const PLAYER_HEIGHT_DIVISOR: f64 = 5.0;
    /// Player width is the player height divided by this
    pub const PLAYER_ASPECT_DIVISOR: f64 = 5.0;
    /// One key press moves the player by its height divided by this
    pub const PLAYER_STEP_DIVISOR: f64 = 5.0;

    /// Default canvas element id
    pub const CANVAS_ID: &str = "app";
}

/// Key codes the game reacts to (`KeyboardEvent.code` values)
pub mod keys {
    pub const ARROW_UP: &str = "ArrowUp";
    pub const ARROW_DOWN: &str = "ArrowDown";
    pub const PAUSE: &str = "KeyP";
    pub const ESCAPE: &str = "Escape";
}
