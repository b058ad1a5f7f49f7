//! Game settings
//!
//! Tuning knobs and colors. Defaults reproduce the classic game exactly;
//! a host page may override any subset with a JSON object.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::Rules;

/// Fill colors and fonts, as CSS strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: String,
    pub player: String,
    pub obstacle: String,
    pub score: String,
    pub score_font: String,
    pub end_background: String,
    pub end_text: String,
    pub end_font: String,
    pub pause_text: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: "white".to_string(),
            player: "green".to_string(),
            obstacle: "red".to_string(),
            score: "black".to_string(),
            score_font: "30px Comic Sans MS".to_string(),
            end_background: "black".to_string(),
            end_text: "red".to_string(),
            end_font: "70px Comic Sans MS".to_string(),
            pause_text: "gray".to_string(),
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Element id of the canvas to draw on
    pub canvas_id: String,
    /// Timer rate of the play loop
    pub tick_hz: u32,
    /// A new obstacle appears whenever the frame counter is a multiple of this
    pub spawn_interval: u64,
    /// Obstacle radius is drawn uniformly from `[min_radius, max_radius)`
    pub min_radius: f64,
    pub max_radius: f64,
    /// Obstacle speed is `speed_factor / radius` pixels per tick
    pub speed_factor: f64,
    /// One key press moves the paddle by `player height / step_divisor`
    pub step_divisor: f64,
    /// Fixed RNG seed; `None` lets the host pick one
    pub seed: Option<u64>,
    pub palette: Palette,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_id: CANVAS_ID.to_string(),
            tick_hz: TICK_HZ,
            spawn_interval: SPAWN_INTERVAL_FRAMES,
            min_radius: MIN_OBSTACLE_RADIUS,
            max_radius: MAX_OBSTACLE_RADIUS,
            speed_factor: OBSTACLE_SPEED_FACTOR,
            step_divisor: PLAYER_STEP_DIVISOR,
            seed: None,
            palette: Palette::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse optional JSON, falling back to defaults on absence or bad input
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json {
            Some(json) => match Self::from_json(json) {
                Ok(settings) => {
                    log::info!("Loaded settings overrides");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings ({e}), using defaults");
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_hz == 0 || self.tick_hz > 1000 {
            return Err(ConfigError::InvalidTickRate(self.tick_hz));
        }
        if self.spawn_interval == 0 {
            return Err(ConfigError::InvalidSpawnInterval);
        }
        if !(self.min_radius > 0.0
            && self.min_radius < self.max_radius
            && self.max_radius.is_finite())
        {
            return Err(ConfigError::InvalidRadiusRange {
                min: self.min_radius,
                max: self.max_radius,
            });
        }
        if !(self.speed_factor > 0.0 && self.speed_factor.is_finite()) {
            return Err(ConfigError::InvalidSpeedFactor(self.speed_factor));
        }
        if !(self.step_divisor > 0.0 && self.step_divisor.is_finite()) {
            return Err(ConfigError::InvalidStepDivisor(self.step_divisor));
        }
        Ok(())
    }

    /// Timer period in whole milliseconds (floor, as `setInterval` takes it)
    pub fn tick_period_ms(&self) -> u32 {
        1000 / self.tick_hz.max(1)
    }

    /// Simulation parameters derived from these settings
    pub fn rules(&self) -> Rules {
        Rules {
            spawn_interval: self.spawn_interval,
            min_radius: self.min_radius,
            max_radius: self.max_radius,
            speed_factor: self.speed_factor,
            step_divisor: self.step_divisor,
        }
    }
}
