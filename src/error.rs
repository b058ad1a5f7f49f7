//! Configuration errors
//!
//! The game itself has no recoverable failures. Everything that can go wrong
//! is caught up front, before the first tick, and reported here.

use std::fmt;

/// Reasons a playfield or settings value is rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Canvas has a zero width or height
    EmptyPlayfield { width: u32, height: u32 },
    /// Canvas is too small to hold the largest obstacle or the paddle
    PlayfieldTooSmall { width: u32, height: u32, min: u32 },
    /// Tick rate must be at least 1 Hz and give a non-zero period
    InvalidTickRate(u32),
    /// Spawn interval of zero frames
    InvalidSpawnInterval,
    /// Radius range must be positive and non-empty
    InvalidRadiusRange { min: f64, max: f64 },
    /// Obstacle speed factor must be positive
    InvalidSpeedFactor(f64),
    /// Movement step divisor must be positive
    InvalidStepDivisor(f64),
    /// The host page has no usable drawing surface
    SurfaceUnavailable(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyPlayfield { width, height } => {
                write!(f, "playfield is empty ({width}x{height})")
            }
            ConfigError::PlayfieldTooSmall { width, height, min } => write!(
                f,
                "playfield {width}x{height} is too small: sides must be at least {min}px"
            ),
            ConfigError::InvalidTickRate(hz) => write!(f, "invalid tick rate: {hz} Hz"),
            ConfigError::InvalidSpawnInterval => write!(f, "spawn interval must be non-zero"),
            ConfigError::InvalidRadiusRange { min, max } => {
                write!(f, "invalid obstacle radius range [{min}, {max})")
            }
            ConfigError::InvalidSpeedFactor(v) => write!(f, "invalid obstacle speed factor: {v}"),
            ConfigError::InvalidStepDivisor(v) => write!(f, "invalid player step divisor: {v}"),
            ConfigError::SurfaceUnavailable(why) => write!(f, "drawing surface unavailable: {why}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_dimensions() {
        let err = ConfigError::PlayfieldTooSmall {
            width: 10,
            height: 500,
            min: 20,
        };
        let msg = err.to_string();
        assert!(msg.contains("10x500"));
        assert!(msg.contains("at least 20px"));
    }
}
