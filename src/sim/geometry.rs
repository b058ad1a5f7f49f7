//! Playfield bounds, bounding boxes and the clamped position record
//!
//! Every entity owns a `GeometricObject`. Writes go through `set_x`/`set_y`,
//! which clamp the box back inside the playfield, so no entity can ever be
//! observed partly off-screen.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_OBSTACLE_RADIUS, PLAYER_ASPECT_DIVISOR, PLAYER_HEIGHT_DIVISOR};
use crate::error::ConfigError;

/// The drawing area, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPlayfield")]
pub struct Playfield {
    width: u32,
    height: u32,
}

/// Unchecked wire form of `Playfield`
#[derive(Deserialize)]
struct RawPlayfield {
    width: u32,
    height: u32,
}

impl TryFrom<RawPlayfield> for Playfield {
    type Error = ConfigError;

    fn try_from(raw: RawPlayfield) -> Result<Self, Self::Error> {
        Playfield::new(raw.width, raw.height)
    }
}

impl Playfield {
    /// Smallest side length that still fits a default-sized obstacle
    pub const MIN_EXTENT: u32 = (2.0 * MAX_OBSTACLE_RADIUS) as u32;

    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        Self::with_min_extent(width, height, Self::MIN_EXTENT)
    }

    /// Like `new`, but with a caller-chosen minimum side length
    pub fn with_min_extent(width: u32, height: u32, min: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyPlayfield { width, height });
        }
        if width < min || height < min {
            return Err(ConfigError::PlayfieldTooSmall { width, height, min });
        }
        // The paddle is height / 25 wide and must fit horizontally too
        let paddle_width = height as f64 / (PLAYER_HEIGHT_DIVISOR * PLAYER_ASPECT_DIVISOR);
        if (width as f64) < paddle_width {
            return Err(ConfigError::PlayfieldTooSmall {
                width,
                height,
                min: paddle_width.ceil() as u32,
            });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width as f64
    }

    pub fn height(&self) -> f64 {
        self.height as f64
    }
}

/// Axis-aligned bounding box (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Aabb {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Separating-axis test with inclusive edges: touching boxes overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(other.x > self.right()
            || other.right() < self.x
            || other.y > self.bottom()
            || other.bottom() < self.y)
    }
}

/// Position plus size, kept inside the playfield on every write
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometricObject {
    pos: DVec2,
    size: DVec2,
    field: Playfield,
}

impl GeometricObject {
    pub fn new(x: f64, y: f64, size: DVec2, field: Playfield) -> Self {
        let mut object = Self {
            pos: DVec2::ZERO,
            size,
            field,
        };
        object.set_x(x);
        object.set_y(y);
        object
    }

    /// Place with `x` stored as given and only `y` clamped. Used for entities
    /// entering from beyond the right edge; the next `set_x` pulls them in.
    pub fn with_unclamped_x(x: f64, y: f64, size: DVec2, field: Playfield) -> Self {
        let mut object = Self {
            pos: DVec2::new(x, 0.0),
            size,
            field,
        };
        object.set_y(y);
        object
    }

    pub fn x(&self) -> f64 {
        self.pos.x
    }

    pub fn y(&self) -> f64 {
        self.pos.y
    }

    pub fn width(&self) -> f64 {
        self.size.x
    }

    pub fn height(&self) -> f64 {
        self.size.y
    }

    pub fn field(&self) -> Playfield {
        self.field
    }

    /// Clamp into `[0, playfield_width - width]`
    pub fn set_x(&mut self, x: f64) {
        self.pos.x = x.max(0.0).min(self.field.width() - self.size.x);
    }

    /// Clamp into `[0, playfield_height - height]`
    pub fn set_y(&mut self, y: f64) {
        self.pos.y = y.max(0.0).min(self.field.height() - self.size.y);
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}

/// Behaviour shared by everything that lives on the playfield
pub trait Body {
    fn object(&self) -> &GeometricObject;

    /// Advance one tick. Most bodies stand still.
    fn update(&mut self) {}

    fn bounds(&self) -> Aabb {
        self.object().bounds()
    }

    fn is_colliding(&self, other: &dyn Body) -> bool {
        self.bounds().overlaps(&other.bounds())
    }
}
