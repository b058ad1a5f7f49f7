//! Game state and entity types
//!
//! Everything the play loop mutates lives in `GameState`.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Body, GeometricObject, Playfield};
use crate::consts::*;
use crate::error::ConfigError;

/// Coarse phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Waiting for `init()`
    Init,
    /// Ticking
    Playing,
    /// Frozen mid-game, resumes where it left off
    Paused,
    /// An obstacle hit the paddle
    Ended,
    /// Restart requested; passes straight through to `Init`
    Reload,
}

/// Simulation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    pub spawn_interval: u64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub speed_factor: f64,
    pub step_divisor: f64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            spawn_interval: SPAWN_INTERVAL_FRAMES,
            min_radius: MIN_OBSTACLE_RADIUS,
            max_radius: MAX_OBSTACLE_RADIUS,
            speed_factor: OBSTACLE_SPEED_FACTOR,
            step_divisor: PLAYER_STEP_DIVISOR,
        }
    }
}

impl Rules {
    /// The playfield must fit the largest obstacle these rules can spawn
    pub fn check_playfield(&self, field: &Playfield) -> Result<(), ConfigError> {
        let min = (2.0 * self.max_radius).ceil() as u32;
        Playfield::with_min_extent(field.width() as u32, field.height() as u32, min).map(|_| ())
    }
}

/// The paddle. Pinned to the left edge, moves vertically in fixed steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    body: GeometricObject,
}

impl Player {
    pub fn new(field: Playfield) -> Self {
        let height = field.height() / PLAYER_HEIGHT_DIVISOR;
        let width = height / PLAYER_ASPECT_DIVISOR;
        Self {
            body: GeometricObject::new(0.0, 0.0, DVec2::new(width, height), field),
        }
    }

    pub fn x(&self) -> f64 {
        self.body.x()
    }

    pub fn y(&self) -> f64 {
        self.body.y()
    }

    pub fn width(&self) -> f64 {
        self.body.width()
    }

    pub fn height(&self) -> f64 {
        self.body.height()
    }

    /// Distance covered by one key press
    pub fn step(&self, divisor: f64) -> f64 {
        self.height() / divisor
    }

    /// Shift vertically; the setter keeps the paddle on screen
    pub fn move_by(&mut self, dy: f64) {
        self.body.set_y(self.body.y() + dy);
    }
}

impl Body for Player {
    fn object(&self) -> &GeometricObject {
        &self.body
    }
}

/// A ball drifting right to left. Smaller balls are faster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    radius: f64,
    speed: f64,
    body: GeometricObject,
}

impl Obstacle {
    pub fn new(id: u32, x: f64, y: f64, radius: f64, speed_factor: f64, field: Playfield) -> Self {
        Self {
            id,
            radius,
            speed: speed_factor / radius,
            body: GeometricObject::new(x, y, DVec2::splat(radius * 2.0), field),
        }
    }

    /// Enter at `x = playfield_width`, just past the right edge. The first
    /// `update` moves it and clamps it back inside, before it is ever drawn.
    pub fn entering(id: u32, y: f64, radius: f64, speed_factor: f64, field: Playfield) -> Self {
        let size = DVec2::splat(radius * 2.0);
        Self {
            id,
            radius,
            speed: speed_factor / radius,
            body: GeometricObject::with_unclamped_x(field.width(), y, size, field),
        }
    }

    /// Spawn at the right edge with a random radius and row
    pub fn spawn(id: u32, field: Playfield, rules: &Rules, rng: &mut Pcg32) -> Self {
        let radius = rng.random_range(rules.min_radius..rules.max_radius);
        let y = (rng.random::<f64>() * field.height()).floor();
        Self::entering(id, y, radius, rules.speed_factor, field)
    }

    pub fn x(&self) -> f64 {
        self.body.x()
    }

    pub fn y(&self) -> f64 {
        self.body.y()
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Pixels per tick
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Circle center for drawing
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x() + self.radius, self.y() + self.radius)
    }

    /// Reached the left edge this tick
    pub fn has_exited(&self) -> bool {
        self.x() == 0.0
    }
}

impl Body for Obstacle {
    fn object(&self) -> &GeometricObject {
        &self.body
    }

    fn update(&mut self) {
        self.body.set_x(self.body.x() - self.speed);
    }
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    #[serde(skip, default = "default_rng")]
    pub(crate) rng: Pcg32,
    pub field: Playfield,
    pub rules: Rules,
    pub player: Player,
    /// In spawn order
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    pub frames: u64,
    pub mode: GameMode,
    next_id: u32,
}

impl GameState {
    pub fn new(field: Playfield, rules: Rules, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            field,
            rules,
            player: Player::new(field),
            obstacles: Vec::new(),
            score: 0,
            frames: 0,
            mode: GameMode::Init,
            next_id: 1,
        }
    }

    /// Fresh round: paddle at the top, no obstacles, zero score
    pub fn init(&mut self) {
        self.player = Player::new(self.field);
        self.obstacles.clear();
        self.frames = 0;
        self.score = 0;
        self.mode = GameMode::Playing;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Push a new obstacle at the right edge
    pub fn spawn_obstacle(&mut self) {
        let id = self.next_entity_id();
        let obstacle = Obstacle::spawn(id, self.field, &self.rules, &mut self.rng);
        log::debug!(
            "Spawned obstacle {} (r={:.2}, y={:.0}) at frame {}",
            id,
            obstacle.radius(),
            obstacle.y(),
            self.frames
        );
        self.obstacles.push(obstacle);
    }

    /// Pause or resume. Returns true if the mode changed.
    pub fn toggle_pause(&mut self) -> bool {
        match self.mode {
            GameMode::Playing => {
                self.mode = GameMode::Paused;
                true
            }
            GameMode::Paused => {
                self.mode = GameMode::Playing;
                true
            }
            _ => false,
        }
    }
}
