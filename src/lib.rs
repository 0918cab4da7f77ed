//! Rock Drift - a wrap-around asteroid shooter
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (entities, collisions, game state)
//! - `session`: Menu / play / game-over flow around the simulation
//! - `renderer`: Vertex export of entity shapes for a host renderer
//! - `persistence`: High score storage
//! - `audio`: Sound cue dispatch

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::HighScore;
pub use session::{Phase, Session};
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 15.0;
    pub const SHIP_DRAG: f32 = 0.99;
    pub const SHIP_THRUST: f32 = 0.1;
    /// Degrees per tick of rotate input
    pub const SHIP_TURN_RATE: f32 = 5.0;
    pub const START_LIVES: i32 = 3;

    /// Power-up effect length on the ship (5 s)
    pub const EFFECT_TICKS: u32 = 300;
    /// Ticks between auto-fired shots while rapid fire is held
    pub const RAPID_FIRE_INTERVAL: u32 = 8;
    /// Angular offset of the side bullets of a multi-shot (degrees)
    pub const MULTI_SHOT_SPREAD: f32 = 15.0;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 5.0;
    pub const BULLET_LIFETIME: i32 = 60;
    pub const BULLET_RADIUS: f32 = 2.0;

    /// Asteroid radius per size step
    pub const ASTEROID_RADIUS_PER_SIZE: f32 = 10.0;
    pub const ASTEROID_MAX_SIZE: u8 = 3;
    pub const INITIAL_ASTEROIDS: usize = 4;
    /// Asteroids spawned on a new level are `level + LEVEL_ASTEROID_BONUS`
    pub const LEVEL_ASTEROID_BONUS: u32 = 3;

    /// Saucer radius per size step
    pub const SAUCER_RADIUS_PER_SIZE: f32 = 15.0;
    pub const SAUCER_SHOOT_MIN: i32 = 60;
    pub const SAUCER_SHOOT_MAX: i32 = 120;
    /// One saucer per this many ticks on average
    pub const SAUCER_SPAWN_ODDS: u32 = 1000;

    /// Power-up pickup defaults
    pub const POWERUP_RADIUS: f32 = 10.0;
    pub const POWERUP_DURATION: i32 = 600;
    /// One power-up per this many ticks on average
    pub const POWERUP_SPAWN_ODDS: u32 = 600;

    /// Scoring
    pub const ASTEROID_POINTS: u64 = 100;
    pub const SAUCER_POINTS: u64 = 500;

    /// Decorative starfield size
    pub const STAR_COUNT: usize = 100;
}

/// Wrap a coordinate into `[0, bound)`
#[inline]
pub fn wrap(v: f32, bound: f32) -> f32 {
    let r = v.rem_euclid(bound);
    // rem_euclid can round up to `bound` for tiny negative inputs
    if r >= bound { 0.0 } else { r }
}

/// Toroidal wrap of a position into the `width` x `height` rectangle
#[inline]
pub fn wrap_position(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(wrap(pos.x, width), wrap(pos.y, height))
}

/// Unit vector for a heading in degrees (screen space, y grows downward)
#[inline]
pub fn heading_vector(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}

/// Heading in degrees that points along `dir` (inverse of [`heading_vector`])
#[inline]
pub fn heading_of(dir: Vec2) -> f32 {
    (-dir.y).atan2(dir.x).to_degrees()
}

/// Circle-circle intersection (strict)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Signed difference `to - from` in degrees, normalized to [-180, 180)
#[inline]
pub fn angle_delta(from: f32, to: f32) -> f32 {
    (to - from + 180.0).rem_euclid(360.0) - 180.0
}
