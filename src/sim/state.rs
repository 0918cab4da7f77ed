//! Game state and core simulation types
//!
//! [`GameState`] owns every entity collection; nothing else holds entity
//! references between ticks.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entities::{Asteroid, Bullet, EffectKind, PowerUp, Saucer, Ship};
use super::particles::ParticleSystem;
use super::starfield::Starfield;
use crate::consts::*;

/// Playfield size; positions wrap into `[0, width) x [0, height)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Discrete things that happened during a tick, for audio and other observers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player fired (once per fire action, however many bullets)
    Shoot,
    /// Thrust held this tick
    Thrust,
    /// Something blew up at this position
    Explosion { pos: Vec2 },
    /// Points were awarded
    Scored { points: u64 },
    /// Ship was hit and respawned
    LifeLost { lives_left: i32 },
    /// Ship picked up a power-up
    PowerUpCollected { kind: EffectKind },
    /// A new level began
    LevelStarted { level: u32 },
    /// Lives ran out
    GameOver { score: u64 },
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub bounds: Bounds,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub bullets: Vec<Bullet>,
    pub saucers: Vec<Saucer>,
    pub powerups: Vec<PowerUp>,
    pub score: u64,
    pub lives: i32,
    /// Current level (1-based)
    pub level: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: ParticleSystem,
    /// Background stars (not gameplay-affecting)
    #[serde(skip)]
    pub starfield: Starfield,
    /// Events raised by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh game with the initial asteroid wave
    pub fn new(bounds: Bounds, rng: &mut impl Rng) -> Self {
        let mut state = Self {
            bounds,
            ship: Ship::new(bounds.center()),
            asteroids: Vec::new(),
            bullets: Vec::new(),
            saucers: Vec::new(),
            powerups: Vec::new(),
            score: 0,
            lives: START_LIVES,
            level: 1,
            time_ticks: 0,
            particles: ParticleSystem::default(),
            starfield: Starfield::new(bounds, rng),
            events: Vec::new(),
        };
        state.spawn_asteroids(INITIAL_ASTEROIDS, rng);
        state
    }

    /// Start over: new ship, empty collections, score/lives/level reset, initial wave.
    /// The starfield is kept.
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.ship = Ship::new(self.bounds.center());
        self.asteroids.clear();
        self.bullets.clear();
        self.saucers.clear();
        self.powerups.clear();
        self.particles.clear();
        self.events.clear();
        self.score = 0;
        self.lives = START_LIVES;
        self.level = 1;
        self.time_ticks = 0;
        self.spawn_asteroids(INITIAL_ASTEROIDS, rng);
        log::info!("Game reset");
    }

    /// Spawn `count` asteroids of random size at random screen edges
    pub fn spawn_asteroids(&mut self, count: usize, rng: &mut impl Rng) {
        for _ in 0..count {
            let size = rng.random_range(1..=ASTEROID_MAX_SIZE);
            self.asteroids
                .push(Asteroid::spawn_at_edge(size, self.bounds, rng));
        }
        log::debug!(
            "Spawned {} asteroids, {} in play",
            count,
            self.asteroids.len()
        );
    }

    /// Lives have run out
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.lives <= 0
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
