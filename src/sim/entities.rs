//! Mobile entities and their per-tick update rules
//!
//! Every entity moves in screen space (y grows downward) inside a toroidal
//! playfield described by [`Bounds`]. Entities never reference each other;
//! anything they need from the ship (saucer aiming) is passed in.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Bounds;
use crate::consts::*;
use crate::{heading_of, heading_vector, wrap_position};

/// Timed capability granted to the ship by a power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Ship ignores asteroid/saucer contact
    Shield,
    /// Holding fire auto-fires
    RapidFire,
    /// Every shot is a three-bullet spread
    MultiShot,
}

impl EffectKind {
    pub const ALL: [EffectKind; 3] = [
        EffectKind::Shield,
        EffectKind::RapidFire,
        EffectKind::MultiShot,
    ];

    #[inline]
    fn index(self) -> usize {
        match self {
            EffectKind::Shield => 0,
            EffectKind::RapidFire => 1,
            EffectKind::MultiShot => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EffectKind::Shield => "shield",
            EffectKind::RapidFire => "rapid_fire",
            EffectKind::MultiShot => "multi_shot",
        }
    }

    /// Uniformly random kind
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Remaining ticks per effect kind; an effect is active while its counter is non-zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effects {
    remaining: [u32; 3],
}

impl Effects {
    /// Start (or refresh) an effect for the full duration
    pub fn activate(&mut self, kind: EffectKind) {
        self.remaining[kind.index()] = EFFECT_TICKS;
    }

    #[inline]
    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.remaining[kind.index()] > 0
    }

    #[inline]
    pub fn remaining(&self, kind: EffectKind) -> u32 {
        self.remaining[kind.index()]
    }

    /// Count every running effect down by one tick
    pub fn tick(&mut self) {
        for r in &mut self.remaining {
            *r = r.saturating_sub(1);
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    /// Heading in degrees (0 = right, counter-clockwise on screen)
    pub heading: f32,
    pub vel: Vec2,
    pub radius: f32,
    pub effects: Effects,
    /// Ticks until rapid fire may auto-fire again
    #[serde(default)]
    pub fire_cooldown: u32,
}

impl Ship {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            heading: 0.0,
            vel: Vec2::ZERO,
            radius: SHIP_RADIUS,
            effects: Effects::default(),
            fire_cooldown: 0,
        }
    }

    /// Turn by `dir` steps (+1 = left / counter-clockwise, -1 = right)
    pub fn rotate(&mut self, dir: f32) {
        self.heading += dir * SHIP_TURN_RATE;
    }

    /// Accelerate along the current heading (one tick of thrust)
    pub fn thrust(&mut self) {
        self.vel += heading_vector(self.heading) * SHIP_THRUST;
    }

    pub fn update(&mut self, bounds: Bounds) {
        self.pos += self.vel;
        self.vel *= SHIP_DRAG;
        self.pos = wrap_position(self.pos, bounds.width, bounds.height);
        self.effects.tick();
        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
    }

    /// Respawn at `pos` with no motion; running effects are kept
    pub fn reset(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.heading = 0.0;
    }

    #[inline]
    pub fn shielded(&self) -> bool {
        self.effects.is_active(EffectKind::Shield)
    }

    /// Bullets for one fire action: a single shot, or a spread under multi-shot
    pub fn fire(&self) -> Vec<Bullet> {
        if self.effects.is_active(EffectKind::MultiShot) {
            [-MULTI_SHOT_SPREAD, 0.0, MULTI_SHOT_SPREAD]
                .iter()
                .map(|off| Bullet::new(self.pos, self.heading + off, BulletOwner::Player))
                .collect()
        } else {
            vec![Bullet::new(self.pos, self.heading, BulletOwner::Player)]
        }
    }
}

/// A drifting rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    /// 1 (small) ..= 3 (large)
    pub size: u8,
    pub radius: f32,
    pub vel: Vec2,
    /// Outline as offsets from `pos`
    pub vertices: Vec<Vec2>,
}

impl Asteroid {
    /// New asteroid of `size` at `pos` with random drift and outline
    pub fn new(size: u8, pos: Vec2, rng: &mut impl Rng) -> Self {
        debug_assert!(size >= 1);
        let radius = size as f32 * ASTEROID_RADIUS_PER_SIZE;
        let vel = Vec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0));
        Self {
            pos,
            size,
            radius,
            vel,
            vertices: Self::generate_vertices(radius, rng),
        }
    }

    /// New asteroid just outside a random screen edge
    pub fn spawn_at_edge(size: u8, bounds: Bounds, rng: &mut impl Rng) -> Self {
        let r = size as f32 * ASTEROID_RADIUS_PER_SIZE;
        let pos = match rng.random_range(0..4) {
            0 => Vec2::new(rng.random_range(0.0..bounds.width), -r),
            1 => Vec2::new(rng.random_range(0.0..bounds.width), bounds.height + r),
            2 => Vec2::new(-r, rng.random_range(0.0..bounds.height)),
            _ => Vec2::new(bounds.width + r, rng.random_range(0.0..bounds.height)),
        };
        Self::new(size, pos, rng)
    }

    fn generate_vertices(radius: f32, rng: &mut impl Rng) -> Vec<Vec2> {
        let n = rng.random_range(8..=12);
        (0..n)
            .map(|i| {
                let angle = i as f32 * std::f32::consts::TAU / n as f32;
                let dist = radius * rng.random_range(0.8..=1.2);
                Vec2::new(angle.cos(), angle.sin()) * dist
            })
            .collect()
    }

    pub fn update(&mut self, bounds: Bounds) {
        self.pos = wrap_position(self.pos + self.vel, bounds.width, bounds.height);
    }

    /// Fragments left behind when destroyed: two of `size - 1`, or none for the smallest
    pub fn split(&self, rng: &mut impl Rng) -> Vec<Asteroid> {
        if self.size <= 1 {
            return Vec::new();
        }
        (0..2)
            .map(|_| Asteroid::new(self.size - 1, self.pos, rng))
            .collect()
    }
}

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Saucer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks left; culled at 0
    pub lifetime: i32,
    pub radius: f32,
    pub owner: BulletOwner,
}

impl Bullet {
    pub fn new(pos: Vec2, heading: f32, owner: BulletOwner) -> Self {
        Self {
            pos,
            vel: heading_vector(heading) * BULLET_SPEED,
            lifetime: BULLET_LIFETIME,
            radius: BULLET_RADIUS,
            owner,
        }
    }

    pub fn update(&mut self, bounds: Bounds) {
        self.pos = wrap_position(self.pos + self.vel, bounds.width, bounds.height);
        self.lifetime -= 1;
    }

    #[inline]
    pub fn expired(&self) -> bool {
        self.lifetime <= 0
    }
}

/// Enemy flying saucer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Saucer {
    pub pos: Vec2,
    /// 1 (small, fast) or 2 (large, slow)
    pub size: u8,
    pub radius: f32,
    pub vel: Vec2,
    /// Ticks until the next shot
    pub shoot_timer: i32,
}

impl Saucer {
    pub fn new(size: u8, pos: Vec2, direction: f32) -> Self {
        Self {
            pos,
            size,
            radius: size as f32 * SAUCER_RADIUS_PER_SIZE,
            vel: Vec2::new(direction * (3 - size as i32) as f32, 0.0),
            shoot_timer: 0,
        }
    }

    /// Random saucer entering from the left or right edge
    pub fn spawn(bounds: Bounds, rng: &mut impl Rng) -> Self {
        let size = rng.random_range(1..=2);
        let r = size as f32 * SAUCER_RADIUS_PER_SIZE;
        let x = if rng.random_bool(0.5) { -r } else { bounds.width + r };
        let y = rng.random_range(0.0..bounds.height);
        let direction = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
        Self::new(size, Vec2::new(x, y), direction)
    }

    /// Advance one tick; returns the bullet fired at `target` when the shot timer runs out
    pub fn update(&mut self, target: Vec2, bounds: Bounds, rng: &mut impl Rng) -> Option<Bullet> {
        self.pos.x += self.vel.x;
        let drift: f32 = rng.random_range(-1.0..=1.0);
        // A screen shorter than the hull pins the saucer at `height - radius`
        self.pos.y = (self.pos.y + drift)
            .max(self.radius)
            .min(bounds.height - self.radius);

        // Only wrap once fully off-screen and still heading out
        if self.pos.x < -self.radius && self.vel.x < 0.0 {
            self.pos.x = bounds.width + self.radius;
        } else if self.pos.x > bounds.width + self.radius && self.vel.x > 0.0 {
            self.pos.x = -self.radius;
        }

        self.shoot_timer -= 1;
        if self.shoot_timer <= 0 {
            self.shoot_timer = rng.random_range(SAUCER_SHOOT_MIN..=SAUCER_SHOOT_MAX);
            return Some(self.shoot(target));
        }
        None
    }

    fn shoot(&self, target: Vec2) -> Bullet {
        let heading = heading_of(target - self.pos);
        Bullet::new(self.pos, heading, BulletOwner::Saucer)
    }
}

/// Stationary pickup that grants an [`EffectKind`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: EffectKind,
    pub radius: f32,
    /// Ticks left before it vanishes
    pub duration: i32,
}

impl PowerUp {
    pub fn new(kind: EffectKind, pos: Vec2) -> Self {
        Self {
            pos,
            kind,
            radius: POWERUP_RADIUS,
            duration: POWERUP_DURATION,
        }
    }

    pub fn spawn(bounds: Bounds, rng: &mut impl Rng) -> Self {
        let kind = EffectKind::random(rng);
        let pos = Vec2::new(
            rng.random_range(0.0..bounds.width),
            rng.random_range(0.0..bounds.height),
        );
        Self::new(kind, pos)
    }

    pub fn update(&mut self) {
        self.duration -= 1;
    }

    #[inline]
    pub fn expired(&self) -> bool {
        self.duration <= 0
    }
}
