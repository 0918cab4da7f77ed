//! Explosion particles
//!
//! Purely decorative: nothing in gameplay reads particle state.

use glam::Vec2;
use rand::Rng;

/// Default burst colour (white)
pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Default pool cap
pub const MAX_PARTICLES: usize = 500;

/// A single spark
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: [f32; 4],
    /// Radius in pixels, 1..=3
    pub size: f32,
    /// Ticks left
    pub lifetime: i32,
}

impl Particle {
    pub fn new(pos: Vec2, color: [f32; 4], rng: &mut impl Rng) -> Self {
        Self {
            pos,
            vel: Vec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0)),
            color,
            size: rng.random_range(1..=3) as f32,
            lifetime: rng.random_range(30..=60),
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.lifetime -= 1;
    }
}

/// Particle pool with a hard size cap
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
    max_particles: usize,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new(MAX_PARTICLES)
    }
}

impl ParticleSystem {
    pub fn new(max_particles: usize) -> Self {
        Self {
            particles: Vec::new(),
            max_particles,
        }
    }

    pub fn set_max_particles(&mut self, max: usize) {
        self.max_particles = max;
        self.particles.truncate(max);
    }

    /// Emit a white burst of 10-20 particles at `pos`
    pub fn explode(&mut self, pos: Vec2, rng: &mut impl Rng) {
        self.explode_colored(pos, WHITE, rng);
    }

    pub fn explode_colored(&mut self, pos: Vec2, color: [f32; 4], rng: &mut impl Rng) {
        let count: usize = rng.random_range(10..=20);
        let room = self.max_particles.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            self.particles.push(Particle::new(pos, color, rng));
        }
    }

    /// Drop dead particles, then advance the survivors
    pub fn update(&mut self) {
        self.particles.retain(|p| p.lifetime > 0);
        for p in &mut self.particles {
            p.update();
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
