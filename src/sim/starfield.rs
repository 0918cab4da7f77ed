//! Slowly falling background stars

use glam::Vec2;
use rand::Rng;

use super::state::Bounds;
use crate::consts::STAR_COUNT;

#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    /// Pixels per tick, downward
    pub speed: f32,
}

#[derive(Debug, Clone, Default)]
pub struct Starfield {
    pub stars: Vec<Star>,
    height: f32,
}

impl Starfield {
    pub fn new(bounds: Bounds, rng: &mut impl Rng) -> Self {
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..bounds.width),
                    rng.random_range(0.0..bounds.height),
                ),
                speed: rng.random_range(0.1..=0.5),
            })
            .collect();
        Self {
            stars,
            height: bounds.height,
        }
    }

    pub fn update(&mut self) {
        for star in &mut self.stars {
            star.pos.y += star.speed;
            if star.pos.y >= self.height {
                star.pos.y = 0.0;
            }
        }
    }
}
