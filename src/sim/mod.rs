//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Randomness comes from a caller-supplied `Rng`
//! - Collections are only mutated between collision sweeps, never during them
//! - No rendering or platform dependencies

pub mod collision;
pub mod entities;
pub mod particles;
pub mod starfield;
pub mod state;
pub mod tick;

pub use collision::{Body, collides, resolve_collisions};
pub use entities::{Asteroid, Bullet, BulletOwner, EffectKind, Effects, PowerUp, Saucer, Ship};
pub use particles::{Particle, ParticleSystem};
pub use starfield::{Star, Starfield};
pub use state::{Bounds, GameEvent, GameState};
pub use tick::{TickInput, tick};
