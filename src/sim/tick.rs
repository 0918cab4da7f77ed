//! Fixed timestep simulation tick
//!
//! Core game loop that advances every entity by one tick, then resolves
//! collisions.

use rand::Rng;

use super::collision::resolve_collisions;
use super::entities::{EffectKind, PowerUp, Saucer};
use super::state::{GameEvent, GameState};
use crate::consts::*;
use crate::{angle_delta, heading_of};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Turn counter-clockwise (held)
    pub rotate_left: bool,
    /// Turn clockwise (held)
    pub rotate_right: bool,
    /// Engine on (held)
    pub thrust: bool,
    /// Fire key pressed this tick (one-shot)
    pub fire: bool,
    /// Fire key is down; drives auto-fire under rapid fire
    pub fire_held: bool,
    /// Demo mode - the ship flies itself
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep.
///
/// Order: input, entity updates, random spawns, expiry culling, level
/// progression, collisions. Does nothing once the game is over.
pub fn tick(state: &mut GameState, input: &TickInput, rng: &mut impl Rng) {
    if state.is_game_over() {
        return;
    }
    state.events.clear();
    state.time_ticks += 1;

    let input = if input.autopilot {
        autopilot_input(state)
    } else {
        input.clone()
    };

    apply_input(state, &input);
    advance_entities(state, rng);
    spawn_random(state, rng);
    cull_expired(state);
    progress_level(state, rng);
    resolve_collisions(state, rng);
}

/// Rotate / thrust / fire the ship
pub fn apply_input(state: &mut GameState, input: &TickInput) {
    let ship = &mut state.ship;
    if input.rotate_left {
        ship.rotate(1.0);
    }
    if input.rotate_right {
        ship.rotate(-1.0);
    }
    if input.thrust {
        ship.thrust();
        state.events.push(GameEvent::Thrust);
    }

    let auto_fire = input.fire_held
        && ship.effects.is_active(EffectKind::RapidFire)
        && ship.fire_cooldown == 0;
    if input.fire || auto_fire {
        state.bullets.extend(ship.fire());
        ship.fire_cooldown = RAPID_FIRE_INTERVAL;
        state.events.push(GameEvent::Shoot);
    }
}

/// Move every entity one tick; saucer shots join the bullet list
pub fn advance_entities(state: &mut GameState, rng: &mut impl Rng) {
    let bounds = state.bounds;

    state.ship.update(bounds);
    for asteroid in &mut state.asteroids {
        asteroid.update(bounds);
    }
    for bullet in &mut state.bullets {
        bullet.update(bounds);
    }
    let target = state.ship.pos;
    for saucer in &mut state.saucers {
        if let Some(shot) = saucer.update(target, bounds, rng) {
            state.bullets.push(shot);
        }
    }
    for powerup in &mut state.powerups {
        powerup.update();
    }
    state.particles.update();
    state.starfield.update();
}

/// Occasional saucer and power-up arrivals
pub fn spawn_random(state: &mut GameState, rng: &mut impl Rng) {
    if rng.random_ratio(1, SAUCER_SPAWN_ODDS) {
        let saucer = Saucer::spawn(state.bounds, rng);
        log::debug!("Saucer (size {}) entering at {}", saucer.size, saucer.pos);
        state.saucers.push(saucer);
    }
    if rng.random_ratio(1, POWERUP_SPAWN_ODDS) {
        let powerup = PowerUp::spawn(state.bounds, rng);
        log::debug!("{} power-up at {}", powerup.kind.as_str(), powerup.pos);
        state.powerups.push(powerup);
    }
}

/// Drop spent bullets and stale power-ups
pub fn cull_expired(state: &mut GameState) {
    state.bullets.retain(|b| !b.expired());
    state.powerups.retain(|p| !p.expired());
}

/// Start the next level once every asteroid is gone
pub fn progress_level(state: &mut GameState, rng: &mut impl Rng) {
    if !state.asteroids.is_empty() {
        return;
    }
    state.level += 1;
    let count = (state.level + LEVEL_ASTEROID_BONUS) as usize;
    state.spawn_asteroids(count, rng);
    state.events.push(GameEvent::LevelStarted { level: state.level });
    log::info!("Level {} started with {} asteroids", state.level, count);
}

/// Demo pilot: turn toward the nearest asteroid, shoot when lined up,
/// drift closer when nothing is near
fn autopilot_input(state: &GameState) -> TickInput {
    let ship = &state.ship;
    let nearest = state.asteroids.iter().min_by(|a, b| {
        a.pos
            .distance_squared(ship.pos)
            .partial_cmp(&b.pos.distance_squared(ship.pos))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let Some(target) = nearest else {
        return TickInput::default();
    };

    let to_target = target.pos - ship.pos;
    let delta = angle_delta(ship.heading, heading_of(to_target));
    let aligned = delta.abs() < 10.0;

    TickInput {
        rotate_left: delta > SHIP_TURN_RATE / 2.0,
        rotate_right: delta < -SHIP_TURN_RATE / 2.0,
        thrust: to_target.length() > 150.0 && ship.vel.length() < 1.0,
        // Pace presses so the pilot does not flood the screen
        fire: aligned && state.time_ticks % 12 == 0,
        fire_held: aligned,
        autopilot: false,
    }
}
