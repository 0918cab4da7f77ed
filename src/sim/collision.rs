//! Collision detection and response
//!
//! Every body is a circle; two bodies touch when the distance between their
//! centres is less than the sum of their radii. [`resolve_collisions`] runs
//! the fixed sequence of pairwise sweeps once per tick, after movement.
//!
//! Sweeps never remove from a collection while walking it. Hits are recorded
//! as index marks during a read-only pass and applied afterwards, and each
//! entity takes part in at most one consuming hit per tick.

use glam::Vec2;
use rand::Rng;

use super::entities::{Asteroid, Bullet, BulletOwner, PowerUp, Saucer, Ship};
use super::state::{GameEvent, GameState};
use crate::circles_overlap;
use crate::consts::{ASTEROID_POINTS, SAUCER_POINTS};

/// Anything with a circular hitbox
pub trait Body {
    fn center(&self) -> Vec2;
    fn radius(&self) -> f32;
}

macro_rules! impl_body {
    ($($ty:ty),*) => {
        $(impl Body for $ty {
            #[inline]
            fn center(&self) -> Vec2 {
                self.pos
            }
            #[inline]
            fn radius(&self) -> f32 {
                self.radius
            }
        })*
    };
}

impl_body!(Ship, Asteroid, Bullet, Saucer, PowerUp);

/// Circle-circle overlap between two bodies
#[inline]
pub fn collides(a: &impl Body, b: &impl Body) -> bool {
    circles_overlap(a.center(), a.radius(), b.center(), b.radius())
}

/// Run every collision sweep for this tick, in order:
/// bullets vs asteroids, bullets vs saucers, ship vs asteroids,
/// ship vs saucers, then ship vs power-ups.
pub fn resolve_collisions(state: &mut GameState, rng: &mut impl Rng) {
    let was_alive = !state.is_game_over();

    let mut spent = vec![false; state.bullets.len()];
    bullets_vs_asteroids(state, &mut spent, rng);
    bullets_vs_saucers(state, &mut spent, rng);
    retain_unmarked(&mut state.bullets, &spent);

    ship_vs_asteroids(state, rng);
    ship_vs_saucers(state, rng);
    ship_vs_powerups(state);

    if was_alive && state.is_game_over() {
        log::info!("Game over: score {}, level {}", state.score, state.level);
        state.events.push(GameEvent::GameOver { score: state.score });
    }
}

/// Keep only the items whose mark is false (`marks` is indexed like `items`)
fn retain_unmarked<T>(items: &mut Vec<T>, marks: &[bool]) {
    let mut idx = 0;
    items.retain(|_| {
        let keep = !marks[idx];
        idx += 1;
        keep
    });
}

fn bullets_vs_asteroids(state: &mut GameState, spent: &mut [bool], rng: &mut impl Rng) {
    let mut destroyed = vec![false; state.asteroids.len()];
    let mut fragments = Vec::new();

    for (bi, bullet) in state.bullets.iter().enumerate() {
        if spent[bi] {
            continue;
        }
        for (ai, asteroid) in state.asteroids.iter().enumerate() {
            if destroyed[ai] || !collides(bullet, asteroid) {
                continue;
            }
            spent[bi] = true;
            destroyed[ai] = true;

            let points = ASTEROID_POINTS * asteroid.size as u64;
            state.score += points;
            state.events.push(GameEvent::Scored { points });
            state.events.push(GameEvent::Explosion { pos: asteroid.pos });
            state.particles.explode(asteroid.pos, rng);
            fragments.extend(asteroid.split(rng));
            break;
        }
    }

    retain_unmarked(&mut state.asteroids, &destroyed);
    // Fragments join after the sweep, so no bullet can hit them this tick
    state.asteroids.extend(fragments);
}

fn bullets_vs_saucers(state: &mut GameState, spent: &mut [bool], rng: &mut impl Rng) {
    let mut destroyed = vec![false; state.saucers.len()];

    for (bi, bullet) in state.bullets.iter().enumerate() {
        // Saucer fire would otherwise kill its own saucer at the muzzle
        if spent[bi] || bullet.owner == BulletOwner::Saucer {
            continue;
        }
        for (si, saucer) in state.saucers.iter().enumerate() {
            if destroyed[si] || !collides(bullet, saucer) {
                continue;
            }
            spent[bi] = true;
            destroyed[si] = true;

            let points = SAUCER_POINTS * saucer.size as u64;
            state.score += points;
            state.events.push(GameEvent::Scored { points });
            state.events.push(GameEvent::Explosion { pos: saucer.pos });
            state.particles.explode(saucer.pos, rng);
            break;
        }
    }

    retain_unmarked(&mut state.saucers, &destroyed);
}

/// Ship destroyed: lose a life, burst at the wreck, respawn at the centre
fn lose_life(state: &mut GameState, rng: &mut impl Rng) {
    state.lives -= 1;
    let wreck = state.ship.pos;
    state.events.push(GameEvent::Explosion { pos: wreck });
    state.events.push(GameEvent::LifeLost {
        lives_left: state.lives,
    });
    state.particles.explode(wreck, rng);
    state.ship.reset(state.bounds.center());
    log::debug!("Ship lost at {wreck}, {} lives left", state.lives);
}

fn ship_vs_asteroids(state: &mut GameState, rng: &mut impl Rng) {
    if state.ship.shielded() {
        return;
    }
    // The asteroid survives the crash
    if state.asteroids.iter().any(|a| collides(&state.ship, a)) {
        lose_life(state, rng);
    }
}

fn ship_vs_saucers(state: &mut GameState, rng: &mut impl Rng) {
    if state.ship.shielded() {
        return;
    }
    if let Some(idx) = state.saucers.iter().position(|s| collides(&state.ship, s)) {
        lose_life(state, rng);
        state.saucers.remove(idx);
    }
}

/// Pickups are not gated by the shield, and any number may be collected at once
fn ship_vs_powerups(state: &mut GameState) {
    let ship = &state.ship;
    let mut collected = Vec::new();
    state.powerups.retain(|p| {
        if collides(ship, p) {
            collected.push(p.kind);
            false
        } else {
            true
        }
    });

    for kind in collected {
        state.ship.effects.activate(kind);
        state.events.push(GameEvent::PowerUpCollected { kind });
        log::debug!("Collected {} power-up", kind.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::EffectKind;
    use crate::sim::state::Bounds;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn empty_state() -> (GameState, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut state = GameState::new(Bounds::default(), &mut rng);
        state.asteroids.clear();
        (state, rng)
    }

    /// Player bullet sitting still at `pos`
    fn bullet_at(pos: Vec2) -> Bullet {
        let mut b = Bullet::new(pos, 0.0, BulletOwner::Player);
        b.vel = Vec2::ZERO;
        b
    }

    #[test]
    fn test_asteroid_score_and_split() {
        for size in 1..=3u8 {
            let (mut state, mut rng) = empty_state();
            let pos = Vec2::new(100.0, 100.0);
            state.asteroids.push(Asteroid::new(size, pos, &mut rng));
            state.bullets.push(bullet_at(pos));

            resolve_collisions(&mut state, &mut rng);

            assert_eq!(state.score, 100 * size as u64);
            assert!(state.bullets.is_empty());
            let expected = if size > 1 { 2 } else { 0 };
            assert_eq!(state.asteroids.len(), expected);
            for child in &state.asteroids {
                assert_eq!(child.size, size - 1);
                assert_eq!(child.radius, (size - 1) as f32 * 10.0);
                assert_eq!(child.pos, pos);
            }
            assert!(!state.particles.is_empty());
            assert!(state.events.contains(&GameEvent::Explosion { pos }));
        }
    }

    #[test]
    fn test_saucer_score() {
        for size in 1..=2u8 {
            let (mut state, mut rng) = empty_state();
            let pos = Vec2::new(200.0, 100.0);
            state.saucers.push(Saucer::new(size, pos, 1.0));
            state.bullets.push(bullet_at(pos));

            resolve_collisions(&mut state, &mut rng);

            assert_eq!(state.score, 500 * size as u64);
            assert!(state.saucers.is_empty());
            assert!(state.bullets.is_empty());
        }
    }

    #[test]
    fn test_one_bullet_destroys_one_target() {
        let (mut state, mut rng) = empty_state();
        let pos = Vec2::new(100.0, 100.0);
        state.asteroids.push(Asteroid::new(1, pos, &mut rng));
        state.asteroids.push(Asteroid::new(1, pos, &mut rng));
        state.saucers.push(Saucer::new(1, pos, 1.0));
        state.bullets.push(bullet_at(pos));

        resolve_collisions(&mut state, &mut rng);

        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.saucers.len(), 1);
        assert_eq!(state.score, 100);
    }

    #[test]
    fn test_two_bullets_one_asteroid() {
        let (mut state, mut rng) = empty_state();
        let pos = Vec2::new(100.0, 100.0);
        state.asteroids.push(Asteroid::new(1, pos, &mut rng));
        state.bullets.push(bullet_at(pos));
        state.bullets.push(bullet_at(pos + Vec2::new(1.0, 0.0)));

        resolve_collisions(&mut state, &mut rng);

        assert!(state.asteroids.is_empty());
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos.x, 101.0);
    }

    #[test]
    fn test_fragments_not_hit_same_tick() {
        let (mut state, mut rng) = empty_state();
        let pos = Vec2::new(100.0, 100.0);
        state.asteroids.push(Asteroid::new(3, pos, &mut rng));
        state.bullets.push(bullet_at(pos));
        state.bullets.push(bullet_at(pos));

        resolve_collisions(&mut state, &mut rng);

        assert_eq!(state.asteroids.len(), 2);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.score, 300);
    }

    #[test]
    fn test_ship_hit_by_asteroid_example() {
        let (mut state, mut rng) = empty_state();
        state.ship.pos = Vec2::new(400.0, 300.0);
        state.ship.vel = Vec2::new(1.5, -0.5);
        state.ship.heading = 45.0;
        state
            .asteroids
            .push(Asteroid::new(2, Vec2::new(405.0, 300.0), &mut rng));

        resolve_collisions(&mut state, &mut rng);

        assert_eq!(state.lives, 2);
        assert_eq!(state.ship.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ship.vel, Vec2::ZERO);
        assert_eq!(state.ship.heading, 0.0);
        // Asteroid is not removed by a ship crash
        assert_eq!(state.asteroids.len(), 1);
        assert!(state.events.contains(&GameEvent::LifeLost { lives_left: 2 }));
    }

    #[test]
    fn test_shield_gates_ship_hits() {
        let (mut state, mut rng) = empty_state();
        let crash = Vec2::new(100.0, 100.0);
        state.ship.pos = crash;
        state.ship.vel = Vec2::new(1.0, 0.0);
        state.ship.effects.activate(EffectKind::Shield);
        state.asteroids.push(Asteroid::new(1, crash, &mut rng));
        state.saucers.push(Saucer::new(1, crash, 1.0));

        resolve_collisions(&mut state, &mut rng);

        assert_eq!(state.lives, 3);
        assert_eq!(state.ship.pos, crash);
        assert_eq!(state.ship.vel, Vec2::new(1.0, 0.0));
        assert_eq!(state.saucers.len(), 1);

        // Same setup without the shield
        let (mut state, mut rng) = empty_state();
        state.ship.pos = crash;
        state.ship.vel = Vec2::new(1.0, 0.0);
        state.asteroids.push(Asteroid::new(1, crash, &mut rng));

        resolve_collisions(&mut state, &mut rng);

        assert_eq!(state.lives, 2);
        assert_eq!(state.ship.pos, state.bounds.center());
        assert_eq!(state.ship.vel, Vec2::ZERO);
    }

    #[test]
    fn test_only_first_asteroid_crash_counts() {
        let (mut state, mut rng) = empty_state();
        let crash = Vec2::new(100.0, 100.0);
        state.ship.pos = crash;
        state.asteroids.push(Asteroid::new(1, crash, &mut rng));
        state.asteroids.push(Asteroid::new(2, crash, &mut rng));

        resolve_collisions(&mut state, &mut rng);

        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_ship_saucer_crash_removes_saucer() {
        let (mut state, mut rng) = empty_state();
        let crash = Vec2::new(100.0, 100.0);
        state.ship.pos = crash;
        state.saucers.push(Saucer::new(2, crash, 1.0));
        state.saucers.push(Saucer::new(1, Vec2::new(700.0, 500.0), 1.0));

        resolve_collisions(&mut state, &mut rng);

        assert_eq!(state.lives, 2);
        assert_eq!(state.saucers.len(), 1);
        assert_eq!(state.saucers[0].pos, Vec2::new(700.0, 500.0));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_collect_multiple_powerups_through_shield() {
        let (mut state, mut rng) = empty_state();
        let pos = Vec2::new(300.0, 300.0);
        state.ship.pos = pos;
        state.ship.effects.activate(EffectKind::Shield);
        state.powerups.push(PowerUp::new(EffectKind::RapidFire, pos));
        state
            .powerups
            .push(PowerUp::new(EffectKind::MultiShot, pos + Vec2::new(5.0, 0.0)));
        state
            .powerups
            .push(PowerUp::new(EffectKind::Shield, Vec2::new(700.0, 50.0)));

        resolve_collisions(&mut state, &mut rng);

        assert_eq!(state.powerups.len(), 1);
        assert!(state.ship.effects.is_active(EffectKind::RapidFire));
        assert!(state.ship.effects.is_active(EffectKind::MultiShot));
        assert_eq!(state.ship.effects.remaining(EffectKind::MultiShot), 300);
    }

    #[test]
    fn test_saucer_fire_spares_saucers() {
        let (mut state, mut rng) = empty_state();
        let pos = Vec2::new(100.0, 100.0);
        state.saucers.push(Saucer::new(1, pos, 1.0));
        let mut shot = bullet_at(pos);
        shot.owner = BulletOwner::Saucer;
        state.bullets.push(shot);

        resolve_collisions(&mut state, &mut rng);
        assert_eq!(state.saucers.len(), 1);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_saucer_fire_scores_asteroid_kills() {
        let (mut state, mut rng) = empty_state();
        let pos = Vec2::new(100.0, 100.0);
        state.asteroids.push(Asteroid::new(3, pos, &mut rng));
        let mut shot = bullet_at(pos);
        shot.owner = BulletOwner::Saucer;
        state.bullets.push(shot);

        resolve_collisions(&mut state, &mut rng);

        assert_eq!(state.score, 300);
        assert_eq!(state.asteroids.len(), 2);
        assert!(state.bullets.is_empty());
        assert!(state.events.contains(&GameEvent::Scored { points: 300 }));
    }

    #[test]
    fn test_saucer_fire_does_not_cost_lives() {
        let (mut state, mut rng) = empty_state();
        let pos = Vec2::new(50.0, 50.0);
        state.ship.pos = pos;
        let mut shot = bullet_at(pos);
        shot.owner = BulletOwner::Saucer;
        state.bullets.push(shot);

        resolve_collisions(&mut state, &mut rng);

        assert_eq!(state.lives, 3);
        assert_eq!(state.ship.pos, pos);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_game_over_event_once() {
        let (mut state, mut rng) = empty_state();
        state.lives = 1;
        let crash = Vec2::new(100.0, 100.0);
        state.ship.pos = crash;
        state.asteroids.push(Asteroid::new(1, crash, &mut rng));

        resolve_collisions(&mut state, &mut rng);
        assert!(state.is_game_over());
        let overs = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);

        state.events.clear();
        state.ship.pos = crash;
        resolve_collisions(&mut state, &mut rng);
        assert!(!state.events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
    }
}
