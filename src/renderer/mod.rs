//! Draw-list export
//!
//! Turns read-only game state into vertex buffers a host renderer can upload
//! as-is. Nothing here draws.

pub mod shapes;
pub mod vertex;

pub use vertex::{Vertex, colors};

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::{EffectKind, GameState, Ship};
use shapes::{circle_outline, ellipse_outline, filled_circle, polygon_outline, rect_outline, segments_for};

/// Angle (radians) between the ship's nose and each rear corner
const SHIP_CORNER_ANGLE: f32 = 2.5;
/// Shield ring sits this far outside the hull
const SHIELD_MARGIN: f32 = 5.0;

/// One frame of geometry
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    /// Colour to clear the frame to before drawing
    pub clear_color: [f32; 4],
    /// Line list: each pair of vertices is a segment
    pub lines: Vec<Vertex>,
    /// Triangle list
    pub triangles: Vec<Vertex>,
}

impl DrawList {
    pub fn line_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lines)
    }

    pub fn triangle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.triangles.is_empty()
    }
}

/// Ship hull corners: nose, then the two rear corners
pub fn ship_triangle(ship: &Ship) -> [Vec2; 3] {
    let corner = |offset: f32| {
        let a = ship.heading.to_radians() + offset;
        ship.pos + Vec2::new(a.cos(), -a.sin()) * ship.radius
    };
    [
        corner(0.0),
        corner(SHIP_CORNER_ANGLE),
        corner(-SHIP_CORNER_ANGLE),
    ]
}

pub fn powerup_color(kind: EffectKind) -> [f32; 4] {
    match kind {
        EffectKind::Shield => colors::POWERUP_SHIELD,
        EffectKind::RapidFire => colors::POWERUP_RAPID_FIRE,
        EffectKind::MultiShot => colors::POWERUP_MULTI_SHOT,
    }
}

/// Build the geometry for everything on screen
pub fn build_draw_list(state: &GameState, settings: &Settings) -> DrawList {
    let mut dl = DrawList {
        clear_color: colors::BACKGROUND,
        ..Default::default()
    };

    if settings.quality.starfield_enabled() {
        for star in &state.starfield.stars {
            dl.triangles
                .extend(filled_circle(star.pos, 1.0, colors::WHITE, 6));
        }
    }

    let ship = &state.ship;
    dl.lines
        .extend(polygon_outline(&ship_triangle(ship), colors::WHITE));
    if ship.shielded() {
        let r = ship.radius + SHIELD_MARGIN;
        dl.lines
            .extend(circle_outline(ship.pos, r, colors::SHIELD, segments_for(r)));
    }

    for asteroid in &state.asteroids {
        let outline: Vec<Vec2> = asteroid.vertices.iter().map(|v| asteroid.pos + *v).collect();
        dl.lines.extend(polygon_outline(&outline, colors::WHITE));
    }

    for bullet in &state.bullets {
        dl.triangles.extend(filled_circle(
            bullet.pos,
            bullet.radius,
            colors::WHITE,
            segments_for(bullet.radius),
        ));
    }

    for saucer in &state.saucers {
        let r = saucer.radius;
        // Flattened hull plus a cabin box on top
        dl.lines.extend(ellipse_outline(
            saucer.pos,
            r,
            r / 2.0,
            colors::WHITE,
            segments_for(r),
        ));
        dl.lines.extend(rect_outline(
            saucer.pos - Vec2::new(r / 2.0, r / 4.0),
            Vec2::new(r, r / 2.0),
            colors::WHITE,
        ));
    }

    for powerup in &state.powerups {
        let segs = segments_for(powerup.radius);
        dl.triangles.extend(filled_circle(
            powerup.pos,
            powerup.radius,
            powerup_color(powerup.kind),
            segs,
        ));
        dl.lines
            .extend(circle_outline(powerup.pos, powerup.radius, colors::WHITE, segs));
    }

    for p in &state.particles.particles {
        dl.triangles
            .extend(filled_circle(p.pos, p.size, p.color, segments_for(p.size)));
    }

    dl
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::QualityPreset;
    use crate::sim::{Bounds, PowerUp, Saucer};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_ship_triangle_nose_follows_heading() {
        let mut ship = Ship::new(Vec2::new(100.0, 100.0));
        ship.heading = 90.0;
        let [nose, ..] = ship_triangle(&ship);
        assert!((nose.x - 100.0).abs() < 1e-4);
        assert!((nose.y - 85.0).abs() < 1e-4);
    }

    #[test]
    fn test_draw_list_covers_entities() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut state = GameState::new(Bounds::default(), &mut rng);
        let plain = build_draw_list(&state, &Settings::from_preset(QualityPreset::Low));

        state.ship.effects.activate(EffectKind::Shield);
        state.saucers.push(Saucer::new(2, Vec2::new(200.0, 200.0), 1.0));
        state
            .powerups
            .push(PowerUp::new(EffectKind::RapidFire, Vec2::new(300.0, 300.0)));
        let busy = build_draw_list(&state, &Settings::from_preset(QualityPreset::Low));

        assert!(busy.lines.len() > plain.lines.len());
        assert!(busy.triangles.len() > plain.triangles.len());
        assert_eq!(busy.lines.len() % 2, 0);
        assert_eq!(busy.triangles.len() % 3, 0);
        assert!(busy.triangles.iter().any(|v| v.color == colors::POWERUP_RAPID_FIRE));
        assert!(busy.lines.iter().any(|v| v.color == colors::SHIELD));
    }

    #[test]
    fn test_starfield_follows_quality() {
        let mut rng = Pcg32::seed_from_u64(4);
        let state = GameState::new(Bounds::default(), &mut rng);
        let low = build_draw_list(&state, &Settings::from_preset(QualityPreset::Low));
        let high = build_draw_list(&state, &Settings::from_preset(QualityPreset::High));
        assert!(high.triangles.len() > low.triangles.len());
        assert_eq!(high.clear_color, colors::BACKGROUND);
        assert_eq!(
            high.triangle_bytes().len(),
            high.triangles.len() * std::mem::size_of::<Vertex>()
        );
    }
}
