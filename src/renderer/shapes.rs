//! Shape generation for 2D primitives
//!
//! Outlines are emitted as line lists (two vertices per segment), filled
//! shapes as triangle lists.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Closed outline through `points`
pub fn polygon_outline(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }
    let mut vertices = Vec::with_capacity(n * 2);
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        vertices.push(Vertex::new(a.x, a.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
    }
    vertices
}

/// Points around an axis-aligned ellipse
fn ellipse_points(center: Vec2, rx: f32, ry: f32, segments: u32) -> Vec<Vec2> {
    (0..segments)
        .map(|i| {
            let theta = i as f32 / segments as f32 * TAU;
            Vec2::new(center.x + rx * theta.cos(), center.y + ry * theta.sin())
        })
        .collect()
}

pub fn circle_outline(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    polygon_outline(&ellipse_points(center, radius, radius, segments), color)
}

pub fn ellipse_outline(
    center: Vec2,
    rx: f32,
    ry: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    polygon_outline(&ellipse_points(center, rx, ry, segments), color)
}

/// Axis-aligned rectangle outline from its top-left corner
pub fn rect_outline(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let corners = [
        min,
        Vec2::new(min.x + size.x, min.y),
        min + size,
        Vec2::new(min.x, min.y + size.y),
    ];
    polygon_outline(&corners, color)
}

/// Filled circle as a triangle fan unrolled into a triangle list
pub fn filled_circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let rim = ellipse_points(center, radius, radius, segments);
    let mut vertices = Vec::with_capacity(rim.len() * 3);
    for i in 0..rim.len() {
        let a = rim[i];
        let b = rim[(i + 1) % rim.len()];
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(a.x, a.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
    }
    vertices
}

/// Segment count that keeps small circles cheap and big ones round
pub fn segments_for(radius: f32) -> u32 {
    ((radius * 1.5) as u32).clamp(6, 48)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_outline_closes() {
        let pts = [Vec2::ZERO, Vec2::X, Vec2::Y];
        let v = polygon_outline(&pts, [1.0; 4]);
        assert_eq!(v.len(), 6);
        assert_eq!(v[5].position, [0.0, 0.0]);
    }

    #[test]
    fn test_circle_vertices_on_radius() {
        let v = circle_outline(Vec2::new(10.0, 10.0), 5.0, [1.0; 4], 12);
        assert_eq!(v.len(), 24);
        for vert in &v {
            let d = Vec2::from(vert.position).distance(Vec2::new(10.0, 10.0));
            assert!((d - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_filled_circle_triangles() {
        let v = filled_circle(Vec2::ZERO, 2.0, [1.0; 4], 8);
        assert_eq!(v.len(), 24);
    }
}
