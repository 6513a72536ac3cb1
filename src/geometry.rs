//! Small vector helpers shared by the simulation and the render pass.

use glam::Vec2;

use crate::config::SpriteSize;

/// Visual centre of a sprite drawn at `pos` (top-left) with `scale`.
pub fn center(pos: Vec2, size: SpriteSize, scale: f32) -> Vec2 {
    pos + Vec2::new(size.width * scale, size.height * scale) / 2.0
}

/// Heading, in radians, of the ray from `from` to `to`.
/// Coincident points yield 0.
pub fn heading(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Displacement for one tick of straight-line travel.
pub fn step(angle: f32, speed: f32, coef: f32) -> Vec2 {
    Vec2::new(speed * angle.cos() * coef, speed * angle.sin() * coef)
}

/// Hit test used by both collision checks.
pub fn within(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance(b) < radius
}
