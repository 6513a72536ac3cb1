//! Draw pass: turns a `WorldState` into draw requests on a `Surface`.
//!
//! No game logic happens here; the simulation never calls into this module.

use glam::Vec2;

use crate::compute::player_facing;
use crate::config::{SpriteSize, SpriteSizes};
use crate::constants::{BULLET_SCALE, ENEMY_SCALE, PLAYER_SCALE};
use crate::entities::{BulletOwner, ParticleStyle, WorldState};

/// The images a surface is asked to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Player,
    /// Drawn with the player's image.
    Enemy,
    Bullet(BulletOwner),
    Particle(ParticleStyle),
}

impl Sprite {
    /// Unscaled pixel size of the image behind this sprite.
    pub fn size(self, sizes: &SpriteSizes) -> SpriteSize {
        match self {
            Sprite::Player | Sprite::Enemy => sizes.player,
            Sprite::Bullet(_) => sizes.bullet,
            Sprite::Particle(_) => sizes.particle,
        }
    }
}

/// Anything that can show a frame.
pub trait Surface {
    type Error;

    /// Start a new frame covering a `width` × `height` canvas.
    fn clear(&mut self, width: f32, height: f32) -> Result<(), Self::Error>;

    /// One background tile with its top-left corner at `pos`.
    fn draw_tile(&mut self, pos: Vec2, edge: f32) -> Result<(), Self::Error>;

    /// `sprite` with its top-left corner at `pos`, rotated by `angle` about
    /// its centre and scaled by `scale`.
    fn draw_sprite(
        &mut self,
        sprite: Sprite,
        pos: Vec2,
        angle: f32,
        scale: f32,
    ) -> Result<(), Self::Error>;
}

/// Draw one frame: background tiles, visible particles, bullets, enemies,
/// then the player if still alive.
pub fn draw_world<S: Surface>(surface: &mut S, state: &WorldState) -> Result<(), S::Error> {
    let cfg = &state.config;
    surface.clear(cfg.width, cfg.height)?;

    let edge = cfg.sprites.tile;
    let mut x = 0.0;
    while x < cfg.width {
        let mut y = 0.0;
        while y < cfg.height {
            surface.draw_tile(Vec2::new(x, y), edge)?;
            y += edge;
        }
        x += edge;
    }

    for p in state.particles.iter().filter(|p| p.is_visible()) {
        surface.draw_sprite(Sprite::Particle(p.style), p.pos, 0.0, p.scale)?;
    }
    for b in &state.bullets {
        surface.draw_sprite(Sprite::Bullet(b.owner), b.pos, b.angle, BULLET_SCALE)?;
    }
    for e in &state.enemies {
        surface.draw_sprite(Sprite::Enemy, e.pos, e.angle, ENEMY_SCALE)?;
    }
    if state.player.alive {
        surface.draw_sprite(
            Sprite::Player,
            state.player.pos,
            player_facing(state),
            PLAYER_SCALE,
        )?;
    }
    Ok(())
}
