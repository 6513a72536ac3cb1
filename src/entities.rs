//! All game entity types: pure data, no per-tick logic.
//!
//! Positions are the top-left corner of the entity's sprite on the canvas;
//! headings are radians with 0 pointing right and π/2 pointing down.

use glam::Vec2;

use crate::config::GameConfig;
use crate::roster::{Indexed, Roster};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Terminal: nothing in the simulation brings the player back.
    Dead,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// Which particle image a particle is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleStyle {
    /// Bullet trails.
    White,
    /// Enemy explosions and bullet fizzles.
    Grey,
    /// Player death.
    Red,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bullet {
    pub pos: Vec2,
    pub angle: f32,
    pub speed: f32,
    pub owner: BulletOwner,
    /// Counts down to the next trail particle; a particle is emitted
    /// whenever it is non-positive.
    pub trail_timer: f32,
    index: usize,
}

impl Bullet {
    pub fn new(pos: Vec2, angle: f32, speed: f32, owner: BulletOwner) -> Self {
        Self {
            pos,
            angle,
            speed,
            owner,
            trail_timer: 0.0,
            index: 0,
        }
    }
}

// ── Particles ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub angle: f32,
    pub speed: f32,
    /// Draw scale; the particle dies once this reaches zero.
    pub scale: f32,
    /// Simulated but hidden until this drops below zero.
    pub spawn_delay: f32,
    pub style: ParticleStyle,
    index: usize,
}

impl Particle {
    /// A motionless particle.
    pub fn new(pos: Vec2, scale: f32, style: ParticleStyle, spawn_delay: f32) -> Self {
        Self {
            pos,
            angle: 0.0,
            speed: 0.0,
            scale,
            spawn_delay,
            style,
            index: 0,
        }
    }

    pub fn with_motion(mut self, angle: f32, speed: f32) -> Self {
        self.angle = angle;
        self.speed = speed;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.spawn_delay < 0.0 && self.scale > 0.0
    }
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub pos: Vec2,
    pub angle: f32,
    pub speed: f32,
    /// Counts down to the next shot.
    pub shot_countdown: f32,
    index: usize,
}

impl Enemy {
    pub fn new(pos: Vec2, speed: f32, shot_countdown: f32) -> Self {
        Self {
            pos,
            angle: 0.0,
            speed,
            shot_countdown,
            index: 0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Vec2,
    pub alive: bool,
    /// Base speed, before any boost.
    pub speed: f32,
    /// Ticks of boost left; the boost multiplier applies while non-zero.
    pub boost_ticks: u32,
}

impl Player {
    pub fn is_boosted(&self) -> bool {
        self.boost_ticks > 0
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Held-key and cursor state, as last reported by the input source.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Cursor position in canvas coordinates.
    pub cursor: Vec2,
}

impl InputState {
    pub fn any_direction(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire simulation state. Every simulation operation takes it by
/// `&mut`, so a test can build one by hand and step it without a surface.
#[derive(Clone, Debug)]
pub struct WorldState {
    pub config: GameConfig,
    pub player: Player,
    pub bullets: Roster<Bullet>,
    pub particles: Roster<Particle>,
    pub enemies: Roster<Enemy>,
    pub input: InputState,
    /// Time-dilation coefficient, always within [0.2, 1.0].
    pub time_coef: f32,
    /// Ticks until the spawner next fires.
    pub spawn_countdown: u32,
    pub tick: u64,
    pub kills: u32,
}

impl WorldState {
    pub fn status(&self) -> GameStatus {
        if self.player.alive {
            GameStatus::Playing
        } else {
            GameStatus::Dead
        }
    }
}

// ── Roster plumbing ───────────────────────────────────────────────────────────

macro_rules! impl_indexed {
    ($($ty:ty),*) => {
        $(
            impl Indexed for $ty {
                fn index(&self) -> usize {
                    self.index
                }

                fn set_index(&mut self, index: usize) {
                    self.index = index;
                }
            }
        )*
    };
}

impl_indexed!(Bullet, Particle, Enemy);
