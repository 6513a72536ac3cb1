//! Everything that adds entities on its own schedule: explosion bursts and
//! the enemy spawner.
//!
//! The spawner is a countdown advanced once per tick instead of a real-time
//! timer, so a seeded RNG makes the whole spawn sequence reproducible.

use std::f32::consts::TAU;

use glam::Vec2;
use log::debug;
use rand::Rng;

use crate::config::BurstConfig;
use crate::constants::{BURST_PARTICLE_MAX_SPEED, ENEMY_RELOAD_MAX, ENEMY_RELOAD_MIN};
use crate::entities::{Enemy, Particle, ParticleStyle, WorldState};
use crate::roster::Roster;

// ── Bursts ────────────────────────────────────────────────────────────────────

/// Scatter `burst.count` particles over a disc of `burst.radius` around
/// `center`. Each one drifts outward and starts at a scale in the upper half
/// of `[0, burst.max_scale]`.
pub fn explosion(
    particles: &mut Roster<Particle>,
    center: Vec2,
    burst: &BurstConfig,
    style: ParticleStyle,
    rng: &mut impl Rng,
) {
    let half = burst.max_scale / 2.0;
    for _ in 0..burst.count {
        let outward = rng.gen_range(0.0..TAU);
        // sqrt keeps the points uniform over the disc's area
        let distance = burst.radius * rng.gen::<f32>().sqrt();
        let pos = center + Vec2::new(outward.cos(), outward.sin()) * distance;
        let speed = rng.gen_range(0.0..BURST_PARTICLE_MAX_SPEED);
        let scale = half + rng.gen::<f32>() * half;
        particles.push(Particle::new(pos, scale, style, 0.0).with_motion(outward, speed));
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// A fresh shot countdown in `[ENEMY_RELOAD_MIN, ENEMY_RELOAD_MAX)`.
pub fn reload_countdown(rng: &mut impl Rng) -> f32 {
    rng.gen_range(ENEMY_RELOAD_MIN..ENEMY_RELOAD_MAX)
}

/// Place one enemy at a random point on the canvas, unless the cap is
/// already reached. Returns whether an enemy was added.
pub fn spawn_enemy(state: &mut WorldState, rng: &mut impl Rng) -> bool {
    let spawner = &state.config.spawner;
    if state.enemies.len() >= spawner.max_enemies {
        return false;
    }
    let pos = Vec2::new(
        rng.gen::<f32>() * state.config.width,
        rng.gen::<f32>() * state.config.height,
    );
    let enemy = Enemy::new(pos, spawner.enemy_speed, reload_countdown(rng));
    state.enemies.push(enemy);
    debug!(
        "enemy spawned at ({:.1}, {:.1}); {} alive",
        pos.x,
        pos.y,
        state.enemies.len()
    );
    true
}

/// Count the spawner down by one tick. When it reaches zero, try to spawn and
/// reschedule with a random delay below `max_delay_ms`, whether or not the
/// cap let an enemy through. Returns whether an enemy was added.
pub fn advance_spawner(state: &mut WorldState, rng: &mut impl Rng) -> bool {
    state.spawn_countdown = state.spawn_countdown.saturating_sub(1);
    if state.spawn_countdown > 0 {
        return false;
    }
    let spawned = spawn_enemy(state, rng);
    let delay_ms = rng.gen::<f32>() * state.config.spawner.max_delay_ms;
    state.spawn_countdown = state.config.ms_to_ticks(delay_ms);
    spawned
}
