//! Game-logic functions.
//!
//! Every public function takes the `WorldState` by `&mut` (and, where needed,
//! an RNG handle).  Side effects are limited to that state and the injected
//! RNG, so a seeded RNG gives a fully reproducible run.
//!
//! Destruction inside a tick only dooms entities; all three rosters are swept
//! once at the end of `tick`.

use glam::Vec2;
use log::{debug, info};
use rand::Rng;

use crate::config::GameConfig;
use crate::constants::{
    BOOST_DURATION_MS, BULLET_BOUNDS_MARGIN, BULLET_SCALE, BULLET_TRAIL_RATE, ENEMY_BULLET_SPEED,
    ENEMY_RELOAD_RATE, ENEMY_SCALE, PARTICLE_DELAY_RATE, PARTICLE_SHRINK_RATE,
    PLAYER_BULLET_SPEED, PLAYER_SCALE, TIME_COEF_CEILING, TIME_COEF_FLOOR, TIME_COEF_RATE,
    TRAIL_PARTICLE_DELAY, TRAIL_PARTICLE_SCALE,
};
use crate::entities::{
    Bullet, BulletOwner, InputState, Particle, ParticleStyle, Player, WorldState,
};
use crate::geometry::{center, heading, step, within};
use crate::roster::{Indexed, Roster};
use crate::spawn::{advance_spawner, explosion, reload_countdown};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial world: player in the middle of the canvas, no enemies,
/// first spawn scheduled `first_delay_ms` out.
pub fn init_state(config: GameConfig) -> WorldState {
    let spawn_countdown = config.ms_to_ticks(config.spawner.first_delay_ms);
    WorldState {
        player: Player {
            pos: Vec2::new(config.width / 2.0, config.height / 2.0),
            alive: true,
            speed: config.player.speed,
            boost_ticks: 0,
        },
        bullets: Roster::new(),
        particles: Roster::new(),
        enemies: Roster::new(),
        input: InputState::default(),
        time_coef: TIME_COEF_CEILING,
        spawn_countdown,
        tick: 0,
        kills: 0,
        config,
    }
}

// ── Centres & headings ───────────────────────────────────────────────────────

pub fn player_center(state: &WorldState) -> Vec2 {
    center(state.player.pos, state.config.sprites.player, PLAYER_SCALE)
}

/// Enemies are drawn with the player's image.
pub fn enemy_center(state: &WorldState, pos: Vec2) -> Vec2 {
    center(pos, state.config.sprites.player, ENEMY_SCALE)
}

pub fn bullet_center(state: &WorldState, pos: Vec2) -> Vec2 {
    center(pos, state.config.sprites.bullet, BULLET_SCALE)
}

/// Direction the player sprite faces: toward the cursor.
pub fn player_facing(state: &WorldState) -> f32 {
    heading(player_center(state), state.input.cursor)
}

// ── Input-driven transitions ─────────────────────────────────────────────────

/// Fire a bullet from the player's centre toward the cursor.
/// Returns `false` (and does nothing) once the player is dead.
pub fn player_shoot(state: &mut WorldState) -> bool {
    if !state.player.alive {
        return false;
    }
    let angle = player_facing(state);
    let muzzle = player_center(state);
    state
        .bullets
        .push(Bullet::new(muzzle, angle, PLAYER_BULLET_SPEED, BulletOwner::Player));
    true
}

/// Start (or restart) the speed boost. Its length is stretched by the
/// current time-dilation coefficient, so a boost lasts longer when idle.
pub fn press_boost(state: &mut WorldState) {
    let ms = BOOST_DURATION_MS / state.time_coef;
    state.player.boost_ticks = state.config.ms_to_ticks(ms);
    debug!("boost for {} ticks", state.player.boost_ticks);
}

// ── Player locomotion & time dilation ────────────────────────────────────────

/// Move the living player along every held direction, clamped so the sprite
/// stays on the canvas.
pub fn move_player(state: &mut WorldState) {
    if !state.player.alive {
        return;
    }
    let cfg = &state.config;
    let boost = if state.player.is_boosted() {
        cfg.player.boost_multiplier
    } else {
        1.0
    };
    let distance = state.player.speed * boost * cfg.tick_coefficient() * state.time_coef;

    let input = &state.input;
    let mut delta = Vec2::ZERO;
    if input.up {
        delta.y -= distance;
    }
    if input.down {
        delta.y += distance;
    }
    if input.left {
        delta.x -= distance;
    }
    if input.right {
        delta.x += distance;
    }

    let (pw, ph) = cfg.player_extent();
    let max = Vec2::new(cfg.width - pw, cfg.height - ph);
    state.player.pos = (state.player.pos + delta).clamp(Vec2::ZERO, max);
}

/// Ease the time coefficient toward 1 while moving and toward the floor when
/// idle. Pinned to 1 once the player is dead.
pub fn update_time_dilation(state: &mut WorldState) {
    let delta = TIME_COEF_RATE * state.config.tick_coefficient() * state.time_coef;
    if state.input.any_direction() {
        if state.time_coef < TIME_COEF_CEILING {
            state.time_coef += delta;
        }
    } else if state.time_coef > TIME_COEF_FLOOR {
        state.time_coef -= delta;
    }

    if !state.player.alive {
        state.time_coef = TIME_COEF_CEILING;
    }
    state.time_coef = state.time_coef.clamp(TIME_COEF_FLOOR, TIME_COEF_CEILING);
}

// ── Per-entity updates ───────────────────────────────────────────────────────

pub fn update_particle(state: &mut WorldState, index: usize) {
    let coef = state.config.tick_coefficient();
    let Some(p) = state.particles.get_mut(index) else {
        return;
    };
    if p.spawn_delay >= 0.0 {
        p.spawn_delay -= PARTICLE_DELAY_RATE * coef;
    }
    p.scale -= PARTICLE_SHRINK_RATE * coef;
    p.pos += step(p.angle, p.speed, coef);

    if p.scale <= 0.0 {
        p.scale = 0.0;
        state.particles.doom(index);
    }
}

pub fn update_bullet(state: &mut WorldState, index: usize, rng: &mut impl Rng) {
    let coef = state.config.tick_coefficient();
    let (width, height) = (state.config.width, state.config.height);
    let Some(b) = state.bullets.get_mut(index) else {
        return;
    };
    b.pos += step(b.angle, b.speed, coef);
    let pos = b.pos;

    let emit_trail = b.trail_timer <= 0.0;
    if emit_trail {
        b.trail_timer = 1.0;
    }
    b.trail_timer -= BULLET_TRAIL_RATE * coef;

    if emit_trail {
        let at = bullet_center(state, pos);
        state.particles.push(Particle::new(
            at,
            TRAIL_PARTICLE_SCALE,
            ParticleStyle::White,
            TRAIL_PARTICLE_DELAY,
        ));
    }

    let m = BULLET_BOUNDS_MARGIN;
    if pos.x < -m || pos.x > width + m || pos.y < -m || pos.y > height + m {
        destroy_bullet(state, index, rng);
    }
}

/// Turn toward the player, advance, and fire when the shot countdown runs out.
pub fn update_enemy(state: &mut WorldState, index: usize, rng: &mut impl Rng) {
    let coef = state.config.tick_coefficient();
    let target = player_center(state);
    let Some(pos) = state.enemies.get(index).map(|e| e.pos) else {
        return;
    };
    let from = enemy_center(state, pos);

    let Some(e) = state.enemies.get_mut(index) else {
        return;
    };
    e.angle = heading(from, target);
    e.pos += step(e.angle, e.speed, coef);
    e.shot_countdown -= ENEMY_RELOAD_RATE * coef;

    if e.shot_countdown <= 0.0 {
        e.shot_countdown = reload_countdown(rng);
        let (angle, pos) = (e.angle, e.pos);
        let muzzle = enemy_center(state, pos);
        state
            .bullets
            .push(Bullet::new(muzzle, angle, ENEMY_BULLET_SPEED, BulletOwner::Enemy));
    }
}

/// Doom a bullet and leave a small fizzle where it was.
/// Returns `false` if the bullet was already doomed.
pub fn destroy_bullet(state: &mut WorldState, index: usize, rng: &mut impl Rng) -> bool {
    let Some(pos) = state.bullets.get(index).map(|b| b.pos) else {
        return false;
    };
    if !state.bullets.doom(index) {
        return false;
    }
    let at = bullet_center(state, pos);
    let burst = state.config.bursts.bullet_fizzle;
    explosion(&mut state.particles, at, &burst, ParticleStyle::Grey, rng);
    true
}

// ── Collisions ────────────────────────────────────────────────────────────────

/// Player bullets vs enemies. Each enemy takes the first live player bullet
/// in range; the pair is destroyed and a burst marks the enemy's centre.
/// Returns the number of enemies destroyed.
pub fn resolve_enemy_hits(state: &mut WorldState, rng: &mut impl Rng) -> u32 {
    let radius = state.config.collision_radius;
    let mut destroyed = 0;

    for ei in 0..state.enemies.len() {
        if state.enemies.is_doomed(ei) {
            continue;
        }
        let target = enemy_center(state, state.enemies[ei].pos);
        let hit = (0..state.bullets.len()).find(|&bi| {
            let b = &state.bullets[bi];
            !state.bullets.is_doomed(bi)
                && b.owner == BulletOwner::Player
                && within(b.pos, target, radius)
        });
        let Some(bi) = hit else {
            continue;
        };

        state.enemies.doom(ei);
        let burst = state.config.bursts.enemy_hit;
        explosion(&mut state.particles, target, &burst, ParticleStyle::Grey, rng);
        destroy_bullet(state, bi, rng);
        state.kills += 1;
        destroyed += 1;
        debug!("enemy {} destroyed by bullet {}", ei, bi);
    }

    destroyed
}

/// Enemy bullets vs the living player. A single hit is fatal; the bullet is
/// left in flight. Returns whether the player died this call.
pub fn resolve_player_hits(state: &mut WorldState, rng: &mut impl Rng) -> bool {
    if !state.player.alive {
        return false;
    }
    let target = player_center(state);
    let radius = state.config.collision_radius;
    let hit = state.bullets.iter().any(|b| {
        !state.bullets.is_doomed(b.index())
            && b.owner == BulletOwner::Enemy
            && within(b.pos, target, radius)
    });
    if !hit {
        return false;
    }

    let burst = state.config.bursts.player_hit;
    explosion(&mut state.particles, target, &burst, ParticleStyle::Red, rng);
    state.player.alive = false;
    state.time_coef = TIME_COEF_CEILING;
    info!(
        "player killed on tick {} after destroying {} enemies",
        state.tick, state.kills
    );
    true
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one tick.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
pub fn tick(state: &mut WorldState, rng: &mut impl Rng) {
    state.tick += 1;

    // ── 1. Player & time dilation ────────────────────────────────────────────
    move_player(state);
    update_time_dilation(state);
    state.player.boost_ticks = state.player.boost_ticks.saturating_sub(1);

    // ── 2. Entities (spawned entities wait for the next tick) ────────────────
    for i in 0..state.particles.len() {
        update_particle(state, i);
    }
    for i in 0..state.bullets.len() {
        update_bullet(state, i, rng);
    }
    for i in 0..state.enemies.len() {
        update_enemy(state, i, rng);
    }

    // ── 3. Collisions ────────────────────────────────────────────────────────
    resolve_enemy_hits(state, rng);
    resolve_player_hits(state, rng);

    // ── 4. Spawner ───────────────────────────────────────────────────────────
    advance_spawner(state, rng);

    // ── 5. Compact ───────────────────────────────────────────────────────────
    state.particles.sweep();
    state.bullets.sweep();
    state.enemies.sweep();
}
