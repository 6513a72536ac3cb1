//! Fixed simulation rates.
//!
//! Every per-tick rate below is multiplied by the tick coefficient
//! (`tick_interval_ms / REFERENCE_INTERVAL_MS`) before it is applied.

/// Frame interval, in milliseconds, that a tick coefficient of 1.0 stands for.
pub const REFERENCE_INTERVAL_MS: f32 = 7.0;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_SCALE: f32 = 0.4;
pub const PLAYER_BULLET_SPEED: f32 = 2.0;

/// Real-time length of a boost before the time coefficient stretches it.
pub const BOOST_DURATION_MS: f32 = 50.0;

// ── Time dilation ─────────────────────────────────────────────────────────────

pub const TIME_COEF_FLOOR: f32 = 0.2;
pub const TIME_COEF_CEILING: f32 = 1.0;
pub const TIME_COEF_RATE: f32 = 0.02;

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const ENEMY_SCALE: f32 = 0.4;
pub const ENEMY_BULLET_SPEED: f32 = 1.0;
/// Shot countdown decay per tick.
pub const ENEMY_RELOAD_RATE: f32 = 0.1;
pub const ENEMY_RELOAD_MIN: f32 = 10.0;
pub const ENEMY_RELOAD_MAX: f32 = 30.0;

// ── Bullets ───────────────────────────────────────────────────────────────────

pub const BULLET_SCALE: f32 = 0.1;
/// How far past the canvas edge a bullet may travel before it is destroyed.
pub const BULLET_BOUNDS_MARGIN: f32 = 10.0;
pub const BULLET_TRAIL_RATE: f32 = 0.5;

// ── Particles ─────────────────────────────────────────────────────────────────

pub const PARTICLE_SHRINK_RATE: f32 = 0.002;
pub const PARTICLE_DELAY_RATE: f32 = 0.2;
pub const TRAIL_PARTICLE_SCALE: f32 = 0.1;
pub const TRAIL_PARTICLE_DELAY: f32 = 0.8;
/// Upper bound (exclusive) of a burst particle's outward speed.
pub const BURST_PARTICLE_MAX_SPEED: f32 = 0.2;
