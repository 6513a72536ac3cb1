//! Game configuration.
//!
//! Every field has a default that reproduces the classic tuning, so a TOML
//! file only needs to name the values it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{PLAYER_SCALE, REFERENCE_INTERVAL_MS};
use crate::error::ConfigError;

// ── Sprites ───────────────────────────────────────────────────────────────────

/// Pixel dimensions of one source image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteSize {
    pub width: f32,
    pub height: f32,
}

impl SpriteSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Dimensions of every image the game draws. Sprite centres are derived
/// from these, so they matter to the simulation and not only to drawing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSizes {
    pub background: SpriteSize,
    /// Edge length of one background tile on the canvas.
    pub tile: f32,
    /// Shared by the player and the enemies.
    pub player: SpriteSize,
    pub bullet: SpriteSize,
    /// Shared by the white, grey and red particle images.
    pub particle: SpriteSize,
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self {
            background: SpriteSize::new(150.0, 150.0),
            tile: 150.0,
            player: SpriteSize::new(100.0, 100.0),
            bullet: SpriteSize::new(60.0, 60.0),
            particle: SpriteSize::new(30.0, 30.0),
        }
    }
}

// ── Bursts ────────────────────────────────────────────────────────────────────

/// Shape of one explosion: how many particles, how far they scatter and how
/// large they may start.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BurstConfig {
    pub radius: f32,
    pub max_scale: f32,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstTable {
    /// Player bullet destroys an enemy.
    pub enemy_hit: BurstConfig,
    /// Enemy bullet kills the player.
    pub player_hit: BurstConfig,
    /// Any bullet is destroyed.
    pub bullet_fizzle: BurstConfig,
}

impl Default for BurstTable {
    fn default() -> Self {
        Self {
            enemy_hit: BurstConfig { radius: 10.0, max_scale: 0.5, count: 15 },
            player_hit: BurstConfig { radius: 15.0, max_scale: 0.7, count: 20 },
            bullet_fizzle: BurstConfig { radius: 3.0, max_scale: 0.1, count: 5 },
        }
    }
}

// ── Player & spawner ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub speed: f32,
    pub boost_multiplier: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { speed: 0.5, boost_multiplier: 5.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    /// Delay before the first enemy appears.
    pub first_delay_ms: f32,
    /// Ceiling of the random delay between later spawns.
    pub max_delay_ms: f32,
    pub max_enemies: usize,
    pub enemy_speed: f32,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            first_delay_ms: 2000.0,
            max_delay_ms: 3000.0,
            max_enemies: 20,
            enemy_speed: 0.2,
        }
    }
}

// ── Top level ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    /// Real-time length of one tick.
    pub tick_interval_ms: f32,
    /// Bullet-to-target distance below which a hit is registered.
    pub collision_radius: f32,
    pub player: PlayerConfig,
    pub spawner: SpawnerConfig,
    pub bursts: BurstTable,
    pub sprites: SpriteSizes,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            tick_interval_ms: 1000.0 / 60.0,
            collision_radius: 20.0,
            player: PlayerConfig::default(),
            spawner: SpawnerConfig::default(),
            bursts: BurstTable::default(),
            sprites: SpriteSizes::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Multiplier applied to every per-tick rate.
    pub fn tick_coefficient(&self) -> f32 {
        self.tick_interval_ms / REFERENCE_INTERVAL_MS
    }

    /// Number of whole ticks covering `ms` of real time, never less than one.
    pub fn ms_to_ticks(&self, ms: f32) -> u32 {
        let ticks = (ms / self.tick_interval_ms).ceil();
        if ticks.is_finite() && ticks >= 1.0 {
            ticks as u32
        } else {
            1
        }
    }

    /// Scaled edge lengths of the player (and enemy) sprite.
    pub fn player_extent(&self) -> (f32, f32) {
        (
            self.sprites.player.width * PLAYER_SCALE,
            self.sprites.player.height * PLAYER_SCALE,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (pw, ph) = self.player_extent();
        if !(self.width > pw && self.height > ph) {
            return Err(ConfigError::Invalid(format!(
                "canvas {}x{} must be larger than the player sprite ({}x{})",
                self.width, self.height, pw, ph
            )));
        }
        if !(self.tick_interval_ms > 0.0) {
            return Err(ConfigError::Invalid("tick_interval_ms must be positive".into()));
        }
        if !(self.collision_radius > 0.0) {
            return Err(ConfigError::Invalid("collision_radius must be positive".into()));
        }
        if !(self.player.speed >= 0.0 && self.player.boost_multiplier >= 1.0) {
            return Err(ConfigError::Invalid(
                "player speed must be non-negative and boost_multiplier at least 1".into(),
            ));
        }
        let s = &self.spawner;
        if !(s.first_delay_ms >= 0.0 && s.max_delay_ms >= 0.0 && s.enemy_speed >= 0.0) {
            return Err(ConfigError::Invalid("spawner delays and speed must be non-negative".into()));
        }
        for (name, burst) in [
            ("enemy_hit", &self.bursts.enemy_hit),
            ("player_hit", &self.bursts.player_hit),
            ("bullet_fizzle", &self.bursts.bullet_fizzle),
        ] {
            if !(burst.radius >= 0.0 && burst.max_scale > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "burst {name}: radius must be non-negative and max_scale positive"
                )));
            }
        }
        let sp = &self.sprites;
        let sizes = [sp.background, sp.player, sp.bullet, sp.particle];
        if !(sp.tile > 0.0 && sizes.iter().all(|s| s.width > 0.0 && s.height > 0.0)) {
            return Err(ConfigError::Invalid("sprite dimensions must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg = GameConfig::from_toml_str(
            r#"
            width = 1024.0

            [spawner]
            max_enemies = 5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.width, 1024.0);
        assert_eq!(cfg.height, 600.0);
        assert_eq!(cfg.spawner.max_enemies, 5);
        assert_eq!(cfg.spawner.max_delay_ms, 3000.0);
        assert_eq!(cfg.bursts, BurstTable::default());
    }

    #[test]
    fn rejects_canvas_smaller_than_player() {
        let err = GameConfig::from_toml_str("width = 30.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = GameConfig::from_toml_str("width = = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn ms_to_ticks_rounds_up_and_never_returns_zero() {
        let cfg = GameConfig { tick_interval_ms: 10.0, ..GameConfig::default() };
        assert_eq!(cfg.ms_to_ticks(25.0), 3);
        assert_eq!(cfg.ms_to_ticks(30.0), 3);
        assert_eq!(cfg.ms_to_ticks(0.0), 1);
    }

    #[test]
    fn tick_coefficient_for_sixty_hertz() {
        let cfg = GameConfig::default();
        assert!((cfg.tick_coefficient() - (1000.0 / 60.0) / 7.0).abs() < 1e-6);
    }
}
