use std::convert::Infallible;

use glam::Vec2;

use drift_shooter::compute::init_state;
use drift_shooter::config::GameConfig;
use drift_shooter::entities::*;
use drift_shooter::render::{draw_world, Sprite, Surface};

#[derive(Debug, PartialEq)]
enum Call {
    Clear,
    Tile(Vec2),
    Sprite(Sprite, Vec2, f32),
}

/// Surface that records every request instead of drawing it.
#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl Recorder {
    fn sprites(&self) -> Vec<(Sprite, f32)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Sprite(s, _, scale) => Some((*s, *scale)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for Recorder {
    type Error = Infallible;

    fn clear(&mut self, _width: f32, _height: f32) -> Result<(), Infallible> {
        self.calls.push(Call::Clear);
        Ok(())
    }

    fn draw_tile(&mut self, pos: Vec2, _edge: f32) -> Result<(), Infallible> {
        self.calls.push(Call::Tile(pos));
        Ok(())
    }

    fn draw_sprite(
        &mut self,
        sprite: Sprite,
        pos: Vec2,
        _angle: f32,
        scale: f32,
    ) -> Result<(), Infallible> {
        self.calls.push(Call::Sprite(sprite, pos, scale));
        Ok(())
    }
}

fn render(state: &WorldState) -> Recorder {
    let mut r = Recorder::default();
    match draw_world(&mut r, state) {
        Ok(()) => r,
        Err(never) => match never {},
    }
}

// ── Background ────────────────────────────────────────────────────────────────

#[test]
fn frame_starts_with_clear_then_tiles() {
    let r = render(&init_state(GameConfig::default()));
    assert_eq!(r.calls[0], Call::Clear);
    assert_eq!(r.calls[1], Call::Tile(Vec2::ZERO));
    let tiles = r.calls.iter().filter(|c| matches!(c, Call::Tile(_))).count();
    // 800 × 600 canvas in 150-unit tiles: 6 columns × 4 rows
    assert_eq!(tiles, 24);
}

// ── Entities ──────────────────────────────────────────────────────────────────

#[test]
fn live_player_drawn_last_at_scale() {
    let r = render(&init_state(GameConfig::default()));
    assert_eq!(r.sprites(), vec![(Sprite::Player, 0.4)]);
    assert!(matches!(r.calls.last(), Some(Call::Sprite(Sprite::Player, _, _))));
}

#[test]
fn dead_player_is_not_drawn() {
    let mut s = init_state(GameConfig::default());
    s.player.alive = false;
    assert!(render(&s).sprites().is_empty());
}

#[test]
fn delayed_particles_stay_hidden() {
    let mut s = init_state(GameConfig::default());
    s.player.alive = false;
    s.particles.push(Particle::new(Vec2::ZERO, 0.1, ParticleStyle::White, 0.8));
    s.particles.push(Particle::new(Vec2::ONE, 0.3, ParticleStyle::Grey, -0.1));

    let sprites = render(&s).sprites();
    assert_eq!(sprites, vec![(Sprite::Particle(ParticleStyle::Grey), 0.3)]);
}

#[test]
fn draw_order_is_particles_bullets_enemies_player() {
    let mut s = init_state(GameConfig::default());
    s.enemies.push(Enemy::new(Vec2::new(10.0, 10.0), 0.2, 20.0));
    s.bullets.push(Bullet::new(Vec2::new(20.0, 20.0), 0.0, 1.0, BulletOwner::Enemy));
    s.particles.push(Particle::new(Vec2::ONE, 0.3, ParticleStyle::Red, -1.0));

    let kinds: Vec<Sprite> = render(&s).sprites().into_iter().map(|(k, _)| k).collect();
    assert_eq!(
        kinds,
        vec![
            Sprite::Particle(ParticleStyle::Red),
            Sprite::Bullet(BulletOwner::Enemy),
            Sprite::Enemy,
            Sprite::Player,
        ]
    );
}

#[test]
fn enemy_uses_player_image_size() {
    let cfg = GameConfig::default();
    assert_eq!(Sprite::Enemy.size(&cfg.sprites), cfg.sprites.player);
    assert_eq!(
        Sprite::Bullet(BulletOwner::Player).size(&cfg.sprites),
        cfg.sprites.bullet
    );
}
