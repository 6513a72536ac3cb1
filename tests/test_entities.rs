use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use drift_shooter::compute::init_state;
use drift_shooter::config::{BurstConfig, GameConfig};
use drift_shooter::entities::*;
use drift_shooter::roster::{Indexed, Roster};
use drift_shooter::spawn::{advance_spawner, explosion, spawn_enemy};

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn entity_enums_compare() {
    assert_eq!(BulletOwner::Player, BulletOwner::Player);
    assert_ne!(BulletOwner::Player, BulletOwner::Enemy);
    assert_ne!(ParticleStyle::Grey, ParticleStyle::Red);
    assert_ne!(GameStatus::Playing, GameStatus::Dead);
}

#[test]
fn world_clone_is_independent() {
    let original = init_state(GameConfig::default());
    let mut cloned = original.clone();

    cloned.player.pos.x = 99.0;
    cloned.kills = 7;
    cloned.enemies.push(Enemy::new(Vec2::new(5.0, 5.0), 0.2, 20.0));

    assert_eq!(original.player.pos.x, 400.0);
    assert_eq!(original.kills, 0);
    assert!(original.enemies.is_empty());
}

// ── Reindexing ────────────────────────────────────────────────────────────────

#[test]
fn removing_enemies_reindexes_survivors() {
    let mut enemies: Roster<Enemy> = Roster::new();
    for i in 0..6 {
        enemies.push(Enemy::new(Vec2::new(i as f32, 0.0), 0.2, 20.0));
    }

    enemies.remove(0);
    enemies.remove(2);
    enemies.doom(1);
    enemies.doom(3);
    enemies.sweep();

    let xs: Vec<f32> = enemies.iter().map(|e| e.pos.x).collect();
    assert_eq!(xs, vec![1.0, 4.0]);
    for (i, e) in enemies.iter().enumerate() {
        assert_eq!(e.index(), i);
    }
}

#[test]
fn doomed_bullet_keeps_its_index_until_sweep() {
    let mut bullets: Roster<Bullet> = Roster::new();
    for _ in 0..3 {
        bullets.push(Bullet::new(Vec2::ZERO, 0.0, 1.0, BulletOwner::Player));
    }
    bullets.doom(0);
    assert_eq!(bullets[2].index(), 2);
    bullets.sweep();
    assert_eq!(bullets[1].index(), 1);
    assert_eq!(bullets.len(), 2);
}

// ── Explosions ────────────────────────────────────────────────────────────────

#[test]
fn explosion_spawns_configured_burst() {
    let mut particles: Roster<Particle> = Roster::new();
    let burst = BurstConfig { radius: 15.0, max_scale: 0.7, count: 20 };
    let at = Vec2::new(100.0, 100.0);

    explosion(&mut particles, at, &burst, ParticleStyle::Red, &mut seeded_rng());

    assert_eq!(particles.len(), 20);
    assert!(particles.is_consistent());
    for p in &particles {
        assert_eq!(p.style, ParticleStyle::Red);
        assert!(p.pos.distance(at) <= 15.0 + 1e-4);
        assert!(p.scale >= 0.35 && p.scale <= 0.7);
        assert!(p.speed >= 0.0 && p.speed < 0.2);
        assert_eq!(p.spawn_delay, 0.0);
    }
}

#[test]
fn explosion_appends_after_existing_particles() {
    let mut particles: Roster<Particle> = Roster::new();
    particles.push(Particle::new(Vec2::ZERO, 0.1, ParticleStyle::White, 0.8));
    let burst = BurstConfig { radius: 3.0, max_scale: 0.1, count: 5 };

    explosion(&mut particles, Vec2::ONE, &burst, ParticleStyle::Grey, &mut seeded_rng());

    assert_eq!(particles.len(), 6);
    assert_eq!(particles[0].style, ParticleStyle::White);
    assert!(particles.is_consistent());
}

// ── Spawner ───────────────────────────────────────────────────────────────────

#[test]
fn spawn_enemy_places_enemy_on_canvas() {
    let mut s = init_state(GameConfig::default());
    assert!(spawn_enemy(&mut s, &mut seeded_rng()));
    let e = &s.enemies[0];
    assert!(e.pos.x >= 0.0 && e.pos.x < 800.0);
    assert!(e.pos.y >= 0.0 && e.pos.y < 600.0);
    assert_eq!(e.speed, 0.2);
    assert!((10.0..30.0).contains(&e.shot_countdown));
}

#[test]
fn spawn_enemy_refuses_past_cap() {
    let mut cfg = GameConfig::default();
    cfg.spawner.max_enemies = 2;
    let mut s = init_state(cfg);
    let mut rng = seeded_rng();
    assert!(spawn_enemy(&mut s, &mut rng));
    assert!(spawn_enemy(&mut s, &mut rng));
    assert!(!spawn_enemy(&mut s, &mut rng));
    assert_eq!(s.enemies.len(), 2);
}

#[test]
fn spawner_waits_for_first_delay() {
    let mut s = init_state(GameConfig {
        tick_interval_ms: 7.0,
        ..GameConfig::default()
    });
    let mut rng = seeded_rng();
    for _ in 0..285 {
        assert!(!advance_spawner(&mut s, &mut rng));
    }
    assert!(advance_spawner(&mut s, &mut rng));
    assert_eq!(s.enemies.len(), 1);
    // rescheduled within max_delay_ms (3000 ms / 7 ms, rounded up)
    assert!((1..=429).contains(&s.spawn_countdown));
}

#[test]
fn spawner_never_exceeds_cap() {
    let mut cfg = GameConfig::default();
    cfg.spawner.first_delay_ms = 0.0;
    cfg.spawner.max_delay_ms = 0.0;
    let mut s = init_state(cfg);
    let mut rng = seeded_rng();

    for _ in 0..200 {
        drift_shooter::compute::tick(&mut s, &mut rng);
        assert!(s.enemies.len() <= 20);
    }
    assert_eq!(s.enemies.len(), 20);
}
