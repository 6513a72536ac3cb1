use std::io::Write;
use std::path::Path;

use rstest::rstest;
use tempfile::NamedTempFile;

use drift_shooter::config::GameConfig;
use drift_shooter::error::ConfigError;

fn write_config(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn load_reads_toml_file() {
    let file = write_config(
        r#"
        tick_interval_ms = 10.0
        collision_radius = 25.0

        [bursts.enemy_hit]
        radius = 12.0
        max_scale = 0.6
        count = 30
        "#,
    );

    let cfg = GameConfig::load(file.path()).unwrap();

    assert_eq!(cfg.tick_interval_ms, 10.0);
    assert_eq!(cfg.collision_radius, 25.0);
    assert_eq!(cfg.bursts.enemy_hit.count, 30);
    assert_eq!(cfg.bursts.player_hit.count, 20);
}

#[test]
fn load_reports_missing_file() {
    let err = GameConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("/definitely/not/here.toml"));
}

#[rstest]
#[case("tick_interval_ms = 0.0")]
#[case("collision_radius = -1.0")]
#[case("[player]\nboost_multiplier = 0.5")]
#[case("[spawner]\nmax_delay_ms = -5.0")]
#[case("[sprites.player]\nwidth = 0.0\nheight = 10.0")]
fn invalid_values_are_rejected(#[case] text: &str) {
    let err = GameConfig::from_toml_str(text).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "{err}");
}

#[test]
fn empty_file_means_defaults() {
    let file = write_config("");
    assert_eq!(GameConfig::load(file.path()).unwrap(), GameConfig::default());
}
