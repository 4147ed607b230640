use std::io::Write;

use game_core::{DistanceMetric, EnemyKind, Position, TrapPattern};
use runtime::{RuntimeConfig, RuntimeError, Scenario, TurnSequencer};
use tempfile::NamedTempFile;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

#[test]
fn runtime_config_loads_from_file() {
    let file = write_temp(
        r#"(
            game: (
                player_max_hp: 12,
                distance_metric: Chebyshev,
                split_action_phase: false,
            ),
            pacing: (banner_delay: 0.5, enemy_move_speed: 6.0),
            event_buffer_size: 16,
        )"#,
    );

    let config = RuntimeConfig::load(file.path()).expect("config should load");
    assert_eq!(config.game.player_max_hp, 12);
    assert_eq!(config.game.distance_metric, DistanceMetric::Chebyshev);
    assert!(!config.game.split_action_phase);
    assert_eq!(config.pacing.banner_delay, 0.5);
    assert_eq!(config.pacing.enemy_move_speed, 6.0);
    assert_eq!(config.pacing.trap_step_delay, 0.05);
    assert_eq!(config.event_buffer_size, 16);
}

#[test]
fn missing_config_file_reports_path() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("absent.ron");

    match RuntimeConfig::load(&path) {
        Err(RuntimeError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn scenario_loads_from_file_and_builds() {
    let file = write_temp(
        r########"(
            layout: [
                "#######",
                "#@..o.#",
                "#.....#",
                "#######",
            ],
            geometry: (cell_size: 0.5),
            enemies: [
                (position: (x: 5, y: 1), kind: Diagonal, template: (max_hp: 8)),
            ],
            traps: [
                (position: (x: 3, y: 1), settings: (pattern: Diagonal, interval: 3)),
            ],
        )"########,
    );

    let scenario = Scenario::load(file.path()).expect("scenario should load");
    assert_eq!(scenario.geometry.cell_size, 0.5);

    let seq = TurnSequencer::from_scenario(RuntimeConfig::default(), &scenario)
        .expect("scenario should build");
    let state = seq.state();
    assert_eq!(state.player.position, Position::new(1, 2));
    assert_eq!(state.enemies[0].kind, EnemyKind::Diagonal);
    assert_eq!(state.enemies[0].health.maximum(), 8);
    assert_eq!(state.traps[0].settings.pattern, TrapPattern::Diagonal);
    assert_eq!(state.traps[0].settings.interval, 3);
    assert!(state.occupant_at(Position::new(4, 2)).is_some());
}

#[test]
fn malformed_scenario_is_a_parse_error() {
    let file = write_temp("(layout: [\"@.\"], enemies: [(kind: Diagonal)])");
    let err = Scenario::load(file.path()).unwrap_err();
    assert!(matches!(err, RuntimeError::Parse(_)));
}
