use game_core::{
    CellRect, ClickMode, DamageSource, Direction, EnemyKind, EntityId, GameEvent, PlayerAction,
    Position, TurnPhase,
};
use runtime::{
    Event, Pacing, RuntimeConfig, RuntimeError, Scenario, SequencerEvent, Topic, TurnSequencer,
};
use tokio::sync::broadcast;

fn immediate_config() -> RuntimeConfig {
    RuntimeConfig {
        pacing: Pacing::immediate(),
        ..RuntimeConfig::default()
    }
}

fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn game_events(events: &[Event]) -> Vec<GameEvent> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Game(game) => Some(game.clone()),
            _ => None,
        })
        .collect()
}

/// Passes both player phases and lets the enemy turn run out.
fn wait_through_round(seq: &mut TurnSequencer) {
    seq.submit(PlayerAction::Wait).expect("wait in move phase");
    seq.tick(0.0).unwrap();
    seq.submit(PlayerAction::Wait).expect("wait in action phase");
    seq.tick(0.0).unwrap();
    assert_eq!(seq.phase(), TurnPhase::PlayerMove);
}

/// Adjacent enemy strikes instead of stepping.
///
/// Player at (0,0), orthogonal enemy at (1,0). After the player passes both
/// player phases the enemy attacks once for its fixed damage and stays put.
#[test]
fn adjacent_enemy_attacks_without_moving() {
    let scenario = Scenario::from_ron(
        r#"(
            layout: ["....", "...."],
            player: Some((x: 0, y: 0)),
            enemies: [(position: (x: 1, y: 0), kind: Orthogonal)],
        )"#,
    )
    .expect("scenario should parse");

    let mut seq = TurnSequencer::from_scenario(immediate_config(), &scenario)
        .expect("sequencer should build");
    let mut combat = seq.bus().subscribe(Topic::Combat).expect("combat topic");
    let enemy = seq.state().enemies[0].id;

    // ================================================================
    // Player phases: wait through move and action
    // ================================================================
    seq.tick(0.0).unwrap();
    assert_eq!(seq.phase(), TurnPhase::PlayerMove);
    seq.submit(PlayerAction::Wait).expect("wait in move phase");
    seq.tick(0.0).unwrap();
    assert_eq!(seq.phase(), TurnPhase::PlayerAction);
    seq.submit(PlayerAction::Wait).expect("wait in action phase");

    // ================================================================
    // Enemy turn runs to completion within one tick
    // ================================================================
    seq.tick(0.0).unwrap();
    assert_eq!(seq.phase(), TurnPhase::PlayerMove);
    assert_eq!(seq.state().turn.cycle, 2);

    let events = game_events(&drain(&mut combat));
    let attack = events
        .iter()
        .position(|event| matches!(event, GameEvent::EnemyAttacked { .. }))
        .expect("enemy should attack");
    assert_eq!(
        events[attack],
        GameEvent::EnemyAttacked {
            enemy,
            target: Position::ORIGIN
        }
    );
    assert_eq!(
        events[attack + 1],
        GameEvent::PlayerDamaged {
            source: DamageSource::Enemy(enemy),
            amount: 1,
            remaining: 19
        }
    );
    assert!(
        !events
            .iter()
            .any(|event| matches!(event, GameEvent::EnemyMoved { .. }))
    );
    assert_eq!(seq.state().enemies[0].position, Position::new(1, 0));
}

/// Distant enemy closes in one greedy step per enemy turn.
#[test]
fn distant_enemy_steps_toward_player() {
    let scenario = Scenario::from_ron(
        r#"(
            layout: ["@...."],
            enemies: [(position: (x: 4, y: 0))],
        )"#,
    )
    .expect("scenario should parse");
    let mut seq = TurnSequencer::from_scenario(immediate_config(), &scenario).unwrap();

    seq.tick(0.0).unwrap();
    seq.submit(PlayerAction::Wait).unwrap();
    seq.tick(0.0).unwrap();
    seq.submit(PlayerAction::Wait).unwrap();
    seq.tick(0.0).unwrap();

    assert_eq!(seq.state().enemies[0].position, Position::new(3, 0));
    assert_eq!(seq.state().player.health.current(), 20);
}

/// Search arms a trap by vision; the trap fires on the enemy turn and
/// disarms afterwards.
#[test]
fn searched_trap_fires_on_enemy_turn() {
    let scenario = Scenario::from_ron(
        r#"(
            layout: ["@...."],
            traps: [(position: (x: 2, y: 0))],
        )"#,
    )
    .expect("scenario should parse");
    let mut seq = TurnSequencer::from_scenario(immediate_config(), &scenario).unwrap();
    let mut combat = seq.bus().subscribe(Topic::Combat).unwrap();
    let trap = seq.state().traps[0].id;

    seq.tick(0.0).unwrap();
    seq.submit(PlayerAction::Wait).unwrap();
    seq.tick(0.0).unwrap();

    let events = seq
        .submit(PlayerAction::Search {
            target: Position::new(2, 0),
        })
        .expect("search should apply");
    assert!(events.iter().any(|event| matches!(
        event,
        GameEvent::TrapArmed { trap: armed, .. } if *armed == trap
    )));
    assert_eq!(
        seq.overlay().trap_directions(Position::new(1, 0)),
        &[Direction::LEFT]
    );

    seq.tick(0.0).unwrap();
    assert_eq!(seq.phase(), TurnPhase::PlayerMove);

    let fired = game_events(&drain(&mut combat))
        .into_iter()
        .find_map(|event| match event {
            GameEvent::TrapFired { trap: id, victims, .. } if id == trap => Some(victims),
            _ => None,
        })
        .expect("trap should fire");
    assert_eq!(fired, vec![EntityId::PLAYER]);
    assert_eq!(seq.state().player.health.current(), 18);
    assert!(!seq.state().traps[0].is_armed());
    assert!(seq.overlay().is_empty());
}

/// Diagonal enemies only strike diagonally adjacent cells.
#[test]
fn diagonal_enemy_ignores_orthogonal_neighbour() {
    let scenario = Scenario::from_ron(
        r#"(
            layout: ["...", "@.."],
            enemies: [(position: (x: 1, y: 0), kind: Diagonal)],
        )"#,
    )
    .unwrap();
    let mut seq = TurnSequencer::from_scenario(immediate_config(), &scenario).unwrap();
    assert_eq!(seq.state().enemies[0].kind, EnemyKind::Diagonal);

    seq.tick(0.0).unwrap();
    seq.submit(PlayerAction::Wait).unwrap();
    seq.tick(0.0).unwrap();
    seq.submit(PlayerAction::Wait).unwrap();
    seq.tick(0.0).unwrap();

    assert_eq!(seq.state().player.health.current(), 20);
}

/// Turn-topic subscribers see the lock/unlock rhythm and the game-over
/// notice only after its hold.
#[test]
fn turn_topic_reports_game_over_after_hold() {
    let scenario = Scenario::from_ron(
        r#"(
            layout: ["@."],
            enemies: [(position: (x: 1, y: 0), template: (attack_power: 50))],
        )"#,
    )
    .unwrap();
    let config = RuntimeConfig {
        game: game_core::GameConfig::merged_turns(),
        pacing: Pacing {
            game_over_delay: 0.8,
            ..Pacing::immediate()
        },
        ..RuntimeConfig::default()
    };
    let mut seq = TurnSequencer::from_scenario(config, &scenario).unwrap();
    let mut turn = seq.bus().subscribe(Topic::Turn).unwrap();

    seq.tick(0.0).unwrap();
    seq.submit(PlayerAction::Wait).unwrap();
    seq.tick(0.0).unwrap();
    assert!(seq.is_game_over());
    assert!(!seq.is_game_over_shown());

    seq.tick(0.5).unwrap();
    assert!(!seq.is_game_over_shown());
    seq.tick(0.31).unwrap();
    assert!(seq.is_game_over_shown());

    let events = drain(&mut turn);
    assert!(events.iter().any(|event| matches!(
        event,
        Event::Sequencer(SequencerEvent::InputUnlocked {
            phase: TurnPhase::PlayerMove
        })
    )));
    assert!(
        events
            .iter()
            .any(|event| matches!(event, Event::Game(GameEvent::GameOver { .. })))
    );
    assert!(matches!(
        events.last(),
        Some(Event::Sequencer(SequencerEvent::GameOverShown { cycle: 1 }))
    ));
}

/// Clicks far outside the map never panic: a far move is rejected without
/// side effects and a far search lands on the map edge.
#[test]
fn off_map_clicks_degrade_to_no_ops() {
    let scenario = Scenario::from_ron(r#"(layout: ["@..."])"#).unwrap();
    let mut seq = TurnSequencer::from_scenario(immediate_config(), &scenario).unwrap();
    seq.tick(0.0).unwrap();

    let err = seq
        .click_world(-1.0e12, 4.0e9, ClickMode::Attack)
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Action(_)));
    assert!(!seq.is_input_locked());
    assert!(seq.is_idle());
    assert_eq!(seq.state().player.position, Position::ORIGIN);

    seq.submit(PlayerAction::Wait).unwrap();
    seq.tick(0.0).unwrap();
    assert_eq!(seq.phase(), TurnPhase::PlayerAction);

    let events = seq
        .click_world(3.0e9, 0.5, ClickMode::Search)
        .expect("far search should still land");
    assert!(matches!(
        events.first(),
        Some(GameEvent::SearchLanded { landed, .. }) if *landed == Position::new(3, 0)
    ));
    assert!(seq.state().bullet_at(Position::new(3, 0)).is_some());
}

/// An interval-3 trap fires, sits out its countdown even when re-armed, and
/// stays quiet at zero until something arms it again.
#[test]
fn interval_trap_reloads_and_waits_for_rearming() {
    let scenario = Scenario::from_ron(
        r#"(
            layout: ["@...."],
            traps: [(position: (x: 2, y: 0), settings: (interval: 3))],
        )"#,
    )
    .unwrap();
    let mut seq = TurnSequencer::from_scenario(immediate_config(), &scenario).unwrap();
    let trap = seq.state().traps[0].id;
    let vision = CellRect::around(Position::new(2, 0), 1);
    let trap_state = |seq: &TurnSequencer| {
        let state = seq.state().trap(trap).expect("trap stays registered");
        (state.is_armed(), state.turns_until_fire())
    };
    let hp = |seq: &TurnSequencer| seq.state().player.health.current();

    seq.tick(0.0).unwrap();
    seq.trigger_vision(vision).unwrap();

    // ================================================================
    // Round 1: armed with no countdown, fires and reloads
    // ================================================================
    wait_through_round(&mut seq);
    assert_eq!(hp(&seq), 18);
    assert_eq!(trap_state(&seq), (false, 2));

    // ================================================================
    // Round 2: re-armed at once, but the countdown still runs
    // ================================================================
    seq.trigger_vision(vision).unwrap();
    wait_through_round(&mut seq);
    assert_eq!(hp(&seq), 18);
    assert_eq!(trap_state(&seq), (true, 1));

    // ================================================================
    // Round 3: countdown reaches zero while armed
    // ================================================================
    wait_through_round(&mut seq);
    assert_eq!(hp(&seq), 16);
    assert_eq!(trap_state(&seq), (false, 2));

    // ================================================================
    // Rounds 4-6: left disarmed, it counts down and then holds fire
    // ================================================================
    for _ in 0..3 {
        wait_through_round(&mut seq);
    }
    assert_eq!(hp(&seq), 16);
    assert_eq!(trap_state(&seq), (false, 0));

    // ================================================================
    // Round 7: armed again, fires on the next enemy turn
    // ================================================================
    seq.trigger_vision(vision).unwrap();
    wait_through_round(&mut seq);
    assert_eq!(hp(&seq), 14);
    assert_eq!(trap_state(&seq), (false, 2));
    assert_eq!(seq.state().turn.cycle, 8);
}

/// An enemy next to a resting search bullet breaks it instead of advancing.
#[test]
fn enemy_breaks_bullet_left_by_search() {
    let scenario = Scenario::from_ron(
        r#"(
            layout: ["@....."],
            enemies: [(position: (x: 5, y: 0))],
        )"#,
    )
    .unwrap();
    let mut seq = TurnSequencer::from_scenario(immediate_config(), &scenario).unwrap();
    let mut combat = seq.bus().subscribe(Topic::Combat).unwrap();
    let enemy = seq.state().enemies[0].id;

    seq.tick(0.0).unwrap();
    seq.submit(PlayerAction::Wait).unwrap();
    seq.tick(0.0).unwrap();
    seq.submit(PlayerAction::Search {
        target: Position::new(4, 0),
    })
    .unwrap();
    let bullet = seq
        .state()
        .bullet_at(Position::new(4, 0))
        .expect("bullet should rest on its landing cell");

    seq.tick(0.0).unwrap();
    assert_eq!(seq.phase(), TurnPhase::PlayerMove);
    assert!(game_events(&drain(&mut combat)).contains(&GameEvent::BulletBroken {
        bullet,
        position: Position::new(4, 0),
        by: enemy
    }));
    assert_eq!(seq.state().enemies[0].position, Position::new(5, 0));
    assert!(seq.state().bullets.is_empty());
}
