//! Frame-driven turn sequencer.
//!
//! [`TurnSequencer`] owns the authoritative [`GameState`] and drives
//! [`GameEngine`] on an external clock. Work that has to be spread over time
//! (banner holds, enemy moves, trap shots, the game-over hold) sits in a step
//! queue that [`TurnSequencer::tick`] drains as time passes. Every outcome is
//! published to the [`EventBus`].

mod step;

use std::collections::VecDeque;

use game_core::{
    AttackOverlay, CellRect, ClickMode, EntityId, Env, GameConfig, GameEngine, GameEnv,
    GameError, GameEvent, GameState, GridGeometry, PlayerAction, Position, StaticMap, TurnPhase,
    next_phase,
};

use crate::api::{Result, RuntimeError};
use crate::config::RuntimeConfig;
use crate::events::{Event, EventBus, SequencerEvent};
use crate::scenario::Scenario;

use step::Step;

fn game_env<'a>(map: &'a StaticMap, config: &'a GameConfig) -> GameEnv<'a> {
    Env::with_map(map, config).into_game_env()
}

/// Turn state machine driven by `tick(dt)`.
///
/// Input is locked while a phase switch, a player command's follow-up or the
/// enemy turn is running. Once the player's health is depleted all queued
/// work is dropped and only [`TurnSequencer::restart`] has any effect.
pub struct TurnSequencer {
    config: RuntimeConfig,
    geometry: GridGeometry,
    map: StaticMap,
    initial: GameState,
    state: GameState,
    overlay: AttackOverlay,
    bus: EventBus,
    steps: VecDeque<Step>,
    input_locked: bool,
    advancing: bool,
    game_over_scheduled: bool,
    game_over_shown: bool,
}

impl TurnSequencer {
    /// Creates a sequencer and queues the first `PlayerMove` entry.
    pub fn new(
        config: RuntimeConfig,
        map: StaticMap,
        state: GameState,
        geometry: GridGeometry,
    ) -> Result<Self> {
        let bus = EventBus::with_capacity(config.event_buffer_size);
        let overlay = AttackOverlay::build(&state, &game_env(&map, &config.game))?;

        let mut sequencer = Self {
            config,
            geometry,
            map,
            initial: state.clone(),
            state,
            overlay,
            bus,
            steps: VecDeque::new(),
            input_locked: true,
            advancing: false,
            game_over_scheduled: false,
            game_over_shown: false,
        };
        sequencer.begin_phase_switch(TurnPhase::PlayerMove);
        Ok(sequencer)
    }

    pub fn from_scenario(config: RuntimeConfig, scenario: &Scenario) -> Result<Self> {
        let (map, state) = scenario.build(&config.game)?;
        Self::new(config, map, state, scenario.geometry)
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn map(&self) -> &StaticMap {
        &self.map
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Attack ranges as of the last refresh.
    pub fn overlay(&self) -> &AttackOverlay {
        &self.overlay
    }

    pub fn phase(&self) -> TurnPhase {
        self.state.turn.phase
    }

    pub fn is_input_locked(&self) -> bool {
        self.input_locked
    }

    pub fn is_advancing(&self) -> bool {
        self.advancing
    }

    /// No queued work remains.
    pub fn is_idle(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn is_game_over_shown(&self) -> bool {
        self.game_over_shown
    }

    /// Moves on to the next phase after the banner delay.
    ///
    /// Ignored while a phase switch or other queued work is in flight, and
    /// after game over. Returns whether the request was taken.
    pub fn request_next_phase(&mut self) -> bool {
        if self.advancing || self.game_over_scheduled || self.state.is_game_over() {
            tracing::debug!(advancing = self.advancing, "next phase request ignored");
            return false;
        }
        if !self.steps.is_empty() {
            tracing::debug!(queued = self.steps.len(), "next phase request ignored while busy");
            return false;
        }
        let next = next_phase(self.state.turn.phase, &self.config.game);
        self.begin_phase_switch(next);
        true
    }

    /// Executes a player command.
    ///
    /// On success the input locks, and once the command's pacing delay has
    /// elapsed the phase advances.
    pub fn submit(&mut self, action: PlayerAction) -> Result<Vec<GameEvent>> {
        if self.input_locked {
            tracing::debug!(action = %action.kind(), "player command while input is locked");
            return Err(RuntimeError::InputLocked);
        }

        let env = game_env(&self.map, &self.config.game);
        let events = match GameEngine::new(&mut self.state).execute(env, &action) {
            Ok(events) => events,
            Err(error) => {
                let severity = error.severity();
                if severity.is_internal() {
                    tracing::warn!(code = error.error_code(), %error, "player command failed");
                } else {
                    tracing::debug!(
                        code = error.error_code(),
                        severity = severity.as_str(),
                        %error,
                        "player command rejected"
                    );
                }
                return Err(error.into());
            }
        };
        self.publish(&events)?;

        self.lock_input();
        let delay = self.config.pacing.after_player(&action);
        self.steps.push_back(Step::Wait(delay));
        self.steps.push_back(Step::Advance);
        Ok(events)
    }

    /// Resolves a click on `target` into a command and submits it.
    pub fn click(&mut self, target: Position, mode: ClickMode) -> Result<Vec<GameEvent>> {
        let action = PlayerAction::from_click(&self.state, &self.config.game, target, mode);
        self.submit(action)
    }

    /// Like [`TurnSequencer::click`], with the target given in world space.
    pub fn click_world(&mut self, x: f32, y: f32, mode: ClickMode) -> Result<Vec<GameEvent>> {
        let target = self.geometry.world_to_cell(x, y);
        self.click(target, mode)
    }

    /// Arms every disarmed trap inside `area`. Ignored after game over.
    pub fn trigger_vision(&mut self, area: CellRect) -> Result<Vec<GameEvent>> {
        if self.state.is_game_over() {
            tracing::debug!("vision trigger ignored after game over");
            return Ok(Vec::new());
        }
        let events = GameEngine::new(&mut self.state).trigger_vision(area);
        self.publish(&events)?;
        Ok(events)
    }

    /// Restores the initial state and queues a fresh first `PlayerMove`.
    pub fn restart(&mut self) -> Result<()> {
        self.state = self.initial.clone();
        self.steps.clear();
        self.advancing = false;
        self.game_over_scheduled = false;
        self.game_over_shown = false;
        self.input_locked = true;

        tracing::info!("sequencer restarted");
        self.bus.publish(Event::Sequencer(SequencerEvent::Restarted));
        self.refresh_overlay()?;
        self.begin_phase_switch(TurnPhase::PlayerMove);
        Ok(())
    }

    /// Advances the clock by `dt` seconds and runs every step that falls due.
    pub fn tick(&mut self, dt: f32) -> Result<()> {
        let mut budget = dt.max(0.0);
        loop {
            self.check_game_over();
            let Some(step) = self.steps.pop_front() else {
                break;
            };
            match step {
                Step::Wait(remaining) => {
                    let remaining = remaining.max(0.0);
                    if remaining > budget {
                        self.steps.push_front(Step::Wait(remaining - budget));
                        break;
                    }
                    budget -= remaining;
                }
                step => self.run_step(step)?,
            }
        }
        Ok(())
    }

    fn run_step(&mut self, step: Step) -> Result<()> {
        match step {
            Step::Wait(_) => {}
            Step::EnterPhase(next) => self.enter_phase(next)?,
            Step::Advance => {
                let next = next_phase(self.state.turn.phase, &self.config.game);
                self.begin_phase_switch(next);
            }
            Step::RunEnemy(enemy) => self.run_enemy(enemy)?,
            Step::BeginTraps => {
                for trap in self.state.trap_ids().into_iter().rev() {
                    self.steps.push_front(Step::RunTrap(trap));
                }
            }
            Step::RunTrap(trap) => self.run_trap(trap)?,
            Step::ShowGameOver => {
                self.game_over_shown = true;
                let cycle = self.state.turn.cycle;
                tracing::info!(cycle, "game over shown");
                self.bus
                    .publish(Event::Sequencer(SequencerEvent::GameOverShown { cycle }));
            }
        }
        Ok(())
    }

    fn begin_phase_switch(&mut self, next: TurnPhase) {
        self.advancing = true;
        self.lock_input();
        self.steps.push_back(Step::Wait(self.config.pacing.banner_delay));
        self.steps.push_back(Step::EnterPhase(next));
    }

    fn enter_phase(&mut self, next: TurnPhase) -> Result<()> {
        let events = GameEngine::new(&mut self.state).enter_phase(next);
        self.bus.publish_all(events);
        self.advancing = false;

        match next {
            TurnPhase::PlayerMove => {
                self.refresh_overlay()?;
                self.unlock_input(next);
            }
            TurnPhase::PlayerAction => self.unlock_input(next),
            TurnPhase::EnemyTurn => self.schedule_enemy_turn(),
        }
        Ok(())
    }

    fn schedule_enemy_turn(&mut self) {
        let pacing = &self.config.pacing;
        let enemies = self.state.enemy_ids();
        tracing::debug!(enemies = enemies.len(), "enemy turn scheduled");

        self.steps.extend(enemies.into_iter().map(Step::RunEnemy));
        self.steps.push_back(Step::Wait(pacing.enemy_to_trap_delay));
        self.steps.push_back(Step::BeginTraps);
        self.steps.push_back(Step::Wait(pacing.after_traps_delay));
        self.steps.push_back(Step::Advance);
    }

    fn run_enemy(&mut self, enemy: EntityId) -> Result<()> {
        let env = game_env(&self.map, &self.config.game);
        let events = GameEngine::new(&mut self.state).run_enemy(env, enemy)?;
        if events.is_empty() {
            return Ok(());
        }

        let pacing = &self.config.pacing;
        let duration = events
            .iter()
            .map(|event| match *event {
                GameEvent::EnemyAttacked { .. } | GameEvent::BulletBroken { .. } => {
                    pacing.enemy_attack_duration
                }
                GameEvent::EnemyMoved { from, to, .. } => {
                    pacing.enemy_move_duration(self.geometry.world_distance(from, to))
                }
                _ => 0.0,
            })
            .fold(0.0_f32, f32::max);

        self.publish(&events)?;
        if duration > 0.0 {
            self.steps.push_front(Step::Wait(duration));
        }
        Ok(())
    }

    fn run_trap(&mut self, trap: EntityId) -> Result<()> {
        let env = game_env(&self.map, &self.config.game);
        let phase = self.state.turn.phase;
        let events = GameEngine::new(&mut self.state).run_trap(env, trap, phase)?;
        if events.is_empty() {
            return Ok(());
        }

        self.publish(&events)?;
        self.steps
            .push_front(Step::Wait(self.config.pacing.trap_step_delay));
        Ok(())
    }

    /// Drops all queued work once the game is lost and queues the
    /// game-over hold in its place.
    fn check_game_over(&mut self) {
        if self.game_over_scheduled || !self.state.is_game_over() {
            return;
        }
        self.game_over_scheduled = true;
        self.steps.clear();
        self.advancing = false;
        self.lock_input();

        tracing::info!(cycle = self.state.turn.cycle, "game over; halting sequencer");
        self.steps
            .push_back(Step::Wait(self.config.pacing.game_over_delay));
        self.steps.push_back(Step::ShowGameOver);
    }

    /// Publishes core events and refreshes the overlay when one of them
    /// changes attack ranges.
    fn publish(&mut self, events: &[GameEvent]) -> Result<()> {
        self.bus.publish_all(events.iter().cloned());
        if events.iter().any(GameEvent::affects_overlay) {
            self.refresh_overlay()?;
        }
        Ok(())
    }

    fn refresh_overlay(&mut self) -> Result<()> {
        let env = game_env(&self.map, &self.config.game);
        self.overlay = AttackOverlay::build(&self.state, &env)?;
        self.bus.publish(Event::Overlay(self.overlay.clone()));
        Ok(())
    }

    fn lock_input(&mut self) {
        if !self.input_locked {
            self.input_locked = true;
            self.bus.publish(Event::Sequencer(SequencerEvent::InputLocked));
        }
    }

    fn unlock_input(&mut self, phase: TurnPhase) {
        self.input_locked = false;
        self.bus
            .publish(Event::Sequencer(SequencerEvent::InputUnlocked { phase }));
    }
}
