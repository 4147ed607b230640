use crate::config::GameConfig;
use crate::state::TurnPhase;

use super::{GameEngine, GameEvent};

/// Phase that follows `current` under `config`.
///
/// Split flow: `PlayerMove -> PlayerAction -> EnemyTurn -> PlayerMove`.
/// Merged flow: `PlayerMove -> EnemyTurn -> PlayerMove`.
pub fn next_phase(current: TurnPhase, config: &GameConfig) -> TurnPhase {
    match current {
        TurnPhase::PlayerMove if config.split_action_phase => TurnPhase::PlayerAction,
        TurnPhase::PlayerMove | TurnPhase::PlayerAction => TurnPhase::EnemyTurn,
        TurnPhase::EnemyTurn => TurnPhase::PlayerMove,
    }
}

/// Phase bookkeeping methods for GameEngine.
impl<'a> GameEngine<'a> {
    pub fn phase(&self) -> TurnPhase {
        self.state.turn.phase
    }

    /// Switches to `next`.
    ///
    /// Every trap active on `next` counts down one step. Entering
    /// `PlayerMove` clears the player's action flag and, except on the very
    /// first entry, starts a new round.
    pub fn enter_phase(&mut self, next: TurnPhase) -> Vec<GameEvent> {
        if self.state.turn.game_over {
            tracing::debug!(phase = %next, "phase change ignored after game over");
            return Vec::new();
        }

        let turn = &mut self.state.turn;
        turn.phase = next;
        turn.action_consumed = false;
        if next == TurnPhase::PlayerMove {
            if turn.started {
                turn.cycle += 1;
            }
            turn.started = true;
        }
        let cycle = turn.cycle;

        for trap in self.state.traps.iter_mut() {
            if trap.on_turn_advanced(next) {
                tracing::trace!(trap = %trap.id, remaining = trap.turns_until_fire(), "trap countdown");
            }
        }

        tracing::info!(phase = %next, cycle, "phase entered");
        vec![GameEvent::PhaseEntered { phase: next, cycle }]
    }

    /// Enters whichever phase follows the current one.
    pub fn advance_phase(&mut self, config: &GameConfig) -> Vec<GameEvent> {
        let next = next_phase(self.state.turn.phase, config);
        self.enter_phase(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{GameState, Position, TrapSettings};

    #[test]
    fn split_and_merged_cycles() {
        let split = GameConfig::default();
        assert_eq!(next_phase(TurnPhase::PlayerMove, &split), TurnPhase::PlayerAction);
        assert_eq!(next_phase(TurnPhase::PlayerAction, &split), TurnPhase::EnemyTurn);
        assert_eq!(next_phase(TurnPhase::EnemyTurn, &split), TurnPhase::PlayerMove);

        let merged = GameConfig::merged_turns();
        assert_eq!(next_phase(TurnPhase::PlayerMove, &merged), TurnPhase::EnemyTurn);
        assert_eq!(next_phase(TurnPhase::EnemyTurn, &merged), TurnPhase::PlayerMove);
    }

    #[test]
    fn cycle_counts_player_move_entries_after_the_first() {
        let config = GameConfig::default();
        let mut state = GameState::with_player(Position::ORIGIN, &config);
        let mut engine = GameEngine::new(&mut state);

        engine.enter_phase(TurnPhase::PlayerMove);
        assert_eq!(engine.state().turn.cycle, 1);

        engine.advance_phase(&config);
        engine.advance_phase(&config);
        let events = engine.advance_phase(&config);
        assert_eq!(
            events,
            vec![GameEvent::PhaseEntered {
                phase: TurnPhase::PlayerMove,
                cycle: 2
            }]
        );
    }

    #[test]
    fn entering_player_move_resets_action_flag() {
        let config = GameConfig::default();
        let mut state = GameState::with_player(Position::ORIGIN, &config);
        state.turn.action_consumed = true;
        let mut engine = GameEngine::new(&mut state);
        engine.enter_phase(TurnPhase::PlayerMove);
        assert!(!engine.state().turn.action_consumed);
    }

    #[test]
    fn traps_count_down_only_on_their_phases() {
        let config = GameConfig::default();
        let mut state = GameState::with_player(Position::ORIGIN, &config);
        let id = state
            .add_trap(
                Position::new(3, 3),
                TrapSettings {
                    initial_offset: 2,
                    ..TrapSettings::default()
                },
            )
            .unwrap();
        let mut engine = GameEngine::new(&mut state);

        engine.enter_phase(TurnPhase::PlayerMove);
        engine.enter_phase(TurnPhase::PlayerAction);
        assert_eq!(engine.state().trap(id).unwrap().turns_until_fire(), 2);

        engine.enter_phase(TurnPhase::EnemyTurn);
        assert_eq!(engine.state().trap(id).unwrap().turns_until_fire(), 1);
    }

    #[test]
    fn no_phase_changes_after_game_over() {
        let config = GameConfig::default();
        let mut state = GameState::with_player(Position::ORIGIN, &config);
        state.turn.game_over = true;
        let mut engine = GameEngine::new(&mut state);

        assert!(engine.enter_phase(TurnPhase::EnemyTurn).is_empty());
        assert_eq!(engine.phase(), TurnPhase::PlayerMove);
    }
}
