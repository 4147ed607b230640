//! Turn reducer and action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Player
//! commands flow through the pre_validate → apply → post_validate pipeline;
//! phase changes, enemy turns, trap shots and hit point changes are exposed
//! as dedicated methods. Every call reports what happened as [`GameEvent`]s.

mod errors;
mod events;
mod resolve;
mod transition;
mod turns;

pub use errors::{TransitionPhase, TransitionPhaseError};
pub use events::{ArmCause, DamageSource, GameEvent};
pub use turns::next_phase;

use crate::action::{ActionError, PlayerAction};
use crate::env::GameEnv;
use crate::state::GameState;

/// Game engine that owns mutable access to the state for the duration of a call.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Executes a player command.
    ///
    /// Rejects commands after game over, outside the player phases, once the
    /// phase's action has been spent, and when the command does not belong to
    /// the current phase. A successful command spends the phase's action.
    pub fn execute(
        &mut self,
        env: GameEnv<'_>,
        action: &PlayerAction,
    ) -> Result<Vec<GameEvent>, ActionError> {
        self.validate_turn(&env, action)?;

        let mut events = Vec::new();
        transition::execute_transition(action, self.state, &env, &mut events)?;

        self.state.turn.action_consumed = true;
        self.state.turn.nonce += 1;
        tracing::debug!(
            action = %action.kind(),
            nonce = self.state.turn.nonce,
            "player action applied"
        );
        Ok(events)
    }

    fn validate_turn(&self, env: &GameEnv<'_>, action: &PlayerAction) -> Result<(), ActionError> {
        let turn = &self.state.turn;
        if turn.game_over {
            return Err(ActionError::GameOver);
        }
        if !turn.phase.is_player_phase() {
            return Err(ActionError::WrongPhase { phase: turn.phase });
        }
        if turn.action_consumed {
            return Err(ActionError::AlreadyActed { phase: turn.phase });
        }
        if !action.is_allowed_in(turn.phase, env.config()) {
            return Err(ActionError::NotAllowedInPhase {
                action: action.kind(),
                phase: turn.phase,
            });
        }
        Ok(())
    }
}
