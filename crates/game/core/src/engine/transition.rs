//! Action transition dispatch.

use crate::action::{
    ActionError, ActionTransition, AttackAction, MoveAction, PlayerAction, SearchAction,
    WaitAction,
};
use crate::env::GameEnv;
use crate::state::GameState;

use super::GameEvent;
use super::errors::{TransitionPhase, TransitionPhaseError};

/// Runs a transition through pre_validate, apply and post_validate.
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    env: &GameEnv<'_>,
    events: &mut Vec<GameEvent>,
) -> Result<(), TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    transition
        .apply(state, env, events)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))
}

/// Routes a player command to its transition.
pub(super) fn execute_transition(
    action: &PlayerAction,
    state: &mut GameState,
    env: &GameEnv<'_>,
    events: &mut Vec<GameEvent>,
) -> Result<(), ActionError> {
    match *action {
        PlayerAction::Wait => drive_transition(&WaitAction, state, env, events)
            .map_err(|failure| match failure.error {}),
        PlayerAction::Move { target } => {
            drive_transition(&MoveAction::new(target), state, env, events)
                .map_err(ActionError::Move)
        }
        PlayerAction::Attack { target } => {
            drive_transition(&AttackAction::new(target), state, env, events)
                .map_err(ActionError::Attack)
        }
        PlayerAction::Search { target } => {
            drive_transition(&SearchAction::new(target), state, env, events)
                .map_err(ActionError::Search)
        }
    }
}
