use std::convert::Infallible;

use crate::engine::GameEvent;
use crate::env::GameEnv;
use crate::state::GameState;

use super::ActionTransition;

/// Ends the current player phase without doing anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaitAction;

impl ActionTransition for WaitAction {
    type Error = Infallible;

    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), Self::Error> {
        events.push(GameEvent::PlayerWaited {
            position: state.player.position,
        });
        Ok(())
    }
}
