use crate::engine::GameEvent;
use crate::env::GameEnv;
use crate::state::{EntityId, GameState, Occupant, OccupantKind, Position};

use super::{ActionTransition, MoveError};

/// Player step onto one of the eight neighbouring cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub target: Position,
}

impl MoveAction {
    pub fn new(target: Position) -> Self {
        Self { target }
    }
}

impl ActionTransition for MoveAction {
    type Error = MoveError;

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let from = state.player.position;
        if from.chebyshev(self.target) != 1 {
            return Err(MoveError::OutOfReach {
                from,
                to: self.target,
            });
        }

        let view = state.tile_view(env.map()?, self.target);
        if view.has_wall() {
            return Err(MoveError::Blocked(self.target));
        }
        if !view.has_floor() {
            return Err(MoveError::NoFloor(self.target));
        }
        if let Some(occupant) = view.player_blocker() {
            return Err(MoveError::Occupied {
                position: self.target,
                occupant: occupant.id,
            });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), Self::Error> {
        let from = state.player.position;
        let player = Occupant::new(EntityId::PLAYER, OccupantKind::Player);
        if !state.world.tile_map.relocate(from, self.target, player) {
            return Err(MoveError::OccupancyDesync(self.target));
        }
        state.player.position = self.target;
        events.push(GameEvent::PlayerMoved {
            from,
            to: self.target,
        });
        Ok(())
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let arrived = state
            .world
            .tile_map
            .find(&self.target, OccupantKind::Player)
            .is_some();
        if state.player.position != self.target || !arrived {
            return Err(MoveError::OccupancyDesync(self.target));
        }
        Ok(())
    }
}
