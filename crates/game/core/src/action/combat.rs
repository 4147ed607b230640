use crate::combat;
use crate::engine::{ArmCause, GameEvent};
use crate::env::GameEnv;
use crate::state::{EntityId, GameState, OccupantKind, Position};

use super::{ActionTransition, AttackError};

/// Melee strike on an adjacent cell.
///
/// Enemies take the player's attack power. Traps are armed instead and
/// bullets are smashed. A strike on an empty cell is a whiff but still
/// spends the action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction {
    pub target: Position,
}

impl AttackAction {
    pub fn new(target: Position) -> Self {
        Self { target }
    }
}

impl ActionTransition for AttackAction {
    type Error = AttackError;

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        env.map()?;
        let from = state.player.position;
        if from.chebyshev(self.target) != 1 {
            return Err(AttackError::OutOfReach {
                from,
                to: self.target,
            });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), Self::Error> {
        let hit = state.tile_view(env.map()?, self.target).attack_target();
        events.push(GameEvent::PlayerAttacked {
            target: self.target,
            hit,
        });

        match hit.map(|occupant| (occupant.kind, occupant.id)) {
            Some((OccupantKind::Enemy, enemy)) => {
                let power = state.player.attack_power;
                combat::apply_enemy_damage(state, enemy, power, events);
            }
            Some((OccupantKind::Trap, trap)) => {
                combat::arm_trap(state, trap, ArmCause::Strike, events);
            }
            Some((OccupantKind::Bullet, bullet)) => {
                combat::break_bullet(state, bullet, EntityId::PLAYER, events);
            }
            _ => tracing::debug!(target = %self.target, "attack hit nothing"),
        }
        Ok(())
    }
}
