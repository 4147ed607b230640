//! Hit point application.

use crate::engine::{DamageSource, GameEvent};
use crate::state::{EntityId, GameState};

/// Applies `amount` to the player.
///
/// Hits after game over and zero-point hits are dropped. The hit that takes
/// the player to zero latches `turn.game_over` and emits [`GameEvent::GameOver`];
/// that can only happen once per session.
pub fn apply_player_damage(
    state: &mut GameState,
    amount: u32,
    source: DamageSource,
    events: &mut Vec<GameEvent>,
) {
    if state.turn.game_over {
        tracing::debug!(?source, amount, "ignoring damage after game over");
        return;
    }
    if amount == 0 {
        return;
    }

    let outcome = state.player.health.damage(amount);
    events.push(GameEvent::PlayerDamaged {
        source,
        amount: outcome.applied,
        remaining: outcome.remaining,
    });

    if outcome.depleted {
        state.turn.game_over = true;
        tracing::info!(cycle = state.turn.cycle, ?source, "player defeated");
        events.push(GameEvent::GameOver {
            cycle: state.turn.cycle,
        });
    }
}

/// Restores up to `amount` hit points, never above the maximum.
///
/// A defeated player stays defeated: heals after game over are dropped.
pub fn apply_player_heal(state: &mut GameState, amount: u32, events: &mut Vec<GameEvent>) {
    if state.turn.game_over {
        tracing::debug!(amount, "ignoring heal after game over");
        return;
    }
    let gained = state.player.health.heal(amount);
    if gained > 0 {
        events.push(GameEvent::PlayerHealed {
            amount: gained,
            current: state.player.health.current(),
        });
    }
}

/// Applies `amount` to an enemy, removing it from the state when it drops to zero.
///
/// Returns `false` when the enemy is not registered.
pub fn apply_enemy_damage(
    state: &mut GameState,
    enemy: EntityId,
    amount: u32,
    events: &mut Vec<GameEvent>,
) -> bool {
    let Some(target) = state.enemy_mut(enemy) else {
        tracing::debug!(%enemy, "damage target is not a registered enemy");
        return false;
    };
    if amount == 0 {
        return true;
    }

    let outcome = target.health.damage(amount);
    events.push(GameEvent::EnemyDamaged {
        enemy,
        amount: outcome.applied,
        remaining: outcome.remaining,
    });

    if outcome.depleted
        && let Some(dead) = state.remove_enemy(enemy)
    {
        tracing::debug!(%enemy, position = %dead.position, "enemy died");
        events.push(GameEvent::EnemyDied {
            enemy,
            position: dead.position,
        });
    }
    true
}
