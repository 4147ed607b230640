//! Thrown probes left lying on the floor.

use std::collections::BTreeSet;

use crate::engine::GameEvent;
use crate::state::{EntityId, GameState, Position};

/// Destroys `bullet`, crediting `by`. Returns `false` when it is already gone.
pub fn break_bullet(
    state: &mut GameState,
    bullet: EntityId,
    by: EntityId,
    events: &mut Vec<GameEvent>,
) -> bool {
    let Some(broken) = state.remove_bullet(bullet) else {
        tracing::debug!(%bullet, "bullet already gone");
        return false;
    };
    tracing::debug!(%bullet, position = %broken.position, %by, "bullet broken");
    events.push(GameEvent::BulletBroken {
        bullet,
        position: broken.position,
        by,
    });
    true
}

/// Bullets lying on `cells`, each listed once in first-hit order.
pub fn bullets_on(state: &GameState, cells: &[Position]) -> Vec<EntityId> {
    let mut seen = BTreeSet::new();
    cells
        .iter()
        .filter_map(|cell| state.bullet_at(*cell))
        .filter(|bullet| seen.insert(*bullet))
        .collect()
}
