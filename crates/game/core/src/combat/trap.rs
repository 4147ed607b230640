//! Trap ray geometry, victim collection and arming.

use std::collections::BTreeSet;

use crate::engine::{ArmCause, GameEvent};
use crate::env::MapOracle;
use crate::state::{
    CellRect, Direction, EntityId, GameState, Occupant, OccupantKind, Position, TrapState,
};

/// Cells hit by one ray of `trap`, nearest first.
///
/// Walks from the cell next to the trap and stops before the first cell that
/// has a wall, has no floor, or (with `stop_on_trap`) holds another trap.
/// The stop cell is never part of the ray. Walks are bounded by the map span.
pub fn ray_cells<M>(
    trap: &TrapState,
    direction: Direction,
    state: &GameState,
    map: &M,
) -> Vec<Position>
where
    M: MapOracle + ?Sized,
{
    let limit = map.dimensions().span();
    let mut cells = Vec::new();
    let mut cell = trap.position;

    for _ in 0..limit {
        cell = cell.step(direction);
        if !map.has_floor(cell) || map.has_wall(cell) {
            break;
        }
        if trap.settings.stop_on_trap
            && state
                .world
                .tile_map
                .find(&cell, OccupantKind::Trap)
                .is_some_and(|other| other != trap.id)
        {
            break;
        }
        cells.push(cell);
    }
    cells
}

/// Every cell the trap would hit, rays concatenated in pattern order.
pub fn attack_cells<M>(trap: &TrapState, state: &GameState, map: &M) -> Vec<Position>
where
    M: MapOracle + ?Sized,
{
    trap.settings
        .pattern
        .directions()
        .iter()
        .flat_map(|direction| ray_cells(trap, *direction, state, map))
        .collect()
}

/// Damageable occupants standing on `cells`, each listed once in first-hit order.
pub fn collect_victims(state: &GameState, cells: &[Position]) -> Vec<Occupant> {
    let mut seen = BTreeSet::new();
    let mut victims = Vec::new();

    for cell in cells {
        let Some(slots) = state.world.tile_map.occupants(cell) else {
            continue;
        };
        for occupant in slots {
            let damageable = matches!(occupant.kind, OccupantKind::Player | OccupantKind::Enemy);
            if damageable && seen.insert(occupant.id) {
                victims.push(*occupant);
            }
        }
    }
    victims
}

/// Arms a trap. Only the disarmed -> armed edge emits [`GameEvent::TrapArmed`].
pub fn arm_trap(
    state: &mut GameState,
    trap: EntityId,
    cause: ArmCause,
    events: &mut Vec<GameEvent>,
) -> bool {
    let Some(target) = state.trap_mut(trap) else {
        tracing::debug!(%trap, "arm target is not a registered trap");
        return false;
    };
    if !target.arm() {
        return false;
    }
    tracing::debug!(%trap, %cause, "trap armed");
    events.push(GameEvent::TrapArmed { trap, cause });
    true
}

/// Arms every disarmed trap inside `area`. Returns how many were armed.
pub fn trigger_vision(state: &mut GameState, area: CellRect, events: &mut Vec<GameEvent>) -> usize {
    let seen: Vec<EntityId> = state
        .traps
        .iter()
        .filter(|trap| !trap.is_armed() && area.contains(trap.position))
        .map(|trap| trap.id)
        .collect();

    seen.into_iter()
        .filter(|trap| arm_trap(state, *trap, ArmCause::Vision, events))
        .count()
}
