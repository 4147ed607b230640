//! Attack-range overlay bookkeeping.
//!
//! The overlay tells the player which cells are threatened next turn: how
//! many enemies could strike each cell, and which armed traps fire through
//! it (as the unit direction from the trap). It is always rebuilt from the
//! current state; nothing is patched incrementally.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::combat;
use crate::env::{GameEnv, OracleError};
use crate::state::{Direction, GameState, Position};

pub type TrapDirections = ArrayVec<Direction, 8>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOverlay {
    enemy_counts: BTreeMap<Position, u8>,
    trap_dirs: BTreeMap<Position, TrapDirections>,
}

impl AttackOverlay {
    pub fn build(state: &GameState, env: &GameEnv<'_>) -> Result<Self, OracleError> {
        let map = env.map()?;
        let mut overlay = Self::default();

        for enemy in &state.enemies {
            for cell in enemy.attack_preview_cells() {
                let count = overlay.enemy_counts.entry(cell).or_insert(0);
                *count = count.saturating_add(1);
            }
        }

        for trap in state.traps.iter().filter(|trap| trap.is_armed()) {
            for cell in combat::attack_cells(trap, state, map) {
                let Some(direction) = Direction::toward(trap.position, cell) else {
                    continue;
                };
                let dirs = overlay.trap_dirs.entry(cell).or_default();
                if !dirs.contains(&direction) && !dirs.is_full() {
                    dirs.push(direction);
                }
            }
        }

        for dirs in overlay.trap_dirs.values_mut() {
            dirs.sort_by_key(|direction| direction.display_rank());
        }

        Ok(overlay)
    }

    pub fn is_empty(&self) -> bool {
        self.enemy_counts.is_empty() && self.trap_dirs.is_empty()
    }

    /// Number of enemies threatening `cell`.
    pub fn enemy_count(&self, cell: Position) -> u8 {
        self.enemy_counts.get(&cell).copied().unwrap_or(0)
    }

    /// Trap directions through `cell`, in display order.
    pub fn trap_directions(&self, cell: Position) -> &[Direction] {
        self.trap_dirs
            .get(&cell)
            .map(|dirs| dirs.as_slice())
            .unwrap_or(&[])
    }

    /// Deepest enemy layer needed to draw every stacked threat.
    pub fn enemy_depth(&self) -> u8 {
        self.enemy_counts.values().copied().max().unwrap_or(0)
    }

    pub fn trap_depth(&self) -> usize {
        self.trap_dirs.values().map(|dirs| dirs.len()).max().unwrap_or(0)
    }

    /// Cells painted on enemy layer `n`: those threatened by more than `n` enemies.
    pub fn enemy_layer(&self, n: u8) -> impl Iterator<Item = Position> + '_ {
        self.enemy_counts
            .iter()
            .filter(move |(_, count)| **count > n)
            .map(|(cell, _)| *cell)
    }

    /// `(cell, direction)` pairs painted on trap layer `n`.
    pub fn trap_layer(&self, n: usize) -> impl Iterator<Item = (Position, Direction)> + '_ {
        self.trap_dirs
            .iter()
            .filter_map(move |(cell, dirs)| dirs.get(n).map(|direction| (*cell, *direction)))
    }
}
