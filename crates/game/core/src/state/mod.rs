//! Authoritative game state representation.
//!
//! This module owns the data structures that describe combatants, traps,
//! turn bookkeeping and cell occupancy. Runtime layers clone or query this
//! state but mutate it exclusively through the engine.
mod error;
pub mod types;

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::env::MapOracle;

pub use error::StateError;
pub use types::{
    BulletState, CellRect, DamageOutcome, Direction, EnemyKind, EnemyState, EnemyTemplate,
    EntityId, Health, Occupant, OccupantKind, OccupantSlots, PlayerState, Position, TileMap,
    TileView, TrapPattern, TrapPhases, TrapSettings, TrapState, TurnPhase, TurnState, WorldState,
};

pub type EnemyRoster = ArrayVec<EnemyState, { GameConfig::MAX_ENEMIES }>;
pub type TrapRoster = ArrayVec<TrapState, { GameConfig::MAX_TRAPS }>;
pub type BulletRoster = ArrayVec<BulletState, { GameConfig::MAX_BULLETS }>;

/// Canonical snapshot of the deterministic game state.
///
/// Enemies and traps are kept in registration order; the sequencer iterates
/// them in that order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Sequential entity ID allocator. IDs are never reused; 0 is the player.
    next_entity_id: u32,

    pub turn: TurnState,
    pub player: PlayerState,
    pub enemies: EnemyRoster,
    pub traps: TrapRoster,
    pub bullets: BulletRoster,
    pub world: WorldState,
}

impl GameState {
    /// Creates a state holding only the player.
    pub fn new(player: PlayerState) -> Self {
        let mut world = WorldState::default();
        world.tile_map.add_occupant(
            player.position,
            Occupant::new(EntityId::PLAYER, OccupantKind::Player),
        );

        Self {
            next_entity_id: 1,
            turn: TurnState::default(),
            player,
            enemies: ArrayVec::new(),
            traps: ArrayVec::new(),
            bullets: ArrayVec::new(),
            world,
        }
    }

    /// Player at `position` with stats from `config`.
    pub fn with_player(position: Position, config: &GameConfig) -> Self {
        Self::new(PlayerState::new(
            position,
            config.player_max_hp,
            config.player_attack_power,
        ))
    }

    /// Returns a merged view combining static terrain with runtime occupants.
    pub fn tile_view<M>(&self, map: &M, position: Position) -> TileView
    where
        M: MapOracle + ?Sized,
    {
        self.world.tile_view(map, position)
    }

    /// Whether a combatant could step onto `position`.
    pub fn can_enter<M>(&self, map: &M, position: Position) -> bool
    where
        M: MapOracle + ?Sized,
    {
        self.tile_view(map, position).is_enterable()
    }

    pub fn is_game_over(&self) -> bool {
        self.turn.game_over
    }

    fn allocate_entity_id(&mut self) -> Result<EntityId, StateError> {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id = self
            .next_entity_id
            .checked_add(1)
            .ok_or(StateError::IdsExhausted)?;
        Ok(id)
    }

    fn claim_cell(&mut self, position: Position, occupant: Occupant) -> Result<(), StateError> {
        if let Some(existing) = self.occupant_at(position) {
            return Err(StateError::CellTaken {
                position,
                occupant: existing.id,
            });
        }
        if !self.world.tile_map.add_occupant(position, occupant) {
            return Err(StateError::CellFull { position });
        }
        Ok(())
    }

    /// Registers an enemy at the end of the roster.
    pub fn add_enemy(
        &mut self,
        position: Position,
        kind: EnemyKind,
        template: EnemyTemplate,
    ) -> Result<EntityId, StateError> {
        if self.enemies.is_full() {
            return Err(StateError::EnemiesFull {
                capacity: GameConfig::MAX_ENEMIES,
            });
        }
        let id = self.allocate_entity_id()?;
        self.claim_cell(position, Occupant::new(id, OccupantKind::Enemy))?;
        self.enemies
            .push(EnemyState::new(id, position, kind, template));
        Ok(id)
    }

    /// Registers a trap at the end of the roster, with its cycle reset.
    pub fn add_trap(
        &mut self,
        position: Position,
        settings: TrapSettings,
    ) -> Result<EntityId, StateError> {
        if self.traps.is_full() {
            return Err(StateError::TrapsFull {
                capacity: GameConfig::MAX_TRAPS,
            });
        }
        let id = self.allocate_entity_id()?;
        self.claim_cell(position, Occupant::new(id, OccupantKind::Trap))?;
        self.traps.push(TrapState::new(id, position, settings));
        Ok(id)
    }

    /// Places a static blocker on a cell.
    pub fn add_obstacle(&mut self, position: Position) -> Result<EntityId, StateError> {
        let id = self.allocate_entity_id()?;
        self.claim_cell(position, Occupant::new(id, OccupantKind::Obstacle))?;
        Ok(id)
    }

    /// Drops a bullet on `position`, sharing the cell with whoever stands there.
    ///
    /// A cell holds at most one bullet; landing on an existing one returns
    /// its id.
    pub fn add_bullet(&mut self, position: Position) -> Result<EntityId, StateError> {
        if let Some(existing) = self.world.tile_map.find(&position, OccupantKind::Bullet) {
            return Ok(existing);
        }
        if self.bullets.is_full() {
            return Err(StateError::BulletsFull {
                capacity: GameConfig::MAX_BULLETS,
            });
        }
        let id = self.allocate_entity_id()?;
        if !self
            .world
            .tile_map
            .add_occupant(position, Occupant::new(id, OccupantKind::Bullet))
        {
            return Err(StateError::CellFull { position });
        }
        self.bullets.push(BulletState { id, position });
        Ok(id)
    }

    pub fn remove_bullet(&mut self, id: EntityId) -> Option<BulletState> {
        let index = self.bullets.iter().position(|bullet| bullet.id == id)?;
        let bullet = self.bullets.remove(index);
        self.world.tile_map.remove_occupant(&bullet.position, id);
        Some(bullet)
    }

    /// Unregisters an enemy and frees its cell. Order of the others is kept.
    pub fn remove_enemy(&mut self, id: EntityId) -> Option<EnemyState> {
        let index = self.enemies.iter().position(|enemy| enemy.id == id)?;
        let enemy = self.enemies.remove(index);
        self.world.tile_map.remove_occupant(&enemy.position, id);
        Some(enemy)
    }

    /// Unregisters a trap and frees its cell.
    pub fn remove_trap(&mut self, id: EntityId) -> Option<TrapState> {
        let index = self.traps.iter().position(|trap| trap.id == id)?;
        let trap = self.traps.remove(index);
        self.world.tile_map.remove_occupant(&trap.position, id);
        Some(trap)
    }

    pub fn enemy(&self, id: EntityId) -> Option<&EnemyState> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut EnemyState> {
        self.enemies.iter_mut().find(|enemy| enemy.id == id)
    }

    pub fn trap(&self, id: EntityId) -> Option<&TrapState> {
        self.traps.iter().find(|trap| trap.id == id)
    }

    pub fn trap_mut(&mut self, id: EntityId) -> Option<&mut TrapState> {
        self.traps.iter_mut().find(|trap| trap.id == id)
    }

    pub fn bullet_at(&self, position: Position) -> Option<EntityId> {
        self.world.tile_map.find(&position, OccupantKind::Bullet)
    }

    /// First occupant registered on `position`.
    pub fn occupant_at(&self, position: Position) -> Option<Occupant> {
        self.world
            .tile_map
            .occupants(&position)
            .and_then(|slots| slots.first().copied())
    }

    /// Registration-order snapshot of enemy ids.
    pub fn enemy_ids(&self) -> Vec<EntityId> {
        self.enemies.iter().map(|enemy| enemy.id).collect()
    }

    /// Registration-order snapshot of trap ids.
    pub fn trap_ids(&self) -> Vec<EntityId> {
        self.traps.iter().map(|trap| trap.id).collect()
    }
}
