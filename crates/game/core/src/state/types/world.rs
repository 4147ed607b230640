use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::env::{MapOracle, TerrainKind};

use super::{EntityId, Position};

/// Layer an occupant lives on, mirroring the engine's collision layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum OccupantKind {
    Player,
    Enemy,
    Trap,
    /// Static blocker placed on a floor cell (crates, pillars, ...).
    Obstacle,
    /// Search probe resting where it landed.
    Bullet,
}

impl OccupantKind {
    /// Whether a melee strike on this occupant does something.
    pub fn is_attackable(self) -> bool {
        matches!(
            self,
            OccupantKind::Enemy | OccupantKind::Trap | OccupantKind::Bullet
        )
    }

    /// Whether the player is kept off a cell holding this occupant.
    pub fn blocks_player(self) -> bool {
        self != OccupantKind::Bullet
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occupant {
    pub id: EntityId,
    pub kind: OccupantKind,
}

impl Occupant {
    pub const fn new(id: EntityId, kind: OccupantKind) -> Self {
        Self { id, kind }
    }
}

pub type OccupantSlots = ArrayVec<Occupant, { GameConfig::MAX_OCCUPANTS_PER_TILE }>;

/// A thrown search probe lying on the floor.
///
/// Enemies cannot step onto it and break it instead when it lies in one of
/// their step directions. Trap rays and player strikes destroy it too.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BulletState {
    pub id: EntityId,
    pub position: Position,
}

/// Aggregated world-level state layered on top of the static map.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    pub tile_map: TileMap,
}

impl WorldState {
    pub fn new(tile_map: TileMap) -> Self {
        Self { tile_map }
    }

    /// Produces a merged view combining static terrain with dynamic occupants.
    pub fn tile_view<M>(&self, map: &M, position: Position) -> TileView
    where
        M: MapOracle + ?Sized,
    {
        TileView {
            position,
            terrain: map.terrain(position),
            occupants: self
                .tile_map
                .occupants(&position)
                .cloned()
                .unwrap_or_default(),
        }
    }
}

/// Occupancy index keyed by cell.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileMap {
    occupancy: BTreeMap<Position, OccupantSlots>,
}

impl TileMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn occupancy(&self) -> &BTreeMap<Position, OccupantSlots> {
        &self.occupancy
    }

    pub fn occupants(&self, position: &Position) -> Option<&OccupantSlots> {
        self.occupancy.get(position)
    }

    pub fn is_occupied(&self, position: &Position) -> bool {
        self.occupancy.contains_key(position)
    }

    /// First occupant of `kind` at `position`, if any.
    pub fn find(&self, position: &Position, kind: OccupantKind) -> Option<EntityId> {
        self.occupancy
            .get(position)?
            .iter()
            .find(|occupant| occupant.kind == kind)
            .map(|occupant| occupant.id)
    }

    pub fn add_occupant(&mut self, position: Position, occupant: Occupant) -> bool {
        let slot = self.occupancy.entry(position).or_default();
        if slot.iter().any(|existing| existing.id == occupant.id) {
            return true;
        }

        slot.try_push(occupant).is_ok()
    }

    pub fn remove_occupant(&mut self, position: &Position, entity: EntityId) -> bool {
        let Some(slot) = self.occupancy.get_mut(position) else {
            return false;
        };
        let Some(index) = slot.iter().position(|occupant| occupant.id == entity) else {
            return false;
        };
        slot.remove(index);
        if slot.is_empty() {
            self.occupancy.remove(position);
        }
        true
    }

    /// Moves `entity` between cells, restoring the origin if the destination is full.
    pub fn relocate(&mut self, from: Position, to: Position, occupant: Occupant) -> bool {
        if !self.remove_occupant(&from, occupant.id) {
            return false;
        }
        if !self.add_occupant(to, occupant) {
            let _ = self.add_occupant(from, occupant);
            return false;
        }
        true
    }
}

/// Aggregated cell information used by reducers and commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileView {
    position: Position,
    terrain: TerrainKind,
    occupants: OccupantSlots,
}

impl TileView {
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn terrain(&self) -> TerrainKind {
        self.terrain
    }

    pub fn occupants(&self) -> impl Iterator<Item = Occupant> + '_ {
        self.occupants.iter().copied()
    }

    pub fn is_occupied(&self) -> bool {
        !self.occupants.is_empty()
    }

    pub fn has_floor(&self) -> bool {
        self.terrain.has_floor()
    }

    pub fn has_wall(&self) -> bool {
        self.terrain.has_wall()
    }

    /// Floor, no wall, nobody standing there.
    pub fn is_enterable(&self) -> bool {
        self.has_floor() && !self.has_wall() && !self.is_occupied()
    }

    /// First occupant that keeps the player out, if any.
    pub fn player_blocker(&self) -> Option<Occupant> {
        self.occupants
            .iter()
            .find(|occupant| occupant.kind.blocks_player())
            .copied()
    }

    /// First attackable occupant, ranked enemy, trap, bullet.
    pub fn attack_target(&self) -> Option<Occupant> {
        self.occupants
            .iter()
            .filter(|occupant| occupant.kind.is_attackable())
            .min_by_key(|occupant| occupant.kind)
            .copied()
    }
}
