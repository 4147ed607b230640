pub mod combatant;
pub mod common;
pub mod trap;
pub mod turn;
pub mod world;

pub use combatant::{EnemyKind, EnemyState, EnemyTemplate, PlayerState};
pub use common::{CellRect, DamageOutcome, Direction, EntityId, Health, Position};
pub use trap::{TrapPattern, TrapPhases, TrapSettings, TrapState};
pub use turn::{TurnPhase, TurnState};
pub use world::{
    BulletState, Occupant, OccupantKind, OccupantSlots, TileMap, TileView, WorldState,
};
