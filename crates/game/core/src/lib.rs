//! Deterministic rules for a grid-based, turn-structured tactics game.
//!
//! `game-core` defines the canonical rules (player commands, enemy behaviour,
//! trap cycles, turn phases) and exposes pure APIs with no clocks or I/O.
//! All state mutation flows through [`engine::GameEngine`]; the runtime crate
//! drives it on a frame clock and turns its events into presentation.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod overlay;
pub mod state;

pub use action::{
    ActionError, ActionKind, ActionTransition, AttackAction, AttackError, ClickMode, MoveAction,
    MoveError, PlayerAction, SearchAction, SearchError, WaitAction,
};
pub use config::{DistanceMetric, GameConfig};
pub use engine::{
    ArmCause, DamageSource, GameEngine, GameEvent, TransitionPhase, TransitionPhaseError,
    next_phase,
};
pub use env::{
    Env, GameEnv, GridGeometry, LayoutError, LayoutMarker, MapDimensions, MapOracle, OracleError,
    StaticMap, StaticTile, TerrainKind,
};
pub use error::{ErrorSeverity, GameError};
pub use overlay::AttackOverlay;
pub use state::{
    BulletState, CellRect, Direction, EnemyKind, EnemyState, EnemyTemplate, EntityId, GameState,
    Health, Occupant, OccupantKind, PlayerState, Position, StateError, TileMap, TileView,
    TrapPattern, TrapPhases, TrapSettings, TrapState, TurnPhase, TurnState, WorldState,
};
