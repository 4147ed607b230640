//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from config and scenario loading, scenario validation and
//! player command execution so callers can bubble them up with one type.
use std::path::PathBuf;

use game_core::{ActionError, LayoutError, OracleError, Position, StateError, TerrainKind};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse RON document")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid scenario layout")]
    Layout(#[from] LayoutError),

    #[error("scenario placement rejected")]
    State(#[from] StateError),

    #[error("scenario has no player placement")]
    MissingPlayer,

    #[error("scenario places {count} players")]
    DuplicatePlayer { count: usize },

    #[error("placement at {position} lands on {terrain} terrain")]
    InvalidPlacement {
        position: Position,
        terrain: TerrainKind,
    },

    #[error("player input is locked")]
    InputLocked,

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}
