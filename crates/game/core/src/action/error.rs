//! Player command errors.

use crate::engine::TransitionPhaseError;
use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Position, TurnPhase};

use super::ActionKind;

/// Gatekeeping and per-command failures surfaced by [`crate::GameEngine::execute`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("the game is over")]
    GameOver,

    #[error("player commands are not accepted during {phase}")]
    WrongPhase { phase: TurnPhase },

    #[error("{action} is not allowed during {phase}")]
    NotAllowedInPhase { action: ActionKind, phase: TurnPhase },

    #[error("the {phase} action was already used")]
    AlreadyActed { phase: TurnPhase },

    #[error("move failed: {0}")]
    Move(TransitionPhaseError<MoveError>),

    #[error("attack failed: {0}")]
    Attack(TransitionPhaseError<AttackError>),

    #[error("search failed: {0}")]
    Search(TransitionPhaseError<SearchError>),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ActionError::GameOver => ErrorSeverity::Fatal,
            ActionError::WrongPhase { .. }
            | ActionError::NotAllowedInPhase { .. }
            | ActionError::AlreadyActed { .. } => ErrorSeverity::Validation,
            ActionError::Move(inner) => inner.error.severity(),
            ActionError::Attack(inner) => inner.error.severity(),
            ActionError::Search(inner) => inner.error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ActionError::GameOver => "ACTION_GAME_OVER",
            ActionError::WrongPhase { .. } => "ACTION_WRONG_PHASE",
            ActionError::NotAllowedInPhase { .. } => "ACTION_NOT_ALLOWED_IN_PHASE",
            ActionError::AlreadyActed { .. } => "ACTION_ALREADY_ACTED",
            ActionError::Move(inner) => inner.error.error_code(),
            ActionError::Attack(inner) => inner.error.error_code(),
            ActionError::Search(inner) => inner.error.error_code(),
        }
    }
}

/// Reasons a step onto a neighbouring cell is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("{to} is not a neighbour of {from}")]
    OutOfReach { from: Position, to: Position },

    #[error("{0} has no floor")]
    NoFloor(Position),

    #[error("{0} is blocked by a wall")]
    Blocked(Position),

    #[error("{position} is occupied by {occupant}")]
    Occupied {
        position: Position,
        occupant: EntityId,
    },

    #[error("player did not arrive at {0}")]
    OccupancyDesync(Position),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            MoveError::OutOfReach { .. } => ErrorSeverity::Validation,
            MoveError::NoFloor(_) | MoveError::Blocked(_) | MoveError::Occupied { .. } => {
                ErrorSeverity::Recoverable
            }
            MoveError::OccupancyDesync(_) => ErrorSeverity::Internal,
            MoveError::Oracle(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            MoveError::OutOfReach { .. } => "MOVE_OUT_OF_REACH",
            MoveError::NoFloor(_) => "MOVE_NO_FLOOR",
            MoveError::Blocked(_) => "MOVE_BLOCKED",
            MoveError::Occupied { .. } => "MOVE_OCCUPIED",
            MoveError::OccupancyDesync(_) => "MOVE_OCCUPANCY_DESYNC",
            MoveError::Oracle(inner) => inner.error_code(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackError {
    #[error("{to} is not adjacent to {from}")]
    OutOfReach { from: Position, to: Position },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for AttackError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            AttackError::OutOfReach { .. } => ErrorSeverity::Validation,
            AttackError::Oracle(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AttackError::OutOfReach { .. } => "ATTACK_OUT_OF_REACH",
            AttackError::Oracle(inner) => inner.error_code(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchError {
    #[error("cannot throw at the player's own cell")]
    SelfTarget,

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for SearchError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SearchError::SelfTarget => ErrorSeverity::Validation,
            SearchError::Oracle(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SearchError::SelfTarget => "SEARCH_SELF_TARGET",
            SearchError::Oracle(inner) => inner.error_code(),
        }
    }
}
