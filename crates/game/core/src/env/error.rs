use crate::error::{ErrorSeverity, GameError};
use crate::state::Position;

/// Errors that occur when accessing oracle data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("MapOracle not available")]
    MapNotAvailable,

    #[error("position {0} is out of map bounds")]
    PositionOutOfBounds(Position),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            OracleError::MapNotAvailable => ErrorSeverity::Fatal,
            OracleError::PositionOutOfBounds(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            OracleError::MapNotAvailable => "ORACLE_MAP_NOT_AVAILABLE",
            OracleError::PositionOutOfBounds(_) => "ORACLE_POSITION_OUT_OF_BOUNDS",
        }
    }
}
