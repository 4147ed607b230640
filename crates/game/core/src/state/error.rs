use super::{EntityId, Position};

/// Errors raised while populating a [`super::GameState`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    #[error("enemy roster is full ({capacity} slots)")]
    EnemiesFull { capacity: usize },

    #[error("trap roster is full ({capacity} slots)")]
    TrapsFull { capacity: usize },

    #[error("too many bullets on the floor ({capacity} slots)")]
    BulletsFull { capacity: usize },

    #[error("cell {position} cannot hold another occupant")]
    CellFull { position: Position },

    #[error("cell {position} is already taken by {occupant}")]
    CellTaken {
        position: Position,
        occupant: EntityId,
    },

    #[error("entity id space exhausted")]
    IdsExhausted,
}
