use crate::state::{CellRect, EntityId, Occupant, Position, TurnPhase};

/// Who dealt a hit to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageSource {
    Enemy(EntityId),
    Trap(EntityId),
    /// Scripted damage applied from outside the turn loop.
    Environment,
}

/// What flipped a trap into the armed state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ArmCause {
    /// The player's vision (or a search probe) swept over the trap.
    Vision,
    /// The player struck the trap in melee.
    Strike,
}

/// Observable outcome of a reducer call.
///
/// Events are emitted in the order the mutations happened, so a consumer can
/// replay them to drive presentation (banners, lunges, hit flashes).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    PhaseEntered {
        phase: TurnPhase,
        cycle: u32,
    },
    PlayerMoved {
        from: Position,
        to: Position,
    },
    PlayerWaited {
        position: Position,
    },
    /// Melee swing; `hit` is `None` on a whiff.
    PlayerAttacked {
        target: Position,
        hit: Option<Occupant>,
    },
    /// Probe came to rest; `bullet` is `None` when it never left the thrower.
    SearchLanded {
        landed: Position,
        area: CellRect,
        bullet: Option<EntityId>,
    },
    /// A bullet was destroyed by the player, an enemy or a trap shot.
    BulletBroken {
        bullet: EntityId,
        position: Position,
        by: EntityId,
    },
    EnemyMoved {
        enemy: EntityId,
        from: Position,
        to: Position,
    },
    EnemyAttacked {
        enemy: EntityId,
        target: Position,
    },
    EnemyIdle {
        enemy: EntityId,
    },
    EnemyDamaged {
        enemy: EntityId,
        amount: u32,
        remaining: u32,
    },
    EnemyDied {
        enemy: EntityId,
        position: Position,
    },
    TrapArmed {
        trap: EntityId,
        cause: ArmCause,
    },
    TrapFired {
        trap: EntityId,
        cells: Vec<Position>,
        victims: Vec<EntityId>,
    },
    PlayerDamaged {
        source: DamageSource,
        amount: u32,
        remaining: u32,
    },
    PlayerHealed {
        amount: u32,
        current: u32,
    },
    GameOver {
        cycle: u32,
    },
}

impl GameEvent {
    /// Whether this event changes what the attack overlay should show.
    pub fn affects_overlay(&self) -> bool {
        matches!(
            self,
            GameEvent::PlayerMoved { .. }
                | GameEvent::EnemyMoved { .. }
                | GameEvent::EnemyDied { .. }
                | GameEvent::TrapArmed { .. }
                | GameEvent::TrapFired { .. }
        )
    }
}
