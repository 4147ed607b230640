use game_core::{EntityId, TurnPhase};

/// One unit of queued sequencer work.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Step {
    /// Hold for the remaining seconds.
    Wait(f32),
    /// Apply the phase switch that a banner delay preceded.
    EnterPhase(TurnPhase),
    /// Start a switch to whichever phase follows the current one.
    Advance,
    RunEnemy(EntityId),
    /// Snapshot the trap roster and queue one shot attempt per trap.
    BeginTraps,
    RunTrap(EntityId),
    ShowGameOver,
}
