use game_core::TurnPhase;
use serde::{Deserialize, Serialize};

/// Sequencer milestones that have no counterpart in the core rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequencerEvent {
    /// The player may issue a command for `phase`.
    InputUnlocked { phase: TurnPhase },
    /// Input stays locked until the next player phase.
    InputLocked,
    /// The game-over hold elapsed; only a restart is accepted now.
    GameOverShown { cycle: u32 },
    /// The initial state was restored.
    Restarted,
}
