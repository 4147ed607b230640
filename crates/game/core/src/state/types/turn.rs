/// Phase of the turn sequencer.
///
/// Only [`crate::GameEngine::enter_phase`] moves the state between phases.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TurnPhase {
    /// Player may move (or, in the merged flow, move or attack).
    #[default]
    PlayerMove,
    /// Player may attack or search.
    PlayerAction,
    /// Enemies then traps resolve. No input is accepted.
    EnemyTurn,
}

impl TurnPhase {
    pub fn is_player_phase(self) -> bool {
        matches!(self, TurnPhase::PlayerMove | TurnPhase::PlayerAction)
    }
}

/// Turn bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub phase: TurnPhase,

    /// Round counter shown to the player; starts at 1 and grows on each
    /// `PlayerMove` entry after the first.
    pub cycle: u32,

    /// Set once the first `PlayerMove` has been entered.
    pub started: bool,

    /// Whether the current player phase already consumed its action.
    pub action_consumed: bool,

    /// One-way latch set when the player's health reaches zero.
    pub game_over: bool,

    /// Increments on every applied player action.
    pub nonce: u64,
}

impl TurnState {
    pub fn new() -> Self {
        Self {
            phase: TurnPhase::PlayerMove,
            cycle: 1,
            started: false,
            action_consumed: false,
            game_over: false,
            nonce: 0,
        }
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}
