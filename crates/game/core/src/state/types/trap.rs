use bitflags::bitflags;

use super::{Direction, EntityId, Position, TurnPhase};

bitflags! {
    /// Phases during which a trap counts down and may fire.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TrapPhases: u8 {
        const PLAYER_TURN = 0b01;
        const ENEMY_TURN = 0b10;
    }
}

impl Default for TrapPhases {
    fn default() -> Self {
        TrapPhases::ENEMY_TURN
    }
}

impl TrapPhases {
    /// Whether these flags make a trap eligible during `phase`.
    ///
    /// `PlayerAction` is never eligible: it is a sub-step of the player's turn.
    pub fn covers(self, phase: TurnPhase) -> bool {
        match phase {
            TurnPhase::PlayerMove => self.contains(TrapPhases::PLAYER_TURN),
            TurnPhase::EnemyTurn => self.contains(TrapPhases::ENEMY_TURN),
            TurnPhase::PlayerAction => false,
        }
    }
}

/// Ray pattern a trap fires along.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TrapPattern {
    #[default]
    Orthogonal,
    Diagonal,
}

impl TrapPattern {
    /// Ray directions in firing order.
    pub fn directions(self) -> &'static [Direction; 4] {
        match self {
            TrapPattern::Orthogonal => &Direction::ORTHOGONAL,
            TrapPattern::Diagonal => &Direction::DIAGONAL,
        }
    }
}

/// Static configuration of a trap, fixed when it is placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrapSettings {
    pub pattern: TrapPattern,
    /// Fires once every `interval` eligible phases. Values below 1 act as 1.
    pub interval: u32,
    /// Eligible phases to wait before the first shot.
    pub initial_offset: u32,
    pub phases: TrapPhases,
    pub require_armed: bool,
    pub disarm_after_act: bool,
    /// Rays stop in front of other traps.
    pub stop_on_trap: bool,
    pub attack_power: u32,
}

impl TrapSettings {
    pub const DEFAULT_ATTACK_POWER: u32 = 2;

    pub fn with_pattern(pattern: TrapPattern) -> Self {
        Self {
            pattern,
            ..Self::default()
        }
    }
}

impl Default for TrapSettings {
    fn default() -> Self {
        Self {
            pattern: TrapPattern::default(),
            interval: 1,
            initial_offset: 0,
            phases: TrapPhases::default(),
            require_armed: true,
            disarm_after_act: true,
            stop_on_trap: true,
            attack_power: Self::DEFAULT_ATTACK_POWER,
        }
    }
}

/// Runtime state of a placed trap.
///
/// # Invariants
///
/// - A fresh trap is disarmed with `turns_until_fire == initial_offset`.
/// - After firing, `turns_until_fire == interval - 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrapState {
    pub id: EntityId,
    pub position: Position,
    pub settings: TrapSettings,
    armed: bool,
    turns_until_fire: u32,
}

impl TrapState {
    pub fn new(id: EntityId, position: Position, settings: TrapSettings) -> Self {
        let mut trap = Self {
            id,
            position,
            settings,
            armed: false,
            turns_until_fire: 0,
        };
        trap.reset_cycle();
        trap
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn turns_until_fire(&self) -> u32 {
        self.turns_until_fire
    }

    pub fn reset_cycle(&mut self) {
        self.turns_until_fire = self.settings.initial_offset;
    }

    pub fn should_act_on_phase(&self, phase: TurnPhase) -> bool {
        self.settings.phases.covers(phase)
    }

    /// Counts down one eligible phase. Returns true when the counter moved.
    pub fn on_turn_advanced(&mut self, phase: TurnPhase) -> bool {
        if !self.should_act_on_phase(phase) || self.turns_until_fire == 0 {
            return false;
        }
        self.turns_until_fire -= 1;
        true
    }

    /// Latches the armed flag. Returns true only on the disarmed -> armed edge.
    pub fn arm(&mut self) -> bool {
        if self.armed {
            return false;
        }
        self.armed = true;
        true
    }

    /// All gates for firing during `phase`.
    pub fn is_ready(&self, phase: TurnPhase) -> bool {
        self.should_act_on_phase(phase)
            && self.turns_until_fire == 0
            && (self.armed || !self.settings.require_armed)
    }

    /// Post-fire bookkeeping: optional disarm and countdown reload.
    pub fn finish_fire(&mut self) {
        if self.settings.disarm_after_act {
            self.armed = false;
        }
        self.turns_until_fire = self.settings.interval.max(1) - 1;
    }
}
