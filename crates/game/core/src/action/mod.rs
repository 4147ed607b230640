//! Player commands.
//!
//! Each command is a small struct implementing [`ActionTransition`]; the
//! [`PlayerAction`] enum is what callers hand to [`crate::GameEngine::execute`].
//! Which commands are legal depends on the turn phase and on whether the
//! rules split movement and action into separate phases.
mod combat;
mod error;
mod movement;
mod search;
mod transition;
mod wait;

pub use combat::AttackAction;
pub use error::{ActionError, AttackError, MoveError, SearchError};
pub use movement::MoveAction;
pub use search::{SearchAction, probe_landing};
pub use transition::ActionTransition;
pub use wait::WaitAction;

use crate::config::GameConfig;
use crate::state::{GameState, Position, TurnPhase};

/// Discriminant of [`PlayerAction`], used in errors and logs.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    Wait,
    Move,
    Attack,
    Search,
}

/// A command issued by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerAction {
    /// Clicking the player's own cell: give up the rest of the phase.
    Wait,
    Move { target: Position },
    Attack { target: Position },
    Search { target: Position },
}

/// How a click during an action window should be read.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ClickMode {
    #[default]
    Attack,
    Search,
}

impl PlayerAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            PlayerAction::Wait => ActionKind::Wait,
            PlayerAction::Move { .. } => ActionKind::Move,
            PlayerAction::Attack { .. } => ActionKind::Attack,
            PlayerAction::Search { .. } => ActionKind::Search,
        }
    }

    pub fn target(&self) -> Option<Position> {
        match self {
            PlayerAction::Wait => None,
            PlayerAction::Move { target }
            | PlayerAction::Attack { target }
            | PlayerAction::Search { target } => Some(*target),
        }
    }

    /// Whether this command may be issued during `phase`.
    pub fn is_allowed_in(&self, phase: TurnPhase, config: &GameConfig) -> bool {
        match (self.kind(), phase) {
            (_, TurnPhase::EnemyTurn) => false,
            (ActionKind::Wait, _) => true,
            (ActionKind::Move, TurnPhase::PlayerMove) => true,
            (ActionKind::Move, TurnPhase::PlayerAction) => false,
            (ActionKind::Attack | ActionKind::Search, TurnPhase::PlayerAction) => true,
            (ActionKind::Attack | ActionKind::Search, TurnPhase::PlayerMove) => {
                !config.split_action_phase
            }
        }
    }

    /// Interprets a click on `target` in the current phase.
    ///
    /// The player's own cell always means wait. In the merged flow an attack
    /// takes priority over a move when something attackable stands on an
    /// adjacent target.
    pub fn from_click(
        state: &GameState,
        config: &GameConfig,
        target: Position,
        mode: ClickMode,
    ) -> Self {
        let player = state.player.position;
        if target == player {
            return PlayerAction::Wait;
        }

        match (state.turn.phase, mode) {
            (TurnPhase::PlayerMove, _) if config.split_action_phase => {
                PlayerAction::Move { target }
            }
            (_, ClickMode::Search) => PlayerAction::Search { target },
            (TurnPhase::PlayerAction, ClickMode::Attack) => PlayerAction::Attack { target },
            (_, ClickMode::Attack) => {
                let attackable = player.chebyshev(target) == 1
                    && state
                        .world
                        .tile_map
                        .occupants(&target)
                        .is_some_and(|slots| slots.iter().any(|o| o.kind.is_attackable()));
                if attackable {
                    PlayerAction::Attack { target }
                } else {
                    PlayerAction::Move { target }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EnemyKind, EnemyTemplate};

    #[test]
    fn split_flow_separates_move_and_action() {
        let config = GameConfig::default();
        let target = Position::new(1, 0);
        let moving = PlayerAction::Move { target };
        let attacking = PlayerAction::Attack { target };

        assert!(moving.is_allowed_in(TurnPhase::PlayerMove, &config));
        assert!(!moving.is_allowed_in(TurnPhase::PlayerAction, &config));
        assert!(!attacking.is_allowed_in(TurnPhase::PlayerMove, &config));
        assert!(attacking.is_allowed_in(TurnPhase::PlayerAction, &config));
        assert!(!PlayerAction::Wait.is_allowed_in(TurnPhase::EnemyTurn, &config));
    }

    #[test]
    fn merged_flow_allows_attack_on_player_move() {
        let config = GameConfig::merged_turns();
        let attacking = PlayerAction::Attack {
            target: Position::new(1, 0),
        };
        assert!(attacking.is_allowed_in(TurnPhase::PlayerMove, &config));
    }

    #[test]
    fn merged_click_prefers_attack_on_occupied_neighbour() {
        let config = GameConfig::merged_turns();
        let mut state = GameState::with_player(Position::new(2, 2), &config);
        state
            .add_enemy(Position::new(3, 2), EnemyKind::Orthogonal, EnemyTemplate::default())
            .unwrap();

        assert_eq!(
            PlayerAction::from_click(&state, &config, Position::new(3, 2), ClickMode::Attack),
            PlayerAction::Attack {
                target: Position::new(3, 2)
            }
        );
        assert_eq!(
            PlayerAction::from_click(&state, &config, Position::new(2, 3), ClickMode::Attack),
            PlayerAction::Move {
                target: Position::new(2, 3)
            }
        );
        assert_eq!(
            PlayerAction::from_click(&state, &config, Position::new(2, 2), ClickMode::Search),
            PlayerAction::Wait
        );
    }

    #[test]
    fn split_click_follows_phase() {
        let config = GameConfig::default();
        let mut state = GameState::with_player(Position::ORIGIN, &config);
        let target = Position::new(0, 1);

        assert_eq!(
            PlayerAction::from_click(&state, &config, target, ClickMode::Search),
            PlayerAction::Move { target }
        );

        state.turn.phase = TurnPhase::PlayerAction;
        assert_eq!(
            PlayerAction::from_click(&state, &config, target, ClickMode::Search),
            PlayerAction::Search { target }
        );
        assert_eq!(
            PlayerAction::from_click(&state, &config, target, ClickMode::Attack),
            PlayerAction::Attack { target }
        );
    }
}
