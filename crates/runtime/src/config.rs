//! Runtime configuration: rules tunables plus presentation pacing.

use std::path::Path;

use game_core::{GameConfig, PlayerAction};
use serde::{Deserialize, Serialize};

use crate::api::{Result, RuntimeError};

/// Delays inserted between sequencer steps, in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pacing {
    /// Hold before a new phase takes effect.
    pub banner_delay: f32,
    pub trap_step_delay: f32,
    pub enemy_to_trap_delay: f32,
    pub after_traps_delay: f32,
    pub enemy_attack_duration: f32,
    /// World units per second for an enemy step.
    pub enemy_move_speed: f32,
    /// Wait after a player move before the phase advances.
    pub player_move_delay: f32,
    /// Wait after any other player command before the phase advances.
    pub turn_delay: f32,
    pub game_over_delay: f32,
}

impl Pacing {
    /// No waits at all; every queued step runs on the next tick.
    pub fn immediate() -> Self {
        Self {
            banner_delay: 0.0,
            trap_step_delay: 0.0,
            enemy_to_trap_delay: 0.0,
            after_traps_delay: 0.0,
            enemy_attack_duration: 0.0,
            enemy_move_speed: 0.0,
            player_move_delay: 0.0,
            turn_delay: 0.0,
            game_over_delay: 0.0,
        }
    }

    /// Replaces negative or non-finite delays with zero.
    pub fn sanitized(mut self) -> Self {
        let delays = [
            ("banner_delay", &mut self.banner_delay),
            ("trap_step_delay", &mut self.trap_step_delay),
            ("enemy_to_trap_delay", &mut self.enemy_to_trap_delay),
            ("after_traps_delay", &mut self.after_traps_delay),
            ("enemy_attack_duration", &mut self.enemy_attack_duration),
            ("enemy_move_speed", &mut self.enemy_move_speed),
            ("player_move_delay", &mut self.player_move_delay),
            ("turn_delay", &mut self.turn_delay),
            ("game_over_delay", &mut self.game_over_delay),
        ];
        for (field, value) in delays {
            if !(value.is_finite() && *value >= 0.0) {
                tracing::warn!(field, value = *value, "invalid pacing value clamped to zero");
                *value = 0.0;
            }
        }
        self
    }

    /// Wait after `action` before the turn moves on.
    pub fn after_player(&self, action: &PlayerAction) -> f32 {
        match action {
            PlayerAction::Move { .. } => self.player_move_delay,
            _ => self.turn_delay,
        }
    }

    /// Time an enemy needs to cover `distance` world units.
    ///
    /// A non-positive speed makes the step instantaneous.
    pub fn enemy_move_duration(&self, distance: f32) -> f32 {
        if self.enemy_move_speed > 0.0 {
            distance / self.enemy_move_speed
        } else {
            0.0
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            banner_delay: 0.05,
            trap_step_delay: 0.05,
            enemy_to_trap_delay: 0.15,
            after_traps_delay: 0.20,
            enemy_attack_duration: 0.2,
            enemy_move_speed: 3.0,
            player_move_delay: 0.1,
            turn_delay: 0.2,
            game_over_delay: 0.8,
        }
    }
}

/// Configuration for the turn sequencer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    pub pacing: Pacing,
    /// Capacity of each event bus topic.
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            pacing: Pacing::default(),
            event_buffer_size: 100,
        }
    }
}

impl RuntimeConfig {
    /// Loads a RON config file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RuntimeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron(&content)?;
        tracing::info!(path = %path.display(), "runtime config loaded");
        Ok(config)
    }

    /// Parses a RON document. Invalid pacing values are clamped to zero.
    pub fn from_ron(content: &str) -> Result<Self> {
        let mut config: Self = ron::from_str(content)?;
        config.pacing = config.pacing.sanitized();
        Ok(config)
    }
}
