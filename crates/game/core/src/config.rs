use crate::state::Position;

/// Distance used by enemies to decide whether a step brings them closer.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DistanceMetric {
    /// Straight-line distance between cell centres (compared squared).
    #[default]
    Euclidean,
    Chebyshev,
    Manhattan,
}

impl DistanceMetric {
    /// Comparable distance; only the ordering is meaningful.
    pub fn measure(self, a: Position, b: Position) -> u64 {
        match self {
            DistanceMetric::Euclidean => a.distance_sq(b),
            DistanceMetric::Chebyshev => u64::from(a.chebyshev(b)),
            DistanceMetric::Manhattan => u64::from(a.manhattan(b)),
        }
    }
}

/// Game rules constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub player_max_hp: u32,
    pub player_attack_power: u32,
    pub distance_metric: DistanceMetric,
    /// `true`: PlayerMove -> PlayerAction -> EnemyTurn.
    /// `false`: a single player phase where one move-or-attack ends the turn.
    pub split_action_phase: bool,
    /// Half-width of the square revealed where a search probe lands.
    pub search_radius: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_ENEMIES: usize = 64;
    pub const MAX_TRAPS: usize = 64;
    pub const MAX_BULLETS: usize = 16;
    pub const MAX_OCCUPANTS_PER_TILE: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_PLAYER_MAX_HP: u32 = 20;
    pub const DEFAULT_PLAYER_ATTACK_POWER: u32 = 3;
    pub const DEFAULT_SEARCH_RADIUS: u32 = 1;

    pub fn new() -> Self {
        Self {
            player_max_hp: Self::DEFAULT_PLAYER_MAX_HP,
            player_attack_power: Self::DEFAULT_PLAYER_ATTACK_POWER,
            distance_metric: DistanceMetric::default(),
            split_action_phase: true,
            search_radius: Self::DEFAULT_SEARCH_RADIUS,
        }
    }

    pub fn merged_turns() -> Self {
        Self {
            split_action_phase: false,
            ..Self::new()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
