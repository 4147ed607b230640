//! Scenario system for map layout and entity placement.
//!
//! A scenario is a RON document holding an ASCII layout and the entities to
//! place on it. The layout uses `#` for walls, `.` for floor, a space or `_`
//! for void, `o` for an obstacle on floor and `@` for the player. Any other
//! glyph is treated as plain floor with a warning.
//!
//! ```ron
//! (
//!     layout: [
//!         "#####",
//!         "#@.o#",
//!         "#...#",
//!         "#####",
//!     ],
//!     enemies: [(position: (x: 3, y: 1))],
//!     traps: [(position: (x: 2, y: 2), settings: (interval: 2))],
//! )
//! ```

use std::path::Path;

use game_core::{
    EnemyKind, EnemyTemplate, GameConfig, GameState, GridGeometry, MapOracle, OracleError,
    Position, StaticMap, TrapSettings,
};
use serde::{Deserialize, Serialize};

use crate::api::{Result, RuntimeError};

const OBSTACLE_GLYPH: char = 'o';
const PLAYER_GLYPH: char = '@';

/// Where and what kind of enemy to spawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyPlacement {
    pub position: Position,
    #[serde(default)]
    pub kind: EnemyKind,
    #[serde(default)]
    pub template: EnemyTemplate,
}

/// Where to place a trap and how it cycles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrapPlacement {
    pub position: Position,
    #[serde(default)]
    pub settings: TrapSettings,
}

/// Scenario configuration for game initialization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Layout rows, top row first.
    pub layout: Vec<String>,

    #[serde(default)]
    pub geometry: GridGeometry,

    /// Player cell when the layout carries no `@`.
    #[serde(default)]
    pub player: Option<Position>,

    /// Enemies in registration order.
    #[serde(default)]
    pub enemies: Vec<EnemyPlacement>,

    /// Traps in registration order.
    #[serde(default)]
    pub traps: Vec<TrapPlacement>,
}

impl Scenario {
    /// Loads a scenario from a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RuntimeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&content)
    }

    pub fn from_ron(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    /// Builds the static map and the initial game state.
    ///
    /// The player takes the reserved id; obstacles, then enemies, then traps
    /// are allocated ids in document order.
    pub fn build(&self, config: &GameConfig) -> Result<(StaticMap, GameState)> {
        let (map, markers) = StaticMap::from_rows(self.layout.as_slice())?;

        let mut obstacles = Vec::new();
        let mut player_cells: Vec<Position> = self.player.into_iter().collect();
        for marker in markers {
            match marker.glyph {
                OBSTACLE_GLYPH => obstacles.push(marker.position),
                PLAYER_GLYPH => player_cells.push(marker.position),
                other => {
                    tracing::warn!(
                        glyph = %other,
                        position = %marker.position,
                        "unknown layout glyph treated as floor"
                    );
                }
            }
        }

        let player = match player_cells.as_slice() {
            [] => return Err(RuntimeError::MissingPlayer),
            [single] => *single,
            many => return Err(RuntimeError::DuplicatePlayer { count: many.len() }),
        };
        ensure_floor(&map, player)?;
        let mut state = GameState::with_player(player, config);

        for position in obstacles {
            state.add_obstacle(position)?;
        }
        for placement in &self.enemies {
            ensure_floor(&map, placement.position)?;
            state.add_enemy(placement.position, placement.kind, placement.template)?;
        }
        for placement in &self.traps {
            ensure_floor(&map, placement.position)?;
            state.add_trap(placement.position, placement.settings)?;
        }

        tracing::info!(
            width = map.dimensions().width,
            height = map.dimensions().height,
            enemies = state.enemies.len(),
            traps = state.traps.len(),
            "scenario built"
        );
        Ok((map, state))
    }
}

fn ensure_floor(map: &StaticMap, position: Position) -> Result<()> {
    let tile = map
        .tile(position)
        .ok_or(OracleError::PositionOutOfBounds(position))?;
    let terrain = tile.terrain();
    if terrain.has_floor() && !terrain.has_wall() {
        Ok(())
    } else {
        Err(RuntimeError::InvalidPlacement { position, terrain })
    }
}
