//! Read-only world data.
//!
//! The map oracle exposes static cell geometry; [`Env`] bundles it with the
//! rules configuration so reducers can reach everything they need without
//! hard coupling to concrete implementations.
mod error;
mod grid;
mod map;

pub use error::OracleError;
pub use grid::GridGeometry;
pub use map::{
    LayoutError, LayoutMarker, MapDimensions, MapOracle, StaticMap, StaticTile, TerrainKind,
};

use crate::config::GameConfig;

/// Aggregates the read-only inputs required by the reducers.
pub struct Env<'a, M>
where
    M: MapOracle + ?Sized,
{
    map: Option<&'a M>,
    config: &'a GameConfig,
}

pub type GameEnv<'a> = Env<'a, dyn MapOracle + 'a>;

impl<M> Clone for Env<'_, M>
where
    M: MapOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for Env<'_, M> where M: MapOracle + ?Sized {}

impl<'a, M> Env<'a, M>
where
    M: MapOracle + ?Sized,
{
    pub fn new(map: Option<&'a M>, config: &'a GameConfig) -> Self {
        Self { map, config }
    }

    pub fn with_map(map: &'a M, config: &'a GameConfig) -> Self {
        Self::new(Some(map), config)
    }

    /// Returns the MapOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::MapNotAvailable` if no map oracle was provided.
    pub fn map(&self) -> Result<&'a M, OracleError> {
        self.map.ok_or(OracleError::MapNotAvailable)
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }
}

impl<'a, M> Env<'a, M>
where
    M: MapOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv`.
    pub fn into_game_env(self) -> GameEnv<'a> {
        let map: Option<&'a dyn MapOracle> = self.map.map(|map| map as _);
        Env::new(map, self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_map_is_reported() {
        let config = GameConfig::default();
        let env: GameEnv<'_> = Env::new(None, &config);
        assert_eq!(env.map().err(), Some(OracleError::MapNotAvailable));
    }

    #[test]
    fn erased_env_keeps_the_map() {
        let config = GameConfig::default();
        let map = StaticMap::open(3, 2);
        let env = Env::with_map(&map, &config).into_game_env();
        assert_eq!(env.map().unwrap().dimensions(), MapDimensions::new(3, 2));
    }
}
