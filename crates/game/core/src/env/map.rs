use std::collections::BTreeMap;

use crate::state::Position;

/// Static map oracle exposing immutable layout information.
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;
    fn tile(&self, position: Position) -> Option<StaticTile>;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }

    /// Terrain at `position`; anything off the map reads as [`TerrainKind::Void`].
    fn terrain(&self, position: Position) -> TerrainKind {
        self.tile(position)
            .map(StaticTile::terrain)
            .unwrap_or(TerrainKind::Void)
    }

    fn has_floor(&self, position: Position) -> bool {
        self.terrain(position).has_floor()
    }

    fn has_wall(&self, position: Position) -> bool {
        self.terrain(position).has_wall()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    /// Longest straight walk that can stay on the map.
    pub fn span(&self) -> u32 {
        self.width.max(self.height)
    }
}

/// Immutable descriptor for a cell in the static layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticTile {
    terrain: TerrainKind,
}

impl StaticTile {
    pub const fn new(terrain: TerrainKind) -> Self {
        Self { terrain }
    }

    pub fn terrain(self) -> TerrainKind {
        self.terrain
    }
}

/// Terrain classes for static map cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TerrainKind {
    Floor,
    Wall,
    /// No floor tile at all (pits, outside the room).
    Void,
}

impl TerrainKind {
    pub fn has_floor(self) -> bool {
        matches!(self, TerrainKind::Floor)
    }

    pub fn has_wall(self) -> bool {
        matches!(self, TerrainKind::Wall)
    }
}

/// Marker glyph found while parsing a character layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutMarker {
    pub position: Position,
    pub glyph: char,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,

    #[error("row {row} has width {width}, expected {expected}")]
    RaggedRow {
        row: usize,
        width: usize,
        expected: usize,
    },
}

/// Dense map backed by an in-memory terrain table.
///
/// Built from character rows where the first row is the top of the map:
/// `#` wall, `.` floor, ` ` or `_` void. Any other glyph sits on floor and is
/// reported back as a [`LayoutMarker`] for the caller to interpret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticMap {
    dimensions: MapDimensions,
    tiles: BTreeMap<Position, StaticTile>,
}

impl StaticMap {
    pub fn new(dimensions: MapDimensions, tiles: BTreeMap<Position, StaticTile>) -> Self {
        Self { dimensions, tiles }
    }

    /// Map of the given size filled with floor.
    pub fn open(width: u32, height: u32) -> Self {
        let dimensions = MapDimensions::new(width, height);
        let mut tiles = BTreeMap::new();
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                tiles.insert(Position::new(x, y), StaticTile::new(TerrainKind::Floor));
            }
        }
        Self { dimensions, tiles }
    }

    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<(Self, Vec<LayoutMarker>), LayoutError> {
        let expected = rows
            .first()
            .map(|row| row.as_ref().chars().count())
            .ok_or(LayoutError::Empty)?;
        let height = rows.len();

        let mut tiles = BTreeMap::new();
        let mut markers = Vec::new();

        for (row_index, row) in rows.iter().enumerate() {
            let width = row.as_ref().chars().count();
            if width != expected {
                return Err(LayoutError::RaggedRow {
                    row: row_index,
                    width,
                    expected,
                });
            }

            let y = (height - 1 - row_index) as i32;
            for (x, glyph) in row.as_ref().chars().enumerate() {
                let position = Position::new(x as i32, y);
                let terrain = match glyph {
                    '#' => TerrainKind::Wall,
                    ' ' | '_' => TerrainKind::Void,
                    '.' => TerrainKind::Floor,
                    other => {
                        markers.push(LayoutMarker {
                            position,
                            glyph: other,
                        });
                        TerrainKind::Floor
                    }
                };
                tiles.insert(position, StaticTile::new(terrain));
            }
        }

        let dimensions = MapDimensions::new(expected as u32, height as u32);
        Ok((Self::new(dimensions, tiles), markers))
    }

    pub fn set_terrain(&mut self, position: Position, terrain: TerrainKind) {
        self.tiles.insert(position, StaticTile::new(terrain));
    }
}

impl MapOracle for StaticMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, position: Position) -> Option<StaticTile> {
        self.tiles.get(&position).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_row_is_top_of_map() {
        let (map, markers) = StaticMap::from_rows(&["#P.", "..."]).unwrap();

        assert_eq!(map.dimensions(), MapDimensions::new(3, 2));
        assert!(map.has_wall(Position::new(0, 1)));
        assert!(map.has_floor(Position::new(1, 1)));
        assert!(map.has_floor(Position::new(0, 0)));
        assert_eq!(
            markers,
            vec![LayoutMarker {
                position: Position::new(1, 1),
                glyph: 'P'
            }]
        );
    }

    #[test]
    fn off_map_reads_as_void() {
        let map = StaticMap::open(2, 2);
        assert_eq!(map.terrain(Position::new(-1, 0)), TerrainKind::Void);
        assert!(!map.has_floor(Position::new(2, 2)));
        assert!(!map.has_wall(Position::new(2, 2)));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = StaticMap::from_rows(&["...", ".."]).unwrap_err();
        assert_eq!(
            err,
            LayoutError::RaggedRow {
                row: 1,
                width: 2,
                expected: 3
            }
        );
        assert_eq!(
            StaticMap::from_rows::<&str>(&[]).unwrap_err(),
            LayoutError::Empty
        );
    }
}
