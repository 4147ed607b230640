use crate::state::Position;

/// Fixed-size square cells anchored at a world-space origin.
///
/// Converts between world coordinates and cell coordinates the same way a
/// tilemap does: `world_to_cell` floors, `cell_center_world` returns the
/// middle of the cell.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridGeometry {
    pub cell_size: f32,
    pub origin_x: f32,
    pub origin_y: f32,
}

impl GridGeometry {
    pub const fn new(cell_size: f32, origin_x: f32, origin_y: f32) -> Self {
        Self {
            cell_size,
            origin_x,
            origin_y,
        }
    }

    pub fn world_to_cell(&self, x: f32, y: f32) -> Position {
        Position::new(
            ((x - self.origin_x) / self.cell_size).floor() as i32,
            ((y - self.origin_y) / self.cell_size).floor() as i32,
        )
    }

    pub fn cell_center_world(&self, cell: Position) -> (f32, f32) {
        (
            self.origin_x + (cell.x as f32 + 0.5) * self.cell_size,
            self.origin_y + (cell.y as f32 + 0.5) * self.cell_size,
        )
    }

    /// World-space distance between two cell centres.
    pub fn world_distance(&self, a: Position, b: Position) -> f32 {
        let (ax, ay) = self.cell_center_world(a);
        let (bx, by) = self.cell_center_world(b);
        ((bx - ax).powi(2) + (by - ay).powi(2)).sqrt()
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}
