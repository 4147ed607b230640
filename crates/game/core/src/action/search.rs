use crate::combat;
use crate::engine::GameEvent;
use crate::env::{GameEnv, MapOracle};
use crate::state::{CellRect, GameState, Position};

use super::{ActionTransition, SearchError};

/// Throws a probe toward `target`; wherever it lands, nearby traps are revealed and armed.
///
/// The probe stays behind as a bullet on its landing cell unless it never
/// left the player's cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchAction {
    pub target: Position,
}

impl SearchAction {
    pub fn new(target: Position) -> Self {
        Self { target }
    }
}

impl ActionTransition for SearchAction {
    type Error = SearchError;

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        env.map()?;
        if state.player.position == self.target {
            return Err(SearchError::SelfTarget);
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), Self::Error> {
        let landed = probe_landing(state.player.position, self.target, env.map()?);
        let area = CellRect::around(landed, env.config().search_radius);

        let bullet = if landed == state.player.position {
            None
        } else {
            match state.add_bullet(landed) {
                Ok(bullet) => Some(bullet),
                Err(error) => {
                    tracing::debug!(%landed, %error, "probe left no bullet");
                    None
                }
            }
        };
        events.push(GameEvent::SearchLanded {
            landed,
            area,
            bullet,
        });

        let armed = combat::trigger_vision(state, area, events);
        tracing::debug!(%landed, armed, "search probe landed");
        Ok(())
    }
}

/// Cell where a probe thrown from `from` toward `to` comes to rest.
///
/// The probe follows the grid line and stops in front of the first wall or
/// missing floor; with a clear line it lands on `to`. It never travels more
/// than the map span, so targets far off the map are cheap.
pub fn probe_landing<M>(from: Position, to: Position, map: &M) -> Position
where
    M: MapOracle + ?Sized,
{
    let limit = map.dimensions().span() as usize;
    let mut landed = from;
    for cell in GridLine::new(from, to).take(limit) {
        if map.has_wall(cell) || !map.has_floor(cell) {
            break;
        }
        landed = cell;
    }
    landed
}

/// Lazy Bresenham walk from `from` (exclusive) to `to` (inclusive).
///
/// Works in `i64` so any pair of cell coordinates is safe.
struct GridLine {
    x: i64,
    y: i64,
    end: (i64, i64),
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
    err: i64,
}

impl GridLine {
    fn new(from: Position, to: Position) -> Self {
        let (x, y) = (i64::from(from.x), i64::from(from.y));
        let end = (i64::from(to.x), i64::from(to.y));
        let dx = (end.0 - x).abs();
        let dy = -(end.1 - y).abs();
        Self {
            x,
            y,
            end,
            dx,
            dy,
            sx: (end.0 - x).signum(),
            sy: (end.1 - y).signum(),
            err: dx + dy,
        }
    }
}

impl Iterator for GridLine {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        if (self.x, self.y) == self.end {
            return None;
        }
        let doubled = 2 * self.err;
        if doubled >= self.dy {
            self.err += self.dy;
            self.x += self.sx;
        }
        if doubled <= self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(Position::new(
            i32::try_from(self.x).ok()?,
            i32::try_from(self.y).ok()?,
        ))
    }
}
