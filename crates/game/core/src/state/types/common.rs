use std::fmt;

/// Unique identifier for any entity tracked in the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the controllable player character.
    pub const PLAYER: Self = Self(0);

    /// Returns true if this entity represents the player.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::PLAYER
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in cell coordinates. `+y` is up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell one step along `direction`.
    pub const fn step(self, direction: Direction) -> Self {
        Self::new(self.x + direction.dx, self.y + direction.dy)
    }

    /// Component-wise absolute offset to `other`.
    pub fn abs_delta(self, other: Position) -> (u32, u32) {
        (self.x.abs_diff(other.x), self.y.abs_diff(other.y))
    }

    /// Chebyshev (king-move) distance.
    pub fn chebyshev(self, other: Position) -> u32 {
        let (dx, dy) = self.abs_delta(other);
        dx.max(dy)
    }

    /// Manhattan (taxicab) distance.
    pub fn manhattan(self, other: Position) -> u32 {
        let (dx, dy) = self.abs_delta(other);
        dx + dy
    }

    /// Squared Euclidean distance. Ordering matches true Euclidean distance.
    pub fn distance_sq(self, other: Position) -> u64 {
        let (dx, dy) = self.abs_delta(other);
        u64::from(dx) * u64::from(dx) + u64::from(dy) * u64::from(dy)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Unit grid step in one of the eight king-move directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Direction {
    pub dx: i32,
    pub dy: i32,
}

impl Direction {
    pub const UP: Self = Self::new(0, 1);
    pub const DOWN: Self = Self::new(0, -1);
    pub const LEFT: Self = Self::new(-1, 0);
    pub const RIGHT: Self = Self::new(1, 0);
    pub const UP_RIGHT: Self = Self::new(1, 1);
    pub const DOWN_RIGHT: Self = Self::new(1, -1);
    pub const UP_LEFT: Self = Self::new(-1, 1);
    pub const DOWN_LEFT: Self = Self::new(-1, -1);

    /// Orthogonal steps in evaluation order.
    pub const ORTHOGONAL: [Self; 4] = [Self::UP, Self::DOWN, Self::LEFT, Self::RIGHT];

    /// Diagonal steps in evaluation order.
    pub const DIAGONAL: [Self; 4] = [
        Self::UP_RIGHT,
        Self::DOWN_RIGHT,
        Self::UP_LEFT,
        Self::DOWN_LEFT,
    ];

    const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Clamps the offset `from -> to` to a unit step. `None` when both cells match.
    pub fn toward(from: Position, to: Position) -> Option<Self> {
        let dx = to.x.cmp(&from.x) as i32;
        let dy = to.y.cmp(&from.y) as i32;
        if dx == 0 && dy == 0 {
            None
        } else {
            Some(Self::new(dx, dy))
        }
    }

    /// Fixed display ordering for overlay arrows.
    pub fn display_rank(self) -> u8 {
        match (self.dx, self.dy) {
            (0, 1) => 0,
            (1, 0) => 1,
            (0, -1) => 2,
            (-1, 0) => 3,
            (1, 1) => 4,
            (1, -1) => 5,
            (-1, 1) => 6,
            _ => 7,
        }
    }
}

/// Axis-aligned, inclusive rectangle of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRect {
    pub min: Position,
    pub max: Position,
}

impl CellRect {
    pub fn new(a: Position, b: Position) -> Self {
        Self {
            min: Position::new(a.x.min(b.x), a.y.min(b.y)),
            max: Position::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Square of side `2 * radius + 1` centred on `center`.
    ///
    /// Edges saturate at the coordinate limits.
    pub fn around(center: Position, radius: u32) -> Self {
        let r = i32::try_from(radius).unwrap_or(i32::MAX);
        Self::new(
            Position::new(center.x.saturating_sub(r), center.y.saturating_sub(r)),
            Position::new(center.x.saturating_add(r), center.y.saturating_add(r)),
        )
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= self.min.x
            && position.x <= self.max.x
            && position.y >= self.min.y
            && position.y <= self.max.y
    }
}

/// Integer hit-point meter. `current` always stays within `[0, maximum]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Health {
    current: u32,
    maximum: u32,
}

/// Result of applying damage to a [`Health`] meter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageOutcome {
    /// Hit points actually removed.
    pub applied: u32,
    pub remaining: u32,
    /// True when this hit took the meter from positive to zero.
    pub depleted: bool,
}

impl Health {
    /// Full meter.
    pub const fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    /// Meter with an explicit current value, clamped to `maximum`.
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    pub fn damage(&mut self, amount: u32) -> DamageOutcome {
        let was_alive = self.current > 0;
        let applied = amount.min(self.current);
        self.current -= applied;
        DamageOutcome {
            applied,
            remaining: self.current,
            depleted: was_alive && self.current == 0,
        }
    }

    /// Restores up to `amount`, returning the hit points actually gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.maximum - self.current);
        self.current += gained;
        gained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_saturates_at_both_ends() {
        let mut health = Health::full(5);

        let outcome = health.damage(3);
        assert_eq!(outcome.applied, 3);
        assert!(!outcome.depleted);

        let outcome = health.damage(10);
        assert_eq!(outcome.applied, 2);
        assert_eq!(outcome.remaining, 0);
        assert!(outcome.depleted);

        // Already empty: no second depletion.
        let outcome = health.damage(1);
        assert_eq!(outcome.applied, 0);
        assert!(!outcome.depleted);

        assert_eq!(health.heal(100), 5);
        assert_eq!(health.current(), 5);
        assert_eq!(health.heal(1), 0);
    }

    #[test]
    fn new_health_is_clamped() {
        assert_eq!(Health::new(30, 20).current(), 20);
    }

    #[test]
    fn direction_toward_clamps_to_unit_step() {
        let origin = Position::new(2, 2);
        assert_eq!(
            Direction::toward(origin, Position::new(7, 2)),
            Some(Direction::RIGHT)
        );
        assert_eq!(
            Direction::toward(origin, Position::new(0, 0)),
            Some(Direction::DOWN_LEFT)
        );
        assert_eq!(Direction::toward(origin, origin), None);
        assert_eq!(
            Direction::toward(Position::new(i32::MIN, 0), Position::new(i32::MAX, 0)),
            Some(Direction::RIGHT)
        );
    }

    #[test]
    fn distances() {
        let a = Position::new(0, 0);
        let b = Position::new(3, -4);
        assert_eq!(a.chebyshev(b), 4);
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(a.distance_sq(b), 25);
    }

    #[test]
    fn huge_radius_saturates() {
        let rect = CellRect::around(Position::new(-5, 7), u32::MAX);
        assert_eq!(rect.min, Position::new(i32::MIN, i32::MIN));
        assert_eq!(rect.max, Position::new(i32::MAX, i32::MAX));
        assert!(rect.contains(Position::new(i32::MAX, i32::MIN)));
    }

    #[test]
    fn rect_around_covers_three_by_three() {
        let rect = CellRect::around(Position::new(5, 5), 1);
        assert!(rect.contains(Position::new(4, 6)));
        assert!(rect.contains(Position::new(6, 4)));
        assert!(!rect.contains(Position::new(7, 5)));
    }
}
