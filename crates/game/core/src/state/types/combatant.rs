use super::{Direction, EntityId, Health, Position};

/// Behaviour variant of an enemy. Fixes both its step set and its melee reach.
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
pub enum EnemyKind {
    /// Moves and strikes along the four orthogonal neighbours.
    #[default]
    Orthogonal,
    /// Moves and strikes along the four diagonal neighbours only.
    Diagonal,
}

impl EnemyKind {
    /// Candidate steps in evaluation order.
    pub fn directions(self) -> &'static [Direction; 4] {
        match self {
            EnemyKind::Orthogonal => &Direction::ORTHOGONAL,
            EnemyKind::Diagonal => &Direction::DIAGONAL,
        }
    }

    /// Adjacency predicate deciding whether `from` can strike `target`.
    pub fn can_attack(self, from: Position, target: Position) -> bool {
        let (dx, dy) = from.abs_delta(target);
        match self {
            EnemyKind::Orthogonal => dx + dy == 1,
            EnemyKind::Diagonal => dx == 1 && dy == 1,
        }
    }
}

/// The controllable character. Always [`EntityId::PLAYER`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub position: Position,
    pub health: Health,
    pub attack_power: u32,
}

impl PlayerState {
    pub fn new(position: Position, max_hp: u32, attack_power: u32) -> Self {
        Self {
            position,
            health: Health::full(max_hp),
            attack_power,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.health.is_depleted()
    }
}

/// Registered enemy combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyState {
    pub id: EntityId,
    pub position: Position,
    pub kind: EnemyKind,
    pub health: Health,
    pub attack_power: u32,
}

impl EnemyState {
    pub fn new(id: EntityId, position: Position, kind: EnemyKind, template: EnemyTemplate) -> Self {
        Self {
            id,
            position,
            kind,
            health: Health::full(template.max_hp),
            attack_power: template.attack_power,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.health.is_depleted()
    }

    /// Neighbour cells this enemy would strike from where it stands.
    pub fn attack_preview_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.kind
            .directions()
            .iter()
            .map(move |dir| self.position.step(*dir))
            .filter(move |cell| self.kind.can_attack(self.position, *cell))
    }
}

/// Per-enemy tunables supplied at spawn time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnemyTemplate {
    pub max_hp: u32,
    pub attack_power: u32,
}

impl EnemyTemplate {
    pub const DEFAULT_MAX_HP: u32 = 5;
    pub const DEFAULT_ATTACK_POWER: u32 = 1;
}

impl Default for EnemyTemplate {
    fn default() -> Self {
        Self {
            max_hp: Self::DEFAULT_MAX_HP,
            attack_power: Self::DEFAULT_ATTACK_POWER,
        }
    }
}
