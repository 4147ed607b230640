//! Greedy one-step enemy behaviour.

use crate::config::DistanceMetric;
use crate::env::MapOracle;
use crate::state::{EnemyState, EntityId, GameState, Position};

/// What an enemy does with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyDecision {
    /// Strike the player standing on `target`.
    Attack { target: Position },
    /// Smash the bullet lying on `at` instead of moving.
    BreakBullet { bullet: EntityId, at: Position },
    /// Step onto `to`.
    Step { to: Position },
    Idle,
}

/// Picks an enemy's action for this turn.
///
/// Attacks when the kind's reach predicate covers the player. Failing that,
/// breaks the first bullet found along the kind's step directions. Otherwise
/// takes the first candidate step, in the kind's fixed order, that lands on
/// an enterable cell strictly closer to the player. No lookahead.
pub fn decide<M>(
    enemy: &EnemyState,
    state: &GameState,
    map: &M,
    metric: DistanceMetric,
) -> EnemyDecision
where
    M: MapOracle + ?Sized,
{
    let player = state.player.position;
    if enemy.kind.can_attack(enemy.position, player) {
        return EnemyDecision::Attack { target: player };
    }

    let bullet = enemy.kind.directions().iter().find_map(|direction| {
        let at = enemy.position.step(*direction);
        state.bullet_at(at).map(|bullet| (bullet, at))
    });
    if let Some((bullet, at)) = bullet {
        return EnemyDecision::BreakBullet { bullet, at };
    }

    let current = metric.measure(enemy.position, player);
    enemy
        .kind
        .directions()
        .iter()
        .map(|direction| enemy.position.step(*direction))
        .find(|cell| state.can_enter(map, *cell) && metric.measure(*cell, player) < current)
        .map_or(EnemyDecision::Idle, |to| EnemyDecision::Step { to })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{StaticMap, TerrainKind};
    use crate::state::{EnemyKind, EnemyTemplate, EntityId, TrapSettings};

    fn setup(player: Position, enemy: Position, kind: EnemyKind) -> (GameState, EntityId) {
        let mut state = GameState::with_player(player, &GameConfig::default());
        let id = state
            .add_enemy(enemy, kind, EnemyTemplate::default())
            .unwrap();
        (state, id)
    }

    fn decide_for(state: &GameState, id: EntityId, map: &StaticMap) -> EnemyDecision {
        let enemy = state.enemy(id).unwrap();
        decide(enemy, state, map, DistanceMetric::Euclidean)
    }

    #[test]
    fn adjacent_orthogonal_enemy_attacks() {
        let map = StaticMap::open(5, 5);
        let (state, id) = setup(Position::new(0, 0), Position::new(1, 0), EnemyKind::Orthogonal);
        assert_eq!(
            decide_for(&state, id, &map),
            EnemyDecision::Attack {
                target: Position::new(0, 0)
            }
        );
    }

    #[test]
    fn diagonal_enemy_does_not_attack_orthogonal_neighbour() {
        let map = StaticMap::open(5, 5);
        let (state, id) = setup(Position::new(2, 2), Position::new(3, 2), EnemyKind::Diagonal);
        // (3,2) -> (2,2) is orthogonal; best diagonal steps keep the distance
        // at sqrt(2) or worse, so nothing strictly improves.
        assert_eq!(decide_for(&state, id, &map), EnemyDecision::Idle);
    }

    #[test]
    fn first_improving_direction_wins() {
        let map = StaticMap::open(5, 5);
        // Player up-right of the enemy: up is evaluated before right.
        let (state, id) = setup(Position::new(3, 3), Position::new(1, 1), EnemyKind::Orthogonal);
        assert_eq!(
            decide_for(&state, id, &map),
            EnemyDecision::Step {
                to: Position::new(1, 2)
            }
        );
    }

    #[test]
    fn walls_and_occupants_are_skipped() {
        let mut map = StaticMap::open(5, 5);
        map.set_terrain(Position::new(1, 2), TerrainKind::Wall);
        let (mut state, id) =
            setup(Position::new(3, 3), Position::new(1, 1), EnemyKind::Orthogonal);
        state
            .add_trap(Position::new(2, 1), TrapSettings::default())
            .unwrap();

        assert_eq!(decide_for(&state, id, &map), EnemyDecision::Idle);
    }

    #[test]
    fn void_cells_are_not_entered() {
        let (map, _) = StaticMap::from_rows(&["...", "._.", "..."]).unwrap();
        // Enemy at the bottom middle, player at the top middle, hole in between.
        let (state, id) = setup(Position::new(1, 2), Position::new(1, 0), EnemyKind::Orthogonal);
        assert_eq!(decide_for(&state, id, &map), EnemyDecision::Idle);
    }

    #[test]
    fn diagonal_enemy_closes_in() {
        let map = StaticMap::open(6, 6);
        let (state, id) = setup(Position::new(0, 0), Position::new(3, 3), EnemyKind::Diagonal);
        // Up-right, down-right and up-left all move away or keep the distance.
        assert_eq!(
            decide_for(&state, id, &map),
            EnemyDecision::Step {
                to: Position::new(2, 2)
            }
        );
    }

    #[test]
    fn metric_changes_what_counts_as_closer() {
        let map = StaticMap::open(6, 6);
        let (state, id) = setup(Position::new(0, 0), Position::new(2, 1), EnemyKind::Orthogonal);
        let enemy = state.enemy(id).unwrap();

        // Euclidean: down to (2,0) shortens 5 -> 4.
        assert_eq!(
            decide(enemy, &state, &map, DistanceMetric::Euclidean),
            EnemyDecision::Step {
                to: Position::new(2, 0)
            }
        );
        // Chebyshev: down keeps the distance at 2, only left improves it.
        assert_eq!(
            decide(enemy, &state, &map, DistanceMetric::Chebyshev),
            EnemyDecision::Step {
                to: Position::new(1, 1)
            }
        );
    }

    #[test]
    fn neighbouring_bullet_is_broken_before_stepping() {
        let map = StaticMap::open(5, 5);
        let (mut state, id) =
            setup(Position::new(3, 3), Position::new(1, 1), EnemyKind::Orthogonal);
        let behind = state.add_bullet(Position::new(0, 1)).unwrap();

        assert_eq!(
            decide_for(&state, id, &map),
            EnemyDecision::BreakBullet {
                bullet: behind,
                at: Position::new(0, 1)
            }
        );
    }

    #[test]
    fn attack_beats_bullet_and_reach_shape_limits_it() {
        let map = StaticMap::open(5, 5);
        let (mut state, id) = setup(Position::new(1, 0), Position::new(1, 1), EnemyKind::Orthogonal);
        state.add_bullet(Position::new(1, 2)).unwrap();
        assert_eq!(
            decide_for(&state, id, &map),
            EnemyDecision::Attack {
                target: Position::new(1, 0)
            }
        );

        // A diagonal enemy ignores a bullet on an orthogonal neighbour but
        // still may not walk over one.
        let (mut state, id) = setup(Position::new(4, 4), Position::new(2, 2), EnemyKind::Diagonal);
        state.add_bullet(Position::new(2, 3)).unwrap();
        state.add_bullet(Position::new(3, 3)).unwrap();
        let blocked = state.bullet_at(Position::new(3, 3)).unwrap();
        assert_eq!(
            decide_for(&state, id, &map),
            EnemyDecision::BreakBullet {
                bullet: blocked,
                at: Position::new(3, 3)
            }
        );
    }

    #[test]
    fn bullets_block_enemy_steps() {
        let map = StaticMap::open(6, 6);
        let mut state = GameState::with_player(Position::new(5, 2), &GameConfig::default());
        state.add_bullet(Position::new(3, 2)).unwrap();
        assert!(!state.can_enter(&map, Position::new(3, 2)));
    }
}
