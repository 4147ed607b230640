use crate::combat::{self, EnemyDecision};
use crate::env::{GameEnv, OracleError};
use crate::state::{CellRect, EntityId, Occupant, OccupantKind, TurnPhase};

use super::{ArmCause, DamageSource, GameEngine, GameEvent};

/// Enemy, trap and hit point resolution for GameEngine.
impl<'a> GameEngine<'a> {
    /// Resolves one enemy's turn: attack if in reach, break a neighbouring
    /// bullet, otherwise a greedy step.
    ///
    /// Unknown ids and calls after game over do nothing.
    pub fn run_enemy(
        &mut self,
        env: GameEnv<'_>,
        enemy: EntityId,
    ) -> Result<Vec<GameEvent>, OracleError> {
        let map = env.map()?;
        let mut events = Vec::new();
        if self.state.turn.game_over {
            return Ok(events);
        }
        let Some(actor) = self.state.enemy(enemy).filter(|actor| actor.is_alive()) else {
            tracing::debug!(%enemy, "enemy no longer registered");
            return Ok(events);
        };

        let from = actor.position;
        let power = actor.attack_power;
        let decision = combat::decide(actor, self.state, map, env.config().distance_metric);
        match decision {
            EnemyDecision::Attack { target } => {
                events.push(GameEvent::EnemyAttacked { enemy, target });
                combat::apply_player_damage(
                    self.state,
                    power,
                    DamageSource::Enemy(enemy),
                    &mut events,
                );
            }
            EnemyDecision::BreakBullet { bullet, .. } => {
                combat::break_bullet(self.state, bullet, enemy, &mut events);
            }
            EnemyDecision::Step { to } => {
                let occupant = Occupant::new(enemy, OccupantKind::Enemy);
                if !self.state.world.tile_map.relocate(from, to, occupant) {
                    tracing::debug!(%enemy, %to, "enemy step rejected by occupancy");
                    events.push(GameEvent::EnemyIdle { enemy });
                    return Ok(events);
                }
                if let Some(actor) = self.state.enemy_mut(enemy) {
                    actor.position = to;
                }
                events.push(GameEvent::EnemyMoved { enemy, from, to });
            }
            EnemyDecision::Idle => {
                tracing::debug!(%enemy, position = %from, "enemy has no improving step");
                events.push(GameEvent::EnemyIdle { enemy });
            }
        }
        Ok(events)
    }

    /// Fires a trap if it is ready on `phase`; otherwise does nothing.
    ///
    /// Every distinct player or enemy on the hit cells takes the trap's
    /// attack power once, and bullets on those cells are destroyed.
    /// Afterwards the trap disarms (when configured) and reloads its
    /// countdown.
    pub fn run_trap(
        &mut self,
        env: GameEnv<'_>,
        trap: EntityId,
        phase: TurnPhase,
    ) -> Result<Vec<GameEvent>, OracleError> {
        let map = env.map()?;
        let mut events = Vec::new();
        if self.state.turn.game_over {
            return Ok(events);
        }
        let Some(source) = self.state.trap(trap) else {
            tracing::debug!(%trap, "trap no longer registered");
            return Ok(events);
        };
        if !source.is_ready(phase) {
            tracing::debug!(
                %trap,
                armed = source.is_armed(),
                turns_until_fire = source.turns_until_fire(),
                "trap not ready"
            );
            return Ok(events);
        }

        let power = source.settings.attack_power;
        let cells = combat::attack_cells(source, self.state, map);
        let victims = combat::collect_victims(self.state, &cells);
        let bullets = combat::bullets_on(self.state, &cells);
        events.push(GameEvent::TrapFired {
            trap,
            cells,
            victims: victims.iter().map(|victim| victim.id).collect(),
        });

        for victim in victims {
            match victim.kind {
                OccupantKind::Player => combat::apply_player_damage(
                    self.state,
                    power,
                    DamageSource::Trap(trap),
                    &mut events,
                ),
                _ => {
                    combat::apply_enemy_damage(self.state, victim.id, power, &mut events);
                }
            }
        }
        for bullet in bullets {
            combat::break_bullet(self.state, bullet, trap, &mut events);
        }

        if let Some(source) = self.state.trap_mut(trap) {
            source.finish_fire();
        }
        Ok(events)
    }

    pub fn damage_player(&mut self, amount: u32, source: DamageSource) -> Vec<GameEvent> {
        let mut events = Vec::new();
        combat::apply_player_damage(self.state, amount, source, &mut events);
        events
    }

    pub fn damage_enemy(&mut self, enemy: EntityId, amount: u32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        combat::apply_enemy_damage(self.state, enemy, amount, &mut events);
        events
    }

    /// Restores player hit points. Ignored after game over.
    pub fn heal_player(&mut self, amount: u32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        combat::apply_player_heal(self.state, amount, &mut events);
        events
    }

    pub fn arm_trap(&mut self, trap: EntityId, cause: ArmCause) -> Vec<GameEvent> {
        let mut events = Vec::new();
        combat::arm_trap(self.state, trap, cause, &mut events);
        events
    }

    /// Arms every disarmed trap inside `area`.
    pub fn trigger_vision(&mut self, area: CellRect) -> Vec<GameEvent> {
        let mut events = Vec::new();
        combat::trigger_vision(self.state, area, &mut events);
        events
    }
}
