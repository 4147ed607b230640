//! Combat resolution.
//!
//! Enemy decisions and trap geometry are pure functions over the state and
//! the map. Damage application is the only place where hit points change;
//! the engine routes every hit through it so the game-over latch and enemy
//! removal happen in exactly one spot.

pub mod bullet;
pub mod damage;
pub mod enemy;
pub mod trap;

pub use bullet::{break_bullet, bullets_on};
pub use damage::{apply_enemy_damage, apply_player_damage, apply_player_heal};
pub use enemy::{EnemyDecision, decide};
pub use trap::{arm_trap, attack_cells, collect_victims, ray_cells, trigger_vision};
