//! Frame-driven orchestration for the grid tactics rules.
//!
//! This crate wraps [`game_core`] with everything that needs a clock or I/O:
//! - [`sequencer`] runs the turn state machine on `tick(dt)`
//! - [`events`] provides the topic-based event bus consumers subscribe to
//! - [`scenario`] and [`config`] load RON documents
//! - [`logging`] installs the tracing subscriber
pub mod api;
pub mod config;
pub mod events;
pub mod logging;
pub mod scenario;
pub mod sequencer;

pub use api::{Result, RuntimeError};
pub use config::{Pacing, RuntimeConfig};
pub use events::{Event, EventBus, SequencerEvent, Topic};
pub use scenario::{EnemyPlacement, Scenario, TrapPlacement};
pub use sequencer::TurnSequencer;
