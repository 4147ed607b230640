//! Topic-based event bus for runtime events.
//!
//! Core [`game_core::GameEvent`]s, sequencer milestones and overlay refreshes
//! are published to topics; consumers subscribe only to what they render.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::SequencerEvent;
