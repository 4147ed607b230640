//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use game_core::{AttackOverlay, GameEvent};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::SequencerEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Phase changes, input locking and game over
    Turn,
    /// Moves, attacks, damage and trap shots
    Combat,
    /// Refreshed attack-range overlays
    Overlay,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Turn, Topic::Combat, Topic::Overlay];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Game(GameEvent),
    Sequencer(SequencerEvent),
    Overlay(AttackOverlay),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Game(GameEvent::PhaseEntered { .. } | GameEvent::GameOver { .. }) => {
                Topic::Turn
            }
            Event::Game(_) => Topic::Combat,
            Event::Sequencer(_) => Topic::Turn,
            Event::Overlay(_) => Topic::Overlay,
        }
    }
}

/// Topic-based event bus
///
/// Consumers subscribe to the topics they care about. Every topic channel is
/// created up front, so the set of senders never changes after construction.
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<Event>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let channels: HashMap<Topic, broadcast::Sender<Event>> = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity).0))
            .collect();

        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if let Some(tx) = self.channels.get(&topic)
            && tx.send(event).is_err()
        {
            // no subscribers on this topic
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Publishes each core event in order.
    pub fn publish_all(&self, events: impl IntoIterator<Item = GameEvent>) {
        for event in events {
            self.publish(Event::Game(event));
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns `None` only if the topic has no channel, which cannot happen
    /// for buses built through [`EventBus::with_capacity`].
    pub fn subscribe(&self, topic: Topic) -> Option<broadcast::Receiver<Event>> {
        self.channels.get(&topic).map(broadcast::Sender::subscribe)
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .filter_map(|&topic| self.subscribe(topic).map(|rx| (topic, rx)))
            .collect()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
