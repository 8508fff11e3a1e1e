//! Topic-based event bus implementation.
//!
//! Delivery is synchronous: `publish` returns after every subscriber of the
//! topic has run, in subscription order.

use std::collections::HashMap;
use std::sync::mpsc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use super::types::{CombatEvent, EconomyEvent, StatsEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Points, offers and selections
    Economy,
    /// Stat changes of the player ship
    Stats,
    /// Shield and durability of the player ship
    Combat,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Economy, Topic::Stats, Topic::Combat];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Economy(EconomyEvent),
    Stats(StatsEvent),
    Combat(CombatEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Economy(_) => Topic::Economy,
            Event::Stats(_) => Topic::Stats,
            Event::Combat(_) => Topic::Combat,
        }
    }
}

type Subscriber = Box<dyn FnMut(&Event) + Send>;

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Clones share the same subscriber lists.
#[derive(Clone, Default)]
pub struct EventBus {
    channels: Arc<Mutex<HashMap<Topic, Vec<Subscriber>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish an event to its corresponding topic
    ///
    /// Subscribers run without the bus lock held, so they may subscribe or
    /// publish themselves. While a topic is dispatching, a nested publish on
    /// that same topic finds no subscribers.
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        let mut subscribers = {
            let mut channels = self.lock();
            match channels.get_mut(&topic) {
                Some(subscribers) if !subscribers.is_empty() => std::mem::take(subscribers),
                _ => {
                    // No subscribers for this topic - this is normal, not an error
                    tracing::trace!("No subscribers for topic {:?}", topic);
                    return;
                }
            }
        };

        for subscriber in subscribers.iter_mut() {
            subscriber(&event);
        }

        // Put the list back ahead of anything subscribed during dispatch.
        let mut channels = self.lock();
        let slot = channels.entry(topic).or_default();
        let added = std::mem::replace(slot, subscribers);
        slot.extend(added);
    }

    /// Subscribe a callback to a specific topic
    pub fn subscribe(&self, topic: Topic, subscriber: impl FnMut(&Event) + Send + 'static) {
        self.lock()
            .entry(topic)
            .or_default()
            .push(Box::new(subscriber));
    }

    /// Subscribe to a specific topic through a channel
    ///
    /// Returns a receiver that will only receive events for that topic.
    /// Events sent after the receiver is dropped are discarded.
    pub fn subscribe_channel(&self, topic: Topic) -> mpsc::Receiver<Event> {
        let (tx, rx) = mpsc::channel();
        self.subscribe(topic, move |event| {
            let _ = tx.send(event.clone());
        });
        rx
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, mpsc::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe_channel(topic)))
            .collect()
    }

    /// Number of subscribers on a topic.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.lock().get(&topic).map_or(0, Vec::len)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Topic, Vec<Subscriber>>> {
        self.channels.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let channels = self.lock();
        let mut counts: Vec<_> = channels.iter().map(|(t, s)| (*t, s.len())).collect();
        counts.sort_by_key(|(t, _)| *t as u8);
        f.debug_struct("EventBus").field("subscribers", &counts).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn events_reach_only_their_topic() {
        let bus = EventBus::new();
        let economy = bus.subscribe_channel(Topic::Economy);
        let combat = bus.subscribe_channel(Topic::Combat);

        bus.publish(Event::Economy(EconomyEvent::OfferClosed));

        assert_eq!(economy.try_recv(), Ok(Event::Economy(EconomyEvent::OfferClosed)));
        assert!(combat.try_recv().is_err());
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        let bus = EventBus::new();
        bus.publish(Event::Combat(CombatEvent::Died));
        assert_eq!(bus.subscriber_count(Topic::Combat), 0);
    }

    #[test]
    fn clones_share_subscribers() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        bus.subscribe(Topic::Combat, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let clone = bus.clone();
        clone.publish(Event::Combat(CombatEvent::ShieldDepleted));
        bus.publish(Event::Combat(CombatEvent::Died));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn subscribers_may_subscribe_during_dispatch() {
        let bus = EventBus::new();
        let (tx, stats) = mpsc::channel();
        let inner = bus.clone();
        let mut tx = Some(tx);
        bus.subscribe(Topic::Economy, move |_| {
            if let Some(tx) = tx.take() {
                inner.subscribe(Topic::Stats, move |event| {
                    let _ = tx.send(event.clone());
                });
                inner.subscribe(Topic::Economy, |_| {});
            }
        });

        bus.publish(Event::Economy(EconomyEvent::OfferClosed));
        assert_eq!(bus.subscriber_count(Topic::Economy), 2);
        assert_eq!(bus.subscriber_count(Topic::Stats), 1);

        let change = StatsEvent {
            field: starfall_core::StatField::MoveSpeed,
            previous: 5.0,
            current: 6.0,
            level: 1,
        };
        bus.publish(Event::Stats(change));
        assert_eq!(stats.try_recv(), Ok(Event::Stats(change)));
    }

    #[test]
    fn subscribers_may_publish_on_other_topics() {
        let bus = EventBus::new();
        let combat = bus.subscribe_channel(Topic::Combat);
        let inner = bus.clone();
        bus.subscribe(Topic::Economy, move |_| {
            inner.publish(Event::Combat(CombatEvent::Died));
        });

        bus.publish(Event::Economy(EconomyEvent::OfferClosed));
        assert_eq!(combat.try_recv(), Ok(Event::Combat(CombatEvent::Died)));
        assert_eq!(bus.subscriber_count(Topic::Economy), 1);
    }

    #[test]
    fn subscribe_multiple_returns_one_receiver_per_topic() {
        let bus = EventBus::new();
        let receivers = bus.subscribe_multiple(&Topic::ALL);
        assert_eq!(receivers.len(), 3);
        for topic in Topic::ALL {
            assert_eq!(bus.subscriber_count(topic), 1);
        }
    }
}
