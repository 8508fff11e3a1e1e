//! Topic-based event bus for session events.
//!
//! The session republishes ledger, stat and ship notifications on three
//! topics so hosts can subscribe only to what they render.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CombatEvent, EconomyEvent, StatsEvent};
