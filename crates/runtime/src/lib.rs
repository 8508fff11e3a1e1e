//! Runtime composition for a Starfall run.
//!
//! This crate wires the pure rules of `starfall-core` and the tables of
//! `starfall-content` into a single [`RunSession`]. Hosts drive it from their
//! frame loop and subscribe to events through the [`EventBus`].
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the session and its builder
//! - [`api`] exposes the error types and the shared (mutex-guarded) session
//! - [`events`] provides the topic-based event bus
//! - [`rng`] adapts `rand` to the core random source
pub mod api;
pub mod events;
pub mod rng;
pub mod session;

pub use api::{Result, RuntimeError, SharedSession};
pub use events::{CombatEvent, EconomyEvent, Event, EventBus, StatsEvent, Topic};
pub use rng::SessionRng;
pub use session::{RunSession, SessionBuilder, SessionConfig};
