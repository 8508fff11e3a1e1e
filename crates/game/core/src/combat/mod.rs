//! Damage absorption, regeneration and death.
//!
//! [`DurabilityShieldModel`] owns the shield and durability pools of one
//! entity. It reads its capacities from survival stats and is kept in sync
//! by feeding it [`StatChange`](crate::stats::StatChange)s explicitly.

pub mod durability;
pub mod events;

pub use durability::{
    CapacityAdjust, DamageOutcome, DurabilityProfile, DurabilityShieldModel, RegenTimerMode,
    SimTime,
};
pub use events::DurabilityEvent;
