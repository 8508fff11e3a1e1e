//! Stat System
//!
//! # Architecture
//!
//! ```text
//! [ StatField (closed enum) ]
//!      ↓
//! [ StatRegistry: default, increment, max level, display rule ]
//!      ↓
//! [ StatState: default + Σ applied deltas, per entity ]
//!      ↓
//! [ listeners: weapons, movement, durability model (via runtime) ]
//! ```
//!
//! ## Principles
//!
//! 1. **Data-driven**: every number comes from the stat table; nothing is keyed
//!    by hand-written per-field switches outside [`StatField::category`]
//! 2. **Derived values**: effective values are never set directly, only
//!    accumulated through [`StatState::apply_level`]
//! 3. **Synchronous notification**: listeners run before `apply_level` returns

pub mod definition;
pub mod error;
pub mod field;
pub mod registry;
pub mod state;

pub use crate::listeners::ListenerId;
pub use definition::StatDefinition;
pub use error::{ConfigError, ConfigViolation, LookupError};
pub use field::{StatCategory, StatField};
pub use registry::StatRegistry;
pub use state::{StatChange, StatState};
